//! Pedestrian route model
//!
//! A route is an ordered list of features. Point features mark maneuvers
//! (they carry the `turnType` and the spoken description), line features
//! carry the path geometry between them together with the road type.

use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoLocation, RoadType, TurnType};

/// Geometry of a single route feature, coordinates in `[lon, lat]` order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// A maneuver point
    Point([f64; 2]),
    /// A path segment
    LineString(Vec<[f64; 2]>),
}

impl Geometry {
    /// Name of the geometry kind as used on the wire
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Point(_) => "Point",
            Self::LineString(_) => "LineString",
        }
    }
}

/// Maneuver and segment attributes of a feature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    /// Free-text guidance, e.g. "보행자도로를 따라 95m 이동"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Maneuver code, see [`TurnType`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_type: Option<i32>,
    /// Road classification code, see [`RoadType`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road_type: Option<i32>,
    /// Whole-route distance in meters (first feature only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<u32>,
    /// Whole-route duration in seconds (first feature only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<u32>,
    /// Segment distance in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    /// Segment duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u32>,
    /// Street or facility name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Point kind, e.g. `SP` (start), `EP` (end), `GP` (guidance)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_type: Option<String>,
    /// Position of the feature in the route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

impl Properties {
    /// Classified maneuver code, if present
    #[must_use]
    pub fn turn(&self) -> Option<TurnType> {
        self.turn_type.map(TurnType::from_code)
    }

    /// Classified road type, if present
    #[must_use]
    pub fn road(&self) -> Option<RoadType> {
        self.road_type.map(RoadType::from_code)
    }
}

/// One point or segment of a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Shape of the feature
    pub geometry: Geometry,
    /// Attributes of the feature
    pub properties: Properties,
}

impl Feature {
    /// Whether this is a maneuver point
    #[must_use]
    pub const fn is_point(&self) -> bool {
        matches!(self.geometry, Geometry::Point(_))
    }

    /// Coordinate of a point feature
    #[must_use]
    pub fn point_location(&self) -> Option<GeoLocation> {
        match self.geometry {
            Geometry::Point([lon, lat]) => GeoLocation::new(lat, lon).ok(),
            Geometry::LineString(_) => None,
        }
    }
}

/// Totals of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Total walking distance in meters
    pub total_distance_m: u32,
    /// Total walking time in seconds
    pub total_time_secs: u32,
}

impl RouteSummary {
    /// Walking time rounded up to whole minutes
    #[must_use]
    pub const fn total_minutes(&self) -> u32 {
        self.total_time_secs.div_ceil(60)
    }
}

/// A decoded route, received once per route request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    /// Features in route order
    pub features: Vec<Feature>,
}

impl RouteResponse {
    /// Create a route from its features
    #[must_use]
    pub const fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Point features that carry a description, in route order
    pub fn maneuver_points(&self) -> impl Iterator<Item = &Feature> {
        self.features
            .iter()
            .filter(|f| f.is_point() && f.properties.description.is_some())
    }

    /// Route totals from the first feature that reports both
    #[must_use]
    pub fn summary(&self) -> Option<RouteSummary> {
        self.features.iter().find_map(|f| {
            Some(RouteSummary {
                total_distance_m: f.properties.total_distance?,
                total_time_secs: f.properties.total_time?,
            })
        })
    }

    /// Path to draw on a map: all line coordinates joined, without repeats
    #[must_use]
    pub fn polyline(&self) -> Vec<GeoLocation> {
        let mut points: Vec<GeoLocation> = Vec::new();
        for feature in &self.features {
            let Geometry::LineString(ref coords) = feature.geometry else {
                continue;
            };
            for &[lon, lat] in coords {
                let Ok(location) = GeoLocation::new(lat, lon) else {
                    continue;
                };
                if points.last() != Some(&location) {
                    points.push(location);
                }
            }
        }
        points
    }
}
