//! TMAP request and response models
//!
//! Outbound request bodies and the raw JSON shapes returned by the
//! keyword search and pedestrian routing endpoints, together with their
//! conversion into domain types.

use domain::entities::{Feature, Geometry, PointOfInterest, Properties, RouteResponse};
use domain::value_objects::GeoLocation;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TmapError;

/// Number of POIs requested per search page
pub const POI_PAGE_SIZE: u8 = 15;

/// Maximum number of waypoints the pedestrian endpoint accepts
pub const MAX_WAYPOINTS: usize = 5;

/// Coordinate system used for requests and responses
const COORD_TYPE: &str = "WGS84GEO";

/// Travel mode of a route request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    /// Walking paths only
    #[default]
    Pedestrian,
}

impl TravelMode {
    /// Endpoint path for this mode
    #[must_use]
    pub const fn route_path(&self) -> &'static str {
        match self {
            Self::Pedestrian => "/tmap/routes/pedestrian",
        }
    }
}

/// Route preference understood by the pedestrian endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOption {
    /// Provider's recommended route
    #[default]
    Recommended,
    /// Recommended, preferring main roads
    MainRoadFirst,
    /// Shortest distance
    Shortest,
    /// Shortest distance avoiding stairs
    ShortestNoStairs,
}

impl SearchOption {
    /// Wire code of the option
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Recommended => "0",
            Self::MainRoadFirst => "4",
            Self::Shortest => "10",
            Self::ShortestNoStairs => "30",
        }
    }
}

/// Parameters of a pedestrian route request
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    /// Starting coordinate
    pub start: GeoLocation,
    /// Destination coordinate
    pub end: GeoLocation,
    /// Display name of the start
    pub start_name: String,
    /// Display name of the destination
    pub end_name: String,
    /// Travel mode
    pub mode: TravelMode,
    /// Route preference
    pub search_option: SearchOption,
    /// Intermediate stops, at most [`MAX_WAYPOINTS`]
    pub waypoints: Vec<GeoLocation>,
    /// Current heading in degrees, improves the first instruction
    pub angle: Option<u16>,
    /// Walking speed in km/h
    pub speed: Option<u8>,
}

impl RouteRequest {
    /// Create a pedestrian request with default options
    #[must_use]
    pub fn new(
        start: GeoLocation,
        start_name: impl Into<String>,
        end: GeoLocation,
        end_name: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            start_name: start_name.into(),
            end_name: end_name.into(),
            mode: TravelMode::Pedestrian,
            search_option: SearchOption::default(),
            waypoints: Vec::new(),
            angle: None,
            speed: None,
        }
    }

    /// Check the request before sending it
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for empty names or too many waypoints.
    pub fn validate(&self) -> Result<(), TmapError> {
        if self.start_name.trim().is_empty() {
            return Err(TmapError::InvalidRequest(
                "start name must not be empty".to_string(),
            ));
        }
        if self.end_name.trim().is_empty() {
            return Err(TmapError::InvalidRequest(
                "end name must not be empty".to_string(),
            ));
        }
        if self.waypoints.len() > MAX_WAYPOINTS {
            return Err(TmapError::InvalidRequest(format!(
                "at most {MAX_WAYPOINTS} waypoints are supported, got {}",
                self.waypoints.len()
            )));
        }
        Ok(())
    }

    /// JSON body as expected by the routing endpoint
    pub(crate) fn to_body(&self) -> RouteRequestBody<'_> {
        let pass_list = if self.waypoints.is_empty() {
            None
        } else {
            Some(
                self.waypoints
                    .iter()
                    .map(|w| format!("{},{}", w.format_lon(), w.format_lat()))
                    .collect::<Vec<_>>()
                    .join("_"),
            )
        };

        RouteRequestBody {
            start_x: self.start.format_lon(),
            start_y: self.start.format_lat(),
            end_x: self.end.format_lon(),
            end_y: self.end.format_lat(),
            start_name: &self.start_name,
            end_name: &self.end_name,
            req_coord_type: COORD_TYPE,
            res_coord_type: COORD_TYPE,
            search_option: self.search_option.code(),
            sort: "index",
            pass_list,
            angle: self.angle,
            speed: self.speed,
        }
    }
}

/// Serialized form of [`RouteRequest`]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RouteRequestBody<'a> {
    start_x: String,
    start_y: String,
    end_x: String,
    end_y: String,
    start_name: &'a str,
    end_name: &'a str,
    req_coord_type: &'static str,
    res_coord_type: &'static str,
    search_option: &'static str,
    sort: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pass_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    angle: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<u8>,
}

/// Query parameters of a keyword search
pub(crate) fn poi_search_params(
    query: &str,
    center: &GeoLocation,
    page: u32,
) -> Vec<(&'static str, String)> {
    vec![
        ("version", "1".to_string()),
        ("searchKeyword", query.to_string()),
        ("searchType", "all".to_string()),
        ("page", page.to_string()),
        ("count", POI_PAGE_SIZE.to_string()),
        ("resCoordType", COORD_TYPE.to_string()),
        ("reqCoordType", COORD_TYPE.to_string()),
        ("multiPoint", "N".to_string()),
        ("searchtypCd", "R".to_string()),
        ("radius", "0".to_string()),
        ("poiGroupYn", "N".to_string()),
        ("centerLon", center.format_lon()),
        ("centerLat", center.format_lat()),
    ]
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPoiResponse {
    pub(crate) search_poi_info: RawSearchPoiInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSearchPoiInfo {
    #[serde(default)]
    pub(crate) total_count: Option<String>,
    pub(crate) pois: RawPois,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPois {
    #[serde(default)]
    pub(crate) poi: Vec<RawPoi>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RawPoi {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) noor_lat: Option<String>,
    pub(crate) noor_lon: Option<String>,
    pub(crate) front_lat: Option<String>,
    pub(crate) front_lon: Option<String>,
    pub(crate) upper_addr_name: Option<String>,
    pub(crate) middle_addr_name: Option<String>,
    pub(crate) lower_addr_name: Option<String>,
    pub(crate) detail_addr_name: Option<String>,
    pub(crate) first_no: Option<String>,
    pub(crate) second_no: Option<String>,
}

impl RawPoi {
    fn location(&self) -> Option<GeoLocation> {
        let parse = |lat: &Option<String>, lon: &Option<String>| {
            GeoLocation::parse(lat.as_deref()?, lon.as_deref()?)
        };
        parse(&self.noor_lat, &self.noor_lon).or_else(|| parse(&self.front_lat, &self.front_lon))
    }

    fn address(&self) -> Option<String> {
        let mut address = [
            &self.upper_addr_name,
            &self.middle_addr_name,
            &self.lower_addr_name,
            &self.detail_addr_name,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref().map(str::trim))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        let lot = |no: &Option<String>| {
            no.as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty() && *n != "0")
                .map(str::to_string)
        };
        if let Some(first) = lot(&self.first_no) {
            if !address.is_empty() {
                address.push(' ');
            }
            address.push_str(&first);
            if let Some(second) = lot(&self.second_no) {
                address.push('-');
                address.push_str(&second);
            }
        }

        (!address.is_empty()).then_some(address)
    }

    pub(crate) fn into_point_of_interest(self) -> PointOfInterest {
        let location = self.location();
        let address = self.address();
        PointOfInterest {
            id: self.id,
            name: self.name,
            location,
            address,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRouteResponse {
    #[serde(default)]
    pub(crate) features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFeature {
    pub(crate) geometry: RawGeometry,
    #[serde(default)]
    pub(crate) properties: RawProperties,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawGeometry {
    #[serde(rename = "type")]
    pub(crate) kind: String,
    #[serde(default)]
    pub(crate) coordinates: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RawProperties {
    pub(crate) description: Option<String>,
    pub(crate) turn_type: Option<i32>,
    pub(crate) road_type: Option<i32>,
    pub(crate) total_distance: Option<u32>,
    pub(crate) total_time: Option<u32>,
    pub(crate) distance: Option<u32>,
    pub(crate) time: Option<u32>,
    pub(crate) name: Option<String>,
    pub(crate) point_type: Option<String>,
    pub(crate) index: Option<u32>,
}

impl From<RawProperties> for Properties {
    fn from(raw: RawProperties) -> Self {
        Self {
            description: raw.description,
            turn_type: raw.turn_type,
            road_type: raw.road_type,
            total_distance: raw.total_distance,
            total_time: raw.total_time,
            distance: raw.distance,
            time: raw.time,
            name: raw.name.filter(|n| !n.is_empty()),
            point_type: raw.point_type,
            index: raw.index,
        }
    }
}

impl RawGeometry {
    /// Convert to a domain geometry; `Ok(None)` for kinds a route never uses
    fn into_geometry(self) -> Result<Option<Geometry>, TmapError> {
        let geometry = match self.kind.as_str() {
            "Point" => Geometry::Point(
                serde_json::from_value(self.coordinates)
                    .map_err(|e| TmapError::ParseError(format!("Invalid Point coordinates: {e}")))?,
            ),
            "LineString" => Geometry::LineString(serde_json::from_value(self.coordinates).map_err(
                |e| TmapError::ParseError(format!("Invalid LineString coordinates: {e}")),
            )?),
            other => {
                debug!(kind = %other, "Skipping unsupported geometry");
                return Ok(None);
            },
        };
        Ok(Some(geometry))
    }
}

impl RawRouteResponse {
    pub(crate) fn into_route(self) -> Result<RouteResponse, TmapError> {
        let mut features = Vec::with_capacity(self.features.len());
        for raw in self.features {
            if let Some(geometry) = raw.geometry.into_geometry()? {
                features.push(Feature {
                    geometry,
                    properties: raw.properties.into(),
                });
            }
        }
        Ok(RouteResponse::new(features))
    }
}
