//! Pedestrian routing port
//!
//! Defines the interface for requesting a walking route between two points.
//! Adapters in the infrastructure layer implement this port using a routing API.

use async_trait::async_trait;
use domain::DomainError;
use domain::entities::{PointOfInterest, RouteResponse};
use domain::value_objects::{GeoLocation, Heading};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Route preference for a walking route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutePreference {
    /// Provider's recommendation
    #[default]
    Recommended,
    /// Prefer main roads
    MainRoadFirst,
    /// Shortest distance
    Shortest,
    /// Shortest distance without stairs
    AvoidStairs,
}

/// Options for a route request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteQuery {
    /// Start coordinate
    pub start: GeoLocation,
    /// Destination coordinate
    pub end: GeoLocation,
    /// Display name of the start
    pub start_name: String,
    /// Display name of the destination
    pub end_name: String,
    /// Route preference
    pub preference: RoutePreference,
    /// Intermediate stops in visiting order
    pub waypoints: Vec<GeoLocation>,
    /// Heading of the walker at the start, if known
    pub heading: Option<Heading>,
}

impl RouteQuery {
    /// Create a query between two coordinates
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
            preference: RoutePreference::default(),
            waypoints: Vec::new(),
            heading: None,
        }
    }

    /// Build a query from a starting point and a destination
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if either POI has no coordinate.
    pub fn between(from: &PointOfInterest, to: &PointOfInterest) -> Result<Self, DomainError> {
        let start = from.location.ok_or_else(|| {
            DomainError::ValidationError(format!("starting point '{}' has no coordinate", from.name))
        })?;
        let end = to.location.ok_or_else(|| {
            DomainError::ValidationError(format!("destination '{}' has no coordinate", to.name))
        })?;
        Ok(Self::new(start, from.name.clone(), end, to.name.clone()))
    }

    /// Set the route preference
    #[must_use]
    pub const fn with_preference(mut self, preference: RoutePreference) -> Self {
        self.preference = preference;
        self
    }

    /// Set the walker's heading
    #[must_use]
    pub const fn with_heading(mut self, heading: Heading) -> Self {
        self.heading = Some(heading);
        self
    }

    /// Add a waypoint
    #[must_use]
    pub fn via(mut self, waypoint: GeoLocation) -> Self {
        self.waypoints.push(waypoint);
        self
    }
}

/// Port for pedestrian routing
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutePort: Send + Sync {
    /// Request a walking route
    async fn fetch_route(&self, query: &RouteQuery) -> Result<RouteResponse, ApplicationError>;
}
