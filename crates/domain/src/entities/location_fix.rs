//! A single position report from the device

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// Position at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    /// Reported coordinate
    pub location: GeoLocation,
    /// When the platform took the fix
    pub timestamp: DateTime<Utc>,
    /// Horizontal accuracy radius in meters, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_m: Option<f64>,
}

impl LocationFix {
    /// Create a fix without accuracy information
    #[must_use]
    pub const fn new(location: GeoLocation, timestamp: DateTime<Utc>) -> Self {
        Self {
            location,
            timestamp,
            accuracy_m: None,
        }
    }

    /// Attach an accuracy radius
    #[must_use]
    pub const fn with_accuracy(mut self, accuracy_m: f64) -> Self {
        self.accuracy_m = Some(accuracy_m);
        self
    }
}
