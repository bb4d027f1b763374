//! Road classification of a route segment

use serde::{Deserialize, Serialize};

/// Road type code attached to route line segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadType {
    /// Codes 21-24, the pedestrian network variants
    Pedestrian(i32),
    /// Any other code
    Other(i32),
}

impl RoadType {
    /// Classify a raw provider code
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            21..=24 => Self::Pedestrian(code),
            _ => Self::Other(code),
        }
    }

    /// Display label, empty for unclassified roads
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pedestrian(_) => "보행자 도로",
            Self::Other(_) => "",
        }
    }
}
