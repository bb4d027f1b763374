//! Compass heading value objects
//!
//! Devices report two headings: one relative to true north and one relative
//! to magnetic north. A negative true heading means the platform had no valid
//! reading (it reports `-1`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A direction in degrees, normalised into `[0, 360)`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Heading(f64);

impl Heading {
    /// Create a heading, wrapping any finite angle into `[0, 360)`
    ///
    /// Non-finite input yields north.
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        if !degrees.is_finite() {
            return Self(0.0);
        }
        let wrapped = degrees.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        if wrapped >= 360.0 {
            Self(0.0)
        } else {
            Self(wrapped)
        }
    }

    /// Direction in degrees
    #[must_use]
    pub const fn degrees(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

/// Raw heading reading as delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingReading {
    /// Heading relative to true north, negative when unavailable
    pub true_heading: f64,
    /// Heading relative to magnetic north
    pub magnetic_heading: f64,
}

impl HeadingReading {
    /// Create a reading from both platform values
    #[must_use]
    pub const fn new(true_heading: f64, magnetic_heading: f64) -> Self {
        Self {
            true_heading,
            magnetic_heading,
        }
    }

    /// Whether the true heading carries a valid value
    #[must_use]
    pub fn has_true_heading(&self) -> bool {
        self.true_heading >= 0.0
    }

    /// Pick the heading to display: true north if valid, magnetic otherwise
    #[must_use]
    pub fn resolve(&self) -> Heading {
        if self.has_true_heading() {
            Heading::from_degrees(self.true_heading)
        } else {
            Heading::from_degrees(self.magnetic_heading)
        }
    }
}
