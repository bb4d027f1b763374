//! Point of interest entity

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::GeoLocation;

/// Name used for the starting point derived from the device location
pub const CURRENT_LOCATION_NAME: &str = "현재 위치";

/// A named, searchable location returned by the POI search
///
/// Immutable after creation. A selected instance becomes the destination or
/// the starting point of a navigation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    /// Provider-assigned identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Entrance coordinate, if the provider supplied a parseable one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    /// Postal address assembled from the provider's address parts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl PointOfInterest {
    /// Create a POI without coordinate or address
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: None,
            address: None,
        }
    }

    /// Attach a coordinate
    #[must_use]
    pub const fn with_location(mut self, location: GeoLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach an address
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// The starting point that tracks the device position
    #[must_use]
    pub fn current_location(location: GeoLocation) -> Self {
        Self::new("", CURRENT_LOCATION_NAME).with_location(location)
    }

    /// Whether a route can be requested to or from this POI
    #[must_use]
    pub const fn is_routable(&self) -> bool {
        self.location.is_some()
    }
}

impl fmt::Display for PointOfInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(ref address) = self.address {
            write!(f, " ({address})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let poi = PointOfInterest::new("1234", "서울역")
            .with_location(GeoLocation::new_unchecked(37.5547, 126.9707))
            .with_address("서울 중구 봉래동2가");
        assert_eq!(poi.id, "1234");
        assert!(poi.is_routable());
        assert_eq!(poi.to_string(), "서울역 (서울 중구 봉래동2가)");
    }

    #[test]
    fn without_location_is_not_routable() {
        let poi = PointOfInterest::new("1", "이름");
        assert!(!poi.is_routable());
        assert_eq!(poi.to_string(), "이름");
    }

    #[test]
    fn current_location_poi() {
        let poi = PointOfInterest::current_location(GeoLocation::seoul_city_hall());
        assert_eq!(poi.name, CURRENT_LOCATION_NAME);
        assert!(poi.id.is_empty());
        assert_eq!(poi.location, Some(GeoLocation::seoul_city_hall()));
    }

    #[test]
    fn serialization_skips_empty_optionals() {
        let json = serde_json::to_string(&PointOfInterest::new("1", "a")).unwrap();
        assert!(!json.contains("location"));
        assert!(!json.contains("address"));
    }
}
