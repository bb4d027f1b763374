//! Navigation session settings.

use application::services::NavigationConfig;
use application::ports::RoutePreference;
use domain::GeoLocation;
use serde::{Deserialize, Serialize};

/// Geographic location configuration (latitude/longitude pair)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocationConfig {
    /// Latitude (-90.0 to 90.0)
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0)
    pub longitude: f64,
}

impl GeoLocationConfig {
    /// Convert to domain `GeoLocation` value object
    ///
    /// Returns `None` if coordinates are invalid.
    #[must_use]
    pub fn to_geo_location(&self) -> Option<GeoLocation> {
        GeoLocation::new(self.latitude, self.longitude).ok()
    }
}

/// Navigation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationAppConfig {
    /// Search center before the device reports a position
    ///
    /// Configured as inline table: `{ latitude = 37.5665, longitude = 126.978 }`
    #[serde(default = "default_center")]
    pub default_center: GeoLocationConfig,

    /// Route preference (`recommended`, `main_road_first`, `shortest`, `avoid_stairs`)
    #[serde(default)]
    pub route_preference: RoutePreference,
}

fn default_center() -> GeoLocationConfig {
    let city_hall = GeoLocation::seoul_city_hall();
    GeoLocationConfig {
        latitude: city_hall.latitude(),
        longitude: city_hall.longitude(),
    }
}

impl Default for NavigationAppConfig {
    fn default() -> Self {
        Self {
            default_center: default_center(),
            route_preference: RoutePreference::default(),
        }
    }
}

impl NavigationAppConfig {
    /// Convert to the application service configuration
    ///
    /// Returns `None` if the default center is out of range.
    #[must_use]
    pub fn to_navigation_config(&self) -> Option<NavigationConfig> {
        Some(NavigationConfig {
            default_center: self.default_center.to_geo_location()?,
            preference: self.route_preference,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_center_is_city_hall() {
        let config = NavigationAppConfig::default().to_navigation_config().unwrap();
        assert_eq!(config.default_center, GeoLocation::seoul_city_hall());
        assert_eq!(config.preference, RoutePreference::Recommended);
    }

    #[test]
    fn invalid_center_rejected() {
        let config = NavigationAppConfig {
            default_center: GeoLocationConfig {
                latitude: 123.0,
                longitude: 0.0,
            },
            ..Default::default()
        };
        assert!(config.to_navigation_config().is_none());
    }
}
