//! Point-of-interest search port
//!
//! Keyword search around a center coordinate. Adapters in the infrastructure
//! layer implement this port on top of a map provider.

use async_trait::async_trait;
use domain::entities::PointOfInterest;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for keyword POI search
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PoiSearchPort: Send + Sync {
    /// Search POIs matching `query`, ranked around `center`
    ///
    /// `page` starts at 1. Results keep the provider's order. An empty
    /// result is not an error.
    async fn search_pois(
        &self,
        query: &str,
        center: &GeoLocation,
        page: u32,
    ) -> Result<Vec<PointOfInterest>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn PoiSearchPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn PoiSearchPort>();
    }
}
