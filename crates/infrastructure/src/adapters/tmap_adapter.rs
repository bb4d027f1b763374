//! TMAP adapter - Implements PoiSearchPort and RoutePort using integration_tmap

use application::error::ApplicationError;
use application::ports::{PoiSearchPort, RoutePort, RoutePreference, RouteQuery};
use async_trait::async_trait;
use domain::entities::{PointOfInterest, RouteResponse};
use domain::value_objects::{GeoLocation, Heading};
use integration_tmap::{
    HttpTmapClient, RouteRequest, SearchOption, TmapClient, TmapConfig, TmapError,
};
use tracing::{debug, instrument, warn};

/// Adapter for POI search and pedestrian routing over the TMAP open API
pub struct TmapAdapter {
    client: Box<dyn TmapClient>,
}

impl std::fmt::Debug for TmapAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmapAdapter").finish_non_exhaustive()
    }
}

impl TmapAdapter {
    /// Create an adapter around an existing client
    #[must_use]
    pub fn new(client: impl TmapClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Create an adapter with an HTTP client built from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn from_config(config: &TmapConfig) -> Result<Self, ApplicationError> {
        let client = HttpTmapClient::new(config).map_err(Self::map_error)?;
        Ok(Self::new(client))
    }

    /// Convert an integration error to an application error
    fn map_error(err: TmapError) -> ApplicationError {
        match err {
            TmapError::InvalidRequest(msg) => ApplicationError::InvalidRequest(msg),
            TmapError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::ExternalService(format!("TMAP: {other}")),
        }
    }

    /// Convert a route preference to the provider's search option
    const fn search_option(preference: RoutePreference) -> SearchOption {
        match preference {
            RoutePreference::Recommended => SearchOption::Recommended,
            RoutePreference::MainRoadFirst => SearchOption::MainRoadFirst,
            RoutePreference::Shortest => SearchOption::Shortest,
            RoutePreference::AvoidStairs => SearchOption::ShortestNoStairs,
        }
    }

    /// Heading in whole degrees as the provider expects it
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn angle(heading: Heading) -> u16 {
        (heading.degrees().round() as u16) % 360
    }

    /// Build the provider request for a route query
    fn route_request(query: &RouteQuery) -> RouteRequest {
        let mut request = RouteRequest::new(
            query.start,
            query.start_name.clone(),
            query.end,
            query.end_name.clone(),
        );
        request.search_option = Self::search_option(query.preference);
        request.waypoints.clone_from(&query.waypoints);
        request.angle = query.heading.map(Self::angle);
        request
    }
}

#[async_trait]
impl PoiSearchPort for TmapAdapter {
    #[instrument(skip(self, center), fields(center = %center))]
    async fn search_pois(
        &self,
        query: &str,
        center: &GeoLocation,
        page: u32,
    ) -> Result<Vec<PointOfInterest>, ApplicationError> {
        let pois = self
            .client
            .search_pois(query, center, page)
            .await
            .map_err(|e| {
                warn!(error = %e, retryable = e.is_retryable(), "POI search failed");
                Self::map_error(e)
            })?;

        debug!(count = pois.len(), "POI search succeeded");
        Ok(pois)
    }
}

#[async_trait]
impl RoutePort for TmapAdapter {
    #[instrument(skip(self, query), fields(from = %query.start_name, to = %query.end_name))]
    async fn fetch_route(&self, query: &RouteQuery) -> Result<RouteResponse, ApplicationError> {
        let request = Self::route_request(query);

        let route = self.client.fetch_route(&request).await.map_err(|e| {
            warn!(error = %e, retryable = e.is_retryable(), "Route request failed");
            Self::map_error(e)
        })?;

        debug!(features = route.features.len(), "Route request succeeded");
        Ok(route)
    }
}
