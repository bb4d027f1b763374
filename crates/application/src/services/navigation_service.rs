//! Navigation session orchestration
//!
//! Owns the state of one navigation session: device position and heading,
//! the selected start and destination, search results, the current route
//! and its spoken instructions. Every change is published as a snapshot on a
//! watch channel for the rendering layer.
//!
//! Requests are not serialized. Two overlapping searches (or route fetches)
//! both write their result when they complete, so the one that finishes
//! last wins, and the first completion already clears the busy flag.

use std::sync::Arc;

use domain::DomainError;
use domain::entities::{LocationFix, PointOfInterest, RouteResponse};
use domain::value_objects::{GeoLocation, Heading};
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{PoiSearchPort, RoutePort, RoutePreference, RouteQuery};
use crate::services::instruction_formatter::generate_navigation_instructions;
use crate::services::location_provider::{LocationEvent, LocationProvider};

/// Configuration for the navigation service
#[derive(Debug, Clone)]
pub struct NavigationConfig {
    /// Search center used before the first location fix
    pub default_center: GeoLocation,
    /// Route preference for every route request
    pub preference: RoutePreference,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            default_center: GeoLocation::seoul_city_hall(),
            preference: RoutePreference::default(),
        }
    }
}

/// Everything the rendering layer shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    /// Latest device position
    pub user_location: Option<LocationFix>,
    /// Latest compass heading
    pub heading: Heading,
    /// Selected destination
    pub destination: Option<PointOfInterest>,
    /// Selected starting point, follows the device once a fix arrives
    pub starting_point: Option<PointOfInterest>,
    /// Results of the last completed search
    pub search_results: Vec<PointOfInterest>,
    /// Last fetched route
    pub route: Option<RouteResponse>,
    /// Spoken instructions for [`Self::route`]
    pub instructions: Vec<String>,
    /// Waiting for the first location fix
    pub is_loading: bool,
    /// A route request is in flight
    pub is_fetching: bool,
    /// A search request is in flight
    pub is_searching: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user_location: None,
            heading: Heading::default(),
            destination: None,
            starting_point: None,
            search_results: Vec::new(),
            route: None,
            instructions: Vec::new(),
            is_loading: true,
            is_fetching: false,
            is_searching: false,
        }
    }
}

impl SessionState {
    /// Route geometry to draw, empty without a route
    #[must_use]
    pub fn route_geometry(&self) -> Vec<GeoLocation> {
        self.route
            .as_ref()
            .map(RouteResponse::polyline)
            .unwrap_or_default()
    }
}

/// Service coordinating location updates, POI search and routing
pub struct NavigationService {
    poi_search: Arc<dyn PoiSearchPort>,
    routes: Arc<dyn RoutePort>,
    config: NavigationConfig,
    state: RwLock<SessionState>,
    updates: watch::Sender<SessionState>,
}

impl std::fmt::Debug for NavigationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationService")
            .field("config", &self.config)
            .field("subscribers", &self.updates.receiver_count())
            .finish_non_exhaustive()
    }
}

impl NavigationService {
    /// Create a service with a fresh session
    #[must_use]
    pub fn new(
        poi_search: Arc<dyn PoiSearchPort>,
        routes: Arc<dyn RoutePort>,
        config: NavigationConfig,
    ) -> Self {
        let (updates, _) = watch::channel(SessionState::default());
        Self {
            poi_search,
            routes,
            config,
            state: RwLock::new(SessionState::default()),
            updates,
        }
    }

    /// Receive a snapshot after every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.updates.subscribe()
    }

    /// Current state
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    /// Apply a change and publish the result
    fn update(&self, change: impl FnOnce(&mut SessionState)) {
        let snapshot = {
            let mut state = self.state.write();
            change(&mut state);
            state.clone()
        };
        self.updates.send_replace(snapshot);
    }

    /// Where searches are centered: the device if known, else the default
    fn search_center(&self) -> GeoLocation {
        self.state
            .read()
            .user_location
            .map_or(self.config.default_center, |fix| fix.location)
    }

    /// Handle one update from the location provider
    pub fn apply_location_event(&self, event: LocationEvent) {
        match event {
            LocationEvent::Fix(fix) => {
                self.update(|state| {
                    if state.is_loading {
                        info!(
                            location = %fix.location,
                            accuracy_m = ?fix.accuracy_m,
                            "First location fix"
                        );
                    }
                    state.user_location = Some(fix);
                    state.starting_point = Some(PointOfInterest::current_location(fix.location));
                    state.is_loading = false;
                });
            },
            LocationEvent::Heading(reading) => {
                let heading = reading.resolve();
                self.update(|state| state.heading = heading);
            },
        }
    }

    /// Consume location updates until every publisher is gone
    pub async fn run_location_updates(&self, mut provider: LocationProvider) {
        let mut received = 0_u64;
        while let Some(event) = provider.next().await {
            self.apply_location_event(event);
            received += 1;
        }
        debug!(received, "Location updates ended");
    }

    /// Search POIs around the current position
    ///
    /// Results replace the stored search results on success; the previous
    /// results stay on failure.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Vec<PointOfInterest>, ApplicationError> {
        let center = self.search_center();
        self.update(|state| state.is_searching = true);

        let result = self.poi_search.search_pois(query, &center, page).await;

        self.update(|state| {
            state.is_searching = false;
            if let Ok(ref pois) = result {
                state.search_results.clone_from(pois);
            }
        });

        match result {
            Ok(pois) => {
                debug!(count = pois.len(), "Search completed");
                Ok(pois)
            },
            Err(e) => {
                warn!(error = %e, "Search failed");
                Err(e)
            },
        }
    }

    /// Choose where to go
    pub fn select_destination(&self, poi: PointOfInterest) {
        debug!(destination = %poi, "Destination selected");
        self.update(|state| state.destination = Some(poi));
    }

    /// Choose where to start
    ///
    /// The next location fix replaces it with the device position again.
    pub fn select_starting_point(&self, poi: PointOfInterest) {
        debug!(start = %poi, "Starting point selected");
        self.update(|state| state.starting_point = Some(poi));
    }

    /// Build the route request for the current selection
    fn route_query(&self) -> Result<RouteQuery, DomainError> {
        let state = self.state.read();
        let start = state
            .starting_point
            .as_ref()
            .ok_or(DomainError::MissingSelection("starting point"))?;
        let destination = state
            .destination
            .as_ref()
            .ok_or(DomainError::MissingSelection("destination"))?;

        let mut query =
            RouteQuery::between(start, destination)?.with_preference(self.config.preference);

        // The walker's heading only means something when starting from the device
        let starts_at_device = state
            .user_location
            .is_some_and(|fix| start.location == Some(fix.location));
        if starts_at_device {
            query = query.with_heading(state.heading);
        }
        Ok(query)
    }

    /// Fetch a route from the starting point to the destination
    ///
    /// On success the route and its instructions replace the stored ones.
    #[instrument(skip(self))]
    pub async fn fetch_route(&self) -> Result<RouteResponse, ApplicationError> {
        let query = self.route_query()?;
        self.update(|state| state.is_fetching = true);

        let result = self.routes.fetch_route(&query).await;

        self.update(|state| {
            state.is_fetching = false;
            if let Ok(ref route) = result {
                state.instructions = generate_navigation_instructions(route);
                state.route = Some(route.clone());
            }
        });

        match result {
            Ok(route) => {
                info!(
                    from = %query.start_name,
                    to = %query.end_name,
                    features = route.features.len(),
                    "Route ready"
                );
                Ok(route)
            },
            Err(e) => {
                warn!(error = %e, "Route request failed");
                Err(e)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;
    use domain::entities::{Feature, Geometry, Properties};
    use domain::value_objects::HeadingReading;

    use super::*;
    use crate::ports::{MockPoiSearchPort, MockRoutePort};
    use crate::services::location_provider::{DEFAULT_BUFFER, location_channel};

    fn station() -> PointOfInterest {
        PointOfInterest::new("1129181", "서울역")
            .with_location(GeoLocation::new(37.5547, 126.9707).unwrap())
    }

    fn route_with(description: &str, turn_type: i32) -> RouteResponse {
        RouteResponse::new(vec![Feature {
            geometry: Geometry::Point([126.9707, 37.5547]),
            properties: Properties {
                description: Some(description.to_string()),
                turn_type: Some(turn_type),
                ..Properties::default()
            },
        }])
    }

    fn service(poi: MockPoiSearchPort, route: MockRoutePort) -> NavigationService {
        NavigationService::new(Arc::new(poi), Arc::new(route), NavigationConfig::default())
    }

    fn fix_at(location: GeoLocation) -> LocationEvent {
        LocationEvent::Fix(LocationFix::new(location, Utc::now()))
    }

    #[test]
    fn initial_state() {
        let svc = service(MockPoiSearchPort::new(), MockRoutePort::new());
        let state = svc.snapshot();
        assert!(state.is_loading);
        assert!(!state.is_fetching);
        assert!(!state.is_searching);
        assert!(state.user_location.is_none());
        assert!(state.route_geometry().is_empty());
    }

    #[test]
    fn first_fix_clears_loading_and_sets_start() {
        let svc = service(MockPoiSearchPort::new(), MockRoutePort::new());
        svc.apply_location_event(fix_at(GeoLocation::gangnam_station()));

        let state = svc.snapshot();
        assert!(!state.is_loading);
        assert_eq!(
            state.user_location.map(|f| f.location),
            Some(GeoLocation::gangnam_station())
        );
        let start = state.starting_point.unwrap();
        assert_eq!(start.name, "현재 위치");
        assert_eq!(start.location, Some(GeoLocation::gangnam_station()));
    }

    #[test]
    fn fix_replaces_manual_start() {
        let svc = service(MockPoiSearchPort::new(), MockRoutePort::new());
        svc.select_starting_point(station());
        svc.apply_location_event(fix_at(GeoLocation::seoul_city_hall()));

        assert_eq!(svc.snapshot().starting_point.unwrap().name, "현재 위치");
    }

    #[test]
    fn heading_uses_magnetic_fallback() {
        let svc = service(MockPoiSearchPort::new(), MockRoutePort::new());
        svc.apply_location_event(LocationEvent::Heading(HeadingReading::new(-1.0, 400.0)));
        assert_eq!(svc.snapshot().heading, Heading::from_degrees(40.0));
    }

    #[tokio::test]
    async fn run_location_updates_until_closed() {
        let svc = service(MockPoiSearchPort::new(), MockRoutePort::new());
        let (publisher, provider) = location_channel(DEFAULT_BUFFER);

        publisher
            .publish_fix(37.5665, 126.978, Some(5.0), Utc::now())
            .await
            .unwrap();
        publisher
            .publish_heading(HeadingReading::new(90.0, 95.0))
            .await
            .unwrap();
        drop(publisher);

        svc.run_location_updates(provider).await;

        let state = svc.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.heading, Heading::from_degrees(90.0));
    }

    #[tokio::test]
    async fn search_uses_default_center_before_fix() {
        let mut poi = MockPoiSearchPort::new();
        poi.expect_search_pois()
            .withf(|query, center, page| {
                query == "서울역" && *center == GeoLocation::seoul_city_hall() && *page == 1
            })
            .times(1)
            .returning(|_, _, _| Ok(vec![station()]));

        let svc = service(poi, MockRoutePort::new());
        let results = svc.search("서울역", 1).await.unwrap();

        assert_eq!(results.len(), 1);
        let state = svc.snapshot();
        assert_eq!(state.search_results, vec![station()]);
        assert!(!state.is_searching);
    }

    #[tokio::test]
    async fn search_centers_on_device() {
        let mut poi = MockPoiSearchPort::new();
        poi.expect_search_pois()
            .withf(|_, center, _| *center == GeoLocation::gangnam_station())
            .returning(|_, _, _| Ok(vec![]));

        let svc = service(poi, MockRoutePort::new());
        svc.apply_location_event(fix_at(GeoLocation::gangnam_station()));

        assert!(svc.search("카페", 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_failure_clears_flag_and_keeps_results() {
        let mut poi = MockPoiSearchPort::new();
        let mut calls = 0;
        poi.expect_search_pois().times(2).returning(move |_, _, _| {
            calls += 1;
            if calls == 1 {
                Ok(vec![station()])
            } else {
                Err(ApplicationError::ExternalService("HTTP 500".to_string()))
            }
        });

        let svc = service(poi, MockRoutePort::new());
        svc.search("서울역", 1).await.unwrap();
        assert!(svc.search("서울역", 2).await.is_err());

        let state = svc.snapshot();
        assert!(!state.is_searching);
        assert_eq!(state.search_results, vec![station()]);
    }

    #[tokio::test]
    async fn fetch_route_requires_selection() {
        let svc = service(MockPoiSearchPort::new(), MockRoutePort::new());

        let err = svc.fetch_route().await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::MissingSelection("starting point"))
        ));

        svc.apply_location_event(fix_at(GeoLocation::seoul_city_hall()));
        let err = svc.fetch_route().await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::MissingSelection("destination"))
        ));
    }

    #[tokio::test]
    async fn fetch_route_rejects_destination_without_coordinate() {
        let svc = service(MockPoiSearchPort::new(), MockRoutePort::new());
        svc.apply_location_event(fix_at(GeoLocation::seoul_city_hall()));
        svc.select_destination(PointOfInterest::new("1", "좌표 없음"));

        let err = svc.fetch_route().await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::ValidationError(_))
        ));
        assert!(!svc.snapshot().is_fetching);
    }

    #[tokio::test]
    async fn fetch_route_stores_route_and_instructions() {
        let mut route = MockRoutePort::new();
        route
            .expect_fetch_route()
            .withf(|query| {
                query.start_name == "현재 위치"
                    && query.end_name == "서울역"
                    && query.heading == Some(Heading::from_degrees(45.0))
            })
            .times(1)
            .returning(|_| Ok(route_with("도착", 201)));

        let svc = service(MockPoiSearchPort::new(), route);
        svc.apply_location_event(fix_at(GeoLocation::seoul_city_hall()));
        svc.apply_location_event(LocationEvent::Heading(HeadingReading::new(45.0, 50.0)));
        svc.select_destination(station());

        svc.fetch_route().await.unwrap();

        let state = svc.snapshot();
        assert!(!state.is_fetching);
        assert_eq!(state.instructions, vec!["목적지 도착".to_string()]);
        assert!(state.route.is_some());
    }

    #[tokio::test]
    async fn manual_start_has_no_heading() {
        let mut route = MockRoutePort::new();
        route
            .expect_fetch_route()
            .withf(|query| query.heading.is_none() && query.start_name == "서울역")
            .returning(|_| Ok(RouteResponse::default()));

        let svc = service(MockPoiSearchPort::new(), route);
        svc.select_starting_point(station());
        svc.select_destination(
            PointOfInterest::new("2", "강남역").with_location(GeoLocation::gangnam_station()),
        );

        svc.fetch_route().await.unwrap();
    }

    #[tokio::test]
    async fn fetch_route_failure_clears_flag() {
        let mut route = MockRoutePort::new();
        route
            .expect_fetch_route()
            .returning(|_| Err(ApplicationError::ExternalService("HTTP 401".to_string())));

        let svc = service(MockPoiSearchPort::new(), route);
        svc.apply_location_event(fix_at(GeoLocation::seoul_city_hall()));
        svc.select_destination(station());

        assert!(svc.fetch_route().await.is_err());
        let state = svc.snapshot();
        assert!(!state.is_fetching);
        assert!(state.route.is_none());
        assert!(state.instructions.is_empty());
    }

    #[tokio::test]
    async fn subscribers_see_updates() {
        let svc = service(MockPoiSearchPort::new(), MockRoutePort::new());
        let mut rx = svc.subscribe();

        svc.select_destination(station());

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().destination, Some(station()));
    }

    /// Route port answering each call after its own delay
    struct DelayedRoutes {
        calls: parking_lot::Mutex<Vec<(Duration, RouteResponse)>>,
    }

    #[async_trait]
    impl RoutePort for DelayedRoutes {
        async fn fetch_route(&self, _query: &RouteQuery) -> Result<RouteResponse, ApplicationError> {
            let (delay, route) = self.calls.lock().remove(0);
            tokio::time::sleep(delay).await;
            Ok(route)
        }
    }

    #[tokio::test]
    async fn overlapping_fetches_last_completion_wins() {
        let routes = DelayedRoutes {
            calls: parking_lot::Mutex::new(vec![
                (Duration::from_millis(80), route_with("늦은 경로", 11)),
                (Duration::from_millis(5), route_with("빠른 경로", 12)),
            ]),
        };
        let svc = NavigationService::new(
            Arc::new(MockPoiSearchPort::new()),
            Arc::new(routes),
            NavigationConfig::default(),
        );
        svc.apply_location_event(fix_at(GeoLocation::seoul_city_hall()));
        svc.select_destination(station());

        let (first, second) = tokio::join!(svc.fetch_route(), svc.fetch_route());
        assert!(first.is_ok() && second.is_ok());

        // The request issued first finished last and overwrote the newer route
        assert_eq!(svc.snapshot().instructions, vec!["직진, 늦은 경로".to_string()]);
    }
}
