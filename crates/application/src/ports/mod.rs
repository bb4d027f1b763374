//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod poi_search_port;
mod route_port;

#[cfg(test)]
pub use poi_search_port::MockPoiSearchPort;
pub use poi_search_port::PoiSearchPort;
#[cfg(test)]
pub use route_port::MockRoutePort;
pub use route_port::{RoutePort, RoutePreference, RouteQuery};
