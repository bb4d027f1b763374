//! TMAP integration for PathPal
//!
//! Provides keyword POI search and pedestrian routing via the
//! [TMAP open API](https://openapi.sk.com).
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern consistent with the other
//! integration crates. [`TmapClient`] defines the interface for POI search
//! and route requests, implemented by [`HttpTmapClient`]. Raw provider JSON is
//! converted into the domain types `PointOfInterest` and `RouteResponse`.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::GeoLocation;
//! use integration_tmap::{HttpTmapClient, RouteRequest, TmapClient, TmapConfig};
//!
//! let config = TmapConfig::with_app_key(std::env::var("TMAP_APP_KEY")?);
//! let client = HttpTmapClient::new(&config)?;
//!
//! let pois = client.search_pois("서울역", &GeoLocation::seoul_city_hall(), 1).await?;
//! let request = RouteRequest::new(
//!     GeoLocation::seoul_city_hall(), "서울시청",
//!     pois[0].location.unwrap(), &pois[0].name,
//! );
//! let route = client.fetch_route(&request).await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{HttpTmapClient, TmapClient};
pub use config::TmapConfig;
pub use error::TmapError;
pub use models::{MAX_WAYPOINTS, POI_PAGE_SIZE, RouteRequest, SearchOption, TravelMode};
