//! Domain layer for PathPal
//!
//! Contains the navigation vocabulary: coordinates, headings, points of
//! interest, routes and the maneuver codes of the routing provider.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
