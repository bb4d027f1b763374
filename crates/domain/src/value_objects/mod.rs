//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod heading;
mod road_type;
mod turn_type;

pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use heading::{Heading, HeadingReading};
pub use road_type::RoadType;
pub use turn_type::TurnType;
