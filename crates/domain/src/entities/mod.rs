//! Domain entities - Objects with identity and lifecycle

mod location_fix;
mod point_of_interest;
mod route;

pub use location_fix::LocationFix;
pub use point_of_interest::{CURRENT_LOCATION_NAME, PointOfInterest};
pub use route::{Feature, Geometry, Properties, RouteResponse, RouteSummary};
