//! Client-side route geometry: distances, interpolation, waypoint placement
//! and elevation profiles.

pub mod geodesy;
pub mod interpolate;
pub mod placement;
pub mod profile;

pub use interpolate::{coordinates_at_distance, RoutePoint};
