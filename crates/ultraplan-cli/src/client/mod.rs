//! Planner backend client

pub mod api;
pub mod planner;

pub use api::{PlannerClient, DEFAULT_API_URL};
