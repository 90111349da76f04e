//! ultraplan: client library and CLI for planning ultra-running races
//!
//! The planner backend owns events, waypoints, leg calculations, documents
//! and the assistant. This crate talks to it over HTTP and does the
//! client-side work: placing waypoints on the route, elevation profiles,
//! plan exports and decoding the streamed chat replies.

pub mod chat;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod route;
pub mod time_utils;
pub mod units;

pub use client::PlannerClient;
pub use error::{PlannerError, Result};
