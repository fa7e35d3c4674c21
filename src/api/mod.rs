//! Game Simulation API Service
//!
//! HTTP surface over the simulation core: validates requests, runs one game
//! per request and reports the outcome.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

pub use server::{build_app, ApiServer};
