//! HTTP request handlers.
//!
//! - `index`: map of all locations
//! - `location`: per-location forecast page
//! - `plots`: forecast and tide plot files
//! - `health`: liveness check and Prometheus metrics

pub mod health;
pub mod index;
pub mod location;
pub mod plots;
