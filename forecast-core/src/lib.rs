//! Core library for the Taiwan 36-hour forecast proxy.
//!
//! This crate defines:
//! - Configuration handling (environment variables + optional config file)
//! - The city-identifier lookup table
//! - The CWA open-data client and response reshaping
//! - Shared domain models and the resolver error taxonomy
//!
//! It is used by `forecast-server`, but can also be reused by other binaries or services.

pub mod cities;
pub mod config;
pub mod error;
pub mod model;
pub mod resolver;
pub mod upstream;

pub use cities::{lookup_location, valid_city_ids};
pub use config::Config;
pub use error::ResolveError;
pub use model::{ForecastResult, ForecastSlot};
pub use resolver::ForecastResolver;
