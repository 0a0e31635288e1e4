//! Core library for the `flights` airport board.
//!
//! This crate defines:
//! - Configuration (endpoint, client identifier, concurrency bound)
//! - Abstraction over the flight data source
//! - The airport record: request, payload extraction, rendering
//! - The batch runner that fetches concurrently and sorts by wind speed
//!
//! It is used by `flights-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod json_path;
pub mod model;
pub mod provider;
pub mod runner;

pub use config::Config;
pub use error::{Board, ExtractError, FetchError};
pub use model::{Airport, FlightSummary, sort_by_wind};
pub use provider::{FlightDataProvider, FlightradarClient};
pub use runner::{Report, Runner, USAGE_HINT};
