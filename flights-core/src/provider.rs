use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::fmt::Debug;

use crate::error::FetchError;

pub mod flightradar;

pub use flightradar::FlightradarClient;

/// Source of raw airport responses.
///
/// Implementations return the whole decoded JSON body; picking the useful part
/// out of it is up to [`crate::Airport::fetch`].
#[async_trait]
pub trait FlightDataProvider: Send + Sync + Debug {
    async fn get_airport(&self, url: &Url) -> Result<Value, FetchError>;
}
