use chrono::{DateTime, Local};
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::{Board, ExtractError, FetchError},
    json_path::{empty_object, lookup, lookup_array, lookup_f64_or, lookup_object, lookup_str},
    provider::FlightDataProvider,
};

/// Where the useful part of the upstream response lives.
const ENVELOPE: &[&str] = &["result", "response", "airport", "pluginData"];

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One scheduled flight as shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightSummary {
    pub number: Option<String>,
    pub status: Option<String>,
    pub departure: String,
    pub arrival: String,
}

impl FlightSummary {
    /// Build a summary from one entry of `schedule.<board>.data`.
    pub fn from_raw(flight: &Value, board: Board, index: usize) -> Result<Self, ExtractError> {
        let number = lookup_str(flight, &["flight", "identification", "number", "default"]);
        let status = lookup_str(flight, &["flight", "status", "text"]);

        Ok(Self {
            number: number.map(str::to_owned),
            status: status.map(str::to_owned),
            departure: scheduled_time(flight, board, index, "departure")?,
            arrival: scheduled_time(flight, board, index, "arrival")?,
        })
    }
}

fn scheduled_time(
    flight: &Value,
    board: Board,
    index: usize,
    field: &'static str,
) -> Result<String, ExtractError> {
    let raw = lookup(flight, &["flight", "time", "scheduled", field]);

    let secs = raw
        .and_then(epoch_seconds)
        .ok_or_else(|| ExtractError::InvalidTimestamp {
            board,
            index,
            field,
            value: raw.cloned().unwrap_or(Value::Null),
        })?;

    format_local(secs).ok_or(ExtractError::OutOfRange {
        board,
        index,
        field,
        secs,
    })
}

fn epoch_seconds(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
}

/// Format unix seconds as local wall-clock time.
pub fn format_local(secs: i64) -> Option<String> {
    DateTime::from_timestamp(secs, 0)
        .map(|utc| utc.with_timezone(&Local).format(TIME_FORMAT).to_string())
}

/// One airport: what to ask for, what came back, and what we made of it.
#[derive(Debug, Clone)]
pub struct Airport {
    pub icao_code: String,
    pub request_url: Url,
    pub raw_payload: Value,
    pub name: String,
    pub weather: Value,
    pub arrivals: Vec<FlightSummary>,
    pub departures: Vec<FlightSummary>,
}

impl Airport {
    /// `timestamp` is appended to the query so no intermediary serves a cached answer.
    pub fn new(icao_code: impl Into<String>, base_url: &Url, timestamp: i64) -> Self {
        let icao_code = icao_code.into();

        let mut request_url = base_url.clone();
        request_url
            .query_pairs_mut()
            .append_pair("code", &icao_code)
            .append_pair("timestamp", &timestamp.to_string());

        Self {
            icao_code,
            request_url,
            raw_payload: empty_object(),
            name: String::new(),
            weather: empty_object(),
            arrivals: Vec::new(),
            departures: Vec::new(),
        }
    }

    /// Issue the single request for this airport and keep the `pluginData` object.
    ///
    /// A successful response without the expected envelope is not an error; the
    /// payload simply stays empty and everything derived from it will be empty too.
    pub async fn fetch(&mut self, provider: &dyn FlightDataProvider) -> Result<(), FetchError> {
        let body = provider.get_airport(&self.request_url).await?;

        match lookup(&body, ENVELOPE) {
            Some(payload) => self.raw_payload = payload.clone(),
            None => {
                tracing::debug!(code = %self.icao_code, "response has no pluginData envelope")
            }
        }

        Ok(())
    }

    /// Derive report fields from `raw_payload`.
    ///
    /// Fields are filled in order (name, arrivals, departures, weather); on error
    /// whatever was derived before the failure is kept.
    pub fn extract(&mut self) -> Result<(), ExtractError> {
        self.name = lookup_str(&self.raw_payload, &["details", "name"])
            .unwrap_or_default()
            .to_owned();

        let arrivals = lookup_array(&self.raw_payload, &["schedule", "arrivals", "data"]);
        for (index, flight) in arrivals.iter().enumerate() {
            let summary = FlightSummary::from_raw(flight, Board::Arrivals, index)?;
            self.arrivals.push(summary);
        }

        let departures = lookup_array(&self.raw_payload, &["schedule", "departures", "data"]);
        for (index, flight) in departures.iter().enumerate() {
            let summary = FlightSummary::from_raw(flight, Board::Departures, index)?;
            self.departures.push(summary);
        }

        self.weather = lookup_object(&self.raw_payload, &["weather"]);

        Ok(())
    }

    /// Sort key: wind speed in km/h, 0 when the weather block doesn't say.
    pub fn wind_speed_kmh(&self) -> f64 {
        lookup_f64_or(&self.weather, &["wind", "speed", "kmh"], 0.0)
    }
}

impl std::fmt::Display for Airport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arrivals = to_json(&self.arrivals)?;
        let departures = to_json(&self.departures)?;

        write!(
            f,
            "Airport: {}\nICAO Code: {}\n\nWeather: {}\n\nArrivals: {}\n\nDepartures: {}\n",
            self.name, self.icao_code, self.weather, arrivals, departures,
        )
    }
}

fn to_json(flights: &[FlightSummary]) -> Result<String, std::fmt::Error> {
    serde_json::to_string(flights).map_err(|_| std::fmt::Error)
}

/// Stable ascending sort by wind speed; equal speeds keep their relative order.
pub fn sort_by_wind(airports: &mut [Airport]) {
    airports.sort_by(|a, b| a.wind_speed_kmh().total_cmp(&b.wind_speed_kmh()));
}
