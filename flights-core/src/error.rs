use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failure to obtain an airport payload from the upstream API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure (DNS, connection, TLS, reading the body).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The body was not valid JSON.
    #[error("failed to parse response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which schedule board a flight came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Board {
    Arrivals,
    Departures,
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Board::Arrivals => f.write_str("arrivals"),
            Board::Departures => f.write_str("departures"),
        }
    }
}

/// Failure to reshape a fetched payload into report fields.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{board}[{index}]: scheduled {field} is missing or not a unix timestamp (got {value})")]
    InvalidTimestamp {
        board: Board,
        index: usize,
        field: &'static str,
        value: Value,
    },

    #[error("{board}[{index}]: scheduled {field} {secs} is out of range")]
    OutOfRange {
        board: Board,
        index: usize,
        field: &'static str,
        secs: i64,
    },
}
