use async_trait::async_trait;
use reqwest::{Client, Url, header::USER_AGENT};
use serde_json::Value;

use crate::{config::Config, error::FetchError};

use super::FlightDataProvider;

/// HTTP client for the flightradar24 airport endpoint.
#[derive(Debug, Clone)]
pub struct FlightradarClient {
    user_agent: String,
    http: Client,
}

impl FlightradarClient {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.user_agent.clone())
    }
}

#[async_trait]
impl FlightDataProvider for FlightradarClient {
    async fn get_airport(&self, url: &Url) -> Result<Value, FetchError> {
        tracing::debug!(%url, "requesting airport data");

        let res = self
            .http
            .get(url.clone())
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
