//! Batch driver: fetch every airport concurrently, then extract, sort and report.

use chrono::Utc;
use futures::{StreamExt, stream};
use reqwest::Url;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    config::Config,
    model::{Airport, sort_by_wind},
    provider::FlightDataProvider,
};

pub const USAGE_HINT: &str = "Use --codes and ICAO codes";

/// What a run produced.
#[derive(Debug)]
pub enum Report {
    /// No codes were given; nothing was requested.
    Usage,
    /// One entry per requested code, sorted by wind speed.
    Airports(Vec<Airport>),
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Report::Usage => writeln!(f, "{USAGE_HINT}"),
            Report::Airports(airports) => {
                for airport in airports {
                    writeln!(f, "{airport}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug)]
pub struct Runner<P> {
    provider: P,
    base_url: Url,
    max_workers: usize,
}

impl<P: FlightDataProvider> Runner<P> {
    pub fn new(provider: P, base_url: Url, max_workers: usize) -> Self {
        Self {
            provider,
            base_url,
            max_workers: max_workers.max(1),
        }
    }

    pub fn from_config(provider: P, config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(provider, config.base_url()?, config.workers()))
    }

    pub async fn run(&self, codes: &[String]) -> Report {
        if codes.is_empty() {
            return Report::Usage;
        }
        Report::Airports(self.collect(codes).await)
    }

    /// Build, fetch, extract and sort one [`Airport`] per code.
    ///
    /// Per-airport failures are logged and leave that airport with empty fields.
    pub async fn collect(&self, codes: &[String]) -> Vec<Airport> {
        let timestamp = Utc::now().timestamp();
        let mut airports: Vec<Airport> = codes
            .iter()
            .map(|code| Airport::new(code.as_str(), &self.base_url, timestamp))
            .collect();

        let provider: &dyn FlightDataProvider = &self.provider;
        let fetched = AtomicUsize::new(0);
        let fetched_ref = &fetched;
        stream::iter(airports.iter_mut())
            .for_each_concurrent(self.max_workers, move |airport| async move {
                match airport.fetch(provider).await {
                    Ok(()) => {
                        fetched_ref.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(err) => {
                        tracing::warn!(
                            code = %airport.icao_code,
                            error = %err,
                            "Fail to load data"
                        );
                    }
                }
            })
            .await;

        let mut extracted = 0;
        for airport in &mut airports {
            match airport.extract() {
                Ok(()) => extracted += 1,
                Err(err) => {
                    tracing::warn!(
                        code = %airport.icao_code,
                        error = %err,
                        "Fail to extract data"
                    );
                }
            }
        }

        sort_by_wind(&mut airports);

        tracing::info!(
            requested = codes.len(),
            fetched = fetched.into_inner(),
            extracted,
            "airport board ready"
        );

        airports
    }
}
