use clap::Parser;
use flights_core::{Config, FlightradarClient, Report, Runner};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "flights",
    version,
    about = "Arrivals, departures and weather for airports, calmest first"
)]
pub struct Cli {
    /// ICAO airport codes, e.g. `--codes KJFK EGLL`.
    #[arg(long, alias = "nargs", num_args = 1.., value_name = "CODE")]
    pub codes: Vec<String>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let report = self.report(Config::load_or_default).await?;
        print!("{report}");

        Ok(())
    }

    /// Config is only loaded once there is something to fetch.
    async fn report(&self, load_config: impl FnOnce() -> Config) -> anyhow::Result<Report> {
        if self.codes.is_empty() {
            return Ok(Report::Usage);
        }

        let config = load_config();
        let provider = FlightradarClient::from_config(&config);
        let runner = Runner::from_config(provider, &config)?;

        Ok(runner.run(&self.codes).await)
    }
}
