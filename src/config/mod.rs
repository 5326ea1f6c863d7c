pub mod cli;
pub mod toml_config;

pub const DEFAULT_SCENARIO_PATH: &str = "scenarios/scenario.txt";

#[cfg(feature = "cli")]
pub use cli_args::CliConfig;

#[cfg(feature = "cli")]
mod cli_args {
    use super::DEFAULT_SCENARIO_PATH;
    use crate::domain::ports::ConfigProvider;
    use crate::domain::timing::SimulationTiming;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_path, validate_positive_number, validate_report_extension, Validate,
    };
    use clap::Parser;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
    #[command(name = "elevator-sim")]
    #[command(about = "Simulate an elevator bank serving a scenario of move requests")]
    pub struct CliConfig {
        /// Path to the scenario file
        #[arg(short, long)]
        pub scenario: Option<String>,

        /// Path to a TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Length of one feed interval in milliseconds
        #[arg(long)]
        pub interval_ms: Option<u64>,

        /// Number of intervals each time slice is split into
        #[arg(long)]
        pub interval_count: Option<u32>,

        /// Write the run report to this .json or .csv file
        #[arg(long)]
        pub report: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log process CPU and memory per simulation phase")]
        pub monitor: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        /// Parse and validate the scenario without running it
        #[arg(long)]
        pub dry_run: bool,
    }

    impl ConfigProvider for CliConfig {
        fn scenario_path(&self) -> &str {
            self.scenario.as_deref().unwrap_or(DEFAULT_SCENARIO_PATH)
        }

        fn timing(&self) -> SimulationTiming {
            let mut timing = SimulationTiming::default();
            if let Some(interval_ms) = self.interval_ms {
                timing.interval_sleep = Duration::from_millis(interval_ms);
            }
            if let Some(interval_count) = self.interval_count {
                timing.interval_count = interval_count;
            }
            timing
        }

        fn report_path(&self) -> Option<&str> {
            self.report.as_deref()
        }

        fn monitoring_enabled(&self) -> bool {
            self.monitor
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("scenario", self.scenario_path())?;
            if let Some(config) = &self.config {
                validate_path("config", config)?;
            }
            if let Some(interval_ms) = self.interval_ms {
                validate_positive_number("interval_ms", interval_ms, 1)?;
            }
            if let Some(interval_count) = self.interval_count {
                validate_positive_number("interval_count", u64::from(interval_count), 1)?;
            }
            if let Some(report) = &self.report {
                validate_report_extension("report", report)?;
            }
            Ok(())
        }
    }

}
