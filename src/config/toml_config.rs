use crate::config::DEFAULT_SCENARIO_PATH;
use crate::domain::ports::ConfigProvider;
use crate::domain::timing::{
    SimulationTiming, DEFAULT_INTERVAL_COUNT, DEFAULT_INTERVAL_SLEEP_MS, DEFAULT_MAX_DURATION_SECS,
};
use crate::utils::error::{Result, SimError};
use crate::utils::validation::{
    validate_path, validate_positive_number, validate_report_extension, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub simulation: SimulationSection,
    pub timing: Option<TimingConfig>,
    pub report: Option<ReportConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationSection {
    pub name: Option<String>,
    pub scenario_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingConfig {
    pub interval_count: Option<u32>,
    pub interval_sleep_ms: Option<u64>,
    pub max_duration_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl SimulationConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SimError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SimError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn name(&self) -> &str {
        self.simulation.name.as_deref().unwrap_or("elevator-simulation")
    }

    fn timing_section(&self) -> TimingConfig {
        self.timing.clone().unwrap_or_default()
    }

    /// Command line values win over the file.
    #[cfg(feature = "cli")]
    pub fn apply_overrides(&mut self, cli: &crate::config::CliConfig) {
        if let Some(scenario) = &cli.scenario {
            tracing::info!("🔧 Scenario path overridden to: {}", scenario);
            self.simulation.scenario_path = Some(scenario.clone());
        }
        if let Some(interval_ms) = cli.interval_ms {
            self.timing.get_or_insert_with(TimingConfig::default).interval_sleep_ms = Some(interval_ms);
        }
        if let Some(interval_count) = cli.interval_count {
            self.timing.get_or_insert_with(TimingConfig::default).interval_count = Some(interval_count);
        }
        if let Some(report) = &cli.report {
            self.report = Some(ReportConfig {
                path: report.clone(),
            });
        }
        if cli.monitor {
            self.monitoring = Some(MonitoringConfig { enabled: true });
        }
    }
}

impl ConfigProvider for SimulationConfig {
    fn scenario_path(&self) -> &str {
        self.simulation
            .scenario_path
            .as_deref()
            .unwrap_or(DEFAULT_SCENARIO_PATH)
    }

    fn timing(&self) -> SimulationTiming {
        let timing = self.timing_section();
        SimulationTiming::new(
            timing.interval_count.unwrap_or(DEFAULT_INTERVAL_COUNT),
            Duration::from_millis(timing.interval_sleep_ms.unwrap_or(DEFAULT_INTERVAL_SLEEP_MS)),
            Duration::from_secs(timing.max_duration_seconds.unwrap_or(DEFAULT_MAX_DURATION_SECS)),
        )
    }

    fn report_path(&self) -> Option<&str> {
        self.report.as_ref().map(|report| report.path.as_str())
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl Validate for SimulationConfig {
    fn validate(&self) -> Result<()> {
        validate_path("simulation.scenario_path", self.scenario_path())?;

        let timing = self.timing_section();
        if let Some(count) = timing.interval_count {
            validate_positive_number("timing.interval_count", u64::from(count), 1)?;
        }
        if let Some(sleep_ms) = timing.interval_sleep_ms {
            validate_positive_number("timing.interval_sleep_ms", sleep_ms, 1)?;
        }
        if let Some(max_secs) = timing.max_duration_seconds {
            validate_positive_number("timing.max_duration_seconds", max_secs, 1)?;
        }

        if let Some(path) = self.report_path() {
            validate_report_extension("report.path", path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[simulation]
name = "morning-rush"
scenario_path = "scenarios/rush.txt"

[timing]
interval_count = 4
interval_sleep_ms = 40
max_duration_seconds = 60

[report]
path = "output/report.json"

[monitoring]
enabled = true
"#;

        let config = SimulationConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.name(), "morning-rush");
        assert_eq!(config.scenario_path(), "scenarios/rush.txt");
        let timing = config.timing();
        assert_eq!(timing.interval_count, 4);
        assert_eq!(timing.interval_sleep, Duration::from_millis(40));
        assert_eq!(timing.max_duration, Duration::from_secs(60));
        assert_eq!(config.report_path(), Some("output/report.json"));
        assert!(config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = SimulationConfig::from_toml_str("[simulation]\n").unwrap();

        assert_eq!(config.scenario_path(), DEFAULT_SCENARIO_PATH);
        assert_eq!(config.timing(), SimulationTiming::default());
        assert_eq!(config.report_path(), None);
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ELEVATOR_SIM_TEST_SCENARIO", "scenarios/from-env.txt");

        let toml_content = r#"
[simulation]
scenario_path = "${ELEVATOR_SIM_TEST_SCENARIO}"
"#;

        let config = SimulationConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.scenario_path(), "scenarios/from-env.txt");

        std::env::remove_var("ELEVATOR_SIM_TEST_SCENARIO");
    }

    #[test]
    fn test_config_validation() {
        let zero_interval = r#"
[simulation]

[timing]
interval_count = 0
"#;
        let config = SimulationConfig::from_toml_str(zero_interval).unwrap();
        assert!(config.validate().is_err());

        let bad_report = r#"
[simulation]

[report]
path = "report.xml"
"#;
        let config = SimulationConfig::from_toml_str(bad_report).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let result = SimulationConfig::from_toml_str("[simulation\nname = ");
        assert!(matches!(result, Err(SimError::ConfigValidationError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[simulation]\nname = \"file-test\"\n")
            .unwrap();

        let config = SimulationConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.name(), "file-test");
    }
}
