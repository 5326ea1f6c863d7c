use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Worker task failed: {0}")]
    JoinError(#[from] tokio::task::JoinError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Scenario format error at line {line}: {message}")]
    ScenarioFormatError { line: u64, message: String },

    #[error("Invalid move request: {message}")]
    InvalidRequestError { message: String },

    #[error("Simulation error: {message}")]
    SimulationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Simulation,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SimError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SimError::ConfigError { .. }
            | SimError::InvalidConfigValueError { .. }
            | SimError::MissingConfigError { .. }
            | SimError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            SimError::ScenarioFormatError { .. }
            | SimError::InvalidRequestError { .. }
            | SimError::CsvError(_) => ErrorCategory::Input,
            SimError::SimulationError { .. } | SimError::JoinError(_) => ErrorCategory::Simulation,
            SimError::IoError(_) | SimError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Simulation => match self {
                // the backlog timed out; a rerun with a longer budget may succeed
                SimError::SimulationError { .. } => ErrorSeverity::Medium,
                _ => ErrorSeverity::Critical,
            },
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SimError::IoError(_) => {
                "Check that the file exists and that the process can read and write it".to_string()
            }
            SimError::CsvError(_) | SimError::ScenarioFormatError { .. } => {
                "Check the scenario file: a header line, one constraints line with 6 values, then 'timeSlice, floor, destination' lines".to_string()
            }
            SimError::SerializationError(_) => "Check the report output location".to_string(),
            SimError::JoinError(_) => "Rerun with --verbose to see which worker failed".to_string(),
            SimError::ConfigError { .. } | SimError::ConfigValidationError { .. } => {
                "Review the TOML configuration file syntax and section names".to_string()
            }
            SimError::InvalidConfigValueError { field, .. } => {
                format!("Adjust the value of '{}' to be within its allowed range", field)
            }
            SimError::MissingConfigError { field } => {
                format!("Add the '{}' setting to the configuration", field)
            }
            SimError::InvalidRequestError { .. } => {
                "Use distinct pickup and destination floors within the building".to_string()
            }
            SimError::SimulationError { .. } => {
                "Increase timing.max_duration_seconds or reduce the scenario size".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Scenario input problem: {}", self),
            ErrorCategory::Simulation => format!("The simulation could not finish: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
