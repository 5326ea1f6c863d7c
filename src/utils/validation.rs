use crate::utils::error::{Result, SimError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(SimError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SimError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(SimError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SimError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Report files are written as JSON or CSV, picked by extension.
pub fn validate_report_extension(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;

    match std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some("json") | Some("csv") => Ok(()),
        Some(other) => Err(SimError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: format!("Unsupported report extension: {}. Allowed extensions: json, csv", other),
        }),
        None => Err(SimError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Report file has no extension".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("scenario", "scenarios/scenario.txt").is_ok());
        assert!(validate_path("scenario", "").is_err());
        assert!(validate_path("scenario", "   ").is_err());
        assert!(validate_path("scenario", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("timing.interval_count", 5, 1).is_ok());
        assert!(validate_positive_number("timing.interval_count", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("floor_count", 150u32, 1, 150).is_ok());
        assert!(validate_range("floor_count", 1u32, 1, 150).is_ok());
        assert!(validate_range("floor_count", 0u32, 1, 150).is_err());
        assert!(validate_range("floor_count", 151u32, 1, 150).is_err());
    }

    #[test]
    fn test_validate_report_extension() {
        assert!(validate_report_extension("report.path", "out/report.json").is_ok());
        assert!(validate_report_extension("report.path", "out/report.csv").is_ok());
        assert!(validate_report_extension("report.path", "out/report.txt").is_err());
        assert!(validate_report_extension("report.path", "out/report").is_err());
    }
}
