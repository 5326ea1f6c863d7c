use crate::domain::constraints::ScenarioConstraints;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, SimError};
use crate::utils::validation::validate_report_extension;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElevatorReport {
    pub id: usize,
    pub final_floor: u32,
    pub floors_travelled: u64,
    pub stops: u64,
    pub requests_assigned: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub constraints: ScenarioConstraints,
    pub total_requests: u64,
    pub dispatched_requests: u64,
    pub skipped_noops: u64,
    pub elevators: Vec<ElevatorReport>,
}

impl SimulationReport {
    pub fn floors_travelled(&self) -> u64 {
        self.elevators.iter().map(|e| e.floors_travelled).sum()
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// One row per elevator.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for elevator in &self.elevators {
            writer.serialize(elevator)?;
        }
        writer
            .into_inner()
            .map_err(|e| SimError::IoError(e.into_error()))
    }

    /// Writes the report as JSON or CSV depending on the file extension.
    pub async fn save<S: Storage>(&self, storage: &S, path: &str) -> Result<()> {
        validate_report_extension("report.path", path)?;

        let data = match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some("csv") => self.to_csv()?,
            _ => self.to_json()?,
        };

        tracing::debug!("Writing report ({} bytes) to {}", data.len(), path);
        storage.write_file(path, &data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> SimulationReport {
        SimulationReport {
            started_at: Utc::now(),
            elapsed_ms: 420,
            constraints: ScenarioConstraints::new(10, 2, 5, 20, 1, 1).unwrap(),
            total_requests: 4,
            dispatched_requests: 3,
            skipped_noops: 1,
            elevators: vec![
                ElevatorReport {
                    id: 0,
                    final_floor: 1,
                    floors_travelled: 12,
                    stops: 4,
                    requests_assigned: 2,
                },
                ElevatorReport {
                    id: 1,
                    final_floor: 6,
                    floors_travelled: 5,
                    stops: 2,
                    requests_assigned: 1,
                },
            ],
        }
    }

    #[test]
    fn test_json_contains_summary_fields() {
        let json: serde_json::Value = serde_json::from_slice(&sample_report().to_json().unwrap()).unwrap();
        assert_eq!(json["dispatched_requests"], 3);
        assert_eq!(json["constraints"]["floor_count"], 10);
        assert_eq!(json["elevators"][1]["final_floor"], 6);
    }

    #[test]
    fn test_csv_has_one_row_per_elevator() {
        let csv = String::from_utf8(sample_report().to_csv().unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "id,final_floor,floors_travelled,stops,requests_assigned");
        assert_eq!(lines[1], "0,1,12,4,2");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_total_floors_travelled() {
        assert_eq!(sample_report().floors_travelled(), 17);
    }
}
