use crate::domain::constraints::ScenarioConstraints;
use crate::domain::model::MoveRequest;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, SimError};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read};

const CONSTRAINT_FIELDS: usize = 6;
const REQUEST_FIELDS: usize = 3;
// The free-text header is consumed before the csv reader sees the input.
const HEADER_LINES: u64 = 1;

/// A parsed scenario: building constraints plus move requests grouped by
/// time slice (one slice per simulated hour).
///
/// File layout:
///
/// ```text
/// <header line, ignored>
/// floorCount, elevatorCount, elevatorCapacity, requestsPerTimeSlice, costPerFloor, costPerStop
/// timeSlice, floor, destination
/// ...
/// ```
///
/// No-op rows (`0, 0`) are kept so that real requests spread across the
/// slice when it is fed to the dispatcher in intervals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub constraints: ScenarioConstraints,
    pub time_slices: BTreeMap<u32, Vec<MoveRequest>>,
}

impl Scenario {
    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        tracing::debug!("Loading scenario from: {}", path);
        let data = storage.read_file(path).await?;
        Self::from_reader(data.as_slice())
    }

    pub fn from_scenario_str(content: &str) -> Result<Self> {
        Self::from_reader(content.as_bytes())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = BufReader::new(reader);
        let mut header = String::new();
        reader.read_line(&mut header)?;

        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut records = csv_reader.records();

        let constraints = match records.next() {
            Some(record) => parse_constraints(&record?)?,
            None => {
                return Err(SimError::ScenarioFormatError {
                    line: 2,
                    message: "No data found in the file, expected a constraints line".to_string(),
                })
            }
        };

        let mut time_slices: BTreeMap<u32, Vec<MoveRequest>> = BTreeMap::new();
        for record in records {
            let record = record?;
            let line = line_of(&record);

            if record.len() != REQUEST_FIELDS {
                return Err(SimError::ScenarioFormatError {
                    line,
                    message: format!(
                        "Invalid input format. Expected {} parameters, found {}",
                        REQUEST_FIELDS,
                        record.len()
                    ),
                });
            }

            let time_slice = parse_field(&record, 0, "timeSlice")?;
            let request = MoveRequest::new(
                parse_field(&record, 1, "floor")?,
                parse_field(&record, 2, "destination")?,
            );
            check_floors(&request, &constraints, line)?;

            let slice = time_slices.entry(time_slice).or_default();
            slice.push(request);
            if slice.len() > constraints.requests_per_time_slice as usize {
                return Err(SimError::ScenarioFormatError {
                    line,
                    message: format!(
                        "Time slice {} has more than {} requests",
                        time_slice, constraints.requests_per_time_slice
                    ),
                });
            }
        }

        Ok(Self {
            constraints,
            time_slices,
        })
    }

    /// All rows, no-ops included.
    pub fn total_requests(&self) -> usize {
        self.time_slices.values().map(Vec::len).sum()
    }

    pub fn noop_requests(&self) -> usize {
        self.time_slices
            .values()
            .flatten()
            .filter(|request| request.is_noop())
            .count()
    }
}

/// Splits one slice into at most `interval_count` consecutive chunks of
/// `ceil(len / interval_count)` requests. A count of zero releases the whole
/// slice at once.
pub fn split_into_intervals(requests: &[MoveRequest], interval_count: u32) -> Vec<&[MoveRequest]> {
    if requests.is_empty() {
        return Vec::new();
    }
    let interval = requests.len().div_ceil(interval_count.max(1) as usize);
    requests.chunks(interval).collect()
}

fn line_of(record: &StringRecord) -> u64 {
    record
        .position()
        .map(|position| position.line() + HEADER_LINES)
        .unwrap_or(0)
}

fn parse_field(record: &StringRecord, index: usize, name: &str) -> Result<u32> {
    let raw = record.get(index).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(value) if value < 0 => Err(SimError::ScenarioFormatError {
            line: line_of(record),
            message: format!("{} must be non-negative, found {}", name, value),
        }),
        Ok(value) => u32::try_from(value).map_err(|_| SimError::ScenarioFormatError {
            line: line_of(record),
            message: format!("{} is out of range: {}", name, value),
        }),
        Err(e) => Err(SimError::ScenarioFormatError {
            line: line_of(record),
            message: format!("Invalid number format for {} '{}': {}", name, raw, e),
        }),
    }
}

fn parse_constraints(record: &StringRecord) -> Result<ScenarioConstraints> {
    if record.len() != CONSTRAINT_FIELDS {
        return Err(SimError::ScenarioFormatError {
            line: line_of(record),
            message: format!(
                "Expected {} constraint values, found {}",
                CONSTRAINT_FIELDS,
                record.len()
            ),
        });
    }

    ScenarioConstraints::new(
        parse_field(record, 0, "floorCount")?,
        parse_field(record, 1, "elevatorCount")?,
        parse_field(record, 2, "elevatorCapacity")?,
        parse_field(record, 3, "requestsPerTimeSlice")?,
        parse_field(record, 4, "costPerFloor")?,
        parse_field(record, 5, "costPerStop")?,
    )
}

fn check_floors(request: &MoveRequest, constraints: &ScenarioConstraints, line: u64) -> Result<()> {
    if request.is_noop() {
        return Ok(());
    }

    let in_building = |floor: u32| (1..=constraints.floor_count).contains(&floor);
    if !in_building(request.current_floor) || !in_building(request.target_floor) {
        return Err(SimError::ScenarioFormatError {
            line,
            message: format!(
                "{} references a floor outside 1..={}",
                request, constraints.floor_count
            ),
        });
    }
    Ok(())
}
