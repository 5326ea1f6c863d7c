use crate::utils::error::Result;
use crate::utils::validation::{validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_FLOORS: u32 = 150;
pub const MAX_ELEVATORS: u32 = 150;
pub const MAX_CAPACITY: u32 = 10;
pub const MAX_REQUESTS_PER_TIME_SLICE: u32 = 100;
pub const MAX_COST: u32 = 1000;

/// Building and dispatch limits for one scenario.
///
/// `elevator_capacity` is carried and reported but dispatch does not
/// enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConstraints {
    pub floor_count: u32,
    pub elevator_count: u32,
    pub elevator_capacity: u32,
    pub requests_per_time_slice: u32,
    pub cost_per_floor: u32,
    pub cost_per_stop: u32,
}

impl ScenarioConstraints {
    /// Builds and validates a constraints set.
    pub fn new(
        floor_count: u32,
        elevator_count: u32,
        elevator_capacity: u32,
        requests_per_time_slice: u32,
        cost_per_floor: u32,
        cost_per_stop: u32,
    ) -> Result<Self> {
        let constraints = Self {
            floor_count,
            elevator_count,
            elevator_capacity,
            requests_per_time_slice,
            cost_per_floor,
            cost_per_stop,
        };
        constraints.validate()?;
        Ok(constraints)
    }
}

impl Validate for ScenarioConstraints {
    fn validate(&self) -> Result<()> {
        validate_range("floor_count", self.floor_count, 1, MAX_FLOORS)?;
        validate_range("elevator_count", self.elevator_count, 1, MAX_ELEVATORS)?;
        validate_range("elevator_capacity", self.elevator_capacity, 1, MAX_CAPACITY)?;
        validate_range(
            "requests_per_time_slice",
            self.requests_per_time_slice,
            1,
            MAX_REQUESTS_PER_TIME_SLICE,
        )?;
        validate_range("cost_per_floor", self.cost_per_floor, 0, MAX_COST)?;
        validate_range("cost_per_stop", self.cost_per_stop, 0, MAX_COST)?;
        Ok(())
    }
}

impl fmt::Display for ScenarioConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScenarioConstraints {{ floor_count={}, elevator_count={}, elevator_capacity={}, requests_per_time_slice={}, cost_per_floor={}, cost_per_stop={} }}",
            self.floor_count,
            self.elevator_count,
            self.elevator_capacity,
            self.requests_per_time_slice,
            self.cost_per_floor,
            self.cost_per_stop
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SimError;

    #[test]
    fn test_valid_constraints() {
        let constraints = ScenarioConstraints::new(10, 3, 5, 20, 1, 1).unwrap();
        assert_eq!(constraints.floor_count, 10);
        assert_eq!(constraints.elevator_count, 3);
    }

    #[test]
    fn test_upper_bounds_are_inclusive() {
        assert!(ScenarioConstraints::new(150, 150, 10, 100, 1000, 1000).is_ok());
    }

    #[test]
    fn test_out_of_range_values_name_the_field() {
        let cases = [
            (ScenarioConstraints::new(0, 1, 1, 1, 1, 1), "floor_count"),
            (ScenarioConstraints::new(151, 1, 1, 1, 1, 1), "floor_count"),
            (ScenarioConstraints::new(10, 0, 1, 1, 1, 1), "elevator_count"),
            (ScenarioConstraints::new(10, 1, 11, 1, 1, 1), "elevator_capacity"),
            (ScenarioConstraints::new(10, 1, 1, 101, 1, 1), "requests_per_time_slice"),
            (ScenarioConstraints::new(10, 1, 1, 1, 1001, 1), "cost_per_floor"),
        ];

        for (result, expected_field) in cases {
            match result {
                Err(SimError::InvalidConfigValueError { field, .. }) => {
                    assert_eq!(field, expected_field)
                }
                other => panic!("expected invalid {}, got {:?}", expected_field, other),
            }
        }
    }
}
