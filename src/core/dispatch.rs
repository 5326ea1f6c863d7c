use crate::domain::constraints::ScenarioConstraints;
use crate::domain::model::{Direction, Elevator, MoveRequest};
use crate::utils::error::{Result, SimError};

/// Picks the cheapest elevator that can take a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchService {
    cost_per_floor: u64,
    cost_per_stop: u64,
}

impl DispatchService {
    pub fn new(cost_per_floor: u32, cost_per_stop: u32) -> Self {
        Self {
            cost_per_floor: u64::from(cost_per_floor),
            cost_per_stop: u64::from(cost_per_stop),
        }
    }

    pub fn from_constraints(constraints: &ScenarioConstraints) -> Self {
        Self::new(constraints.cost_per_floor, constraints.cost_per_stop)
    }

    /// Index of the lowest-cost valid elevator, or `None` when every
    /// elevator is travelling away from the pickup. Ties go to the first.
    pub fn find_best_elevator(
        &self,
        elevators: &[&Elevator],
        request: &MoveRequest,
    ) -> Result<Option<usize>> {
        let mut best: Option<(usize, u64)> = None;

        for (index, elevator) in elevators.iter().enumerate() {
            if !self.is_valid_elevator(elevator, request)? {
                continue;
            }
            let cost = self.cost(elevator, request);
            match best {
                Some((_, lowest)) if lowest <= cost => {}
                _ => best = Some((index, cost)),
            }
        }

        Ok(best.map(|(index, _)| index))
    }

    pub fn cost(&self, elevator: &Elevator, request: &MoveRequest) -> u64 {
        let floors_away = u64::from(elevator.current_floor.abs_diff(request.current_floor));
        let mut cost = floors_away * self.cost_per_floor + self.cost_per_stop;

        // Weigh queued floors so that load spreads across the bank.
        match elevator.direction {
            Direction::Up => cost += elevator.up_queue.len() as u64 * self.cost_per_floor,
            Direction::Down => cost += elevator.down_queue.len() as u64 * self.cost_per_floor,
            Direction::None => {}
        }
        cost
    }

    /// An elevator can take a request when it is idle or the pickup lies
    /// ahead of it in the request's direction.
    pub fn is_valid_elevator(&self, elevator: &Elevator, request: &MoveRequest) -> Result<bool> {
        let request_direction = request.direction();
        if request_direction == Direction::None {
            return Err(SimError::InvalidRequestError {
                message: "No-op move requests are not supported".to_string(),
            });
        }

        Ok(elevator.direction == Direction::None
            || (request_direction == Direction::Up && elevator.current_floor <= request.current_floor)
            || (request_direction == Direction::Down
                && elevator.current_floor >= request.current_floor))
    }
}
