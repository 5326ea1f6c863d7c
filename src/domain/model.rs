use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Direction of an elevator's travel or of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    #[default]
    None,
}

/// Pick a passenger up at `current_floor` and carry them to `target_floor`.
///
/// A request whose floors are equal is a no-op; scenario files use `0, 0`
/// to pad time slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub current_floor: u32,
    pub target_floor: u32,
}

impl MoveRequest {
    pub fn new(current_floor: u32, target_floor: u32) -> Self {
        Self {
            current_floor,
            target_floor,
        }
    }

    pub fn direction(&self) -> Direction {
        if self.current_floor == self.target_floor {
            Direction::None
        } else if self.current_floor < self.target_floor {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub fn is_noop(&self) -> bool {
        self.direction() == Direction::None
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MoveRequest {{ current_floor={} target_floor={} }}",
            self.current_floor, self.target_floor
        )
    }
}

/// Elevator car state. Floors still to visit are split into an up queue and
/// a down queue, each kept sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elevator {
    pub id: usize,
    pub current_floor: u32,
    pub direction: Direction,
    pub up_queue: BTreeSet<u32>,
    pub down_queue: BTreeSet<u32>,
}

impl Elevator {
    pub const LOBBY: u32 = 1;

    pub fn new(id: usize) -> Self {
        Self {
            id,
            current_floor: Self::LOBBY,
            direction: Direction::None,
            up_queue: BTreeSet::new(),
            down_queue: BTreeSet::new(),
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.up_queue.is_empty() || !self.down_queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_direction() {
        assert_eq!(MoveRequest::new(1, 5).direction(), Direction::Up);
        assert_eq!(MoveRequest::new(5, 1).direction(), Direction::Down);
        assert_eq!(MoveRequest::new(3, 3).direction(), Direction::None);
        assert!(MoveRequest::new(0, 0).is_noop());
    }

    #[test]
    fn test_request_display() {
        assert_eq!(
            MoveRequest::new(2, 7).to_string(),
            "MoveRequest { current_floor=2 target_floor=7 }"
        );
    }

    #[test]
    fn test_new_elevator_waits_in_lobby() {
        let elevator = Elevator::new(3);
        assert_eq!(elevator.id, 3);
        assert_eq!(elevator.current_floor, 1);
        assert_eq!(elevator.direction, Direction::None);
        assert!(!elevator.has_pending());
    }
}
