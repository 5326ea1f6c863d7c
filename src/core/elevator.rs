use crate::domain::model::{Direction, Elevator, MoveRequest};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};

/// Elevator state shared between the dispatcher and the elevator's own worker.
pub type SharedElevator = Arc<Mutex<ElevatorController>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ElevatorStats {
    pub floors_travelled: u64,
    pub stops: u64,
    pub requests_assigned: u64,
}

/// Drives one elevator car: accepts floors to visit and moves one floor per tick.
#[derive(Debug, Clone)]
pub struct ElevatorController {
    elevator: Elevator,
    top_floor: u32,
    stats: ElevatorStats,
}

impl ElevatorController {
    pub fn new(elevator_id: usize, top_floor: u32) -> Self {
        Self {
            elevator: Elevator::new(elevator_id),
            top_floor,
            stats: ElevatorStats::default(),
        }
    }

    pub fn shared(self) -> SharedElevator {
        Arc::new(Mutex::new(self))
    }

    pub fn elevator(&self) -> &Elevator {
        &self.elevator
    }

    pub fn stats(&self) -> ElevatorStats {
        self.stats
    }

    pub fn top_floor(&self) -> u32 {
        self.top_floor
    }

    pub fn has_pending(&self) -> bool {
        self.elevator.has_pending()
    }

    /// Sends the car to the pickup floor, then queues the destination.
    /// The request must already have been validated against this elevator.
    pub fn queue_request(&mut self, request: &MoveRequest) {
        let elevator = &mut self.elevator;

        if elevator.current_floor < request.current_floor {
            elevator.up_queue.insert(request.current_floor);
            elevator.direction = Direction::Up;
        } else if elevator.current_floor > request.current_floor {
            elevator.down_queue.insert(request.current_floor);
            elevator.direction = Direction::Down;
        }

        match request.direction() {
            Direction::Up => {
                elevator.up_queue.insert(request.target_floor);
            }
            Direction::Down => {
                elevator.down_queue.insert(request.target_floor);
            }
            Direction::None => {}
        }
    }

    /// Queues a dispatched passenger request and counts it.
    pub fn assign(&mut self, request: &MoveRequest) {
        self.stats.requests_assigned += 1;
        self.queue_request(request);
    }

    /// Advances the car by one tick and returns its direction afterwards.
    pub fn step(&mut self) -> Direction {
        match self.elevator.direction {
            Direction::Up => {
                let current = self.elevator.current_floor;
                match self.elevator.up_queue.first().copied() {
                    Some(next) if current < next && current < self.top_floor => {
                        self.move_one(Direction::Up);
                    }
                    _ => self.arrive(Direction::Up),
                }
            }
            Direction::Down => {
                let current = self.elevator.current_floor;
                match self.elevator.down_queue.last().copied() {
                    Some(next) if current > next && current > Elevator::LOBBY => {
                        self.move_one(Direction::Down);
                    }
                    _ => self.arrive(Direction::Down),
                }
            }
            Direction::None => self.step_idle(),
        }

        self.elevator.direction
    }

    fn arrive(&mut self, travelling: Direction) {
        let current = self.elevator.current_floor;
        match travelling {
            Direction::Up => self.elevator.up_queue.remove(&current),
            Direction::Down => self.elevator.down_queue.remove(&current),
            Direction::None => false,
        };
        self.elevator.direction = Direction::None;
        self.stats.stops += 1;
        tracing::debug!("    Elevator id {}: stopped at floor [{}]", self.elevator.id, current);
    }

    fn step_idle(&mut self) {
        let current = self.elevator.current_floor;
        self.elevator.up_queue.remove(&current);
        self.elevator.down_queue.remove(&current);

        let lowest_up = self.elevator.up_queue.first().copied();
        let highest_down = self.elevator.down_queue.last().copied();
        let towards_up = |floor: u32| if floor > current { Direction::Up } else { Direction::Down };
        let towards_down = |floor: u32| if floor < current { Direction::Down } else { Direction::Up };

        let direction = match (lowest_up, highest_down) {
            (Some(up), Some(down)) => {
                if self.elevator.up_queue.len() > self.elevator.down_queue.len() {
                    towards_up(up)
                } else {
                    towards_down(down)
                }
            }
            (Some(up), None) => towards_up(up),
            (None, Some(down)) => towards_down(down),
            (None, None) => {
                if current != Elevator::LOBBY {
                    tracing::debug!("    Elevator id {}: Returning to first floor.", self.elevator.id);
                    self.queue_request(&MoveRequest::new(current, Elevator::LOBBY));
                }
                Direction::None
            }
        };

        self.elevator.direction = direction;
        if direction != Direction::None {
            self.move_one(direction);
        }
    }

    fn move_one(&mut self, direction: Direction) {
        let elevator = &mut self.elevator;
        match direction {
            Direction::Up => elevator.current_floor += 1,
            Direction::Down => elevator.current_floor -= 1,
            Direction::None => return,
        }
        self.stats.floors_travelled += 1;
        tracing::debug!(
            "    Elevator id {}: Moving {:?} to floor [{}]",
            elevator.id,
            direction,
            elevator.current_floor
        );
    }
}

/// Elevator worker loop: keeps stepping while the simulation runs or while
/// floors remain queued.
pub async fn run_elevator(
    elevator: SharedElevator,
    tick: Duration,
    shutdown: watch::Receiver<bool>,
) {
    let id = elevator.lock().await.elevator().id;
    tracing::info!("Elevator id {}: started", id);

    loop {
        {
            let mut controller = elevator.lock().await;
            let stopping = *shutdown.borrow();
            if stopping && !controller.has_pending() {
                break;
            }
            controller.step();
        }

        tokio::time::sleep(tick).await;
    }

    tracing::info!("Elevator id {}: stopped", id);
}
