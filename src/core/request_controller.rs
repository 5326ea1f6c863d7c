use crate::core::dispatch::DispatchService;
use crate::core::elevator::SharedElevator;
use crate::domain::model::MoveRequest;
use crate::utils::error::Result;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};

/// Outcome of one dispatch attempt on the head of the request queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Assigned { elevator_id: usize },
    Waiting,
    Empty,
}

/// Central FIFO of pending move requests, handed out one at a time to the
/// cheapest valid elevator.
pub struct RequestController {
    dispatch: DispatchService,
    queue: Mutex<VecDeque<MoveRequest>>,
    elevators: Vec<SharedElevator>,
    dispatched: AtomicU64,
    skipped_noops: AtomicU64,
}

impl RequestController {
    pub fn new(elevators: Vec<SharedElevator>, dispatch: DispatchService) -> Self {
        Self {
            dispatch,
            queue: Mutex::new(VecDeque::new()),
            elevators,
            dispatched: AtomicU64::new(0),
            skipped_noops: AtomicU64::new(0),
        }
    }

    /// Appends the batch in order, dropping no-op requests. Returns how many
    /// were queued.
    pub async fn queue_requests(&self, requests: &[MoveRequest]) -> usize {
        let mut queue = self.queue.lock().await;
        let before = queue.len();
        queue.extend(requests.iter().filter(|request| !request.is_noop()).copied());
        let queued = queue.len() - before;

        let skipped = (requests.len() - queued) as u64;
        if skipped > 0 {
            tracing::debug!("Skipped {} no-op move requests", skipped);
            self.skipped_noops.fetch_add(skipped, Ordering::Relaxed);
        }
        queued
    }

    pub async fn pending_requests(&self) -> usize {
        self.queue.lock().await.len()
    }

    /// True once the queue is empty and no elevator has floors left to visit.
    pub async fn is_done(&self) -> bool {
        if !self.queue.lock().await.is_empty() {
            return false;
        }

        for elevator in &self.elevators {
            if elevator.lock().await.has_pending() {
                return false;
            }
        }

        true
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    pub fn skipped_noops(&self) -> u64 {
        self.skipped_noops.load(Ordering::Relaxed)
    }

    /// Tries to place the request at the head of the queue. The request
    /// stays at the head until some elevator can take it.
    pub async fn dispatch_next(&self) -> Result<DispatchOutcome> {
        let Some(request) = self.queue.lock().await.front().copied() else {
            return Ok(DispatchOutcome::Empty);
        };

        // Hold every car while choosing so the costs cannot shift under us.
        let mut cars = Vec::with_capacity(self.elevators.len());
        for elevator in &self.elevators {
            cars.push(elevator.lock().await);
        }

        let best = {
            let states: Vec<_> = cars.iter().map(|car| car.elevator()).collect();
            self.dispatch.find_best_elevator(&states, &request)?
        };

        let Some(index) = best else {
            return Ok(DispatchOutcome::Waiting);
        };

        let car = &mut cars[index];
        car.assign(&request);
        let elevator_id = car.elevator().id;
        drop(cars);

        self.queue.lock().await.pop_front();
        self.dispatched.fetch_add(1, Ordering::Relaxed);
        tracing::info!("Elevator {} assigned to request {}", elevator_id, request);

        Ok(DispatchOutcome::Assigned { elevator_id })
    }

    /// Dispatcher loop. Runs until shutdown is signalled and the queue has drained.
    pub async fn run(self: Arc<Self>, poll: Duration, shutdown: watch::Receiver<bool>) {
        tracing::info!("Request controller started");

        loop {
            let stopping = *shutdown.borrow();
            if stopping && self.queue.lock().await.is_empty() {
                break;
            }

            match self.dispatch_next().await {
                Ok(DispatchOutcome::Waiting) => {
                    tracing::info!("No elevator is available, waiting for one to become available.");
                }
                Ok(_) => {}
                Err(e) => {
                    let dropped = self.queue.lock().await.pop_front();
                    tracing::warn!("Dropping undispatchable request {:?}: {}", dropped, e);
                }
            }

            tokio::time::sleep(poll).await;
        }

        tracing::info!("Request controller stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::elevator::ElevatorController;
    use crate::domain::model::Direction;

    fn controller_with(elevator_count: usize) -> (RequestController, Vec<SharedElevator>) {
        let elevators: Vec<SharedElevator> = (0..elevator_count)
            .map(|id| ElevatorController::new(id, 10).shared())
            .collect();
        let controller = RequestController::new(elevators.clone(), DispatchService::new(1, 1));
        (controller, elevators)
    }

    #[tokio::test]
    async fn test_noops_are_filtered_when_queued() {
        let (controller, _) = controller_with(1);
        let queued = controller
            .queue_requests(&[
                MoveRequest::new(0, 0),
                MoveRequest::new(1, 5),
                MoveRequest::new(4, 4),
                MoveRequest::new(6, 2),
            ])
            .await;

        assert_eq!(queued, 2);
        assert_eq!(controller.pending_requests().await, 2);
        assert_eq!(controller.skipped_noops(), 2);
    }

    #[tokio::test]
    async fn test_dispatch_assigns_in_fifo_order() {
        let (controller, elevators) = controller_with(2);
        controller
            .queue_requests(&[MoveRequest::new(1, 5), MoveRequest::new(1, 3)])
            .await;

        assert_eq!(
            controller.dispatch_next().await.unwrap(),
            DispatchOutcome::Assigned { elevator_id: 0 }
        );
        assert_eq!(controller.pending_requests().await, 1);
        assert!(elevators[0].lock().await.elevator().up_queue.contains(&5));

        assert_eq!(
            controller.dispatch_next().await.unwrap(),
            DispatchOutcome::Assigned { elevator_id: 0 }
        );
        assert_eq!(controller.dispatch_next().await.unwrap(), DispatchOutcome::Empty);
        assert_eq!(controller.dispatched(), 2);
    }

    #[tokio::test]
    async fn test_head_waits_until_an_elevator_is_valid() {
        let (controller, elevators) = controller_with(1);
        {
            let mut car = elevators[0].lock().await;
            car.assign(&MoveRequest::new(8, 9));
            for _ in 0..4 {
                car.step();
            }
            assert_eq!(car.elevator().direction, Direction::Up);
        }

        controller.queue_requests(&[MoveRequest::new(2, 6)]).await;
        assert_eq!(controller.dispatch_next().await.unwrap(), DispatchOutcome::Waiting);
        assert_eq!(controller.pending_requests().await, 1);
        assert!(!controller.is_done().await);
    }

    #[tokio::test]
    async fn test_blocked_head_holds_back_later_requests() {
        let (controller, elevators) = controller_with(1);
        {
            let mut car = elevators[0].lock().await;
            car.assign(&MoveRequest::new(8, 9));
            for _ in 0..4 {
                car.step();
            }
            assert_eq!(car.elevator().direction, Direction::Up);
            assert!(car.elevator().current_floor > 2);
        }

        // (6, 9) is servable on its own but sits behind (2, 6)
        controller
            .queue_requests(&[MoveRequest::new(2, 6), MoveRequest::new(6, 9)])
            .await;
        assert_eq!(controller.dispatch_next().await.unwrap(), DispatchOutcome::Waiting);
        assert_eq!(controller.pending_requests().await, 2);
        assert_eq!(controller.dispatched(), 0);

        let car = elevators[0].lock().await;
        assert_eq!(car.stats().requests_assigned, 1);
        assert!(!car.elevator().up_queue.contains(&6));
    }

    #[tokio::test]
    async fn test_is_done_requires_idle_elevators() {
        let (controller, elevators) = controller_with(1);
        assert!(controller.is_done().await);

        controller.queue_requests(&[MoveRequest::new(1, 2)]).await;
        assert!(!controller.is_done().await);

        controller.dispatch_next().await.unwrap();
        assert!(!controller.is_done().await);

        let mut car = elevators[0].lock().await;
        while car.step() != Direction::None {}
        drop(car);
        assert!(controller.is_done().await);
    }

    #[tokio::test]
    async fn test_run_drains_queue_before_stopping() {
        let (controller, elevators) = controller_with(2);
        let controller = Arc::new(controller);
        controller
            .queue_requests(&[MoveRequest::new(1, 5), MoveRequest::new(3, 1)])
            .await;

        let (_tx, rx) = watch::channel(true);
        controller.clone().run(Duration::from_millis(1), rx).await;

        assert_eq!(controller.pending_requests().await, 0);
        assert_eq!(controller.dispatched(), 2);
        let assigned: u64 = {
            let mut total = 0;
            for elevator in &elevators {
                total += elevator.lock().await.stats().requests_assigned;
            }
            total
        };
        assert_eq!(assigned, 2);
    }
}
