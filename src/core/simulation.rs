use crate::core::dispatch::DispatchService;
use crate::core::elevator::{run_elevator, ElevatorController, SharedElevator};
use crate::core::report::{ElevatorReport, SimulationReport};
use crate::core::request_controller::RequestController;
use crate::core::scenario::{split_into_intervals, Scenario};
use crate::domain::timing::SimulationTiming;
use crate::utils::error::{Result, SimError};
use crate::utils::monitor::ResourceMonitor;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Runs a scenario: one worker per elevator, one dispatcher, and a feeder
/// that releases each time slice in timed intervals.
pub struct Simulation {
    scenario: Scenario,
    timing: SimulationTiming,
    elevators: Vec<SharedElevator>,
    request_controller: Arc<RequestController>,
    shutdown: watch::Sender<bool>,
    workers: Vec<JoinHandle<()>>,
    monitor: ResourceMonitor,
}

impl Simulation {
    pub fn new(scenario: Scenario, timing: SimulationTiming) -> Self {
        let constraints = scenario.constraints;
        let elevators: Vec<SharedElevator> = (0..constraints.elevator_count as usize)
            .map(|id| ElevatorController::new(id, constraints.floor_count).shared())
            .collect();

        let request_controller = Arc::new(RequestController::new(
            elevators.clone(),
            DispatchService::from_constraints(&constraints),
        ));
        let (shutdown, _) = watch::channel(false);

        Self {
            scenario,
            timing,
            elevators,
            request_controller,
            shutdown,
            workers: Vec::new(),
            monitor: ResourceMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(scenario: Scenario, timing: SimulationTiming, monitor_enabled: bool) -> Self {
        let mut simulation = Self::new(scenario, timing);
        simulation.monitor = ResourceMonitor::new(monitor_enabled);
        simulation
    }

    pub fn request_controller(&self) -> &Arc<RequestController> {
        &self.request_controller
    }

    pub fn elevators(&self) -> &[SharedElevator] {
        &self.elevators
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitor.is_enabled()
    }

    /// Spawns the dispatcher and elevator workers.
    pub fn start(&mut self) {
        if !self.workers.is_empty() {
            return;
        }
        self.shutdown.send_replace(false);

        let controller = self.request_controller.clone();
        self.workers.push(tokio::spawn(
            controller.run(self.timing.dispatcher_poll(), self.shutdown.subscribe()),
        ));
        for elevator in &self.elevators {
            self.workers.push(tokio::spawn(run_elevator(
                elevator.clone(),
                self.timing.elevator_tick(),
                self.shutdown.subscribe(),
            )));
        }
    }

    /// Feeds every time slice to the dispatcher, one interval at a time.
    pub async fn execute(&self) {
        tracing::debug!("Scenario constraints: {}", self.scenario.constraints);

        for (time_slice, requests) in &self.scenario.time_slices {
            tracing::info!("Time slice {}: {} requests", time_slice, requests.len());

            for interval in split_into_intervals(requests, self.timing.interval_count) {
                self.request_controller.queue_requests(interval).await;
                tokio::time::sleep(self.timing.interval_sleep).await;
            }
        }
    }

    pub async fn wait_until_done(&self) {
        while !self.request_controller.is_done().await {
            tokio::time::sleep(self.timing.done_poll()).await;
        }
    }

    /// Signals the workers to stop once their queues are empty and joins them.
    pub async fn shutdown(&mut self) -> Result<()> {
        self.shutdown.send_replace(true);
        for worker in self.workers.drain(..) {
            worker.await?;
        }
        Ok(())
    }

    fn abort(&mut self) {
        self.shutdown.send_replace(true);
        for worker in self.workers.drain(..) {
            worker.abort();
        }
    }

    pub async fn run(mut self) -> Result<SimulationReport> {
        let started_at = Utc::now();
        let started = Instant::now();

        tracing::info!(
            "Starting simulation with {} elevators over {} floors",
            self.scenario.constraints.elevator_count,
            self.scenario.constraints.floor_count
        );
        self.monitor.log_phase("Simulation start");

        self.start();

        let drive = async {
            self.execute().await;
            self.monitor.log_phase("All requests released");
            self.wait_until_done().await;
        };
        if tokio::time::timeout(self.timing.max_duration, drive).await.is_err() {
            self.abort();
            return Err(SimError::SimulationError {
                message: format!(
                    "backlog did not drain within {:?}",
                    self.timing.max_duration
                ),
            });
        }

        self.shutdown().await?;
        self.monitor.log_phase("Simulation finished");

        let report = self.build_report(started_at, started.elapsed().as_millis() as u64).await;
        tracing::info!(
            "Simulation finished: {} requests dispatched, {} floors travelled in {}ms",
            report.dispatched_requests,
            report.floors_travelled(),
            report.elapsed_ms
        );
        Ok(report)
    }

    async fn build_report(&self, started_at: chrono::DateTime<Utc>, elapsed_ms: u64) -> SimulationReport {
        let mut elevators = Vec::with_capacity(self.elevators.len());
        for elevator in &self.elevators {
            let controller = elevator.lock().await;
            let stats = controller.stats();
            elevators.push(ElevatorReport {
                id: controller.elevator().id,
                final_floor: controller.elevator().current_floor,
                floors_travelled: stats.floors_travelled,
                stops: stats.stops,
                requests_assigned: stats.requests_assigned,
            });
        }

        SimulationReport {
            started_at,
            elapsed_ms,
            constraints: self.scenario.constraints,
            total_requests: self.scenario.total_requests() as u64,
            dispatched_requests: self.request_controller.dispatched(),
            skipped_noops: self.request_controller.skipped_noops(),
            elevators,
        }
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.abort();
    }
}
