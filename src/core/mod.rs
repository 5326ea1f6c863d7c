pub mod dispatch;
pub mod elevator;
pub mod engine;
pub mod report;
pub mod request_controller;
pub mod scenario;
pub mod simulation;

pub use crate::domain::constraints::ScenarioConstraints;
pub use crate::domain::model::{Direction, Elevator, MoveRequest};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::domain::timing::SimulationTiming;
pub use crate::utils::error::Result;
