pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::SimulationConfig};
pub use crate::core::{
    dispatch::DispatchService, elevator::ElevatorController, engine::SimulationEngine,
    report::SimulationReport, request_controller::RequestController, scenario::Scenario,
    simulation::Simulation,
};
pub use crate::utils::error::{Result, SimError};
