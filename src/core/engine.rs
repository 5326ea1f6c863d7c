use crate::core::report::SimulationReport;
use crate::core::scenario::Scenario;
use crate::core::simulation::Simulation;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;

/// Load the scenario, run it, and persist the report.
pub struct SimulationEngine<S: Storage> {
    storage: S,
}

impl<S: Storage> SimulationEngine<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn load_scenario<C: ConfigProvider>(&self, config: &C) -> Result<Scenario> {
        let scenario = Scenario::load(&self.storage, config.scenario_path()).await?;
        tracing::info!(
            "📋 Loaded scenario: {} time slices, {} requests ({} no-ops)",
            scenario.time_slices.len(),
            scenario.total_requests(),
            scenario.noop_requests()
        );
        Ok(scenario)
    }

    pub async fn run<C: ConfigProvider>(&self, config: &C) -> Result<SimulationReport> {
        let scenario = self.load_scenario(config).await?;

        let simulation =
            Simulation::new_with_monitoring(scenario, config.timing(), config.monitoring_enabled());
        let report = simulation.run().await?;

        if let Some(path) = config.report_path() {
            report.save(&self.storage, path).await?;
            tracing::info!("📁 Report saved to: {}", path);
        }

        Ok(report)
    }
}
