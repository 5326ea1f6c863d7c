use crate::domain::timing::SimulationTiming;
use crate::utils::error::Result;

/// File access for scenario input and report output.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Resolved run settings, whether they came from the command line or a TOML file.
pub trait ConfigProvider: Send + Sync {
    fn scenario_path(&self) -> &str;
    fn timing(&self) -> SimulationTiming;
    fn report_path(&self) -> Option<&str>;
    fn monitoring_enabled(&self) -> bool;
}
