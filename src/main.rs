use clap::Parser;
use elevator_sim::core::{ConfigProvider, Storage};
use elevator_sim::utils::{logger, validation::Validate};
use elevator_sim::{CliConfig, LocalStorage, SimError, SimulationConfig, SimulationEngine};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting elevator simulation");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match SimulationConfig::from_file(&path) {
                Ok(mut config) => {
                    config.apply_overrides(&cli);
                    tracing::info!("Simulation profile: {}", config.name());
                    run(&config, cli.dry_run).await
                }
                Err(e) => Err(e),
            }
        }
        None => run(&cli, cli.dry_run).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Simulation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run<C: ConfigProvider + Validate>(config: &C, dry_run: bool) -> Result<(), SimError> {
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    let engine = SimulationEngine::new(LocalStorage::current_dir());

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - the scenario is parsed but not simulated");
        return dry_run_summary(&engine, config).await;
    }

    if config.monitoring_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    let report = engine.run(config).await?;

    println!("✅ Simulation completed in {}ms", report.elapsed_ms);
    println!(
        "   {} requests dispatched, {} no-ops skipped, {} floors travelled",
        report.dispatched_requests,
        report.skipped_noops,
        report.floors_travelled()
    );
    for elevator in &report.elevators {
        println!(
            "   Elevator {}: {} requests, {} stops, {} floors, ended on floor {}",
            elevator.id,
            elevator.requests_assigned,
            elevator.stops,
            elevator.floors_travelled,
            elevator.final_floor
        );
    }
    if let Some(path) = config.report_path() {
        println!("📁 Report saved to: {}", path);
    }

    Ok(())
}

async fn dry_run_summary<S: Storage, C: ConfigProvider>(
    engine: &SimulationEngine<S>,
    config: &C,
) -> Result<(), SimError> {
    let scenario = engine.load_scenario(config).await?;
    let timing = config.timing();

    println!("Scenario: {}", config.scenario_path());
    println!("  {}", scenario.constraints);
    for (time_slice, requests) in &scenario.time_slices {
        let noops = requests.iter().filter(|request| request.is_noop()).count();
        println!(
            "  Time slice {}: {} requests ({} no-ops)",
            time_slice,
            requests.len(),
            noops
        );
    }
    println!(
        "Timing: {} intervals of {:?} per time slice, give up after {:?}",
        timing.interval_count, timing.interval_sleep, timing.max_duration
    );
    Ok(())
}
