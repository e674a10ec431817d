use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use demography::cli::Cli;
use demography::utils::logging::console::print_dashboard;
use demography::{Boundaries, DashboardConfig, DashboardSession, DemographyTables};
use log::{error, info};

const GENERIC_FAILURE: &str = "Something went wrong. Reload the page to try again.";

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => DashboardConfig::from_json_file(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => DashboardConfig::default(),
    };

    let start = Instant::now();
    let tables = DemographyTables::load(&config).context("loading tables")?;
    let boundaries = Boundaries::from_path(&config.boundaries_path, &config.boundary_name_property)
        .context("loading region boundaries")?;
    info!("Loaded dashboard data in {:?}", start.elapsed());

    let mut session = DashboardSession::new(tables, boundaries, config)?;
    cli.apply_selections(&mut session);

    let view = session.recompute().context("computing dashboard")?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_dashboard(&view);
    }
    Ok(())
}

fn main() -> ExitCode {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse_args();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("{GENERIC_FAILURE}");
            ExitCode::FAILURE
        }
    }
}
