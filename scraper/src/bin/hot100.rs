use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use hot100_scraper::{verify_archive, Cli, Harvester, HttpChartSource, Mode, RunConfig};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let today = chrono::Local::now().date_naive();
    let config = match cli.into_config(today) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}\n", e);
            eprintln!("Usage: hot100 <START> [END]   (see --help)");
            return ExitCode::from(2);
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &RunConfig) -> Result<()> {
    match &config.mode {
        Mode::Verify => {
            log::info!("Verify flag specified. START and END are ignored.");
            log::info!(
                "Checking all data in {}... deleting invalid files.",
                config.data_dir.display()
            );
            verify_archive(&config.data_dir);
        }
        Mode::Harvest { window } => {
            log::info!("Using {} data format.", config.format);
            log::info!("Weeks {} up to {}", window.start(), window.end());

            let source = HttpChartSource::new(&config.chart_url, config.timeout)?;
            let summary = Harvester::new(source, config.archive())
                .throttle(config.throttle)
                .max_fetches(config.max_fetches)
                .run(window.anchors());

            log::info!(
                "-- Done. {} written, {} already archived, {} fetch failures, {} write failures",
                summary.written,
                summary.skipped,
                summary.fetch_failures,
                summary.write_failures
            );
            if summary.deferred > 0 {
                log::info!("{} weeks deferred; run again to continue", summary.deferred);
            }
        }
    }
    Ok(())
}
