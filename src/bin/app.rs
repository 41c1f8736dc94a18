#![allow(clippy::print_stdout)]

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::{debug, error, info, warn};

use myrtio_ambilight::ble::{BleConnector, BleScanner};
use myrtio_ambilight::capture::ScreenCapture;
use myrtio_ambilight::cli::{Cli, load_env_file};
use myrtio_ambilight::{ConfigError, EngineError, SyncEngine, discover};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let dotenv = load_env_file(None);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = dotenv {
        debug!("No .env file loaded: {e}");
    }

    let config = Cli::parse().into_config();

    let monitor = config.monitor;
    let scan_window = config.scan_window;
    let connector = BleConnector::new(scan_window);
    let engine = match SyncEngine::connect(&connector, config).await {
        Ok(engine) => engine,
        Err(EngineError::Config(ConfigError::MissingAddress)) => {
            warn!("No target device set");
            let devices = discover(&BleScanner, scan_window)
                .await
                .context("discovery scan failed")?;
            for device in &devices {
                println!("{device}");
            }
            println!("Please set TARGET_DEVICE (or add it to .env) to the address of your LED strip");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            error!("Startup failed: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    info!("Capturing monitor {monitor}");
    engine
        .run(ScreenCapture::new(monitor), async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {e}");
            }
        })
        .await;

    Ok(ExitCode::SUCCESS)
}
