use std::path::Path;

use anyhow::Result;
use canvas_api::client::{client, Client};
use canvas_api::config::CanvasConfig;
use canvas_api::services::canvas_service::CanvasService;
use tracing::{debug, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, registry, EnvFilter};

pub const ENV_FILE: &str = "grade_automation.env";

/// Loads `env_file` into the environment, reports which connection variables are set, and builds a
/// client from them. Missing variables are only warned about here.
pub fn init_from_env(env_file: &Path) -> Result<InitFromEnv<impl CanvasService>> {
    load_env_file(env_file);

    let config = CanvasConfig::from_env();
    report_config(&config);

    let canvas = client(config)?;

    Ok(InitFromEnv { canvas })
}

pub struct InitFromEnv<Service> {
    pub canvas: Client<Service>,
}

/// Returns whether the file was loaded. Variables already in the environment take precedence.
pub fn load_env_file(env_file: &Path) -> bool {
    match dotenvy::from_path(env_file) {
        Ok(()) => {
            debug!(env_file = %env_file.display(), "loaded env file");
            true
        }
        Err(err) if err.not_found() => {
            info!(env_file = %env_file.display(), "no env file, using process environment");
            false
        }
        Err(err) => {
            warn!(env_file = %env_file.display(), %err, "could not read env file");
            false
        }
    }
}

pub fn report_config(config: &CanvasConfig) {
    info!("checking environment variables");
    let check = config.check();
    for var in check.vars() {
        if var.is_present() {
            info!("{var}");
        } else {
            warn!("{var}");
        }
    }

    if !check.is_complete() {
        let missing: Vec<_> = check.missing().collect();
        warn!(?missing, "requests needing these variables will fail");
    }
}

pub fn init_tracing() {
    registry()
        .with(fmt::layer().event_format(format().pretty()))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
}
