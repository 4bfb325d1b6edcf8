use anyhow::{Context, Result};
use research_toolbox::application::{read_request, ErrorReport};
use research_toolbox::config::{LogFormat, LoggingSettings, Settings};
use research_toolbox::Toolbox;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let settings = Settings::new().context("Failed to load configuration")?;
    init_tracing(&settings.logging);

    let path = std::env::args().nth(1).map(PathBuf::from);
    let request = read_request(path.as_deref(), std::io::stdin().lock())
        .context("Failed to read request")?;
    let toolbox = Toolbox::new(settings);

    match toolbox.run_json(&request) {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(%err, "Calculation failed");
            println!("{}", serde_json::to_string_pretty(&ErrorReport::from(&err))?);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Logs go to stderr; stdout carries only the JSON response
fn init_tracing(logging: &LoggingSettings) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
