use std::{env, path::PathBuf};

use common::config;
use common::settings::Settings;

use super::Error;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix of the environment variables overriding settings, eg `ANALYZER__OCR__LANGUAGES`.
pub const ENV_PREFIX: &str = "ANALYZER";

/// Port to listen on, as set by most hosting platforms.
pub const PORT_ENV_VAR: &str = "PORT";

pub const API_KEY_ENV_VAR: &str = "MISTRAL_API_KEY";

#[derive(Debug, Clone, clap::Parser)]
#[clap(
    name = "screenshot-analyzer",
    about = "Serving a REST API to extract and discuss the text of screenshots",
    version = VERSION
    )]
pub struct Opts {
    /// Defines the config directory
    #[arg(
        value_parser = clap::value_parser!(PathBuf),
        short = 'c',
        long = "config-dir",
        default_value = "config"
    )]
    pub config_dir: PathBuf,

    /// Defines the run mode in {testing, dev, prod, ...}
    ///
    /// If no run mode is provided, a default behavior will be used.
    #[arg(short = 'm', long = "run-mode")]
    pub run_mode: Option<String>,

    /// Override settings values using key=value
    #[arg(short = 's', long = "setting")]
    pub settings: Vec<String>,

    #[clap(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Clone, clap::Subcommand)]
pub enum Command {
    /// Runs the server
    Run,
    /// Prints the settings, secrets redacted
    Config,
    /// Checks the local OCR engine and prints the outcome
    Capabilities,
}

impl TryFrom<Opts> for Settings {
    type Error = Error;

    fn try_from(opts: Opts) -> Result<Settings, Self::Error> {
        // Command line settings come last, they win over the environment.
        let mut overrides = env_overrides()?;
        overrides.extend(opts.settings);

        config::merge_configuration(
            opts.config_dir.as_ref(),
            &["service", "vision", "ocr"],
            opts.run_mode.as_deref(),
            ENV_PREFIX,
            overrides,
        )
        .map_err(|err| Error::Merging {
            context: "Screenshot Analyzer Settings: Could not merge configuration".to_string(),
            source: err,
        })?
        .try_deserialize()
        .map_err(|err| Error::Deserializing {
            context: "Screenshot Analyzer Settings: Could not deserialize configuration"
                .to_string(),
            source: err,
        })
    }
}

/// Settings taken from well known environment variables, as `key=value` assignments.
fn env_overrides() -> Result<Vec<String>, Error> {
    let mut overrides = Vec::new();

    if let Ok(port) = env::var(PORT_ENV_VAR) {
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|err| Error::Environment {
                context: format!("{PORT_ENV_VAR}='{port}' is not a valid port: {err}"),
            })?;
        overrides.push(format!("application.port = {port}"));
    }

    if let Ok(api_key) = env::var(API_KEY_ENV_VAR) {
        if !api_key.trim().is_empty() {
            // A JSON string is a valid TOML basic string.
            let api_key = serde_json::Value::String(api_key);
            overrides.push(format!("vision.api_key = {api_key}"));
        }
    }

    Ok(overrides)
}
