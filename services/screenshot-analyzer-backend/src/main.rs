use clap::Parser;
use std::fmt;

use common::err_context::{ErrorContext, ErrorContextExt};
use common::settings::Settings;
use screenshot_analyzer::application::opts::{Command, Error as OptsError, Opts};
use screenshot_analyzer::application::{ApplicationBuilder, Error as ApplicationError};
use screenshot_analyzer::services::tesseract;
use screenshot_analyzer::telemetry;

const NAME: &str = "screenshot-analyzer";

#[derive(Debug)]
pub enum Error {
    Options {
        context: String,
        source: OptsError,
    },
    Application {
        context: String,
        source: ApplicationError,
    },
    Telemetry {
        context: String,
        source: telemetry::Error,
    },
    Output {
        context: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Application { context, source } => {
                write!(fmt, "Could not build application: {context} | {source}")
            }
            Error::Options { context, source } => {
                write!(fmt, "Options Error: {context} | {source}")
            }
            Error::Telemetry { context, source } => {
                write!(fmt, "Telemetry Error: {context} | {source}")
            }
            Error::Output { context, source } => {
                write!(fmt, "Output Error: {context} | {source}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorContext<ApplicationError>> for Error {
    fn from(err: ErrorContext<ApplicationError>) -> Self {
        Error::Application {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<OptsError>> for Error {
    fn from(err: ErrorContext<OptsError>) -> Self {
        Error::Options {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<telemetry::Error>> for Error {
    fn from(err: ErrorContext<telemetry::Error>) -> Self {
        Error::Telemetry {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<serde_json::Error>> for Error {
    fn from(err: ErrorContext<serde_json::Error>) -> Self {
        Error::Output {
            context: err.0,
            source: err.1,
        }
    }
}

/// Logs go to stdout when serving, and to stderr otherwise, so that the
/// JSON printed by the other commands stays parseable.
fn init_telemetry(settings: &Settings, serving: bool) -> Result<(), telemetry::Error> {
    let filter = telemetry::default_filter(settings.application.debug);
    if serving {
        telemetry::init_subscriber(telemetry::get_subscriber(
            NAME.to_string(),
            filter,
            std::io::stdout,
        ))
    } else {
        telemetry::init_subscriber(telemetry::get_subscriber(
            NAME.to_string(),
            filter,
            std::io::stderr,
        ))
    }
}

#[allow(clippy::result_large_err)]
#[tokio::main]
async fn main() -> Result<(), Error> {
    let opts = Opts::parse();

    let cmd = opts.cmd.clone();

    let settings: Settings = opts.try_into().context("Compiling Application Settings")?;

    init_telemetry(&settings, matches!(cmd, Command::Run))
        .context("Initializing telemetry")?;

    match cmd {
        Command::Config => {
            let output = serde_json::to_string_pretty(&settings.redacted())
                .context("Serializing settings")?;
            println!("{output}");
        }
        Command::Capabilities => {
            let capability = tesseract::detect_capability(&settings.ocr).await;
            let output =
                serde_json::to_string_pretty(&capability).context("Serializing capability")?;
            println!("{output}");
        }
        Command::Run => {
            let app = ApplicationBuilder::new(settings)
                .await
                .context("could not build application")?
                .build()
                .context("could not build application")?;
            app.run_until_stopped()
                .await
                .context("application runtime error")?;
        }
    }
    Ok(())
}
