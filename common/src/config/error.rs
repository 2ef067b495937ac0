use config::ConfigError;
use std::fmt;
use std::path::PathBuf;

use crate::err_context::ErrorContext;

#[derive(Debug)]
pub enum Error {
    Directory {
        context: String,
        path: PathBuf,
    },
    Configuration {
        context: String,
        source: ConfigError,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Directory { context, path } => {
                write!(fmt, "Configuration directory: {context} | {}", path.display())
            }
            Error::Configuration { context, source } => {
                write!(fmt, "Could not merge configuration: {context} | {source}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorContext<ConfigError>> for Error {
    fn from(ctx: ErrorContext<ConfigError>) -> Error {
        Error::Configuration {
            context: ctx.0,
            source: ctx.1,
        }
    }
}
