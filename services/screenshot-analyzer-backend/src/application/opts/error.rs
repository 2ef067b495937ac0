use std::fmt;

use common::config::Error as ConfigError;

#[derive(Debug)]
pub enum Error {
    Merging {
        context: String,
        source: ConfigError,
    },
    Deserializing {
        context: String,
        source: ::config::ConfigError,
    },
    Environment {
        context: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Merging { context, source } => {
                write!(fmt, "Could not merge settings: {context} | {source}")
            }
            Error::Deserializing { context, source } => {
                write!(fmt, "Could not deserialize settings: {context} | {source}")
            }
            Error::Environment { context } => {
                write!(fmt, "Invalid environment: {context}")
            }
        }
    }
}

impl std::error::Error for Error {}
