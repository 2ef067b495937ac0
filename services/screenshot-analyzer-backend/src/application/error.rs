use common::err_context::ErrorContext;
use std::fmt;

use super::listener::Error as ListenerError;
use crate::services::vision::Error as VisionError;

#[derive(Debug)]
pub enum Error {
    Listener {
        context: String,
        source: ListenerError,
    },
    Vision {
        context: String,
        source: VisionError,
    },
    Server {
        context: String,
        source: hyper::Error,
    },
    /// The builder is missing a component.
    Incomplete {
        context: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Listener { context, source } => {
                write!(fmt, "Could not build TCP listener: {context} | {source}")
            }
            Error::Vision { context, source } => {
                write!(fmt, "Vision Client Error: {context} | {source}")
            }
            Error::Server { context, source } => {
                write!(fmt, "Application Server Error: {context} | {source}")
            }
            Error::Incomplete { context } => {
                write!(fmt, "Incomplete Application: {context}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorContext<ListenerError>> for Error {
    fn from(err: ErrorContext<ListenerError>) -> Self {
        Error::Listener {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<VisionError>> for Error {
    fn from(err: ErrorContext<VisionError>) -> Self {
        Error::Vision {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<hyper::Error>> for Error {
    fn from(err: ErrorContext<hyper::Error>) -> Self {
        Error::Server {
            context: err.0,
            source: err.1,
        }
    }
}
