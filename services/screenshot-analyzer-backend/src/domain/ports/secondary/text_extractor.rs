/// Interface to an engine turning images into text.
use crate::domain::ImageDataUrl;
use async_trait::async_trait;
use common::err_context::ErrorContext;
use std::fmt;

#[cfg(test)]
use mockall::predicate::*;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextExtractor {
    async fn extract_text(&self, image: &ImageDataUrl) -> Result<String, Error>;
}

#[derive(Debug)]
pub enum Error {
    /// The remote engine could not be reached, or answered with an error status.
    Connection {
        context: String,
        source: reqwest::Error,
    },
    /// The remote engine answered, but not with what we expected.
    Response { context: String },
    /// The local engine could not be run.
    Process {
        context: String,
        source: std::io::Error,
    },
    /// The local engine ran, and failed.
    Engine { context: String },
    Timeout { context: String },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Connection { context, source } => {
                write!(fmt, "Extraction Service Connection: {context} | {source}")
            }
            Error::Response { context } => {
                write!(fmt, "Extraction Service Response: {context}")
            }
            Error::Process { context, source } => {
                write!(fmt, "OCR Process: {context} | {source}")
            }
            Error::Engine { context } => {
                write!(fmt, "OCR Engine: {context}")
            }
            Error::Timeout { context } => {
                write!(fmt, "Timeout: {context}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorContext<reqwest::Error>> for Error {
    fn from(err: ErrorContext<reqwest::Error>) -> Self {
        Error::Connection {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<std::io::Error>> for Error {
    fn from(err: ErrorContext<std::io::Error>) -> Self {
        Error::Process {
            context: err.0,
            source: err.1,
        }
    }
}
