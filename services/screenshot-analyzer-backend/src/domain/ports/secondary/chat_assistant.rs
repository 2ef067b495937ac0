/// Interface to an assistant answering questions about extracted text.
use crate::domain::Question;
use async_trait::async_trait;
use common::err_context::ErrorContext;
use std::fmt;

#[cfg(test)]
use mockall::predicate::*;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatAssistant {
    async fn answer(&self, question: &Question, extracted_text: &str) -> Result<String, Error>;
}

#[derive(Debug)]
pub enum Error {
    Connection {
        context: String,
        source: reqwest::Error,
    },
    Response { context: String },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Connection { context, source } => {
                write!(fmt, "Chat Service Connection: {context} | {source}")
            }
            Error::Response { context } => {
                write!(fmt, "Chat Service Response: {context}")
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
