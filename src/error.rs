use std::{fmt, io};

use reqwest::StatusCode;
use thiserror::Error;

/// Every operation of the client fails with one of three kinds of error.
///
/// * [`Error::InvalidArgument`]: the input was rejected locally, nothing was sent.
/// * [`Error::Server`]: the File Depot service answered with `success: false`
///   (or did not answer at all).
/// * [`Error::Client`]: the request could not be completed on our side
///   (connection, timeout, unexpected status, malformed response...).
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Server(#[from] ServerError),
    #[error("unexpected: {0}")]
    Client(#[from] ClientError),
}

impl Error {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
    pub fn is_server(&self) -> bool {
        matches!(self, Error::Server(_))
    }
    pub fn is_client(&self) -> bool {
        matches!(self, Error::Client(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Client(ClientError::ReqwestError(e))
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Client(ClientError::IoError(e))
    }
}

/// A failure reported by the service through the response envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ServerError {
    code: Option<String>,
    message: String,
}

impl ServerError {
    pub fn new(code: Option<String>, message: impl Into<String>) -> Self {
        ServerError {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code.as_deref() {
            Some(code) if !code.trim().is_empty() => write!(f, "[{}] {}", code, self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("Serde JSON parsing error: {0}. Response: {1}")]
    SerdeJSONError(#[source] serde_json::Error, String),
    #[error("Unexpected HTTP status {0}. Response: {1}")]
    UnexpectedStatus(StatusCode, String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}
