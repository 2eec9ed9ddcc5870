//! Error types for the DNS management API client.
//!
//! # Design
//! Every failure on the request path becomes an `ApiError` value; nothing is
//! raised past the executor. The message strings match what existing
//! consumers of the management API expect to find in the `error` field of the
//! error envelope, so `Display` output is part of the wire contract.

use std::error::Error as StdError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while executing a management API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No path/query was supplied. No request was sent.
    #[error("the request string is null")]
    EmptyRequest,

    /// The transport failed before a response arrived (connection refused,
    /// protocol violation, I/O error while sending, timeout).
    #[error("{message}")]
    Transport { message: String, trace: String },

    /// The transport completed without producing a response.
    #[error("response is null")]
    NullResponse,

    /// The response body could not be read.
    #[error("{message}")]
    BodyRead { message: String, trace: String },

    /// The response body is not valid JSON.
    #[error("{message}")]
    BodyParse { message: String, trace: String },

    /// The server answered with a status outside the accepted window.
    #[error("response has code '{0}'.")]
    Status(u16),

    /// An argument failed local validation; no request was sent.
    #[error("{0}")]
    InvalidArgument(String),
}

impl ApiError {
    pub(crate) fn body_read(err: &std::io::Error) -> Self {
        Self::BodyRead {
            message: err.to_string(),
            trace: source_chain(err),
        }
    }

    pub(crate) fn body_parse(err: &serde_json::Error) -> Self {
        Self::BodyParse {
            message: err.to_string(),
            trace: source_chain(err),
        }
    }

    /// The body parsed, but to something other than an object.
    pub(crate) fn not_an_object() -> Self {
        let message = "response body is not a JSON object".to_string();
        Self::BodyParse {
            trace: message.clone(),
            message,
        }
    }

    /// Short, stable name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyRequest => "empty_request",
            Self::Transport { .. } => "transport",
            Self::NullResponse => "null_response",
            Self::BodyRead { .. } => "body_read",
            Self::BodyParse { .. } => "body_parse",
            Self::Status(_) => "status",
            Self::InvalidArgument(_) => "invalid_argument",
        }
    }

    /// Render this error as the `{error, breadcrumb, stackTrace?}` envelope.
    pub fn to_envelope(&self, breadcrumb: &str) -> ErrorEnvelope {
        let stack_trace = match self {
            Self::Transport { trace, .. }
            | Self::BodyRead { trace, .. }
            | Self::BodyParse { trace, .. } => Some(trace.clone()),
            _ => None,
        };
        ErrorEnvelope {
            error: self.to_string(),
            breadcrumb: breadcrumb.to_string(),
            stack_trace,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        Self::Transport {
            message: err.message,
            trace: err.trace,
        }
    }
}

/// Wire shape of a locally manufactured error document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub breadcrumb: String,
    #[serde(rename = "stackTrace", default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

/// Failure reported by a [`Transport`](crate::http::Transport) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    trace: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            trace: message.clone(),
            message,
        }
    }

    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        Self {
            message: err.to_string(),
            trace: source_chain(err),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors raised while loading a [`ClientConfig`](crate::config::ClientConfig)
/// from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {name} has invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// One line per error in the `source()` chain, outermost first.
fn source_chain(err: &(dyn StdError + 'static)) -> String {
    let mut lines = vec![err.to_string()];
    let mut current = err.source();
    while let Some(cause) = current {
        lines.push(format!("caused by: {cause}"));
        current = cause.source();
    }
    lines.join("\n")
}
