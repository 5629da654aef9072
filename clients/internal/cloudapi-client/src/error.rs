// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for cloudapi-client

use cloudapi_api::ApiError;
use http::StatusCode;
use thiserror::Error;

/// Errors that can occur while loading credentials or signing a request
#[derive(Error, Debug)]
pub enum AuthError {
    /// Failed to load an SSH key from file
    #[error("Failed to load key: {0}")]
    KeyLoad(String),

    /// Error during cryptographic signing
    #[error("Signing error: {0}")]
    Signing(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// SSH key encoding/decoding error
    #[error("SSH key error: {0}")]
    SshKey(#[from] ssh_key::Error),
}

/// Errors raised by a [`crate::Transport`] before a response is available
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("request signing failed: {0}")]
    Auth(#[from] AuthError),

    #[error("invalid header value: {0}")]
    Header(#[from] http::header::InvalidHeaderValue),
}

/// What went wrong with a single request
#[derive(Error, Debug)]
pub enum RequestError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a status other than the one the operation
    /// expects
    #[error("unexpected status {status} (expected {expected}){}", detail(.api_error))]
    UnexpectedStatus {
        status: StatusCode,
        expected: StatusCode,
        api_error: Option<ApiError>,
    },

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// Rejected before any I/O happened
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

fn detail(api_error: &Option<ApiError>) -> String {
    match api_error {
        Some(e) if e.code.is_empty() => format!(": {}", e.message),
        Some(e) => format!(": {}: {}", e.code, e.message),
        None => String::new(),
    }
}

/// A failed client operation
///
/// The context names the operation and the identifiers involved, for
/// example `failed to get machine with id 1234`.
#[derive(Error, Debug)]
#[error("{context}")]
pub struct Error {
    pub context: String,
    #[source]
    pub source: RequestError,
}

impl Error {
    pub(crate) fn new(context: impl Into<String>, source: RequestError) -> Self {
        Self {
            context: context.into(),
            source,
        }
    }

    /// HTTP status returned by the server, if the request got that far
    pub fn status(&self) -> Option<StatusCode> {
        match &self.source {
            RequestError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Decoded CloudAPI error body, if the server sent one
    pub fn api_error(&self) -> Option<&ApiError> {
        match &self.source {
            RequestError::UnexpectedStatus { api_error, .. } => api_error.as_ref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_context_and_source_is_server_message() {
        let err = Error::new(
            "failed to get machine with id abc",
            RequestError::UnexpectedStatus {
                status: StatusCode::NOT_FOUND,
                expected: StatusCode::OK,
                api_error: Some(ApiError {
                    code: "ResourceNotFound".to_string(),
                    message: "Machine abc not found".to_string(),
                    request_id: None,
                }),
            },
        );
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "failed to get machine with id abc");
        // The cause is reported once, through the source chain.
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(
            source.to_string(),
            "unexpected status 404 Not Found (expected 200 OK): \
             ResourceNotFound: Machine abc not found"
        );
        assert!(std::error::Error::source(source).is_none());
    }

    #[test]
    fn non_status_errors_have_no_status() {
        let err = Error::new(
            "failed to delete key",
            RequestError::InvalidArgument("empty path segment".to_string()),
        );
        assert_eq!(err.status(), None);
        assert!(err.api_error().is_none());
        assert!(!err.is_not_found());
    }
}
