// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Errors reported by the CloudAPI double

use dropshot::{ClientErrorStatusCode, HttpError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("{0}")]
    AlreadyExists(String),

    #[error("Cannot Delete machine {0}, machine is not stopped.")]
    NotStopped(String),

    #[error("{0}")]
    InvalidArgument(String),

    /// Returned by a pre-call hook; passed through untouched
    #[error("{0}")]
    Injected(String),
}

impl ServiceError {
    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// CloudAPI error code reported for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "ResourceNotFound",
            Self::AlreadyExists(_) | Self::InvalidArgument(_) => "InvalidArgument",
            Self::NotStopped(_) => "InvalidState",
            Self::Injected(_) => "InjectedFailure",
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        let code = Some(err.code().to_string());
        let message = err.to_string();
        match err {
            ServiceError::NotFound { .. } => {
                HttpError::for_client_error(code, ClientErrorStatusCode::NOT_FOUND, message)
            }
            ServiceError::AlreadyExists(_)
            | ServiceError::NotStopped(_)
            | ServiceError::InvalidArgument(_) => {
                HttpError::for_client_error(code, ClientErrorStatusCode::CONFLICT, message)
            }
            ServiceError::Injected(_) => HttpError::for_unavail(code, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            ServiceError::not_found("Machine", "abc").to_string(),
            "Machine abc not found"
        );
        assert_eq!(
            ServiceError::NotStopped("abc".to_string()).to_string(),
            "Cannot Delete machine abc, machine is not stopped."
        );
    }

    #[test]
    fn http_mapping() {
        let err: HttpError = ServiceError::not_found("Network", "n1").into();
        assert_eq!(err.status_code.as_u16(), 404);
        assert_eq!(err.error_code.as_deref(), Some("ResourceNotFound"));
        assert_eq!(err.external_message, "Network n1 not found");

        let err: HttpError = ServiceError::NotStopped("m1".to_string()).into();
        assert_eq!(err.status_code.as_u16(), 409);
        assert_eq!(err.error_code.as_deref(), Some("InvalidState"));

        let err: HttpError = ServiceError::Injected("boom".to_string()).into();
        assert_eq!(err.status_code.as_u16(), 503);
        assert_eq!(err.external_message, "boom");
    }
}
