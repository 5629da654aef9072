// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Triton CloudAPI Client Library
//!
//! Typed access to the parts of CloudAPI that manage SSH keys, packages,
//! images, machines, firewall rules, networks and fabrics. Every method is
//! one round trip: it builds a [`Request`], hands it to the configured
//! [`Transport`], checks the status against the one the operation expects
//! and decodes the body into the models from `cloudapi-api`.
//!
//! ## Usage
//!
//! ### Authenticated Client
//!
//! ```ignore
//! use cloudapi_client::{Client, ClientConfig};
//!
//! // TRITON_URL, TRITON_ACCOUNT and TRITON_KEY_FILE (or $HOME/.ssh/id_rsa)
//! let client = Client::from_config(&ClientConfig::from_env()?)?;
//! let machines = client.list_machines(None).await?;
//! ```
//!
//! ### Unauthenticated Client
//!
//! Useful against the stub server, which does not check signatures:
//!
//! ```ignore
//! use cloudapi_client::{Client, Filter};
//!
//! let client = Client::new("http://127.0.0.1:9090")?;
//! let small = client
//!     .list_packages(Some(&Filter::new().with("memory", "1024")))
//!     .await?;
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod request;
pub mod transport;

mod fabrics;
mod firewalls;
mod images;
mod keys;
mod machines;
mod networks;
mod packages;

pub use auth::RequestSigner;
pub use config::ClientConfig;
pub use error::{AuthError, Error, RequestError, Result, TransportError};
pub use request::Request;
pub use transport::{HttpTransport, RawResponse, Transport};

// Re-export types from the API crate for convenience
pub use cloudapi_api::*;

use http::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Account alias CloudAPI resolves to the authenticated caller
pub const DEFAULT_ACCOUNT: &str = "my";

/// Triton CloudAPI client
#[derive(Clone)]
pub struct Client {
    account: String,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Unsigned client for `base_url`, acting on the `my` account
    pub fn new(base_url: &str) -> std::result::Result<Self, TransportError> {
        let transport = HttpTransport::new(base_url, config::DEFAULT_USER_AGENT)?;
        Ok(Self::with_transport(DEFAULT_ACCOUNT, Arc::new(transport)))
    }

    /// Build a client from configuration, loading the signing key if one
    /// is configured
    pub fn from_config(config: &ClientConfig) -> std::result::Result<Self, TransportError> {
        let mut transport = HttpTransport::new(&config.url, &config.user_agent)?;
        if let Some(path) = &config.key_path {
            transport = transport.with_signer(RequestSigner::from_key_file(&config.account, path)?);
        }
        Ok(Self::with_transport(&config.account, Arc::new(transport)))
    }

    pub fn with_transport(account: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            account: account.into(),
            transport,
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Send `request`, require its expected status and decode the body
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: Request,
        context: impl Into<String>,
    ) -> Result<T> {
        let context = context.into();
        let body = self.round_trip(request, &context).await?;
        serde_json::from_slice(&body).map_err(|e| Error::new(context, RequestError::Decode(e)))
    }

    /// Send `request` and require its expected status, ignoring the body
    pub async fn execute_empty(&self, request: Request, context: impl Into<String>) -> Result<()> {
        let context = context.into();
        self.round_trip(request, &context).await.map(|_| ())
    }

    async fn round_trip(&self, request: Request, context: &str) -> Result<Vec<u8>> {
        let path = request
            .path_and_query(&self.account)
            .map_err(|e| Error::new(context, e))?;
        let method = request.method().clone();
        let expected = request.expected();
        tracing::debug!(%method, %path, %expected, "cloudapi request");

        let response = self
            .transport
            .send(method.clone(), &path, request.into_body())
            .await
            .map_err(|e| {
                tracing::warn!(%method, %path, error = %e, "cloudapi transport failure");
                Error::new(context, RequestError::Transport(e))
            })?;

        if response.status != expected {
            tracing::warn!(
                %method,
                %path,
                status = %response.status,
                %expected,
                "cloudapi unexpected status"
            );
            return Err(Error::new(
                context,
                RequestError::UnexpectedStatus {
                    status: response.status,
                    expected,
                    api_error: serde_json::from_slice(&response.body).ok(),
                },
            ));
        }
        Ok(response.body)
    }
}

/// Reject a VLAN id outside the range a fabric accepts
pub(crate) fn check_vlan_id(vlan_id: u16, context: impl Into<String>) -> Result<()> {
    if vlan_id > MAX_VLAN_ID {
        return Err(Error::new(
            context,
            RequestError::InvalidArgument(format!(
                "VLAN id {vlan_id} is outside 0-{MAX_VLAN_ID}"
            )),
        ));
    }
    Ok(())
}

pub(crate) const CREATED: StatusCode = StatusCode::CREATED;
pub(crate) const ACCEPTED: StatusCode = StatusCode::ACCEPTED;
