// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Transport collaborator
//!
//! The client never talks to the network directly. It hands a method, a
//! rendered path and an optional JSON body to a [`Transport`] and gets a
//! status and raw body back. [`HttpTransport`] is the reqwest-backed
//! implementation; tests can substitute their own.

use crate::auth::RequestSigner;
use crate::error::TransportError;
use async_trait::async_trait;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, DATE, HeaderValue};
use http::{Method, StatusCode};
use std::sync::Once;
use url::Url;

/// CloudAPI version range requested on every call
pub const API_VERSION: &str = "~9";

/// Status and body of a completed exchange
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one round trip. `path` already carries the query string.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, TransportError>;
}

static CRYPTO_PROVIDER: Once = Once::new();

fn install_crypto_provider() {
    CRYPTO_PROVIDER.call_once(|| {
        // Fails only if another provider was installed first, which is fine.
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// reqwest-backed transport, signing requests when a signer is configured
#[derive(Debug)]
pub struct HttpTransport {
    base_url: Url,
    http: reqwest::Client,
    signer: Option<RequestSigner>,
}

impl HttpTransport {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, TransportError> {
        install_crypto_provider();
        let http = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            base_url: Url::parse(base_url)?,
            http,
            signer: None,
        })
    }

    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `path` (and its query, if any) to the base URL's own path, so
    /// a base such as `https://host/cloudapi/` keeps its prefix.
    pub fn endpoint(&self, path: &str) -> Url {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };
        let mut url = self.base_url.clone();
        let joined = format!("{}{}", url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url.set_query(query);
        url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, TransportError> {
        let url = self.endpoint(path);
        // Only the path takes part in the signature, never the query.
        let signed = match &self.signer {
            Some(signer) => Some(signer.sign(method.as_str(), url.path())?),
            None => None,
        };
        let mut request = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header("Api-Version", API_VERSION);

        if let Some(signed) = signed {
            request = request
                .header(DATE, HeaderValue::from_str(&signed.date)?)
                .header(AUTHORIZATION, HeaderValue::from_str(&signed.authorization)?);
        }

        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let transport = HttpTransport::new("https://cloudapi.example.com/cloudapi/", "test").unwrap();
        let url = transport.endpoint("/my/machines?state=running");
        assert_eq!(
            url.as_str(),
            "https://cloudapi.example.com/cloudapi/my/machines?state=running"
        );
        assert_eq!(url.path(), "/cloudapi/my/machines");
    }

    #[test]
    fn endpoint_at_root() {
        let transport = HttpTransport::new("http://127.0.0.1:9090", "test").unwrap();
        assert_eq!(
            transport.endpoint("/my/keys/a%20b").as_str(),
            "http://127.0.0.1:9090/my/keys/a%20b"
        );
        assert_eq!(transport.endpoint("/my/keys").query(), None);
    }
}
