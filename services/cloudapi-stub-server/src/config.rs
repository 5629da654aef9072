// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Stub server configuration

use anyhow::{Context, Result};
use std::net::SocketAddr;

/// Default bind address for the HTTP server
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:9090";

/// Account served in addition to the `my` alias
pub const DEFAULT_ACCOUNT: &str = "my";

#[derive(Clone, Debug)]
pub struct StubConfig {
    pub bind_address: SocketAddr,
    pub account: String,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 9090)),
            account: DEFAULT_ACCOUNT.to_string(),
        }
    }
}

impl StubConfig {
    /// Load configuration from `BIND_ADDRESS` and `CLOUDAPI_ACCOUNT`
    pub fn from_env() -> Result<Self> {
        let bind_address = std::env::var("BIND_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string())
            .parse()
            .context("Invalid BIND_ADDRESS")?;

        let account = std::env::var("CLOUDAPI_ACCOUNT")
            .ok()
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| DEFAULT_ACCOUNT.to_string());

        Ok(Self {
            bind_address,
            account,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let config = StubConfig::default();
        assert_eq!(config.bind_address.to_string(), DEFAULT_BIND_ADDRESS);
        assert_eq!(config.account, DEFAULT_ACCOUNT);
    }
}
