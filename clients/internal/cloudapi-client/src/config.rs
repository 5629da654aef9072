// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Client configuration from the environment

use crate::auth::resolve_key_path;
use crate::error::AuthError;
use std::path::PathBuf;

pub const DEFAULT_USER_AGENT: &str = concat!("cloudapi-client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// CloudAPI base URL
    pub url: String,
    /// Account login, or `my` for the caller's own account
    pub account: String,
    /// Private key used for request signing; `None` sends unsigned requests
    pub key_path: Option<PathBuf>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            account: crate::DEFAULT_ACCOUNT.to_string(),
            key_path: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Read `TRITON_URL`/`SDC_URL` (required), `TRITON_ACCOUNT`/`SDC_ACCOUNT`
    /// and the signing key location (see [`resolve_key_path`]).
    pub fn from_env() -> Result<Self, AuthError> {
        let url = env_either("TRITON_URL", "SDC_URL")
            .ok_or_else(|| AuthError::Config("TRITON_URL or SDC_URL must be set".to_string()))?;
        let mut config = Self::new(url);
        if let Some(account) = env_either("TRITON_ACCOUNT", "SDC_ACCOUNT") {
            config.account = account;
        }
        config.key_path = Some(resolve_key_path(None)?);
        Ok(config)
    }

    pub fn with_key_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.key_path = Some(path.into());
        self
    }
}

fn env_either(primary: &str, fallback: &str) -> Option<String> {
    std::env::var(primary)
        .or_else(|_| std::env::var(fallback))
        .ok()
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear() {
        for var in [
            "TRITON_URL",
            "SDC_URL",
            "TRITON_ACCOUNT",
            "SDC_ACCOUNT",
            "TRITON_KEY_FILE",
            "SDC_KEY_FILE",
        ] {
            // SAFETY: env-mutating tests run under #[serial].
            unsafe { std::env::remove_var(var) };
        }
    }

    #[test]
    #[serial]
    fn url_is_required() {
        clear();
        assert!(matches!(ClientConfig::from_env(), Err(AuthError::Config(_))));
    }

    #[test]
    #[serial]
    fn sdc_fallbacks_apply() {
        clear();
        unsafe {
            std::env::set_var("SDC_URL", "https://cloudapi.example.com");
            std::env::set_var("SDC_ACCOUNT", "bob");
            std::env::set_var("SDC_KEY_FILE", "/keys/bob");
        }
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.url, "https://cloudapi.example.com");
        assert_eq!(config.account, "bob");
        assert_eq!(config.key_path, Some(PathBuf::from("/keys/bob")));
        clear();
    }

    #[test]
    #[serial]
    fn account_defaults_to_my() {
        clear();
        unsafe { std::env::set_var("TRITON_URL", "http://localhost:9090") };
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.account, "my");
        clear();
    }
}
