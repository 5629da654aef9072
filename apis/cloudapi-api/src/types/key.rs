// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! SSH key types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Path parameter for key operations
#[derive(Debug, Deserialize, JsonSchema)]
pub struct KeyPath {
    /// Account login name
    pub account: String,
    /// Key name or fingerprint
    pub name: String,
}

/// SSH key information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Key {
    /// Key name
    pub name: String,
    /// Key fingerprint
    #[serde(default)]
    pub fingerprint: String,
    /// SSH public key material
    pub key: String,
}

/// Request to create SSH key
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateKeyRequest {
    /// Key name; CloudAPI falls back to the fingerprint when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// SSH public key material
    pub key: String,
}
