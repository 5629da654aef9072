// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Common types used across CloudAPI

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// CloudAPI error response
///
/// CloudAPI reports failures as `{"code": ..., "message": ...}`. Dropshot
/// servers (including the stub server in this workspace) emit `error_code`
/// instead, so both spellings are accepted on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ApiError {
    /// Error code (e.g., "ResourceNotFound", "InvalidArgument")
    #[serde(default, alias = "error_code")]
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Request ID for tracing (optional, not always present)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// RFC3339 timestamp
pub type Timestamp = String;

/// Key-value metadata attached to a machine
pub type Metadata = BTreeMap<String, String>;

/// Key-value tags attached to a machine or image
pub type Tags = BTreeMap<String, String>;

/// Path parameter for account
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AccountPath {
    /// Account login name
    pub account: String,
}
