// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Machine snapshot types

use super::common::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Path parameter for snapshot operations
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SnapshotPath {
    /// Account login name
    pub account: String,
    /// Machine UUID
    pub machine: String,
    /// Snapshot name
    pub name: String,
}

/// Machine snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Snapshot {
    /// Snapshot name
    pub name: String,
    /// Snapshot state
    pub state: String,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
    /// Last update timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<Timestamp>,
}

/// Request to create a machine snapshot
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateSnapshotRequest {
    /// Snapshot name; generated by the server when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
