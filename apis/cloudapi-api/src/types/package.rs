// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Package (instance sizing) types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Path parameter for package operations
#[derive(Debug, Deserialize, JsonSchema)]
pub struct PackagePath {
    /// Account login name
    pub account: String,
    /// Package name or UUID
    pub package: String,
}

/// Package information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Package {
    /// Package UUID
    pub id: String,
    /// Package name
    pub name: String,
    /// Memory in MB
    pub memory: u64,
    /// Disk space in MB
    pub disk: u64,
    /// Swap in MB
    pub swap: u64,
    /// Virtual CPUs
    pub vcpus: u32,
    /// Whether this is the default package for the datacenter
    #[serde(default)]
    pub default: bool,
    /// Version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
