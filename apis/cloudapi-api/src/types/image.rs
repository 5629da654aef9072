// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Image types

use super::common::{Tags, Timestamp};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Path parameter for image operations
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ImagePath {
    /// Account login name
    pub account: String,
    /// Image UUID
    pub image: String,
}

/// Image information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Image {
    /// Image UUID
    pub id: String,
    /// Image name
    pub name: String,
    /// Operating system (e.g. smartos, linux)
    pub os: String,
    /// Image version
    pub version: String,
    /// Image type (smartmachine or virtualmachine)
    #[serde(rename = "type")]
    pub image_type: String,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Provisioning requirements
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requirements: BTreeMap<String, serde_json::Value>,
    /// Homepage URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Publication timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<Timestamp>,
    /// Public image
    #[serde(default)]
    pub public: bool,
    /// Owner UUID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Image state (e.g. active, unactivated, disabled)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Tags
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
    /// EULA URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eula: Option<String>,
    /// Account UUIDs allowed to use a private image
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acl: Vec<String>,
}
