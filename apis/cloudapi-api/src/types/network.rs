// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Network-related types (networks, fabric VLANs, fabric networks)

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Highest VLAN id a fabric accepts
pub const MAX_VLAN_ID: u16 = 4095;

/// Path parameter for network operations
#[derive(Debug, Deserialize, JsonSchema)]
pub struct NetworkPath {
    /// Account login name
    pub account: String,
    /// Network UUID
    pub network: String,
}

/// Path parameter for fabric VLAN operations
#[derive(Debug, Deserialize, JsonSchema)]
pub struct FabricVlanPath {
    /// Account login name
    pub account: String,
    /// VLAN ID
    pub vlan_id: u16,
}

/// Path parameter for fabric network operations
#[derive(Debug, Deserialize, JsonSchema)]
pub struct FabricNetworkPath {
    /// Account login name
    pub account: String,
    /// VLAN ID
    pub vlan_id: u16,
    /// Network UUID
    pub id: String,
}

/// Network information
///
/// The same shape describes both plain networks and fabric networks; the
/// fabric-only fields stay unset on the former.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Network {
    /// Network UUID
    pub id: String,
    /// Network name
    pub name: String,
    /// Public network
    #[serde(default)]
    pub public: bool,
    /// Fabric network
    #[serde(default)]
    pub fabric: bool,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Subnet in CIDR notation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
    /// First assignable IP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provision_start_ip: Option<String>,
    /// Last assignable IP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provision_end_ip: Option<String>,
    /// Gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    /// Resolvers, in order of preference
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resolvers: Vec<String>,
    /// Static routes, CIDR to gateway
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub routes: BTreeMap<String, String>,
    /// NAT zone provisioned at the gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internet_nat: Option<bool>,
    /// VLAN ID the network lives on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<u16>,
}

/// Fabric VLAN information, also used as the create and update body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FabricVlan {
    /// VLAN ID (0-4095)
    pub vlan_id: u16,
    /// VLAN name
    pub name: String,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request to update a fabric VLAN
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateFabricVlanRequest {
    /// VLAN name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request to create a network on a fabric VLAN
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CreateFabricNetworkRequest {
    /// Network name
    pub name: String,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Subnet in CIDR notation
    pub subnet: String,
    /// First assignable IP
    pub provision_start_ip: String,
    /// Last assignable IP
    pub provision_end_ip: String,
    /// Gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    /// Resolvers
    #[serde(default)]
    pub resolvers: Vec<String>,
    /// Static routes, CIDR to gateway
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub routes: BTreeMap<String, String>,
    /// Provision a NAT zone at the gateway
    #[serde(default)]
    pub internet_nat: bool,
}
