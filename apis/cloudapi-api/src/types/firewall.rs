// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Firewall rule types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Path parameter for firewall rule operations
#[derive(Debug, Deserialize, JsonSchema)]
pub struct FirewallRulePath {
    /// Account login name
    pub account: String,
    /// Firewall rule UUID
    pub id: String,
}

/// Firewall rule
///
/// The rule text follows the Triton firewall DSL, for example
/// `FROM subnet 10.0.0.0/24 TO vm <uuid> ALLOW tcp PORT 22`. It is validated
/// by the server, never by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FirewallRule {
    /// Rule UUID
    pub id: String,
    /// Enabled
    pub enabled: bool,
    /// Rule text
    pub rule: String,
}

/// Request to create or update a firewall rule
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateFirewallRuleRequest {
    /// Enabled
    #[serde(default)]
    pub enabled: bool,
    /// Rule text
    pub rule: String,
}
