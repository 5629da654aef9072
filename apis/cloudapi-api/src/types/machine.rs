// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Machine-related types

use super::common::{Metadata, Tags, Timestamp};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};

/// Body key prefix CloudAPI uses for metadata entries on machine creation
pub const METADATA_PREFIX: &str = "metadata.";
/// Body key prefix CloudAPI uses for tag entries on machine creation
pub const TAG_PREFIX: &str = "tag.";

/// Path parameter for machine operations
#[derive(Debug, Deserialize, JsonSchema)]
pub struct MachinePath {
    /// Account login name
    pub account: String,
    /// Machine UUID
    pub machine: String,
}

/// Path parameter for machine metadata key operations
#[derive(Debug, Deserialize, JsonSchema)]
pub struct MetadataKeyPath {
    /// Account login name
    pub account: String,
    /// Machine UUID
    pub machine: String,
    /// Metadata key
    pub key: String,
}

/// Path parameter for machine tag operations
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TagPath {
    /// Account login name
    pub account: String,
    /// Machine UUID
    pub machine: String,
    /// Tag name
    pub tag: String,
}

/// Machine state
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MachineState {
    Provisioning,
    Running,
    Stopping,
    Stopped,
    Deleted,
    Failed,
}

/// A lifecycle transition requested against a machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Transition {
    Start,
    Stop,
    Reboot,
    Delete,
}

/// Returned when a transition is not allowed from the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: MachineState,
    pub transition: Transition,
}

impl std::fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot {} a machine that is {}", self.transition, self.from)
    }
}

impl std::error::Error for InvalidTransition {}

impl MachineState {
    /// Compute the state reached by applying `transition`.
    ///
    /// Start, stop and reboot are accepted from any live state; a machine
    /// can only be deleted once it is stopped, and a deleted machine
    /// accepts nothing.
    pub fn apply(self, transition: Transition) -> Result<MachineState, InvalidTransition> {
        let invalid = InvalidTransition {
            from: self,
            transition,
        };
        match (self, transition) {
            (MachineState::Deleted, _) => Err(invalid),
            (_, Transition::Start) | (_, Transition::Reboot) => Ok(MachineState::Running),
            (_, Transition::Stop) => Ok(MachineState::Stopped),
            (MachineState::Stopped, Transition::Delete) => Ok(MachineState::Deleted),
            (_, Transition::Delete) => Err(invalid),
        }
    }

    /// Whether a delete request is allowed in this state
    pub fn can_delete(self) -> bool {
        self.apply(Transition::Delete).is_ok()
    }
}

/// Machine information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Machine {
    /// Machine UUID
    pub id: String,
    /// Machine alias/name
    pub name: String,
    /// Machine type (smartmachine or virtualmachine)
    #[serde(rename = "type")]
    pub machine_type: String,
    /// Current state
    pub state: MachineState,
    /// Image the machine was provisioned from (legacy name for `image`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    /// RAM in MB
    pub memory: u64,
    /// Disk space in MB
    pub disk: u64,
    /// IP addresses
    #[serde(default)]
    pub ips: Vec<String>,
    /// Metadata
    #[serde(default)]
    pub metadata: Metadata,
    /// Tags
    #[serde(default)]
    pub tags: Tags,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
    /// Last update timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<Timestamp>,
    /// Package name
    pub package: String,
    /// Image UUID
    pub image: String,
    /// Primary IP address
    #[serde(rename = "primaryIp", default, skip_serializing_if = "Option::is_none")]
    pub primary_ip: Option<String>,
    /// Network UUIDs
    #[serde(default)]
    pub networks: Vec<String>,
    /// Firewall enabled
    #[serde(default)]
    pub firewall_enabled: bool,
    /// Compute node UUID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_node: Option<String>,
}

/// Request to create a machine
///
/// Metadata and tags travel inline in the body as `metadata.<key>` and
/// `tag.<key>` entries; use [`CreateMachineRequest::with_metadata`] and
/// [`CreateMachineRequest::with_tag`] rather than writing `extra` directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CreateMachineRequest {
    /// Machine alias/name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Package name or UUID
    pub package: String,
    /// Image UUID
    pub image: String,
    /// Network UUIDs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<String>,
    /// Enable the firewall for this machine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall_enabled: Option<bool>,
    /// Prefixed metadata and tag entries
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl CreateMachineRequest {
    pub fn new(package: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            image: image.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.networks.push(network.into());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<String>) -> Self {
        self.extra
            .insert(format!("{METADATA_PREFIX}{key}"), value.into());
        self
    }

    pub fn with_tag(mut self, key: &str, value: impl Into<String>) -> Self {
        self.extra.insert(format!("{TAG_PREFIX}{key}"), value.into());
        self
    }

    /// Metadata entries with the body prefix stripped
    pub fn metadata(&self) -> Metadata {
        strip_prefixed(&self.extra, METADATA_PREFIX)
    }

    /// Tag entries with the body prefix stripped
    pub fn tags(&self) -> Tags {
        strip_prefixed(&self.extra, TAG_PREFIX)
    }
}

fn strip_prefixed(entries: &BTreeMap<String, String>, prefix: &str) -> BTreeMap<String, String> {
    entries
        .iter()
        .filter_map(|(k, v)| k.strip_prefix(prefix).map(|k| (k.to_string(), v.clone())))
        .collect()
}

/// Machine action for action dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MachineAction {
    Start,
    Stop,
    Reboot,
    Resize,
    Rename,
    EnableFirewall,
    DisableFirewall,
}

/// Query parameters for machine actions
#[derive(Debug, Deserialize, JsonSchema)]
pub struct MachineActionQuery {
    pub action: MachineAction,
    /// Target package (resize)
    #[serde(default)]
    pub package: Option<String>,
    /// New alias (rename)
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_requires_stopped() {
        assert!(MachineState::Stopped.can_delete());
        assert!(!MachineState::Running.can_delete());
        assert!(!MachineState::Provisioning.can_delete());
        assert_eq!(
            MachineState::Running.apply(Transition::Delete),
            Err(InvalidTransition {
                from: MachineState::Running,
                transition: Transition::Delete,
            })
        );
    }

    #[test]
    fn lifecycle_round_trip() {
        let state = MachineState::Running;
        let state = state.apply(Transition::Stop).unwrap();
        assert_eq!(state, MachineState::Stopped);
        let state = state.apply(Transition::Start).unwrap();
        assert_eq!(state, MachineState::Running);
        assert_eq!(
            state.apply(Transition::Reboot).unwrap(),
            MachineState::Running
        );
        assert!(MachineState::Deleted.apply(Transition::Start).is_err());
    }

    #[test]
    fn state_string_forms_match_wire() {
        assert_eq!(MachineState::Running.to_string(), "running");
        assert_eq!("stopped".parse::<MachineState>().unwrap(), MachineState::Stopped);
        assert_eq!(
            serde_json::to_string(&MachineState::Provisioning).unwrap(),
            "\"provisioning\""
        );
        assert_eq!(MachineAction::EnableFirewall.to_string(), "enable_firewall");
    }

    #[test]
    fn create_request_inlines_metadata_and_tags() {
        let req = CreateMachineRequest::new("Small", "img-1")
            .with_name("web")
            .with_metadata("user-script", "echo hi")
            .with_tag("role", "db");
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["metadata.user-script"], "echo hi");
        assert_eq!(body["tag.role"], "db");
        assert_eq!(body["package"], "Small");
        assert!(body.get("networks").is_none());

        let back: CreateMachineRequest = serde_json::from_value(body).unwrap();
        assert_eq!(back.metadata().get("user-script").map(String::as_str), Some("echo hi"));
        assert_eq!(back.tags().get("role").map(String::as_str), Some("db"));
    }
}
