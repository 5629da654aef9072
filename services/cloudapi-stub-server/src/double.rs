// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! In-memory CloudAPI double
//!
//! [`CloudApiDouble`] keeps every resource in plain vectors and maps and
//! reproduces the externally visible behaviour of CloudAPI: resource shapes,
//! not-found and conflict errors, and the machine lifecycle. Nothing is
//! provisioned; a created machine is `running` straight away.
//!
//! Every public operation first calls the optional pre-call [`Hook`] with the
//! operation name and its arguments. A hook error is returned as-is and the
//! operation does not run, which lets tests inject failures or record calls.
//! Operations are all-or-nothing: a failed call leaves the state untouched.

use crate::error::ServiceError;
use crate::filters::{IMAGE_FILTERS, MACHINE_FILTERS, PACKAGE_FILTERS};
use crate::seed;
use chrono::{SecondsFormat, Utc};
use cloudapi_api::{
    CreateFabricNetworkRequest, CreateFirewallRuleRequest, CreateKeyRequest,
    CreateMachineRequest, FabricVlan, Filter, FirewallRule, Image, Key, MAX_VLAN_ID, Machine,
    MachineState, Metadata, Network, Package, Snapshot, Tags, Transition,
    UpdateFabricVlanRequest,
};
use rand::Rng;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// One intercepted call, as seen by the pre-call hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub operation: &'static str,
    pub args: Vec<String>,
}

/// Pre-call interception point
pub type Hook = Arc<dyn Fn(&Call) -> Result<(), ServiceError> + Send + Sync>;

pub struct CloudApiDouble {
    keys: Vec<Key>,
    packages: Vec<Package>,
    images: Vec<Image>,
    machines: Vec<Machine>,
    machine_fw: HashMap<String, bool>,
    snapshots: HashMap<String, Vec<Snapshot>>,
    firewall_rules: Vec<FirewallRule>,
    networks: Vec<Network>,
    vlans: Vec<FabricVlan>,
    fabric_networks: BTreeMap<u16, Vec<Network>>,
    hook: Option<Hook>,
}

impl fmt::Debug for CloudApiDouble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudApiDouble")
            .field("keys", &self.keys.len())
            .field("machines", &self.machines.len())
            .field("firewall_rules", &self.firewall_rules.len())
            .field("vlans", &self.vlans.len())
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl Default for CloudApiDouble {
    fn default() -> Self {
        Self::new()
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn random_ip(prefix: &str) -> String {
    let mut rng = rand::rng();
    format!(
        "{prefix}.{}.{}",
        rng.random_range(0..=255),
        // Host octet only: never the .0 network or .255 broadcast address.
        rng.random_range(1..255)
    )
}

/// Hook arguments for an operation taking an id and a key/value map
fn map_args(id: &str, map: &BTreeMap<String, String>) -> Vec<String> {
    std::iter::once(id.to_string())
        .chain(map.iter().map(|(k, v)| format!("{k}={v}")))
        .collect()
}

fn filter_args(filter: Option<&Filter>) -> Vec<String> {
    filter
        .map(|f| f.iter().map(|(k, v)| format!("{k}={v}")).collect())
        .unwrap_or_default()
}

impl CloudApiDouble {
    /// A double holding the seeded catalogs and nothing else
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            packages: seed::packages(),
            images: seed::images(),
            machines: Vec::new(),
            machine_fw: HashMap::new(),
            snapshots: HashMap::new(),
            firewall_rules: Vec::new(),
            networks: seed::networks(),
            vlans: seed::fabric_vlans(),
            fabric_networks: BTreeMap::new(),
            hook: None,
        }
    }

    pub fn set_hook(&mut self, hook: Hook) {
        self.hook = Some(hook);
    }

    pub fn clear_hook(&mut self) {
        self.hook = None;
    }

    fn intercept(&self, operation: &'static str, args: Vec<String>) -> Result<(), ServiceError> {
        match &self.hook {
            Some(hook) => hook(&Call { operation, args }),
            None => Ok(()),
        }
    }

    // ========================================================================
    // Keys
    // ========================================================================

    pub fn list_keys(&self) -> Result<Vec<Key>, ServiceError> {
        self.intercept("list_keys", vec![])?;
        Ok(self.keys.clone())
    }

    pub fn get_key(&self, name: &str) -> Result<Key, ServiceError> {
        self.intercept("get_key", vec![name.to_string()])?;
        self.keys
            .iter()
            .find(|k| k.name == name)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Key", name))
    }

    pub fn create_key(&mut self, req: &CreateKeyRequest) -> Result<Key, ServiceError> {
        let name = req.name.clone().unwrap_or_default();
        self.intercept("create_key", vec![name.clone(), req.key.clone()])?;
        if name.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "Key name is required".to_string(),
            ));
        }
        for existing in &self.keys {
            if existing.name == name {
                return Err(ServiceError::AlreadyExists(format!(
                    "Key name {name} already in use"
                )));
            }
            if existing.key == req.key {
                return Err(ServiceError::AlreadyExists(format!(
                    "Key {} already exists",
                    req.key
                )));
            }
        }
        let key = Key {
            name,
            fingerprint: String::new(),
            key: req.key.clone(),
        };
        tracing::info!(name = %key.name, "created key");
        self.keys.push(key.clone());
        Ok(key)
    }

    pub fn delete_key(&mut self, name: &str) -> Result<(), ServiceError> {
        self.intercept("delete_key", vec![name.to_string()])?;
        let idx = self
            .keys
            .iter()
            .position(|k| k.name == name)
            .ok_or_else(|| ServiceError::not_found("Key", name))?;
        self.keys.remove(idx);
        tracing::info!(name, "deleted key");
        Ok(())
    }

    // ========================================================================
    // Packages and images
    // ========================================================================

    pub fn list_packages(&self, filter: Option<&Filter>) -> Result<Vec<Package>, ServiceError> {
        self.intercept("list_packages", filter_args(filter))?;
        Ok(PACKAGE_FILTERS.apply(&self.packages, filter))
    }

    pub fn get_package(&self, name_or_id: &str) -> Result<Package, ServiceError> {
        self.intercept("get_package", vec![name_or_id.to_string()])?;
        self.find_package(name_or_id).cloned()
    }

    fn find_package(&self, name_or_id: &str) -> Result<&Package, ServiceError> {
        self.packages
            .iter()
            .find(|p| p.name == name_or_id)
            .or_else(|| self.packages.iter().find(|p| p.id == name_or_id))
            .ok_or_else(|| ServiceError::not_found("Package", name_or_id))
    }

    pub fn list_images(&self, filter: Option<&Filter>) -> Result<Vec<Image>, ServiceError> {
        self.intercept("list_images", filter_args(filter))?;
        Ok(IMAGE_FILTERS.apply(&self.images, filter))
    }

    pub fn get_image(&self, id: &str) -> Result<Image, ServiceError> {
        self.intercept("get_image", vec![id.to_string()])?;
        self.find_image(id).cloned()
    }

    fn find_image(&self, name_or_id: &str) -> Result<&Image, ServiceError> {
        self.images
            .iter()
            .find(|i| i.name == name_or_id)
            .or_else(|| self.images.iter().find(|i| i.id == name_or_id))
            .ok_or_else(|| ServiceError::not_found("Image", name_or_id))
    }

    // ========================================================================
    // Machines
    // ========================================================================

    /// Machine as returned to callers, with the firewall flag filled in
    fn view(&self, machine: &Machine) -> Machine {
        let mut machine = machine.clone();
        machine.firewall_enabled = self.machine_fw.get(&machine.id).copied().unwrap_or(false);
        machine
    }

    fn find_machine(&self, id: &str) -> Result<&Machine, ServiceError> {
        self.machines
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| ServiceError::not_found("Machine", id))
    }

    fn find_machine_mut(&mut self, id: &str) -> Result<&mut Machine, ServiceError> {
        self.machines
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| ServiceError::not_found("Machine", id))
    }

    pub fn list_machines(&self, filter: Option<&Filter>) -> Result<Vec<Machine>, ServiceError> {
        self.intercept("list_machines", filter_args(filter))?;
        Ok(MACHINE_FILTERS
            .apply(&self.machines, filter)
            .iter()
            .map(|m| self.view(m))
            .collect())
    }

    pub fn count_machines(&self) -> Result<usize, ServiceError> {
        self.intercept("count_machines", vec![])?;
        Ok(self.machines.len())
    }

    pub fn get_machine(&self, id: &str) -> Result<Machine, ServiceError> {
        self.intercept("get_machine", vec![id.to_string()])?;
        self.find_machine(id).map(|m| self.view(m))
    }

    pub fn create_machine(&mut self, req: &CreateMachineRequest) -> Result<Machine, ServiceError> {
        self.intercept(
            "create_machine",
            vec![
                req.name.clone().unwrap_or_default(),
                req.package.clone(),
                req.image.clone(),
            ],
        )?;

        let package = self.find_package(&req.package)?;
        let image = self.find_image(&req.image)?;
        let networks = req
            .networks
            .iter()
            .map(|n| self.find_network(n).map(|n| n.id.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        let id = Uuid::new_v4().to_string();
        let public_ip = random_ip("32.151");
        let created = now();
        let machine = Machine {
            name: req.name.clone().unwrap_or_else(|| id[..8].to_string()),
            machine_type: image.image_type.clone(),
            state: MachineState::Running,
            dataset: Some(image.id.clone()),
            memory: package.memory,
            disk: package.disk,
            ips: vec![public_ip.clone(), random_ip("10.201")],
            metadata: req.metadata(),
            tags: req.tags(),
            created: Some(created.clone()),
            updated: Some(created),
            package: package.name.clone(),
            image: image.id.clone(),
            primary_ip: Some(public_ip),
            networks,
            firewall_enabled: false,
            compute_node: None,
            id,
        };

        tracing::info!(id = %machine.id, name = %machine.name, "created machine");
        if let Some(enabled) = req.firewall_enabled {
            self.machine_fw.insert(machine.id.clone(), enabled);
        }
        self.machines.push(machine.clone());
        Ok(self.view(&machine))
    }

    fn transition(&mut self, id: &str, transition: Transition) -> Result<(), ServiceError> {
        let machine = self.find_machine_mut(id)?;
        machine.state = machine
            .state
            .apply(transition)
            .map_err(|e| ServiceError::InvalidArgument(e.to_string()))?;
        machine.updated = Some(now());
        tracing::debug!(id, state = %machine.state, "machine state changed");
        Ok(())
    }

    pub fn stop_machine(&mut self, id: &str) -> Result<(), ServiceError> {
        self.intercept("stop_machine", vec![id.to_string()])?;
        self.transition(id, Transition::Stop)
    }

    pub fn start_machine(&mut self, id: &str) -> Result<(), ServiceError> {
        self.intercept("start_machine", vec![id.to_string()])?;
        self.transition(id, Transition::Start)
    }

    pub fn reboot_machine(&mut self, id: &str) -> Result<(), ServiceError> {
        self.intercept("reboot_machine", vec![id.to_string()])?;
        self.transition(id, Transition::Reboot)
    }

    /// Unlike CloudAPI, downsizing is allowed
    pub fn resize_machine(&mut self, id: &str, package: &str) -> Result<(), ServiceError> {
        self.intercept("resize_machine", vec![id.to_string(), package.to_string()])?;
        let package = self.find_package(package)?.clone();
        let machine = self.find_machine_mut(id)?;
        machine.package = package.name;
        machine.memory = package.memory;
        machine.disk = package.disk;
        machine.updated = Some(now());
        tracing::info!(id, package = %machine.package, "resized machine");
        Ok(())
    }

    pub fn rename_machine(&mut self, id: &str, name: &str) -> Result<(), ServiceError> {
        self.intercept("rename_machine", vec![id.to_string(), name.to_string()])?;
        let machine = self.find_machine_mut(id)?;
        machine.name = name.to_string();
        machine.updated = Some(now());
        tracing::info!(id, name, "renamed machine");
        Ok(())
    }

    pub fn delete_machine(&mut self, id: &str) -> Result<(), ServiceError> {
        self.intercept("delete_machine", vec![id.to_string()])?;
        let idx = self
            .machines
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| ServiceError::not_found("Machine", id))?;
        if !self.machines[idx].state.can_delete() {
            return Err(ServiceError::NotStopped(id.to_string()));
        }
        self.machines.remove(idx);
        self.machine_fw.remove(id);
        self.snapshots.remove(id);
        tracing::info!(id, "deleted machine");
        Ok(())
    }

    pub fn enable_machine_firewall(&mut self, id: &str) -> Result<(), ServiceError> {
        self.intercept("enable_machine_firewall", vec![id.to_string()])?;
        self.set_machine_firewall(id, true)
    }

    pub fn disable_machine_firewall(&mut self, id: &str) -> Result<(), ServiceError> {
        self.intercept("disable_machine_firewall", vec![id.to_string()])?;
        self.set_machine_firewall(id, false)
    }

    fn set_machine_firewall(&mut self, id: &str, enabled: bool) -> Result<(), ServiceError> {
        self.find_machine(id)?;
        self.machine_fw.insert(id.to_string(), enabled);
        tracing::debug!(id, enabled, "machine firewall toggled");
        Ok(())
    }

    /// Rules whose text mentions `vm <id>`
    pub fn list_machine_firewall_rules(&self, id: &str) -> Result<Vec<FirewallRule>, ServiceError> {
        self.intercept("list_machine_firewall_rules", vec![id.to_string()])?;
        self.find_machine(id)?;
        Ok(self
            .firewall_rules
            .iter()
            .filter(|r| rule_targets(r, id))
            .cloned()
            .collect())
    }

    // ========================================================================
    // Machine metadata
    // ========================================================================

    pub fn get_machine_metadata(&self, id: &str) -> Result<Metadata, ServiceError> {
        self.intercept("get_machine_metadata", vec![id.to_string()])?;
        Ok(self.find_machine(id)?.metadata.clone())
    }

    /// Merge `metadata` into the machine's map and return the result
    pub fn update_machine_metadata(
        &mut self,
        id: &str,
        metadata: Metadata,
    ) -> Result<Metadata, ServiceError> {
        self.intercept("update_machine_metadata", map_args(id, &metadata))?;
        let machine = self.find_machine_mut(id)?;
        machine.metadata.extend(metadata);
        machine.updated = Some(now());
        Ok(machine.metadata.clone())
    }

    pub fn delete_machine_metadata(&mut self, id: &str, key: &str) -> Result<(), ServiceError> {
        self.intercept("delete_machine_metadata", vec![id.to_string(), key.to_string()])?;
        let machine = self.find_machine_mut(id)?;
        machine
            .metadata
            .remove(key)
            .ok_or_else(|| ServiceError::not_found("Metadata key", key))?;
        machine.updated = Some(now());
        Ok(())
    }

    pub fn delete_all_machine_metadata(&mut self, id: &str) -> Result<(), ServiceError> {
        self.intercept("delete_all_machine_metadata", vec![id.to_string()])?;
        let machine = self.find_machine_mut(id)?;
        machine.metadata.clear();
        machine.updated = Some(now());
        Ok(())
    }

    // ========================================================================
    // Machine tags
    // ========================================================================

    pub fn list_machine_tags(&self, id: &str) -> Result<Tags, ServiceError> {
        self.intercept("list_machine_tags", vec![id.to_string()])?;
        Ok(self.find_machine(id)?.tags.clone())
    }

    pub fn get_machine_tag(&self, id: &str, tag: &str) -> Result<String, ServiceError> {
        self.intercept("get_machine_tag", vec![id.to_string(), tag.to_string()])?;
        self.find_machine(id)?
            .tags
            .get(tag)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Tag", tag))
    }

    pub fn add_machine_tags(&mut self, id: &str, tags: Tags) -> Result<Tags, ServiceError> {
        self.intercept("add_machine_tags", map_args(id, &tags))?;
        let machine = self.find_machine_mut(id)?;
        machine.tags.extend(tags);
        machine.updated = Some(now());
        Ok(machine.tags.clone())
    }

    pub fn replace_machine_tags(&mut self, id: &str, tags: Tags) -> Result<Tags, ServiceError> {
        self.intercept("replace_machine_tags", map_args(id, &tags))?;
        let machine = self.find_machine_mut(id)?;
        machine.tags = tags;
        machine.updated = Some(now());
        Ok(machine.tags.clone())
    }

    pub fn delete_machine_tag(&mut self, id: &str, tag: &str) -> Result<(), ServiceError> {
        self.intercept("delete_machine_tag", vec![id.to_string(), tag.to_string()])?;
        let machine = self.find_machine_mut(id)?;
        machine
            .tags
            .remove(tag)
            .ok_or_else(|| ServiceError::not_found("Tag", tag))?;
        machine.updated = Some(now());
        Ok(())
    }

    pub fn delete_machine_tags(&mut self, id: &str) -> Result<(), ServiceError> {
        self.intercept("delete_machine_tags", vec![id.to_string()])?;
        let machine = self.find_machine_mut(id)?;
        machine.tags.clear();
        machine.updated = Some(now());
        Ok(())
    }

    // ========================================================================
    // Machine snapshots
    // ========================================================================

    pub fn list_machine_snapshots(&self, id: &str) -> Result<Vec<Snapshot>, ServiceError> {
        self.intercept("list_machine_snapshots", vec![id.to_string()])?;
        self.find_machine(id)?;
        Ok(self.snapshots.get(id).cloned().unwrap_or_default())
    }

    fn find_snapshot(&self, id: &str, name: &str) -> Result<&Snapshot, ServiceError> {
        self.find_machine(id)?;
        self.snapshots
            .get(id)
            .and_then(|list| list.iter().find(|s| s.name == name))
            .ok_or_else(|| ServiceError::not_found("Snapshot", name))
    }

    pub fn get_machine_snapshot(&self, id: &str, name: &str) -> Result<Snapshot, ServiceError> {
        self.intercept("get_machine_snapshot", vec![id.to_string(), name.to_string()])?;
        self.find_snapshot(id, name).cloned()
    }

    /// Without a name the snapshot is named after a fresh UUID
    pub fn create_machine_snapshot(
        &mut self,
        id: &str,
        name: Option<&str>,
    ) -> Result<Snapshot, ServiceError> {
        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        self.intercept("create_machine_snapshot", vec![id.to_string(), name.clone()])?;
        self.find_machine(id)?;
        let list = self.snapshots.entry(id.to_string()).or_default();
        if list.iter().any(|s| s.name == name) {
            return Err(ServiceError::AlreadyExists(format!(
                "Snapshot {name} already exists"
            )));
        }
        let created = now();
        let snapshot = Snapshot {
            name,
            state: "created".to_string(),
            created: Some(created.clone()),
            updated: Some(created),
        };
        list.push(snapshot.clone());
        tracing::info!(id, snapshot = %snapshot.name, "created snapshot");
        Ok(snapshot)
    }

    pub fn start_machine_from_snapshot(&mut self, id: &str, name: &str) -> Result<(), ServiceError> {
        self.intercept(
            "start_machine_from_snapshot",
            vec![id.to_string(), name.to_string()],
        )?;
        self.find_snapshot(id, name)?;
        self.transition(id, Transition::Start)
    }

    pub fn delete_machine_snapshot(&mut self, id: &str, name: &str) -> Result<(), ServiceError> {
        self.intercept("delete_machine_snapshot", vec![id.to_string(), name.to_string()])?;
        self.find_snapshot(id, name)?;
        if let Some(list) = self.snapshots.get_mut(id) {
            list.retain(|s| s.name != name);
        }
        Ok(())
    }

    // ========================================================================
    // Firewall rules
    // ========================================================================

    fn find_rule_mut(&mut self, id: &str) -> Result<&mut FirewallRule, ServiceError> {
        self.firewall_rules
            .iter_mut()
            .find(|r| r.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| ServiceError::not_found("Firewall rule", id))
    }

    pub fn list_firewall_rules(&self) -> Result<Vec<FirewallRule>, ServiceError> {
        self.intercept("list_firewall_rules", vec![])?;
        Ok(self.firewall_rules.clone())
    }

    pub fn get_firewall_rule(&self, id: &str) -> Result<FirewallRule, ServiceError> {
        self.intercept("get_firewall_rule", vec![id.to_string()])?;
        self.firewall_rules
            .iter()
            .find(|r| r.id.eq_ignore_ascii_case(id))
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Firewall rule", id))
    }

    /// The rule text is stored verbatim; no DSL validation
    pub fn create_firewall_rule(
        &mut self,
        req: &CreateFirewallRuleRequest,
    ) -> Result<FirewallRule, ServiceError> {
        self.intercept(
            "create_firewall_rule",
            vec![req.enabled.to_string(), req.rule.clone()],
        )?;
        let rule = FirewallRule {
            id: Uuid::new_v4().to_string(),
            enabled: req.enabled,
            rule: req.rule.clone(),
        };
        tracing::info!(id = %rule.id, "created firewall rule");
        self.firewall_rules.push(rule.clone());
        Ok(rule)
    }

    pub fn update_firewall_rule(
        &mut self,
        id: &str,
        req: &CreateFirewallRuleRequest,
    ) -> Result<FirewallRule, ServiceError> {
        self.intercept(
            "update_firewall_rule",
            vec![id.to_string(), req.enabled.to_string(), req.rule.clone()],
        )?;
        let rule = self.find_rule_mut(id)?;
        rule.enabled = req.enabled;
        rule.rule = req.rule.clone();
        Ok(rule.clone())
    }

    pub fn enable_firewall_rule(&mut self, id: &str) -> Result<FirewallRule, ServiceError> {
        self.intercept("enable_firewall_rule", vec![id.to_string()])?;
        let rule = self.find_rule_mut(id)?;
        rule.enabled = true;
        Ok(rule.clone())
    }

    pub fn disable_firewall_rule(&mut self, id: &str) -> Result<FirewallRule, ServiceError> {
        self.intercept("disable_firewall_rule", vec![id.to_string()])?;
        let rule = self.find_rule_mut(id)?;
        rule.enabled = false;
        Ok(rule.clone())
    }

    pub fn delete_firewall_rule(&mut self, id: &str) -> Result<(), ServiceError> {
        self.intercept("delete_firewall_rule", vec![id.to_string()])?;
        let idx = self
            .firewall_rules
            .iter()
            .position(|r| r.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| ServiceError::not_found("Firewall rule", id))?;
        self.firewall_rules.remove(idx);
        tracing::info!(id, "deleted firewall rule");
        Ok(())
    }

    pub fn list_firewall_rule_machines(&self, id: &str) -> Result<Vec<Machine>, ServiceError> {
        self.intercept("list_firewall_rule_machines", vec![id.to_string()])?;
        let rule = self
            .firewall_rules
            .iter()
            .find(|r| r.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| ServiceError::not_found("Firewall rule", id))?;
        Ok(self
            .machines
            .iter()
            .filter(|m| rule_targets(rule, &m.id))
            .map(|m| self.view(m))
            .collect())
    }

    // ========================================================================
    // Networks
    // ========================================================================

    fn all_networks(&self) -> impl Iterator<Item = &Network> {
        self.networks
            .iter()
            .chain(self.fabric_networks.values().flatten())
    }

    fn find_network(&self, id: &str) -> Result<&Network, ServiceError> {
        self.all_networks()
            .find(|n| n.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| ServiceError::not_found("Network", id))
    }

    pub fn list_networks(&self) -> Result<Vec<Network>, ServiceError> {
        self.intercept("list_networks", vec![])?;
        Ok(self.all_networks().cloned().collect())
    }

    pub fn get_network(&self, id: &str) -> Result<Network, ServiceError> {
        self.intercept("get_network", vec![id.to_string()])?;
        self.find_network(id).cloned()
    }

    // ========================================================================
    // Fabric VLANs and networks
    // ========================================================================

    fn find_vlan(&self, vlan_id: u16) -> Result<&FabricVlan, ServiceError> {
        self.vlans
            .iter()
            .find(|v| v.vlan_id == vlan_id)
            .ok_or_else(|| ServiceError::not_found("Fabric VLAN", vlan_id.to_string()))
    }

    pub fn list_fabric_vlans(&self) -> Result<Vec<FabricVlan>, ServiceError> {
        self.intercept("list_fabric_vlans", vec![])?;
        Ok(self.vlans.clone())
    }

    pub fn get_fabric_vlan(&self, vlan_id: u16) -> Result<FabricVlan, ServiceError> {
        self.intercept("get_fabric_vlan", vec![vlan_id.to_string()])?;
        self.find_vlan(vlan_id).cloned()
    }

    pub fn create_fabric_vlan(&mut self, vlan: FabricVlan) -> Result<FabricVlan, ServiceError> {
        self.intercept(
            "create_fabric_vlan",
            vec![vlan.vlan_id.to_string(), vlan.name.clone()],
        )?;
        if vlan.vlan_id > MAX_VLAN_ID {
            return Err(ServiceError::InvalidArgument(format!(
                "VLAN ID {} is out of range (0-{MAX_VLAN_ID})",
                vlan.vlan_id
            )));
        }
        if self.vlans.iter().any(|v| v.vlan_id == vlan.vlan_id) {
            return Err(ServiceError::AlreadyExists(format!(
                "VLAN {} already exists",
                vlan.vlan_id
            )));
        }
        tracing::info!(vlan_id = vlan.vlan_id, name = %vlan.name, "created fabric VLAN");
        self.vlans.push(vlan.clone());
        Ok(vlan)
    }

    /// Apply the fields present in `update`. An empty description clears it.
    pub fn update_fabric_vlan(
        &mut self,
        vlan_id: u16,
        update: UpdateFabricVlanRequest,
    ) -> Result<FabricVlan, ServiceError> {
        self.intercept("update_fabric_vlan", vec![vlan_id.to_string()])?;
        let vlan = self
            .vlans
            .iter_mut()
            .find(|v| v.vlan_id == vlan_id)
            .ok_or_else(|| ServiceError::not_found("Fabric VLAN", vlan_id.to_string()))?;
        if let Some(name) = update.name {
            vlan.name = name;
        }
        if let Some(description) = update.description {
            vlan.description = (!description.is_empty()).then_some(description);
        }
        Ok(vlan.clone())
    }

    pub fn delete_fabric_vlan(&mut self, vlan_id: u16) -> Result<(), ServiceError> {
        self.intercept("delete_fabric_vlan", vec![vlan_id.to_string()])?;
        self.find_vlan(vlan_id)?;
        if self
            .fabric_networks
            .get(&vlan_id)
            .is_some_and(|n| !n.is_empty())
        {
            return Err(ServiceError::InvalidArgument(format!(
                "VLAN {vlan_id} still has networks"
            )));
        }
        self.vlans.retain(|v| v.vlan_id != vlan_id);
        self.fabric_networks.remove(&vlan_id);
        tracing::info!(vlan_id, "deleted fabric VLAN");
        Ok(())
    }

    pub fn list_fabric_networks(&self, vlan_id: u16) -> Result<Vec<Network>, ServiceError> {
        self.intercept("list_fabric_networks", vec![vlan_id.to_string()])?;
        self.find_vlan(vlan_id)?;
        Ok(self
            .fabric_networks
            .get(&vlan_id)
            .cloned()
            .unwrap_or_default())
    }

    pub fn get_fabric_network(&self, vlan_id: u16, id: &str) -> Result<Network, ServiceError> {
        self.intercept("get_fabric_network", vec![vlan_id.to_string(), id.to_string()])?;
        self.find_vlan(vlan_id)?;
        self.fabric_networks
            .get(&vlan_id)
            .and_then(|list| list.iter().find(|n| n.id.eq_ignore_ascii_case(id)))
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Network", id))
    }

    pub fn create_fabric_network(
        &mut self,
        vlan_id: u16,
        req: CreateFabricNetworkRequest,
    ) -> Result<Network, ServiceError> {
        self.intercept(
            "create_fabric_network",
            vec![vlan_id.to_string(), req.name.clone()],
        )?;
        self.find_vlan(vlan_id)?;
        let network = Network {
            id: Uuid::new_v4().to_string(),
            name: req.name,
            public: false,
            fabric: true,
            description: req.description,
            subnet: Some(req.subnet),
            provision_start_ip: Some(req.provision_start_ip),
            provision_end_ip: Some(req.provision_end_ip),
            gateway: req.gateway,
            resolvers: req.resolvers,
            routes: req.routes,
            internet_nat: Some(req.internet_nat),
            vlan_id: Some(vlan_id),
        };
        tracing::info!(vlan_id, id = %network.id, "created fabric network");
        self.fabric_networks
            .entry(vlan_id)
            .or_default()
            .push(network.clone());
        Ok(network)
    }

    pub fn delete_fabric_network(&mut self, vlan_id: u16, id: &str) -> Result<(), ServiceError> {
        self.intercept(
            "delete_fabric_network",
            vec![vlan_id.to_string(), id.to_string()],
        )?;
        self.find_vlan(vlan_id)?;
        let list = self
            .fabric_networks
            .get_mut(&vlan_id)
            .ok_or_else(|| ServiceError::not_found("Network", id))?;
        let idx = list
            .iter()
            .position(|n| n.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| ServiceError::not_found("Network", id))?;
        list.remove(idx);
        Ok(())
    }
}

// TODO: evaluate the firewall rule DSL targets instead of this substring check.
fn rule_targets(rule: &FirewallRule, machine_id: &str) -> bool {
    rule.rule.contains(&format!("vm {machine_id}"))
}
