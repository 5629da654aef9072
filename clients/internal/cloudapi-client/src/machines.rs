// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Machines and their sub-resources: metadata, tags, snapshots and
//! per-machine firewall state

use crate::{
    ACCEPTED, CREATED, Client, CreateMachineRequest, CreateSnapshotRequest, Error, Filter,
    FirewallRule, Machine, MachineAction, Metadata, Request, Result, Snapshot, Tags,
};

impl Client {
    pub async fn list_machines(&self, filter: Option<&Filter>) -> Result<Vec<Machine>> {
        self.execute(
            Request::get(&["machines"]).filter(filter),
            "failed to get list of machines",
        )
        .await
    }

    pub async fn get_machine(&self, id: &str) -> Result<Machine> {
        self.execute(
            Request::get(&["machines", id]),
            format!("failed to get machine with id: {id}"),
        )
        .await
    }

    pub async fn create_machine(&self, opts: &CreateMachineRequest) -> Result<Machine> {
        let context = format!(
            "failed to create machine with name: {}",
            opts.name.as_deref().unwrap_or("")
        );
        let request = Request::post(&["machines"])
            .expect(CREATED)
            .json(opts)
            .map_err(|e| Error::new(&context, e))?;
        self.execute(request, context).await
    }

    pub async fn delete_machine(&self, id: &str) -> Result<()> {
        self.execute_empty(
            Request::delete(&["machines", id]),
            format!("failed to delete machine with id {id}"),
        )
        .await
    }

    // ========================================================================
    // Machine Actions
    // ========================================================================

    fn action(id: &str, action: MachineAction) -> Request {
        Request::post(&["machines", id])
            .query("action", action.to_string())
            .expect(ACCEPTED)
    }

    pub async fn start_machine(&self, id: &str) -> Result<()> {
        self.execute_empty(
            Self::action(id, MachineAction::Start),
            format!("failed to start machine with id {id}"),
        )
        .await
    }

    pub async fn stop_machine(&self, id: &str) -> Result<()> {
        self.execute_empty(
            Self::action(id, MachineAction::Stop),
            format!("failed to stop machine with id {id}"),
        )
        .await
    }

    pub async fn reboot_machine(&self, id: &str) -> Result<()> {
        self.execute_empty(
            Self::action(id, MachineAction::Reboot),
            format!("failed to reboot machine with id {id}"),
        )
        .await
    }

    pub async fn resize_machine(&self, id: &str, package: &str) -> Result<()> {
        self.execute_empty(
            Self::action(id, MachineAction::Resize).query("package", package),
            format!("failed to resize machine with id {id} to package {package}"),
        )
        .await
    }

    pub async fn rename_machine(&self, id: &str, name: &str) -> Result<()> {
        self.execute_empty(
            Self::action(id, MachineAction::Rename).query("name", name),
            format!("failed to rename machine with id {id} to {name}"),
        )
        .await
    }

    // ========================================================================
    // Machine Firewall
    // ========================================================================

    pub async fn list_machine_firewall_rules(&self, id: &str) -> Result<Vec<FirewallRule>> {
        self.execute(
            Request::get(&["machines", id, "firewallrules"]),
            format!("failed to get list of firewall rules for machine with id {id}"),
        )
        .await
    }

    pub async fn enable_machine_firewall(&self, id: &str) -> Result<()> {
        self.execute_empty(
            Self::action(id, MachineAction::EnableFirewall),
            format!("failed to enable firewall on machine with id: {id}"),
        )
        .await
    }

    pub async fn disable_machine_firewall(&self, id: &str) -> Result<()> {
        self.execute_empty(
            Self::action(id, MachineAction::DisableFirewall),
            format!("failed to disable firewall on machine with id: {id}"),
        )
        .await
    }

    // ========================================================================
    // Machine Metadata
    // ========================================================================

    pub async fn get_machine_metadata(&self, id: &str) -> Result<Metadata> {
        self.execute(
            Request::get(&["machines", id, "metadata"]),
            format!("failed to get list of metadata for machine with id {id}"),
        )
        .await
    }

    /// Add or overwrite metadata keys; returns the machine's full metadata
    pub async fn update_machine_metadata(&self, id: &str, metadata: &Metadata) -> Result<Metadata> {
        let context = format!("failed to update metadata for machine with id {id}");
        let request = Request::post(&["machines", id, "metadata"])
            .json(metadata)
            .map_err(|e| Error::new(&context, e))?;
        self.execute(request, context).await
    }

    pub async fn delete_machine_metadata(&self, id: &str, key: &str) -> Result<()> {
        self.execute_empty(
            Request::delete(&["machines", id, "metadata", key]),
            format!("failed to delete metadata with key {key} for machine with id {id}"),
        )
        .await
    }

    pub async fn delete_all_machine_metadata(&self, id: &str) -> Result<()> {
        self.execute_empty(
            Request::delete(&["machines", id, "metadata"]),
            format!("failed to delete metadata for machine with id {id}"),
        )
        .await
    }

    // ========================================================================
    // Machine Tags
    // ========================================================================

    pub async fn list_machine_tags(&self, id: &str) -> Result<Tags> {
        self.execute(
            Request::get(&["machines", id, "tags"]),
            format!("failed to get list of tags for machine with id {id}"),
        )
        .await
    }

    pub async fn get_machine_tag(&self, id: &str, tag: &str) -> Result<String> {
        self.execute(
            Request::get(&["machines", id, "tags", tag]),
            format!("failed to get tag {tag} for machine with id {id}"),
        )
        .await
    }

    /// Merge `tags` into the machine's tags; returns the full set
    pub async fn add_machine_tags(&self, id: &str, tags: &Tags) -> Result<Tags> {
        let context = format!("failed to add tags for machine with id {id}");
        let request = Request::post(&["machines", id, "tags"])
            .json(tags)
            .map_err(|e| Error::new(&context, e))?;
        self.execute(request, context).await
    }

    /// Replace all of the machine's tags with `tags`
    pub async fn replace_machine_tags(&self, id: &str, tags: &Tags) -> Result<Tags> {
        let context = format!("failed to replace tags for machine with id {id}");
        let request = Request::put(&["machines", id, "tags"])
            .json(tags)
            .map_err(|e| Error::new(&context, e))?;
        self.execute(request, context).await
    }

    pub async fn delete_machine_tag(&self, id: &str, tag: &str) -> Result<()> {
        self.execute_empty(
            Request::delete(&["machines", id, "tags", tag]),
            format!("failed to delete tag {tag} for machine with id {id}"),
        )
        .await
    }

    pub async fn delete_machine_tags(&self, id: &str) -> Result<()> {
        self.execute_empty(
            Request::delete(&["machines", id, "tags"]),
            format!("failed to delete tags for machine with id {id}"),
        )
        .await
    }

    // ========================================================================
    // Machine Snapshots
    // ========================================================================

    pub async fn list_machine_snapshots(&self, id: &str) -> Result<Vec<Snapshot>> {
        self.execute(
            Request::get(&["machines", id, "snapshots"]),
            format!("failed to get list of snapshots for machine with id {id}"),
        )
        .await
    }

    pub async fn get_machine_snapshot(&self, id: &str, name: &str) -> Result<Snapshot> {
        self.execute(
            Request::get(&["machines", id, "snapshots", name]),
            format!("failed to get snapshot {name} for machine with id {id}"),
        )
        .await
    }

    pub async fn create_machine_snapshot(
        &self,
        id: &str,
        opts: &CreateSnapshotRequest,
    ) -> Result<Snapshot> {
        let context = format!("failed to create snapshot for machine with id {id}");
        let request = Request::post(&["machines", id, "snapshots"])
            .expect(CREATED)
            .json(opts)
            .map_err(|e| Error::new(&context, e))?;
        self.execute(request, context).await
    }

    pub async fn start_machine_from_snapshot(&self, id: &str, name: &str) -> Result<()> {
        self.execute_empty(
            Request::post(&["machines", id, "snapshots", name]).expect(ACCEPTED),
            format!("failed to start machine with id {id} from snapshot {name}"),
        )
        .await
    }

    pub async fn delete_machine_snapshot(&self, id: &str, name: &str) -> Result<()> {
        self.execute_empty(
            Request::delete(&["machines", id, "snapshots", name]),
            format!("failed to delete snapshot {name} for machine with id {id}"),
        )
        .await
    }
}
