// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Stub CloudAPI server for testing
//!
//! This crate provides an in-memory CloudAPI double ([`CloudApiDouble`]) and
//! a Dropshot server that exposes it through the `cloudapi_api::CloudApi`
//! trait. It can be used for:
//!
//! - Driving `cloudapi-client` end to end without a real Triton deployment
//! - Unit tests that want the double directly, with a pre-call [`Hook`] for
//!   fault injection
//! - Local development against a throwaway CloudAPI
//!
//! The server answers for the `my` account alias and for the configured
//! account name. Everything else is a 404.

pub mod config;
pub mod double;
pub mod error;
pub mod filters;
pub mod seed;

pub use double::{Call, CloudApiDouble, Hook};
pub use error::ServiceError;

use cloudapi_api::*;
use dropshot::{
    ApiDescription, ClientErrorStatusCode, HttpError, HttpResponseAccepted,
    HttpResponseCreated, HttpResponseDeleted, HttpResponseOk, Path, Query, RequestContext,
    TypedBody,
};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

// ============================================================================
// Server Context
// ============================================================================

/// Shared state for the stub server
#[derive(Debug)]
pub struct StubContext {
    account: String,
    double: Mutex<CloudApiDouble>,
}

impl StubContext {
    pub fn new(account: impl Into<String>) -> Self {
        Self::with_double(account, CloudApiDouble::new())
    }

    /// Serve a pre-populated (or hooked) double
    pub fn with_double(account: impl Into<String>, double: CloudApiDouble) -> Self {
        Self {
            account: account.into(),
            double: Mutex::new(double),
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Direct access to the double, e.g. to install a hook mid-test
    pub async fn double(&self) -> MutexGuard<'_, CloudApiDouble> {
        self.double.lock().await
    }

    fn check_account(&self, account: &str) -> Result<(), HttpError> {
        if account == config::DEFAULT_ACCOUNT || account == self.account {
            return Ok(());
        }
        Err(HttpError::for_client_error(
            Some("ResourceNotFound".to_string()),
            ClientErrorStatusCode::NOT_FOUND,
            format!("account {account} not found"),
        ))
    }
}

type Ctx = Arc<StubContext>;

async fn open<'a>(
    rqctx: &'a RequestContext<Ctx>,
    account: &str,
) -> Result<MutexGuard<'a, CloudApiDouble>, HttpError> {
    let ctx = rqctx.context();
    ctx.check_account(account)?;
    Ok(ctx.double.lock().await)
}

/// List filters arrive as arbitrary query parameters
fn query_filter(rqctx: &RequestContext<Ctx>) -> Option<Filter> {
    rqctx.request.uri().query().map(Filter::from_query)
}

// ============================================================================
// API Implementation
// ============================================================================

/// Marker type for the stub CloudAPI implementation
pub enum StubCloudApi {}

impl CloudApi for StubCloudApi {
    type Context = Ctx;

    async fn list_keys(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
    ) -> Result<HttpResponseOk<Vec<Key>>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.list_keys()?))
    }

    async fn create_key(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
        body: TypedBody<CreateKeyRequest>,
    ) -> Result<HttpResponseCreated<Key>, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseCreated(double.create_key(&body.into_inner())?))
    }

    async fn get_key(
        rqctx: RequestContext<Self::Context>,
        path: Path<KeyPath>,
    ) -> Result<HttpResponseOk<Key>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.get_key(&path.name)?))
    }

    async fn delete_key(
        rqctx: RequestContext<Self::Context>,
        path: Path<KeyPath>,
    ) -> Result<HttpResponseDeleted, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        double.delete_key(&path.name)?;
        Ok(HttpResponseDeleted())
    }

    async fn list_packages(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
    ) -> Result<HttpResponseOk<Vec<Package>>, HttpError> {
        let path = path.into_inner();
        let filter = query_filter(&rqctx);
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.list_packages(filter.as_ref())?))
    }

    async fn get_package(
        rqctx: RequestContext<Self::Context>,
        path: Path<PackagePath>,
    ) -> Result<HttpResponseOk<Package>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.get_package(&path.package)?))
    }

    async fn list_images(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
    ) -> Result<HttpResponseOk<Vec<Image>>, HttpError> {
        let path = path.into_inner();
        let filter = query_filter(&rqctx);
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.list_images(filter.as_ref())?))
    }

    async fn get_image(
        rqctx: RequestContext<Self::Context>,
        path: Path<ImagePath>,
    ) -> Result<HttpResponseOk<Image>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.get_image(&path.image)?))
    }

    // ========================================================================
    // Machines
    // ========================================================================

    async fn list_machines(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
    ) -> Result<HttpResponseOk<Vec<Machine>>, HttpError> {
        let path = path.into_inner();
        let filter = query_filter(&rqctx);
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.list_machines(filter.as_ref())?))
    }

    async fn create_machine(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
        body: TypedBody<CreateMachineRequest>,
    ) -> Result<HttpResponseCreated<Machine>, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseCreated(
            double.create_machine(&body.into_inner())?,
        ))
    }

    async fn get_machine(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
    ) -> Result<HttpResponseOk<Machine>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.get_machine(&path.machine)?))
    }

    async fn update_machine(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
        query: Query<MachineActionQuery>,
    ) -> Result<HttpResponseAccepted<()>, HttpError> {
        let path = path.into_inner();
        let query = query.into_inner();
        let id = path.machine.as_str();
        let mut double = open(&rqctx, &path.account).await?;
        match query.action {
            MachineAction::Start => double.start_machine(id)?,
            MachineAction::Stop => double.stop_machine(id)?,
            MachineAction::Reboot => double.reboot_machine(id)?,
            MachineAction::Resize => {
                let package = query.package.ok_or_else(|| {
                    HttpError::for_bad_request(None, "resize requires a package".to_string())
                })?;
                double.resize_machine(id, &package)?
            }
            MachineAction::Rename => {
                let name = query.name.ok_or_else(|| {
                    HttpError::for_bad_request(None, "rename requires a name".to_string())
                })?;
                double.rename_machine(id, &name)?
            }
            MachineAction::EnableFirewall => double.enable_machine_firewall(id)?,
            MachineAction::DisableFirewall => double.disable_machine_firewall(id)?,
        }
        Ok(HttpResponseAccepted(()))
    }

    async fn delete_machine(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
    ) -> Result<HttpResponseDeleted, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        double.delete_machine(&path.machine)?;
        Ok(HttpResponseDeleted())
    }

    async fn get_machine_metadata(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
    ) -> Result<HttpResponseOk<Metadata>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.get_machine_metadata(&path.machine)?))
    }

    async fn update_machine_metadata(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
        body: TypedBody<Metadata>,
    ) -> Result<HttpResponseOk<Metadata>, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(
            double.update_machine_metadata(&path.machine, body.into_inner())?,
        ))
    }

    async fn delete_all_machine_metadata(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
    ) -> Result<HttpResponseDeleted, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        double.delete_all_machine_metadata(&path.machine)?;
        Ok(HttpResponseDeleted())
    }

    async fn delete_machine_metadata(
        rqctx: RequestContext<Self::Context>,
        path: Path<MetadataKeyPath>,
    ) -> Result<HttpResponseDeleted, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        double.delete_machine_metadata(&path.machine, &path.key)?;
        Ok(HttpResponseDeleted())
    }

    async fn list_machine_tags(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
    ) -> Result<HttpResponseOk<Tags>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.list_machine_tags(&path.machine)?))
    }

    async fn add_machine_tags(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
        body: TypedBody<Tags>,
    ) -> Result<HttpResponseOk<Tags>, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(
            double.add_machine_tags(&path.machine, body.into_inner())?,
        ))
    }

    async fn replace_machine_tags(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
        body: TypedBody<Tags>,
    ) -> Result<HttpResponseOk<Tags>, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(
            double.replace_machine_tags(&path.machine, body.into_inner())?,
        ))
    }

    async fn delete_machine_tags(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
    ) -> Result<HttpResponseDeleted, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        double.delete_machine_tags(&path.machine)?;
        Ok(HttpResponseDeleted())
    }

    async fn get_machine_tag(
        rqctx: RequestContext<Self::Context>,
        path: Path<TagPath>,
    ) -> Result<HttpResponseOk<String>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(
            double.get_machine_tag(&path.machine, &path.tag)?,
        ))
    }

    async fn delete_machine_tag(
        rqctx: RequestContext<Self::Context>,
        path: Path<TagPath>,
    ) -> Result<HttpResponseDeleted, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        double.delete_machine_tag(&path.machine, &path.tag)?;
        Ok(HttpResponseDeleted())
    }

    async fn list_machine_snapshots(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
    ) -> Result<HttpResponseOk<Vec<Snapshot>>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.list_machine_snapshots(&path.machine)?))
    }

    async fn create_machine_snapshot(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
        body: TypedBody<CreateSnapshotRequest>,
    ) -> Result<HttpResponseCreated<Snapshot>, HttpError> {
        let path = path.into_inner();
        let body = body.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseCreated(double.create_machine_snapshot(
            &path.machine,
            body.name.as_deref(),
        )?))
    }

    async fn get_machine_snapshot(
        rqctx: RequestContext<Self::Context>,
        path: Path<SnapshotPath>,
    ) -> Result<HttpResponseOk<Snapshot>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(
            double.get_machine_snapshot(&path.machine, &path.name)?,
        ))
    }

    async fn start_machine_from_snapshot(
        rqctx: RequestContext<Self::Context>,
        path: Path<SnapshotPath>,
    ) -> Result<HttpResponseAccepted<()>, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        double.start_machine_from_snapshot(&path.machine, &path.name)?;
        Ok(HttpResponseAccepted(()))
    }

    async fn delete_machine_snapshot(
        rqctx: RequestContext<Self::Context>,
        path: Path<SnapshotPath>,
    ) -> Result<HttpResponseDeleted, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        double.delete_machine_snapshot(&path.machine, &path.name)?;
        Ok(HttpResponseDeleted())
    }

    async fn list_machine_firewall_rules(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
    ) -> Result<HttpResponseOk<Vec<FirewallRule>>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(
            double.list_machine_firewall_rules(&path.machine)?,
        ))
    }

    // ========================================================================
    // Firewall Rules
    // ========================================================================

    async fn list_firewall_rules(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
    ) -> Result<HttpResponseOk<Vec<FirewallRule>>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.list_firewall_rules()?))
    }

    async fn create_firewall_rule(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
        body: TypedBody<CreateFirewallRuleRequest>,
    ) -> Result<HttpResponseCreated<FirewallRule>, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseCreated(
            double.create_firewall_rule(&body.into_inner())?,
        ))
    }

    async fn get_firewall_rule(
        rqctx: RequestContext<Self::Context>,
        path: Path<FirewallRulePath>,
    ) -> Result<HttpResponseOk<FirewallRule>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.get_firewall_rule(&path.id)?))
    }

    async fn update_firewall_rule(
        rqctx: RequestContext<Self::Context>,
        path: Path<FirewallRulePath>,
        body: TypedBody<CreateFirewallRuleRequest>,
    ) -> Result<HttpResponseOk<FirewallRule>, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(
            double.update_firewall_rule(&path.id, &body.into_inner())?,
        ))
    }

    async fn enable_firewall_rule(
        rqctx: RequestContext<Self::Context>,
        path: Path<FirewallRulePath>,
    ) -> Result<HttpResponseOk<FirewallRule>, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.enable_firewall_rule(&path.id)?))
    }

    async fn disable_firewall_rule(
        rqctx: RequestContext<Self::Context>,
        path: Path<FirewallRulePath>,
    ) -> Result<HttpResponseOk<FirewallRule>, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.disable_firewall_rule(&path.id)?))
    }

    async fn delete_firewall_rule(
        rqctx: RequestContext<Self::Context>,
        path: Path<FirewallRulePath>,
    ) -> Result<HttpResponseDeleted, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        double.delete_firewall_rule(&path.id)?;
        Ok(HttpResponseDeleted())
    }

    async fn list_firewall_rule_machines(
        rqctx: RequestContext<Self::Context>,
        path: Path<FirewallRulePath>,
    ) -> Result<HttpResponseOk<Vec<Machine>>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.list_firewall_rule_machines(&path.id)?))
    }

    // ========================================================================
    // Networks and Fabrics
    // ========================================================================

    async fn list_networks(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
    ) -> Result<HttpResponseOk<Vec<Network>>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.list_networks()?))
    }

    async fn get_network(
        rqctx: RequestContext<Self::Context>,
        path: Path<NetworkPath>,
    ) -> Result<HttpResponseOk<Network>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.get_network(&path.network)?))
    }

    async fn list_fabric_vlans(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
    ) -> Result<HttpResponseOk<Vec<FabricVlan>>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.list_fabric_vlans()?))
    }

    async fn create_fabric_vlan(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
        body: TypedBody<FabricVlan>,
    ) -> Result<HttpResponseCreated<FabricVlan>, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseCreated(
            double.create_fabric_vlan(body.into_inner())?,
        ))
    }

    async fn get_fabric_vlan(
        rqctx: RequestContext<Self::Context>,
        path: Path<FabricVlanPath>,
    ) -> Result<HttpResponseOk<FabricVlan>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.get_fabric_vlan(path.vlan_id)?))
    }

    async fn update_fabric_vlan(
        rqctx: RequestContext<Self::Context>,
        path: Path<FabricVlanPath>,
        body: TypedBody<UpdateFabricVlanRequest>,
    ) -> Result<HttpResponseAccepted<FabricVlan>, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseAccepted(
            double.update_fabric_vlan(path.vlan_id, body.into_inner())?,
        ))
    }

    async fn delete_fabric_vlan(
        rqctx: RequestContext<Self::Context>,
        path: Path<FabricVlanPath>,
    ) -> Result<HttpResponseDeleted, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        double.delete_fabric_vlan(path.vlan_id)?;
        Ok(HttpResponseDeleted())
    }

    async fn list_fabric_networks(
        rqctx: RequestContext<Self::Context>,
        path: Path<FabricVlanPath>,
    ) -> Result<HttpResponseOk<Vec<Network>>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(double.list_fabric_networks(path.vlan_id)?))
    }

    async fn create_fabric_network(
        rqctx: RequestContext<Self::Context>,
        path: Path<FabricVlanPath>,
        body: TypedBody<CreateFabricNetworkRequest>,
    ) -> Result<HttpResponseCreated<Network>, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseCreated(
            double.create_fabric_network(path.vlan_id, body.into_inner())?,
        ))
    }

    async fn get_fabric_network(
        rqctx: RequestContext<Self::Context>,
        path: Path<FabricNetworkPath>,
    ) -> Result<HttpResponseOk<Network>, HttpError> {
        let path = path.into_inner();
        let double = open(&rqctx, &path.account).await?;
        Ok(HttpResponseOk(
            double.get_fabric_network(path.vlan_id, &path.id)?,
        ))
    }

    async fn delete_fabric_network(
        rqctx: RequestContext<Self::Context>,
        path: Path<FabricNetworkPath>,
    ) -> Result<HttpResponseDeleted, HttpError> {
        let path = path.into_inner();
        let mut double = open(&rqctx, &path.account).await?;
        double.delete_fabric_network(path.vlan_id, &path.id)?;
        Ok(HttpResponseDeleted())
    }
}

/// Create the API description for the stub server
pub fn api_description() -> Result<ApiDescription<Ctx>, String> {
    cloudapi_api::cloud_api_mod::api_description::<StubCloudApi>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_description_registers_every_endpoint() {
        assert!(api_description().is_ok());
    }

    #[test]
    fn account_alias_and_configured_name_are_served() {
        let ctx = StubContext::new("alice");
        assert!(ctx.check_account("my").is_ok());
        assert!(ctx.check_account("alice").is_ok());
        let err = ctx.check_account("bob").unwrap_err();
        assert_eq!(err.status_code.as_u16(), 404);
    }
}
