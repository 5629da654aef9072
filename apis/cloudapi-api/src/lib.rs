// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Triton CloudAPI trait definition
//!
//! This crate defines the resource models and the Dropshot API trait for the
//! subset of Triton's CloudAPI covered by `cloudapi-client`: SSH keys,
//! packages, images, machines (with metadata, tags, snapshots and firewall
//! state), firewall rules, networks and fabric VLANs.
//!
//! List endpoints accept arbitrary filter keys (including `tags.<name>` on
//! machines), so they take no typed `Query` extractor. Implementations read
//! the raw query string and parse it with [`Filter::from_query`].

use dropshot::{
    HttpError, HttpResponseAccepted, HttpResponseCreated, HttpResponseDeleted, HttpResponseOk,
    Path, Query, RequestContext, TypedBody,
};

pub mod types;
pub use types::*;

/// CloudAPI trait definition
#[dropshot::api_description]
pub trait CloudApi {
    /// Context type for request handlers
    type Context: Send + Sync + 'static;

    // ========================================================================
    // Key Endpoints
    // ========================================================================

    /// List SSH keys
    #[endpoint {
        method = GET,
        path = "/{account}/keys",
        tags = ["keys"],
    }]
    async fn list_keys(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
    ) -> Result<HttpResponseOk<Vec<Key>>, HttpError>;

    /// Create an SSH key
    #[endpoint {
        method = POST,
        path = "/{account}/keys",
        tags = ["keys"],
    }]
    async fn create_key(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
        body: TypedBody<CreateKeyRequest>,
    ) -> Result<HttpResponseCreated<Key>, HttpError>;

    /// Get an SSH key
    #[endpoint {
        method = GET,
        path = "/{account}/keys/{name}",
        tags = ["keys"],
    }]
    async fn get_key(
        rqctx: RequestContext<Self::Context>,
        path: Path<KeyPath>,
    ) -> Result<HttpResponseOk<Key>, HttpError>;

    /// Delete an SSH key
    #[endpoint {
        method = DELETE,
        path = "/{account}/keys/{name}",
        tags = ["keys"],
    }]
    async fn delete_key(
        rqctx: RequestContext<Self::Context>,
        path: Path<KeyPath>,
    ) -> Result<HttpResponseDeleted, HttpError>;

    // ========================================================================
    // Package Endpoints
    // ========================================================================

    /// List packages
    ///
    /// Filters: name, memory, disk, swap, version, vcpus, group.
    #[endpoint {
        method = GET,
        path = "/{account}/packages",
        tags = ["packages"],
    }]
    async fn list_packages(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
    ) -> Result<HttpResponseOk<Vec<Package>>, HttpError>;

    /// Get a package by name or UUID
    #[endpoint {
        method = GET,
        path = "/{account}/packages/{package}",
        tags = ["packages"],
    }]
    async fn get_package(
        rqctx: RequestContext<Self::Context>,
        path: Path<PackagePath>,
    ) -> Result<HttpResponseOk<Package>, HttpError>;

    // ========================================================================
    // Image Endpoints
    // ========================================================================

    /// List images
    ///
    /// Filters: name, os, version, public, state, owner, type.
    #[endpoint {
        method = GET,
        path = "/{account}/images",
        tags = ["images"],
    }]
    async fn list_images(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
    ) -> Result<HttpResponseOk<Vec<Image>>, HttpError>;

    /// Get an image
    #[endpoint {
        method = GET,
        path = "/{account}/images/{image}",
        tags = ["images"],
    }]
    async fn get_image(
        rqctx: RequestContext<Self::Context>,
        path: Path<ImagePath>,
    ) -> Result<HttpResponseOk<Image>, HttpError>;

    // ========================================================================
    // Machine Endpoints
    // ========================================================================

    /// List machines
    ///
    /// Filters: name, type, state, image, memory and `tags.<name>`.
    #[endpoint {
        method = GET,
        path = "/{account}/machines",
        tags = ["machines"],
    }]
    async fn list_machines(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
    ) -> Result<HttpResponseOk<Vec<Machine>>, HttpError>;

    /// Create a machine
    #[endpoint {
        method = POST,
        path = "/{account}/machines",
        tags = ["machines"],
    }]
    async fn create_machine(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
        body: TypedBody<CreateMachineRequest>,
    ) -> Result<HttpResponseCreated<Machine>, HttpError>;

    /// Get a machine
    #[endpoint {
        method = GET,
        path = "/{account}/machines/{machine}",
        tags = ["machines"],
    }]
    async fn get_machine(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
    ) -> Result<HttpResponseOk<Machine>, HttpError>;

    /// Machine action dispatch
    ///
    /// The `action` query parameter selects start, stop, reboot, resize
    /// (with `package`), rename (with `name`), enable_firewall or
    /// disable_firewall.
    #[endpoint {
        method = POST,
        path = "/{account}/machines/{machine}",
        tags = ["machines"],
    }]
    async fn update_machine(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
        query: Query<MachineActionQuery>,
    ) -> Result<HttpResponseAccepted<()>, HttpError>;

    /// Delete a machine
    #[endpoint {
        method = DELETE,
        path = "/{account}/machines/{machine}",
        tags = ["machines"],
    }]
    async fn delete_machine(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
    ) -> Result<HttpResponseDeleted, HttpError>;

    // ========================================================================
    // Machine Metadata
    // ========================================================================

    /// Get machine metadata
    #[endpoint {
        method = GET,
        path = "/{account}/machines/{machine}/metadata",
        tags = ["machines"],
    }]
    async fn get_machine_metadata(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
    ) -> Result<HttpResponseOk<Metadata>, HttpError>;

    /// Add or replace machine metadata entries
    #[endpoint {
        method = POST,
        path = "/{account}/machines/{machine}/metadata",
        tags = ["machines"],
    }]
    async fn update_machine_metadata(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
        body: TypedBody<Metadata>,
    ) -> Result<HttpResponseOk<Metadata>, HttpError>;

    /// Delete all machine metadata
    #[endpoint {
        method = DELETE,
        path = "/{account}/machines/{machine}/metadata",
        tags = ["machines"],
    }]
    async fn delete_all_machine_metadata(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
    ) -> Result<HttpResponseDeleted, HttpError>;

    /// Delete a machine metadata key
    #[endpoint {
        method = DELETE,
        path = "/{account}/machines/{machine}/metadata/{key}",
        tags = ["machines"],
    }]
    async fn delete_machine_metadata(
        rqctx: RequestContext<Self::Context>,
        path: Path<MetadataKeyPath>,
    ) -> Result<HttpResponseDeleted, HttpError>;

    // ========================================================================
    // Machine Tags
    // ========================================================================

    /// List machine tags
    #[endpoint {
        method = GET,
        path = "/{account}/machines/{machine}/tags",
        tags = ["machines"],
    }]
    async fn list_machine_tags(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
    ) -> Result<HttpResponseOk<Tags>, HttpError>;

    /// Add machine tags
    #[endpoint {
        method = POST,
        path = "/{account}/machines/{machine}/tags",
        tags = ["machines"],
    }]
    async fn add_machine_tags(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
        body: TypedBody<Tags>,
    ) -> Result<HttpResponseOk<Tags>, HttpError>;

    /// Replace all machine tags
    #[endpoint {
        method = PUT,
        path = "/{account}/machines/{machine}/tags",
        tags = ["machines"],
    }]
    async fn replace_machine_tags(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
        body: TypedBody<Tags>,
    ) -> Result<HttpResponseOk<Tags>, HttpError>;

    /// Delete all machine tags
    #[endpoint {
        method = DELETE,
        path = "/{account}/machines/{machine}/tags",
        tags = ["machines"],
    }]
    async fn delete_machine_tags(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
    ) -> Result<HttpResponseDeleted, HttpError>;

    /// Get a machine tag value
    #[endpoint {
        method = GET,
        path = "/{account}/machines/{machine}/tags/{tag}",
        tags = ["machines"],
    }]
    async fn get_machine_tag(
        rqctx: RequestContext<Self::Context>,
        path: Path<TagPath>,
    ) -> Result<HttpResponseOk<String>, HttpError>;

    /// Delete a machine tag
    #[endpoint {
        method = DELETE,
        path = "/{account}/machines/{machine}/tags/{tag}",
        tags = ["machines"],
    }]
    async fn delete_machine_tag(
        rqctx: RequestContext<Self::Context>,
        path: Path<TagPath>,
    ) -> Result<HttpResponseDeleted, HttpError>;

    // ========================================================================
    // Machine Snapshots
    // ========================================================================

    /// List machine snapshots
    #[endpoint {
        method = GET,
        path = "/{account}/machines/{machine}/snapshots",
        tags = ["machines"],
    }]
    async fn list_machine_snapshots(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
    ) -> Result<HttpResponseOk<Vec<Snapshot>>, HttpError>;

    /// Create a machine snapshot
    #[endpoint {
        method = POST,
        path = "/{account}/machines/{machine}/snapshots",
        tags = ["machines"],
    }]
    async fn create_machine_snapshot(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
        body: TypedBody<CreateSnapshotRequest>,
    ) -> Result<HttpResponseCreated<Snapshot>, HttpError>;

    /// Get a machine snapshot
    #[endpoint {
        method = GET,
        path = "/{account}/machines/{machine}/snapshots/{name}",
        tags = ["machines"],
    }]
    async fn get_machine_snapshot(
        rqctx: RequestContext<Self::Context>,
        path: Path<SnapshotPath>,
    ) -> Result<HttpResponseOk<Snapshot>, HttpError>;

    /// Boot a machine from a snapshot
    #[endpoint {
        method = POST,
        path = "/{account}/machines/{machine}/snapshots/{name}",
        tags = ["machines"],
    }]
    async fn start_machine_from_snapshot(
        rqctx: RequestContext<Self::Context>,
        path: Path<SnapshotPath>,
    ) -> Result<HttpResponseAccepted<()>, HttpError>;

    /// Delete a machine snapshot
    #[endpoint {
        method = DELETE,
        path = "/{account}/machines/{machine}/snapshots/{name}",
        tags = ["machines"],
    }]
    async fn delete_machine_snapshot(
        rqctx: RequestContext<Self::Context>,
        path: Path<SnapshotPath>,
    ) -> Result<HttpResponseDeleted, HttpError>;

    // ========================================================================
    // Machine Firewall Rules
    // ========================================================================

    /// List firewall rules affecting a machine
    #[endpoint {
        method = GET,
        path = "/{account}/machines/{machine}/firewallrules",
        tags = ["firewall"],
    }]
    async fn list_machine_firewall_rules(
        rqctx: RequestContext<Self::Context>,
        path: Path<MachinePath>,
    ) -> Result<HttpResponseOk<Vec<FirewallRule>>, HttpError>;

    // ========================================================================
    // Firewall Rule Endpoints
    // ========================================================================

    /// List firewall rules
    #[endpoint {
        method = GET,
        path = "/{account}/fwrules",
        tags = ["firewall"],
    }]
    async fn list_firewall_rules(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
    ) -> Result<HttpResponseOk<Vec<FirewallRule>>, HttpError>;

    /// Create a firewall rule
    #[endpoint {
        method = POST,
        path = "/{account}/fwrules",
        tags = ["firewall"],
    }]
    async fn create_firewall_rule(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
        body: TypedBody<CreateFirewallRuleRequest>,
    ) -> Result<HttpResponseCreated<FirewallRule>, HttpError>;

    /// Get a firewall rule
    #[endpoint {
        method = GET,
        path = "/{account}/fwrules/{id}",
        tags = ["firewall"],
    }]
    async fn get_firewall_rule(
        rqctx: RequestContext<Self::Context>,
        path: Path<FirewallRulePath>,
    ) -> Result<HttpResponseOk<FirewallRule>, HttpError>;

    /// Update a firewall rule
    #[endpoint {
        method = POST,
        path = "/{account}/fwrules/{id}",
        tags = ["firewall"],
    }]
    async fn update_firewall_rule(
        rqctx: RequestContext<Self::Context>,
        path: Path<FirewallRulePath>,
        body: TypedBody<CreateFirewallRuleRequest>,
    ) -> Result<HttpResponseOk<FirewallRule>, HttpError>;

    /// Enable a firewall rule
    #[endpoint {
        method = POST,
        path = "/{account}/fwrules/{id}/enable",
        tags = ["firewall"],
    }]
    async fn enable_firewall_rule(
        rqctx: RequestContext<Self::Context>,
        path: Path<FirewallRulePath>,
    ) -> Result<HttpResponseOk<FirewallRule>, HttpError>;

    /// Disable a firewall rule
    #[endpoint {
        method = POST,
        path = "/{account}/fwrules/{id}/disable",
        tags = ["firewall"],
    }]
    async fn disable_firewall_rule(
        rqctx: RequestContext<Self::Context>,
        path: Path<FirewallRulePath>,
    ) -> Result<HttpResponseOk<FirewallRule>, HttpError>;

    /// Delete a firewall rule
    #[endpoint {
        method = DELETE,
        path = "/{account}/fwrules/{id}",
        tags = ["firewall"],
    }]
    async fn delete_firewall_rule(
        rqctx: RequestContext<Self::Context>,
        path: Path<FirewallRulePath>,
    ) -> Result<HttpResponseDeleted, HttpError>;

    /// List machines affected by a firewall rule
    #[endpoint {
        method = GET,
        path = "/{account}/fwrules/{id}/machines",
        tags = ["firewall"],
    }]
    async fn list_firewall_rule_machines(
        rqctx: RequestContext<Self::Context>,
        path: Path<FirewallRulePath>,
    ) -> Result<HttpResponseOk<Vec<Machine>>, HttpError>;

    // ========================================================================
    // Network Endpoints
    // ========================================================================

    /// List networks
    #[endpoint {
        method = GET,
        path = "/{account}/networks",
        tags = ["networks"],
    }]
    async fn list_networks(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
    ) -> Result<HttpResponseOk<Vec<Network>>, HttpError>;

    /// Get a network
    #[endpoint {
        method = GET,
        path = "/{account}/networks/{network}",
        tags = ["networks"],
    }]
    async fn get_network(
        rqctx: RequestContext<Self::Context>,
        path: Path<NetworkPath>,
    ) -> Result<HttpResponseOk<Network>, HttpError>;

    // ========================================================================
    // Fabric Endpoints
    // ========================================================================

    /// List fabric VLANs
    #[endpoint {
        method = GET,
        path = "/{account}/fabrics/default/vlans",
        tags = ["fabrics"],
    }]
    async fn list_fabric_vlans(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
    ) -> Result<HttpResponseOk<Vec<FabricVlan>>, HttpError>;

    /// Create a fabric VLAN
    #[endpoint {
        method = POST,
        path = "/{account}/fabrics/default/vlans",
        tags = ["fabrics"],
    }]
    async fn create_fabric_vlan(
        rqctx: RequestContext<Self::Context>,
        path: Path<AccountPath>,
        body: TypedBody<FabricVlan>,
    ) -> Result<HttpResponseCreated<FabricVlan>, HttpError>;

    /// Get a fabric VLAN
    #[endpoint {
        method = GET,
        path = "/{account}/fabrics/default/vlans/{vlan_id}",
        tags = ["fabrics"],
    }]
    async fn get_fabric_vlan(
        rqctx: RequestContext<Self::Context>,
        path: Path<FabricVlanPath>,
    ) -> Result<HttpResponseOk<FabricVlan>, HttpError>;

    /// Update a fabric VLAN
    #[endpoint {
        method = PUT,
        path = "/{account}/fabrics/default/vlans/{vlan_id}",
        tags = ["fabrics"],
    }]
    async fn update_fabric_vlan(
        rqctx: RequestContext<Self::Context>,
        path: Path<FabricVlanPath>,
        body: TypedBody<UpdateFabricVlanRequest>,
    ) -> Result<HttpResponseAccepted<FabricVlan>, HttpError>;

    /// Delete a fabric VLAN
    #[endpoint {
        method = DELETE,
        path = "/{account}/fabrics/default/vlans/{vlan_id}",
        tags = ["fabrics"],
    }]
    async fn delete_fabric_vlan(
        rqctx: RequestContext<Self::Context>,
        path: Path<FabricVlanPath>,
    ) -> Result<HttpResponseDeleted, HttpError>;

    /// List networks on a fabric VLAN
    #[endpoint {
        method = GET,
        path = "/{account}/fabrics/default/vlans/{vlan_id}/networks",
        tags = ["fabrics"],
    }]
    async fn list_fabric_networks(
        rqctx: RequestContext<Self::Context>,
        path: Path<FabricVlanPath>,
    ) -> Result<HttpResponseOk<Vec<Network>>, HttpError>;

    /// Create a network on a fabric VLAN
    #[endpoint {
        method = POST,
        path = "/{account}/fabrics/default/vlans/{vlan_id}/networks",
        tags = ["fabrics"],
    }]
    async fn create_fabric_network(
        rqctx: RequestContext<Self::Context>,
        path: Path<FabricVlanPath>,
        body: TypedBody<CreateFabricNetworkRequest>,
    ) -> Result<HttpResponseCreated<Network>, HttpError>;

    /// Get a fabric network
    #[endpoint {
        method = GET,
        path = "/{account}/fabrics/default/vlans/{vlan_id}/networks/{id}",
        tags = ["fabrics"],
    }]
    async fn get_fabric_network(
        rqctx: RequestContext<Self::Context>,
        path: Path<FabricNetworkPath>,
    ) -> Result<HttpResponseOk<Network>, HttpError>;

    /// Delete a fabric network
    #[endpoint {
        method = DELETE,
        path = "/{account}/fabrics/default/vlans/{vlan_id}/networks/{id}",
        tags = ["fabrics"],
    }]
    async fn delete_fabric_network(
        rqctx: RequestContext<Self::Context>,
        path: Path<FabricNetworkPath>,
    ) -> Result<HttpResponseDeleted, HttpError>;
}
