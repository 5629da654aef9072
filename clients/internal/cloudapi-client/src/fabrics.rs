// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Fabric VLANs and fabric networks on the account's `default` fabric

use crate::{
    ACCEPTED, CREATED, Client, CreateFabricNetworkRequest, Error, FabricVlan, Network, Request,
    Result, UpdateFabricVlanRequest, check_vlan_id,
};

const FABRIC: [&str; 3] = ["fabrics", "default", "vlans"];

fn vlan_segments(vlan_id: u16, rest: &[&str]) -> Vec<String> {
    FABRIC
        .iter()
        .map(|s| s.to_string())
        .chain(std::iter::once(vlan_id.to_string()))
        .chain(rest.iter().map(|s| s.to_string()))
        .collect()
}

impl Client {
    pub async fn list_fabric_vlans(&self) -> Result<Vec<FabricVlan>> {
        self.execute(Request::get(&FABRIC), "failed to get list of fabric VLANs")
            .await
    }

    pub async fn get_fabric_vlan(&self, vlan_id: u16) -> Result<FabricVlan> {
        let context = format!("failed to get fabric VLAN with id {vlan_id}");
        check_vlan_id(vlan_id, &context)?;
        self.execute(Request::get(&vlan_segments(vlan_id, &[])), context)
            .await
    }

    pub async fn create_fabric_vlan(&self, vlan: &FabricVlan) -> Result<FabricVlan> {
        let context = format!("failed to create fabric VLAN {}", vlan.vlan_id);
        check_vlan_id(vlan.vlan_id, &context)?;
        let request = Request::post(&FABRIC)
            .expect(CREATED)
            .json(vlan)
            .map_err(|e| Error::new(&context, e))?;
        self.execute(request, context).await
    }

    /// Replace the name and description of an existing VLAN
    pub async fn update_fabric_vlan(&self, vlan: &FabricVlan) -> Result<FabricVlan> {
        let context = format!("failed to update fabric VLAN {}", vlan.vlan_id);
        check_vlan_id(vlan.vlan_id, &context)?;
        let body = UpdateFabricVlanRequest {
            name: Some(vlan.name.clone()),
            description: vlan.description.clone(),
        };
        let request = Request::put(&vlan_segments(vlan.vlan_id, &[]))
            .expect(ACCEPTED)
            .json(&body)
            .map_err(|e| Error::new(&context, e))?;
        self.execute(request, context).await
    }

    pub async fn delete_fabric_vlan(&self, vlan_id: u16) -> Result<()> {
        let context = format!("failed to delete fabric VLAN with id {vlan_id}");
        check_vlan_id(vlan_id, &context)?;
        self.execute_empty(Request::delete(&vlan_segments(vlan_id, &[])), context)
            .await
    }

    pub async fn list_fabric_networks(&self, vlan_id: u16) -> Result<Vec<Network>> {
        let context = format!("failed to get list of fabric networks on VLAN {vlan_id}");
        check_vlan_id(vlan_id, &context)?;
        self.execute(Request::get(&vlan_segments(vlan_id, &["networks"])), context)
            .await
    }

    pub async fn get_fabric_network(&self, vlan_id: u16, id: &str) -> Result<Network> {
        let context = format!("failed to get fabric network {id} on VLAN {vlan_id}");
        check_vlan_id(vlan_id, &context)?;
        self.execute(
            Request::get(&vlan_segments(vlan_id, &["networks", id])),
            context,
        )
        .await
    }

    pub async fn create_fabric_network(
        &self,
        vlan_id: u16,
        opts: &CreateFabricNetworkRequest,
    ) -> Result<Network> {
        let context = format!(
            "failed to create fabric network {} on VLAN {vlan_id}",
            opts.name
        );
        check_vlan_id(vlan_id, &context)?;
        let request = Request::post(&vlan_segments(vlan_id, &["networks"]))
            .expect(CREATED)
            .json(opts)
            .map_err(|e| Error::new(&context, e))?;
        self.execute(request, context).await
    }

    pub async fn delete_fabric_network(&self, vlan_id: u16, id: &str) -> Result<()> {
        let context = format!("failed to delete fabric network {id} on VLAN {vlan_id}");
        check_vlan_id(vlan_id, &context)?;
        self.execute_empty(
            Request::delete(&vlan_segments(vlan_id, &["networks", id])),
            context,
        )
        .await
    }
}
