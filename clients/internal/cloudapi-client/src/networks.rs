// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

use crate::{Client, Network, Request, Result};

impl Client {
    pub async fn list_networks(&self) -> Result<Vec<Network>> {
        self.execute(Request::get(&["networks"]), "failed to get list of networks")
            .await
    }

    pub async fn get_network(&self, id: &str) -> Result<Network> {
        self.execute(
            Request::get(&["networks", id]),
            format!("failed to get network with id {id}"),
        )
        .await
    }
}
