// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

use crate::{Client, Filter, Package, Request, Result};

impl Client {
    pub async fn list_packages(&self, filter: Option<&Filter>) -> Result<Vec<Package>> {
        self.execute(
            Request::get(&["packages"]).filter(filter),
            "failed to get list of packages",
        )
        .await
    }

    /// Get a package by name or id
    pub async fn get_package(&self, name_or_id: &str) -> Result<Package> {
        self.execute(
            Request::get(&["packages", name_or_id]),
            format!("failed to get package with name: {name_or_id}"),
        )
        .await
    }
}
