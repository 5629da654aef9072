// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

use crate::{CREATED, Client, CreateKeyRequest, Key, Request, Result};

impl Client {
    pub async fn list_keys(&self) -> Result<Vec<Key>> {
        self.execute(Request::get(&["keys"]), "failed to get list of keys")
            .await
    }

    /// Get a key by name or fingerprint
    pub async fn get_key(&self, name: &str) -> Result<Key> {
        self.execute(
            Request::get(&["keys", name]),
            format!("failed to get key with name: {name}"),
        )
        .await
    }

    pub async fn create_key(&self, opts: &CreateKeyRequest) -> Result<Key> {
        let context = format!(
            "failed to create key with name: {}",
            opts.name.as_deref().unwrap_or("")
        );
        let request = Request::post(&["keys"])
            .expect(CREATED)
            .json(opts)
            .map_err(|e| crate::Error::new(&context, e))?;
        self.execute(request, context).await
    }

    pub async fn delete_key(&self, name: &str) -> Result<()> {
        self.execute_empty(
            Request::delete(&["keys", name]),
            format!("failed to delete key with name: {name}"),
        )
        .await
    }
}
