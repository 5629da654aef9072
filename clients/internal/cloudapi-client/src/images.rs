// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

use crate::{Client, Filter, Image, Request, Result};

impl Client {
    pub async fn list_images(&self, filter: Option<&Filter>) -> Result<Vec<Image>> {
        self.execute(
            Request::get(&["images"]).filter(filter),
            "failed to get list of images",
        )
        .await
    }

    pub async fn get_image(&self, id: &str) -> Result<Image> {
        self.execute(
            Request::get(&["images", id]),
            format!("failed to get image with id: {id}"),
        )
        .await
    }
}
