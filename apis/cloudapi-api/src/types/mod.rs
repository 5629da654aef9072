// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! CloudAPI type definitions

pub mod common;
pub mod filter;
pub mod firewall;
pub mod image;
pub mod key;
pub mod machine;
pub mod network;
pub mod package;
pub mod snapshot;

pub use common::*;
pub use filter::*;
pub use firewall::*;
pub use image::*;
pub use key::*;
pub use machine::*;
pub use network::*;
pub use package::*;
pub use snapshot::*;
