// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Fixed catalogs the double starts with

use cloudapi_api::{FabricVlan, Image, Network, Package};

pub const PUBLIC_NETWORK_ID: &str = "123abc4d-0011-aabb-2233-ccdd4455";
pub const PRIVATE_NETWORK_ID: &str = "456def0a-33ff-7f8e-9a0b-33bb44cc";
pub const DEFAULT_VLAN_ID: u16 = 2;

fn package(name: &str, id: &str, sizes: [u64; 3], vcpus: u32, version: &str) -> Package {
    let [memory, disk, swap] = sizes;
    Package {
        id: id.to_string(),
        name: name.to_string(),
        memory,
        disk,
        swap,
        vcpus,
        default: name == "Small",
        version: Some(version.to_string()),
        group: None,
        description: None,
    }
}

pub fn packages() -> Vec<Package> {
    vec![
        package(
            "Micro",
            "12345678-aaaa-bbbb-cccc-000000000000",
            [512, 8192, 1024],
            1,
            "1.0.0",
        ),
        package(
            "Small",
            "11223344-1212-abab-3434-aabbccddeeff",
            [1024, 16384, 2048],
            1,
            "1.0.2",
        ),
        package(
            "Medium",
            "aabbccdd-abcd-abcd-abcd-112233445566",
            [2048, 32768, 4096],
            2,
            "1.0.4",
        ),
        package(
            "Large",
            "00998877-dddd-eeee-ffff-111111111111",
            [4096, 65536, 16384],
            4,
            "1.0.1",
        ),
    ]
}

struct ImageSeed {
    id: &'static str,
    name: &'static str,
    os: &'static str,
    version: &'static str,
    description: &'static str,
    published_at: &'static str,
}

impl From<ImageSeed> for Image {
    fn from(seed: ImageSeed) -> Self {
        let smartos = seed.os == "smartos";
        Image {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            os: seed.os.to_string(),
            version: seed.version.to_string(),
            image_type: if smartos { "smartmachine" } else { "virtualmachine" }.to_string(),
            description: Some(seed.description.to_string()),
            requirements: Default::default(),
            homepage: smartos.then(|| "http://test.joyent.com/Standard_Instance".to_string()),
            published_at: Some(seed.published_at.to_string()),
            public: true,
            owner: None,
            state: Some("active".to_string()),
            tags: Default::default(),
            eula: None,
            acl: Vec::new(),
        }
    }
}

pub fn images() -> Vec<Image> {
    [
        ImageSeed {
            id: "12345678-a1a1-b2b2-c3c3-098765432100",
            name: "SmartOS Std",
            os: "smartos",
            version: "13.3.1",
            description: "Test SmartOS image (32 bit)",
            published_at: "2014-01-08T17:42:31Z",
        },
        ImageSeed {
            id: "12345678-b1b1-a4a4-d8d8-111111999999",
            name: "standard32",
            os: "smartos",
            version: "13.3.1",
            description: "Test SmartOS image (64 bit)",
            published_at: "2014-01-08T17:43:16Z",
        },
        ImageSeed {
            id: "a1b2c3d4-0011-2233-4455-0f1e2d3c4b5a",
            name: "centos6.4",
            os: "linux",
            version: "2.4.1",
            description: "Test CentOS 6.4 image (64 bit)",
            published_at: "2014-01-02T10:58:31Z",
        },
        ImageSeed {
            id: "11223344-0a0a-ff99-11bb-0a1b2c3d4e5f",
            name: "ubuntu12.04",
            os: "linux",
            version: "2.3.1",
            description: "Test Ubuntu 12.04 image (64 bit)",
            published_at: "2014-01-20T16:12:31Z",
        },
        ImageSeed {
            id: "11223344-0a0a-ee88-22ab-00aa11bb22cc",
            name: "ubuntu12.10",
            os: "linux",
            version: "2.3.2",
            description: "Test Ubuntu 12.10 image (64 bit)",
            published_at: "2014-01-20T16:12:31Z",
        },
        ImageSeed {
            id: "11223344-0a0a-dd77-33cd-abcd1234e5f6",
            name: "ubuntu13.04",
            os: "linux",
            version: "2.2.8",
            description: "Test Ubuntu 13.04 image (64 bit)",
            published_at: "2014-01-20T16:12:31Z",
        },
    ]
    .into_iter()
    .map(Image::from)
    .collect()
}

pub fn networks() -> Vec<Network> {
    vec![
        Network {
            id: PUBLIC_NETWORK_ID.to_string(),
            name: "Test-Joyent-Public".to_string(),
            public: true,
            ..Default::default()
        },
        Network {
            id: PRIVATE_NETWORK_ID.to_string(),
            name: "Test-Joyent-Private".to_string(),
            public: false,
            ..Default::default()
        },
    ]
}

pub fn fabric_vlans() -> Vec<FabricVlan> {
    vec![FabricVlan {
        vlan_id: DEFAULT_VLAN_ID,
        name: "default".to_string(),
        description: None,
    }]
}
