// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! End-to-end tests: cloudapi-client against the stub server
//!
//! Each test starts its own stub on an ephemeral port and drives it with an
//! unsigned `cloudapi_client::Client`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use cloudapi_client::{
    Client, CreateFabricNetworkRequest, CreateFirewallRuleRequest, CreateKeyRequest,
    CreateMachineRequest, CreateSnapshotRequest, FabricVlan, Filter, MachineState, Metadata,
    HttpTransport, RequestError, Tags,
};
use cloudapi_client::config::DEFAULT_USER_AGENT;
use cloudapi_stub_server::{Call, ServiceError, StubContext, api_description, seed};
use dropshot::HttpServer;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

const SMALL_ID: &str = "11223344-1212-abab-3434-aabbccddeeff";
const SMARTOS_ID: &str = "12345678-a1a1-b2b2-c3c3-098765432100";

struct Stub {
    server: HttpServer<Arc<StubContext>>,
    client: Client,
}

async fn start_stub() -> Stub {
    let context = Arc::new(StubContext::new("tester"));
    let api = api_description().expect("api description");

    let config = dropshot::ConfigDropshot {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        default_request_body_max_bytes: 1024 * 1024,
        default_handler_task_mode: dropshot::HandlerTaskMode::Detached,
        ..Default::default()
    };

    let log = dropshot::ConfigLogging::StderrTerminal {
        level: dropshot::ConfigLoggingLevel::Warn,
    }
    .to_logger("cloudapi-stub-test")
    .expect("logger");

    let server = dropshot::HttpServerStarter::new(&config, api, context, &log)
        .expect("stub server")
        .start();

    let client = Client::new(&format!("http://{}", server.local_addr())).expect("client");
    Stub { server, client }
}

async fn create_small(client: &Client, name: &str) -> cloudapi_client::Machine {
    client
        .create_machine(&CreateMachineRequest::new("Small", SMARTOS_ID).with_name(name))
        .await
        .expect("create machine")
}

// ============================================================================
// Keys
// ============================================================================

#[tokio::test]
async fn keys_lifecycle() {
    let stub = start_stub().await;
    let client = &stub.client;

    assert!(client.list_keys().await.unwrap().is_empty());

    let opts = CreateKeyRequest {
        name: Some("fake-key".to_string()),
        key: "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIBfP test@cloudapi".to_string(),
    };
    let key = client.create_key(&opts).await.unwrap();
    assert_eq!(key.name, "fake-key");
    assert_eq!(client.get_key("fake-key").await.unwrap(), key);
    assert_eq!(client.list_keys().await.unwrap(), vec![key.clone()]);

    let err = client.create_key(&opts).await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(409));

    let same_value = CreateKeyRequest {
        name: Some("other".to_string()),
        ..opts.clone()
    };
    assert!(client.create_key(&same_value).await.is_err());

    client.delete_key("fake-key").await.unwrap();
    let err = client.get_key("fake-key").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.api_error().unwrap().message, "Key fake-key not found");
}

// ============================================================================
// Packages and images
// ============================================================================

#[tokio::test]
async fn packages_filter_and_lookup() {
    let stub = start_stub().await;
    let client = &stub.client;

    assert_eq!(client.list_packages(None).await.unwrap().len(), 4);

    let filter = Filter::new().with("memory", "1024");
    let packages = client.list_packages(Some(&filter)).await.unwrap();
    assert_eq!(packages.len(), 1);
    let small = &packages[0];
    assert_eq!(small.name, "Small");
    assert_eq!(small.id, SMALL_ID);
    assert_eq!((small.memory, small.disk, small.swap, small.vcpus), (1024, 16384, 2048, 1));
    assert_eq!(small.version.as_deref(), Some("1.0.2"));

    let by_name = client.get_package("Small").await.unwrap();
    let by_id = client.get_package(SMALL_ID).await.unwrap();
    assert_eq!(by_name, by_id);

    assert!(client.get_package("Huge").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn images_filter_and_lookup() {
    let stub = start_stub().await;
    let client = &stub.client;

    let filter = Filter::new().with("os", "linux").with("version", "2.3.2");
    let images = client.list_images(Some(&filter)).await.unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].name, "ubuntu12.10");

    let image = client.get_image(SMARTOS_ID).await.unwrap();
    assert_eq!(image.name, "SmartOS Std");
    assert_eq!(image.image_type, "smartmachine");
    assert!(client.get_image("nope").await.unwrap_err().is_not_found());
}

// ============================================================================
// Machines
// ============================================================================

#[tokio::test]
async fn machine_lifecycle() {
    let stub = start_stub().await;
    let client = &stub.client;

    let machine = create_small(client, "test-machine").await;
    assert_eq!(machine.state, MachineState::Running);
    assert_eq!(machine.memory, 1024);
    assert_eq!(machine.disk, 16384);
    assert_eq!(machine.ips.len(), 2);
    assert!(machine.ips[0].starts_with("32.151."));
    assert!(machine.ips[1].starts_with("10.201."));
    assert_eq!(machine.primary_ip.as_deref(), Some(machine.ips[0].as_str()));
    assert_eq!(client.get_machine(&machine.id).await.unwrap(), machine);

    let err = client.delete_machine(&machine.id).await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(409));
    assert_eq!(
        err.api_error().unwrap().message,
        format!("Cannot Delete machine {}, machine is not stopped.", machine.id)
    );

    client.stop_machine(&machine.id).await.unwrap();
    assert_eq!(
        client.get_machine(&machine.id).await.unwrap().state,
        MachineState::Stopped
    );
    client.start_machine(&machine.id).await.unwrap();
    client.reboot_machine(&machine.id).await.unwrap();
    assert_eq!(
        client.get_machine(&machine.id).await.unwrap().state,
        MachineState::Running
    );

    client.resize_machine(&machine.id, "Medium").await.unwrap();
    client.rename_machine(&machine.id, "renamed machine").await.unwrap();
    let updated = client.get_machine(&machine.id).await.unwrap();
    assert_eq!(updated.memory, 2048);
    assert_eq!(updated.package, "Medium");
    assert_eq!(updated.name, "renamed machine");

    client.stop_machine(&machine.id).await.unwrap();
    client.delete_machine(&machine.id).await.unwrap();
    assert!(client.list_machines(None).await.unwrap().is_empty());
    assert!(client.get_machine(&machine.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn machine_list_filters() {
    let stub = start_stub().await;
    let client = &stub.client;

    let a = create_small(client, "a").await;
    let b = create_small(client, "b").await;
    client
        .create_machine(&CreateMachineRequest::new("Large", SMARTOS_ID).with_tag("group", "web"))
        .await
        .unwrap();
    client.stop_machine(&b.id).await.unwrap();

    let filter = Filter::new().with("memory", "1024").with("state", "running");
    let machines = client.list_machines(Some(&filter)).await.unwrap();
    assert_eq!(machines.len(), 1);
    assert_eq!(machines[0].id, a.id);

    let filter = Filter::new().with("tags.group", "web");
    let machines = client.list_machines(Some(&filter)).await.unwrap();
    assert_eq!(machines.len(), 1);
    assert_eq!(machines[0].memory, 4096);
}

#[tokio::test]
async fn machine_with_unknown_network_is_rejected() {
    let stub = start_stub().await;
    let client = &stub.client;

    let opts = CreateMachineRequest::new("Small", SMARTOS_ID)
        .with_network(seed::PUBLIC_NETWORK_ID)
        .with_network("no-such-network");
    let err = client.create_machine(&opts).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(client.list_machines(None).await.unwrap().is_empty());

    let opts = CreateMachineRequest::new("Small", SMARTOS_ID)
        .with_network(seed::PUBLIC_NETWORK_ID)
        .with_network(seed::PRIVATE_NETWORK_ID);
    let machine = client.create_machine(&opts).await.unwrap();
    assert_eq!(
        machine.networks,
        vec![seed::PUBLIC_NETWORK_ID, seed::PRIVATE_NETWORK_ID]
    );
}

#[tokio::test]
async fn machine_metadata_and_tags() {
    let stub = start_stub().await;
    let client = &stub.client;

    let machine = client
        .create_machine(
            &CreateMachineRequest::new("Small", SMARTOS_ID)
                .with_metadata("user-script", "echo hello")
                .with_tag("env", "test"),
        )
        .await
        .unwrap();
    let id = machine.id.as_str();
    assert_eq!(
        machine.metadata.get("user-script").map(String::as_str),
        Some("echo hello")
    );

    let extra = Metadata::from([("owner".to_string(), "ops".to_string())]);
    let merged = client.update_machine_metadata(id, &extra).await.unwrap();
    assert_eq!(merged.len(), 2);
    assert_eq!(client.get_machine_metadata(id).await.unwrap(), merged);

    client.delete_machine_metadata(id, "owner").await.unwrap();
    assert!(client
        .delete_machine_metadata(id, "owner")
        .await
        .unwrap_err()
        .is_not_found());
    client.delete_all_machine_metadata(id).await.unwrap();
    assert!(client.get_machine_metadata(id).await.unwrap().is_empty());

    assert_eq!(client.get_machine_tag(id, "env").await.unwrap(), "test");
    let more = Tags::from([("tier".to_string(), "db".to_string())]);
    assert_eq!(client.add_machine_tags(id, &more).await.unwrap().len(), 2);
    let replaced = client.replace_machine_tags(id, &more).await.unwrap();
    assert_eq!(replaced, more);
    assert_eq!(client.list_machine_tags(id).await.unwrap(), more);
    client.delete_machine_tag(id, "tier").await.unwrap();
    assert!(client.get_machine_tag(id, "tier").await.unwrap_err().is_not_found());
    client.add_machine_tags(id, &more).await.unwrap();
    client.delete_machine_tags(id).await.unwrap();
    assert!(client.list_machine_tags(id).await.unwrap().is_empty());
}

#[tokio::test]
async fn machine_snapshots() {
    let stub = start_stub().await;
    let client = &stub.client;

    let machine = create_small(client, "snappy").await;
    let id = machine.id.as_str();

    let opts = CreateSnapshotRequest {
        name: Some("before-upgrade".to_string()),
    };
    let snapshot = client.create_machine_snapshot(id, &opts).await.unwrap();
    assert_eq!(snapshot.name, "before-upgrade");
    assert!(client.create_machine_snapshot(id, &opts).await.is_err());
    assert_eq!(
        client.get_machine_snapshot(id, "before-upgrade").await.unwrap(),
        snapshot
    );
    assert_eq!(client.list_machine_snapshots(id).await.unwrap().len(), 1);

    client.stop_machine(id).await.unwrap();
    client
        .start_machine_from_snapshot(id, "before-upgrade")
        .await
        .unwrap();
    assert_eq!(
        client.get_machine(id).await.unwrap().state,
        MachineState::Running
    );

    client.delete_machine_snapshot(id, "before-upgrade").await.unwrap();
    assert!(client
        .get_machine_snapshot(id, "before-upgrade")
        .await
        .unwrap_err()
        .is_not_found());
}

// ============================================================================
// Firewall
// ============================================================================

#[tokio::test]
async fn firewall_rules() {
    let stub = start_stub().await;
    let client = &stub.client;

    let machine = create_small(client, "guarded").await;
    let opts = CreateFirewallRuleRequest {
        enabled: false,
        rule: format!("FROM any TO vm {} ALLOW tcp PORT 80", machine.id),
    };
    let rule = client.create_firewall_rule(&opts).await.unwrap();
    assert!(!rule.enabled);
    assert_eq!(rule.rule, opts.rule);
    assert_eq!(client.get_firewall_rule(&rule.id).await.unwrap(), rule);

    client.enable_firewall_rule(&rule.id).await.unwrap();
    assert!(client.get_firewall_rule(&rule.id).await.unwrap().enabled);
    client.disable_firewall_rule(&rule.id).await.unwrap();
    assert!(!client.get_firewall_rule(&rule.id).await.unwrap().enabled);

    let machines = client.list_firewall_rule_machines(&rule.id).await.unwrap();
    assert_eq!(machines.len(), 1);
    assert_eq!(machines[0].id, machine.id);
    assert_eq!(
        client.list_machine_firewall_rules(&machine.id).await.unwrap(),
        vec![rule.clone()]
    );

    let update = CreateFirewallRuleRequest {
        enabled: true,
        rule: "FROM any TO all vms ALLOW tcp PORT 443".to_string(),
    };
    let updated = client.update_firewall_rule(&rule.id, &update).await.unwrap();
    assert!(updated.enabled);
    assert_eq!(client.list_firewall_rules().await.unwrap(), vec![updated]);

    client.delete_firewall_rule(&rule.id).await.unwrap();
    assert!(client.get_firewall_rule(&rule.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn machine_firewall_toggle() {
    let stub = start_stub().await;
    let client = &stub.client;

    let machine = create_small(client, "walled").await;
    assert!(!machine.firewall_enabled);
    client.enable_machine_firewall(&machine.id).await.unwrap();
    assert!(client.get_machine(&machine.id).await.unwrap().firewall_enabled);
    client.disable_machine_firewall(&machine.id).await.unwrap();
    assert!(!client.get_machine(&machine.id).await.unwrap().firewall_enabled);
}

// ============================================================================
// Networks and fabrics
// ============================================================================

#[tokio::test]
async fn networks() {
    let stub = start_stub().await;
    let client = &stub.client;

    let networks = client.list_networks().await.unwrap();
    assert_eq!(networks, seed::networks());

    let public = client.get_network(seed::PUBLIC_NETWORK_ID).await.unwrap();
    assert_eq!(public, networks[0]);
    assert!(client.get_network("missing").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn fabrics() {
    let stub = start_stub().await;
    let client = &stub.client;

    let vlans = client.list_fabric_vlans().await.unwrap();
    assert_eq!(vlans.len(), 1);
    assert_eq!(vlans[0].name, "default");

    let vlan = FabricVlan {
        vlan_id: 42,
        name: "backend".to_string(),
        description: Some("app tier".to_string()),
    };
    assert_eq!(client.create_fabric_vlan(&vlan).await.unwrap(), vlan);
    assert_eq!(client.get_fabric_vlan(42).await.unwrap(), vlan);

    let renamed = FabricVlan {
        name: "backend-2".to_string(),
        ..vlan.clone()
    };
    assert_eq!(client.update_fabric_vlan(&renamed).await.unwrap(), renamed);

    let opts = CreateFabricNetworkRequest {
        name: "backend-net".to_string(),
        subnet: "10.50.0.0/24".to_string(),
        provision_start_ip: "10.50.0.10".to_string(),
        provision_end_ip: "10.50.0.200".to_string(),
        gateway: Some("10.50.0.1".to_string()),
        resolvers: vec!["8.8.8.8".to_string()],
        ..Default::default()
    };
    let network = client.create_fabric_network(42, &opts).await.unwrap();
    assert!(network.fabric);
    assert_eq!(network.vlan_id, Some(42));
    assert_eq!(client.get_fabric_network(42, &network.id).await.unwrap(), network);
    assert_eq!(client.list_fabric_networks(42).await.unwrap(), vec![network.clone()]);
    assert_eq!(client.get_network(&network.id).await.unwrap(), network);

    assert!(client.delete_fabric_vlan(42).await.is_err());
    client.delete_fabric_network(42, &network.id).await.unwrap();
    client.delete_fabric_vlan(42).await.unwrap();
    assert!(client.get_fabric_vlan(42).await.unwrap_err().is_not_found());
}

// ============================================================================
// Hook and account handling
// ============================================================================

#[tokio::test]
async fn hook_injects_failures() {
    let stub = start_stub().await;
    let client = &stub.client;

    let calls = Arc::new(Mutex::new(Vec::<Call>::new()));
    let seen = Arc::clone(&calls);
    stub.server
        .app_private()
        .double()
        .await
        .set_hook(Arc::new(move |call: &Call| {
            seen.lock().unwrap().push(call.clone());
            if call.operation == "list_networks" {
                return Err(ServiceError::Injected("network service down".to_string()));
            }
            Ok(())
        }));

    let err = client.list_networks().await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(503));
    assert_eq!(err.api_error().unwrap().message, "network service down");
    assert!(matches!(&err.source, RequestError::UnexpectedStatus { .. }));

    client.get_network(seed::PUBLIC_NETWORK_ID).await.unwrap();
    let ops: Vec<_> = calls.lock().unwrap().iter().map(|c| c.operation).collect();
    assert_eq!(ops, vec!["list_networks", "get_network"]);

    stub.server.app_private().double().await.clear_hook();
    assert_eq!(client.list_networks().await.unwrap().len(), 2);
}

fn client_for(stub: &Stub, account: &str) -> Client {
    let base_url = format!("http://{}", stub.server.local_addr());
    let transport = HttpTransport::new(&base_url, DEFAULT_USER_AGENT).unwrap();
    Client::with_transport(account, Arc::new(transport))
}

#[tokio::test]
async fn unknown_account_is_not_found() {
    let stub = start_stub().await;

    let other = client_for(&stub, "someone-else");
    assert!(other.list_keys().await.unwrap_err().is_not_found());

    let named = client_for(&stub, "tester");
    assert!(named.list_keys().await.unwrap().is_empty());
}
