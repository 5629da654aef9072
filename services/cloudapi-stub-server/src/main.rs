// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Standalone stub CloudAPI server for testing and development
//!
//! Run with:
//! ```bash
//! cargo run -p cloudapi-stub-server
//! ```
//!
//! Then point a client at `http://127.0.0.1:9090` with account `my`.

use anyhow::Result;
use dropshot::{ConfigDropshot, ConfigLogging, ConfigLoggingLevel, HttpServerStarter};
use std::sync::Arc;
use tracing::info;

use cloudapi_stub_server::config::{DEFAULT_ACCOUNT, DEFAULT_BIND_ADDRESS, StubConfig};
use cloudapi_stub_server::{StubContext, api_description};

/// Default maximum request body size (bytes)
const DEFAULT_BODY_MAX_BYTES: usize = 1024 * 1024;

fn print_version() {
    let version = env!("CARGO_PKG_VERSION");
    let name = env!("CARGO_PKG_NAME");
    let buildstamp = option_env!("STAMP").unwrap_or("no-STAMP");
    println!("{} {} ({})", name, version, buildstamp);
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    #[allow(clippy::never_loop)] // Intentional: early return on first recognized arg
    for arg in &args[1..] {
        match arg.as_str() {
            "-V" | "--version" => {
                print_version();
                return Ok(());
            }
            "-h" | "--help" => {
                print_version();
                println!("Usage: {} [OPTIONS]", args[0]);
                println!();
                println!("Options:");
                println!("  -h, --help         Display this information");
                println!("  -V, --version      Display the program's version number");
                println!();
                println!("Environment variables:");
                println!(
                    "  BIND_ADDRESS       Server bind address (default: {})",
                    DEFAULT_BIND_ADDRESS
                );
                println!(
                    "  CLOUDAPI_ACCOUNT   Account name served besides `my` (default: {})",
                    DEFAULT_ACCOUNT
                );
                println!(
                    "  RUST_LOG           Log filter (default: cloudapi_stub_server=info,dropshot=info)"
                );
                return Ok(());
            }
            _ => {
                eprintln!("Unknown option: {}", arg);
                std::process::exit(1);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "cloudapi_stub_server=info,dropshot=info".to_string()),
        ))
        .init();

    print_version();

    let config = StubConfig::from_env()?;
    let context = Arc::new(StubContext::new(config.account.clone()));

    let config_dropshot = ConfigDropshot {
        bind_address: config.bind_address,
        default_request_body_max_bytes: DEFAULT_BODY_MAX_BYTES,
        default_handler_task_mode: dropshot::HandlerTaskMode::Detached,
        ..Default::default()
    };

    let log = ConfigLogging::StderrTerminal {
        level: ConfigLoggingLevel::Info,
    }
    .to_logger("cloudapi-stub-server")
    .map_err(|error| anyhow::anyhow!("failed to create logger: {}", error))?;

    let api = api_description().map_err(|e| anyhow::anyhow!(e))?;
    let server = HttpServerStarter::new(&config_dropshot, api, context, &log)
        .map_err(|error| anyhow::anyhow!("failed to create server: {}", error))?
        .start();

    info!(
        account = %config.account,
        "Stub CloudAPI listening on http://{}",
        config.bind_address
    );

    server
        .await
        .map_err(|error| anyhow::anyhow!("server failed: {}", error))
}
