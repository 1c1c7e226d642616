//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use contracts::ServiceSettings;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    server: ServerInfo,
    dispatch: DispatchInfo,
    backends: Vec<BackendInfo>,
}

#[derive(Serialize)]
struct ServerInfo {
    host: String,
    port: u16,
}

#[derive(Serialize)]
struct DispatchInfo {
    workers: usize,
    queue_capacity: usize,
    retry_delay_ms: u64,
    max_attempts: u32,
}

#[derive(Serialize)]
struct BackendInfo {
    name: String,
    backend_type: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    params: BTreeMap<String, String>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    let settings = super::load_settings(&args.config)?;

    if args.json {
        let info = build_config_info(&settings, args);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&settings, args);
    }

    Ok(())
}

fn build_config_info(settings: &ServiceSettings, args: &InfoArgs) -> ConfigInfo {
    let backends = settings
        .backends
        .iter()
        .map(|b| BackendInfo {
            name: b.name.clone(),
            backend_type: format!("{:?}", b.backend_type),
            params: if args.params {
                b.params.clone().into_iter().collect()
            } else {
                BTreeMap::new()
            },
        })
        .collect();

    ConfigInfo {
        version: format!("{:?}", settings.version),
        server: ServerInfo {
            host: settings.server.host.clone(),
            port: settings.server.port,
        },
        dispatch: DispatchInfo {
            workers: settings.dispatch.workers,
            queue_capacity: settings.dispatch.queue_capacity,
            retry_delay_ms: settings.dispatch.retry_delay_ms,
            max_attempts: dispatcher::MAX_ATTEMPTS,
        },
        backends,
    }
}

fn print_config_info(settings: &ServiceSettings, args: &InfoArgs) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Notifier Configuration                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("🌐 Server");
    println!("   ├─ Version: {:?}", settings.version);
    println!(
        "   └─ Listen: {}:{}",
        settings.server.host, settings.server.port
    );

    let dispatch = &settings.dispatch;
    println!("\n⚙️  Dispatch");
    println!("   ├─ Workers: {}", dispatch.workers);
    println!("   ├─ Queue Capacity: {}", dispatch.queue_capacity);
    println!(
        "   └─ Retry: {} attempts, {} ms apart",
        dispatcher::MAX_ATTEMPTS,
        dispatch.retry_delay_ms
    );

    println!("\n📨 Backends ({})", settings.backends.len());
    for (i, backend) in settings.backends.iter().enumerate() {
        let is_last = i == settings.backends.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let child_prefix = if is_last { "   " } else { "│  " };

        println!("   {} {} ({:?})", prefix, backend.name, backend.backend_type);

        if args.params {
            let params: BTreeMap<_, _> = backend.params.iter().collect();
            for (key, value) in params {
                println!("   {}  • {} = {}", child_prefix, key, value);
            }
        }
    }

    println!();
}
