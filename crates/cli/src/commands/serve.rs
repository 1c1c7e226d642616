//! `serve` command implementation.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use api::{create_router, AppState};
use contracts::ServiceSettings;

use crate::cli::ServeArgs;

/// Execute the `serve` command
pub async fn run_serve(args: &ServeArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    let mut settings = super::load_settings(&args.config)?;

    // Apply CLI / env overrides, then re-check the result
    apply_overrides(&mut settings, args);
    config_loader::ConfigLoader::validate(&settings)
        .context("Configuration invalid after applying overrides")?;

    info!(
        host = %settings.server.host,
        port = settings.server.port,
        workers = settings.dispatch.workers,
        queue_capacity = settings.dispatch.queue_capacity,
        retry_delay_ms = settings.dispatch.retry_delay_ms,
        backends = settings.backends.len(),
        "Configuration loaded"
    );

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let notifier = Arc::new(
        dispatcher::create_notifier(&settings.dispatch, &settings.backends)
            .context("Failed to create notifier")?,
    );
    notifier.start(settings.dispatch.workers);

    let listener = tokio::net::TcpListener::bind((settings.server.host.as_str(), settings.server.port))
        .await
        .with_context(|| {
            format!(
                "Failed to bind {}:{}",
                settings.server.host, settings.server.port
            )
        })?;
    let addr = listener.local_addr().context("Failed to read listen address")?;

    let app = create_router(AppState::new(Arc::clone(&notifier)));

    info!(%addr, channels = ?notifier.channel_names(), "Notifier service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    warn!(pending = notifier.queue_len(), "Server stopped, draining queued notifications");
    notifier.shutdown().await;

    let stats = notifier.metrics();
    info!(
        submitted = stats.submitted_count,
        delivered = stats.delivered_count,
        backend_not_found = stats.not_found_count,
        retry_exhausted = stats.exhausted_count,
        "Notifier finished"
    );
    Ok(())
}

/// Overlay CLI flags (and their env fallbacks) on file settings
fn apply_overrides(settings: &mut ServiceSettings, args: &ServeArgs) {
    if let Some(ref host) = args.host {
        info!(host = %host, "Overriding listen host from CLI");
        settings.server.host = host.clone();
    }
    if let Some(port) = args.port {
        info!(port, "Overriding listen port from CLI");
        settings.server.port = port;
    }
    if let Some(workers) = args.workers {
        info!(workers, "Overriding worker count from CLI");
        settings.dispatch.workers = workers;
    }
    if let Some(retry_delay_ms) = args.retry_delay_ms {
        info!(retry_delay_ms, "Overriding retry delay from CLI");
        settings.dispatch.retry_delay_ms = retry_delay_ms;
    }
    if let Some(ref url) = args.slack_webhook_url {
        info!("Overriding Slack webhook URL from CLI");
        settings.override_slack_webhook(url);
    }
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
