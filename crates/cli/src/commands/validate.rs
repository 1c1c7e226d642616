//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

use contracts::ServiceSettings;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    listen: String,
    workers: usize,
    queue_capacity: usize,
    retry_delay_ms: u64,
    backend_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    match super::load_settings(&args.config) {
        Ok(settings) => {
            let warnings = collect_warnings(&settings);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", settings.version),
                    listen: format!("{}:{}", settings.server.host, settings.server.port),
                    workers: settings.dispatch.workers,
                    queue_capacity: settings.dispatch.queue_capacity,
                    retry_delay_ms: settings.dispatch.retry_delay_ms,
                    backend_count: settings.backends.len(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("{:#}", e)),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(settings: &ServiceSettings) -> Vec<String> {
    let mut warnings = Vec::new();

    if settings.backends.is_empty() {
        warnings.push("No backends configured - every notification will be dropped".to_string());
    }

    // Only the first backend with a given name gets registered
    let mut seen = HashSet::new();
    for backend in &settings.backends {
        if !seen.insert(backend.name.as_str()) {
            warnings.push(format!(
                "Duplicate backend name '{}' - only the first definition is used",
                backend.name
            ));
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Listen: {}", summary.listen);
            println!("  Workers: {}", summary.workers);
            println!("  Queue capacity: {}", summary.queue_capacity);
            println!("  Retry delay: {} ms", summary.retry_delay_ms);
            println!("  Backends: {}", summary.backend_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
