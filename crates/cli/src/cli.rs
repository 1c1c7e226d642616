//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Notifier - asynchronous multi-channel notification dispatcher
#[derive(Parser, Debug)]
#[command(
    name = "notifier",
    author,
    version,
    about = "Asynchronous multi-channel notification dispatcher",
    long_about = "Accepts notifications over HTTP and delivers them to named backends.\n\n\
                  Submissions are buffered in a bounded queue and drained by a pool of \n\
                  workers that retry failed deliveries with a fixed delay."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "NOTIFIER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "NOTIFIER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service and the delivery workers
    Serve(ServeArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `serve` command
#[derive(Parser, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "notifier.toml",
        env = "NOTIFIER_CONFIG"
    )]
    pub config: PathBuf,

    /// Override listen address from configuration
    #[arg(long, env = "NOTIFIER_HOST")]
    pub host: Option<String>,

    /// Override listen port from configuration
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Override number of delivery workers
    #[arg(long, env = "NOTIFIER_WORKERS")]
    pub workers: Option<usize>,

    /// Override delay between delivery attempts, in milliseconds
    #[arg(long, env = "RETRY_DELAY_MS")]
    pub retry_delay_ms: Option<u64>,

    /// Override the webhook URL of every Slack backend
    #[arg(long, env = "SLACK_WEBHOOK_URL")]
    pub slack_webhook_url: Option<String>,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "NOTIFIER_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "notifier.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "notifier.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show backend parameters
    #[arg(long)]
    pub params: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from([
            "notifier",
            "serve",
            "--config",
            "custom.toml",
            "--port",
            "9090",
            "--workers",
            "2",
            "--retry-delay-ms",
            "250",
        ]);

        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.config, PathBuf::from("custom.toml"));
                assert_eq!(args.port, Some(9090));
                assert_eq!(args.workers, Some(2));
                assert_eq!(args.retry_delay_ms, Some(250));
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["notifier", "-vv", "--log-format", "json", "validate"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.log_format, LogFormat::Json));
        assert!(matches!(cli.command, Commands::Validate(_)));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["notifier", "-q", "-v", "info"]);
        assert!(result.is_err());
    }
}
