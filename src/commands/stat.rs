//! @acp:module "Stat Command"
//! @acp:summary "Send one usage stat and report the outcome"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `nx-setup stat`: sends one usage event and waits for it.

use std::sync::Arc;

use anyhow::Result;
use console::style;

use crate::config::{Config, RuntimeFlags, StatsConfig};
use crate::stats::{StatEvent, StatOutcome, StatsReporter, UreqClient};

/// Options for the stat command
#[derive(Debug, Clone, Default)]
pub struct StatOptions {
    pub command: String,
    /// Defaults to the configured or crate version
    pub nx_version: Option<String>,
    pub use_cloud: bool,
    pub meta: Vec<String>,
}

/// Reporter for command handlers, honoring flags merged from the CLI
pub fn stats_reporter(config: StatsConfig, flags: RuntimeFlags) -> StatsReporter {
    StatsReporter::new(Arc::new(UreqClient::new()), config, flags)
}

/// Execute the stat command
pub async fn execute_stat(options: StatOptions, config: Config, flags: RuntimeFlags) -> Result<()> {
    let reporter = stats_reporter(config.stats, flags);
    let nx_version = options
        .nx_version
        .unwrap_or_else(|| reporter.config().reported_version().to_string());

    let event = StatEvent {
        command: options.command,
        nx_version,
        use_cloud: options.use_cloud,
        meta: options.meta,
    };

    match reporter.record_stat(event).await {
        StatOutcome::Sent => println!("{} Stat recorded", style("✓").green()),
        StatOutcome::Skipped => println!("{} Version outside reporting range, skipped", style("→").dim()),
        StatOutcome::Discarded => println!("{} Stat not delivered", style("⚠").yellow()),
        StatOutcome::Disabled => println!("{} Stats disabled in config", style("→").dim()),
    }
    Ok(())
}
