//! @acp:module "Usage Stats"
//! @acp:summary "Best-effort, fire-and-forget usage event submission"
//! @acp:domain stats
//! @acp:layer service
//!
//! Best-effort submission of anonymous usage events. Counts how often the
//! setup flow runs in CI versus on developer machines; no personal
//! information is collected.
//!
//! Nothing here can fail from the caller's point of view: every outcome,
//! including transport errors, is folded into a [`StatOutcome`] that callers
//! are free to ignore.

pub mod client;

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;

pub use client::{HttpClient, PostOptions, UreqClient};

use crate::config::{RuntimeFlags, StatsConfig};

/// One usage event as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatEvent {
    pub command: String,
    pub nx_version: String,
    pub use_cloud: bool,
    /// Free-form tags; empty entries are dropped before sending
    pub meta: Vec<String>,
}

/// JSON body posted to the collector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatPayload {
    pub command: String,
    #[serde(rename = "isCI")]
    pub is_ci: bool,
    pub use_cloud: bool,
    pub meta: String,
}

/// What happened to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatOutcome {
    /// The collector accepted the POST
    Sent,
    /// Version outside the reporting range; nothing sent
    Skipped,
    /// The POST failed and the failure was dropped
    Discarded,
    /// Stats are turned off in config
    Disabled,
}

/// Major version of a dotted version string, if it parses
pub fn parse_major(version: &str) -> Option<u64> {
    version.split('.').next()?.trim().parse().ok()
}

/// Non-empty tags joined with ','
pub fn join_meta(meta: &[String]) -> String {
    meta.iter()
        .filter(|tag| !tag.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Sends usage events through an injected [`HttpClient`]
#[derive(Clone)]
pub struct StatsReporter {
    client: Arc<dyn HttpClient>,
    config: StatsConfig,
    flags: RuntimeFlags,
}

impl StatsReporter {
    pub fn new(client: Arc<dyn HttpClient>, config: StatsConfig, flags: RuntimeFlags) -> Self {
        Self {
            client,
            config,
            flags,
        }
    }

    /// Reporter using `ureq` and the process environment
    pub fn from_config(config: StatsConfig) -> Self {
        Self::new(Arc::new(UreqClient::new()), config, RuntimeFlags::from_env())
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    pub fn flags(&self) -> &RuntimeFlags {
        &self.flags
    }

    /// Whether `version` would be dropped by the reporting range
    pub fn is_filtered(&self, version: &str) -> bool {
        match parse_major(version) {
            Some(major) => major < self.config.min_major || major > self.config.max_major,
            None => true,
        }
    }

    /// Payload for `event`, or `None` when its version is filtered out
    pub fn payload(&self, event: &StatEvent) -> Option<StatPayload> {
        let major = parse_major(&event.nx_version);
        if self.flags.verbose_logging {
            tracing::debug!("Record stat. Major: {:?}", major);
        }
        if self.is_filtered(&event.nx_version) {
            return None;
        }
        Some(StatPayload {
            command: event.command.clone(),
            is_ci: self.flags.is_ci,
            use_cloud: event.use_cloud,
            meta: join_meta(&event.meta),
        })
    }

    /// Send `event` on the current thread.
    ///
    /// Blocks for at most the configured timeout. Errors never escape.
    pub fn record_stat_blocking(&self, event: &StatEvent) -> StatOutcome {
        if !self.config.enabled {
            return StatOutcome::Disabled;
        }
        let Some(payload) = self.payload(event) else {
            // test or placeholder version
            return StatOutcome::Skipped;
        };

        let sent = serde_json::to_value(&payload)
            .map_err(crate::error::SetupError::from)
            .and_then(|body| {
                let options = PostOptions {
                    timeout: self.config.timeout(),
                };
                self.client.post_json(&self.config.endpoint(), &body, &options)
            });

        match sent {
            Ok(()) => StatOutcome::Sent,
            Err(e) => {
                if self.flags.verbose_logging {
                    tracing::warn!("Failed to record stat: {}", e);
                }
                StatOutcome::Discarded
            }
        }
    }

    /// Send `event` on tokio's blocking pool and wait for it.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn record_stat(&self, event: StatEvent) -> StatOutcome {
        match self.spawn_record_stat(event).await {
            Ok(outcome) => outcome,
            Err(e) => {
                if self.flags.verbose_logging {
                    tracing::warn!("Stat task did not complete: {}", e);
                }
                StatOutcome::Discarded
            }
        }
    }

    /// Start sending `event` in the background and return immediately.
    ///
    /// The handle may be dropped; the request still runs to completion or
    /// timeout.
    pub fn spawn_record_stat(&self, event: StatEvent) -> JoinHandle<StatOutcome> {
        let reporter = self.clone();
        tokio::task::spawn_blocking(move || reporter.record_stat_blocking(&event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_major() {
        assert_eq!(parse_major("14.2.0"), Some(14));
        assert_eq!(parse_major("9"), Some(9));
        assert_eq!(parse_major("0.0.0-pr.1"), Some(0));
        assert_eq!(parse_major("latest"), None);
        assert_eq!(parse_major(""), None);
    }

    #[test]
    fn test_join_meta_drops_empty() {
        let meta = vec!["a".to_string(), String::new(), "b".to_string()];
        assert_eq!(join_meta(&meta), "a,b");
        assert_eq!(join_meta(&[String::new()]), "");
    }

    #[test]
    fn test_payload_serializes_wire_names() {
        let payload = StatPayload {
            command: "create-nx-workspace".to_string(),
            is_ci: true,
            use_cloud: false,
            meta: "set-up-ci".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "command": "create-nx-workspace",
                "isCI": true,
                "useCloud": false,
                "meta": "set-up-ci",
            })
        );
    }
}
