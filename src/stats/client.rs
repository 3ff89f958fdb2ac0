//! @acp:module "HTTP Client"
//! @acp:summary "Capability trait for the stats POST and its ureq implementation"
//! @acp:domain stats
//! @acp:layer service
//!
//! Capability trait for the one outbound call the stats reporter makes,
//! and its `ureq` implementation.

use std::time::Duration;

use crate::error::{Result, SetupError};

/// Per-request options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostOptions {
    pub timeout: Duration,
}

/// Minimal HTTP surface used by stats submission
pub trait HttpClient: Send + Sync {
    /// POST `body` as JSON. Any non-2xx response is an error; the response
    /// body is not read.
    fn post_json(&self, url: &str, body: &serde_json::Value, options: &PostOptions) -> Result<()>;
}

/// Blocking client backed by a shared `ureq` agent
#[derive(Debug, Clone)]
pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for UreqClient {
    fn post_json(&self, url: &str, body: &serde_json::Value, options: &PostOptions) -> Result<()> {
        match self
            .agent
            .post(url)
            .timeout(options.timeout)
            .set("User-Agent", concat!("nx-setup/", env!("CARGO_PKG_VERSION")))
            .send_json(body)
        {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(code, _)) => {
                Err(SetupError::Http(format!("{} returned status {}", url, code)))
            }
            Err(ureq::Error::Transport(transport)) => Err(SetupError::Http(transport.to_string())),
        }
    }
}
