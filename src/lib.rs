#![forbid(unsafe_code)]

//! @acp:module "nxprompts Library"
//! @acp:summary "A/B prompt variants with stable per-run selection and best-effort usage stats"
//! @acp:domain cli
//! @acp:layer api
//!
//! # nxprompts
//!
//! A/B prompt variants for an interactive workspace setup flow.
//!
//! ## Features
//!
//! - **Stable selection**: one variant per prompt key, picked on first
//!   access and kept for the rest of the run
//! - **Reproducible docs**: `NX_GENERATE_DOCS_PROCESS=true` always picks the
//!   first variant
//! - **Experiment codes**: ask afterwards which variant was actually shown
//! - **Usage stats**: fire-and-forget reporting that never fails the caller
//!
//! ## Example
//!
//! ```rust,no_run
//! use nxprompts::{PromptKey, PromptMessages, StatEvent, StatsReporter, StatsConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let messages = PromptMessages::from_env();
//!     let prompt = messages.get_prompt(PromptKey::SetupCi);
//!     println!("{}", prompt.message);
//!
//!     let reporter = StatsReporter::from_config(StatsConfig::default());
//!     reporter
//!         .record_stat(StatEvent {
//!             command: "create-nx-workspace".into(),
//!             nx_version: "14.2.0".into(),
//!             use_cloud: false,
//!             meta: vec![messages.code_of_selected_prompt_message(PromptKey::SetupCi).into()],
//!         })
//!         .await;
//! }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod prompts;
pub mod stats;

// Re-exports
pub use config::{Config, RuntimeFlags, StatsConfig};
pub use error::{Result, SetupError};
pub use prompts::{
    Choice, CloudChoice, Fallback, PromptKey, PromptMessages, SelectionMode, Variant,
    NX_CLOUD_CHOICES,
};
pub use stats::{
    HttpClient, PostOptions, StatEvent, StatOutcome, StatPayload, StatsReporter, UreqClient,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
