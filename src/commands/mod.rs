//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! CLI command implementations, one submodule per command.

pub mod init;
pub mod prompts;
pub mod stat;

pub use init::{
    execute_init, resolve_cloud_choice, setup_event, skipped_stat_hint, DialoguerPrompter,
    InitOptions, Prompter,
};
pub use prompts::{execute_prompts, PromptsOptions};
pub use stat::{execute_stat, stats_reporter, StatOptions};
