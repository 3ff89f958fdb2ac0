//! @acp:module "Prompt Variants"
//! @acp:summary "A/B prompt variants and the setup answer they produce"
//! @acp:domain prompts
//! @acp:layer service
//!
//! A/B variants for the setup flow's prompts and the selector that picks
//! one per key for the current run.
//!
//! ## Overview
//!
//! The catalog is static data. [`PromptMessages`] is created once per CLI
//! invocation and passed to whatever renders prompts; after rendering, the
//! caller can ask which variant code was shown for each key and attach the
//! codes to a usage stat.

pub mod catalog;
pub mod selector;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

pub use catalog::{Choice, Fallback, PromptKey, Variant, NX_CLOUD_CHOICES};
pub use selector::{PromptMessages, SelectionMode};

use crate::error::SetupError;

/// What the user chose to do about remote caching and CI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudChoice {
    Yes,
    Github,
    CircleCi,
    Skip,
}

impl CloudChoice {
    /// Choice value as it appears in the catalog
    pub fn value(&self) -> &'static str {
        match self {
            CloudChoice::Yes => "yes",
            CloudChoice::Github => "github",
            CloudChoice::CircleCi => "circleci",
            CloudChoice::Skip => "skip",
        }
    }

    /// Whether this choice enables remote caching
    pub fn uses_cloud(&self) -> bool {
        !matches!(self, CloudChoice::Skip)
    }

    /// CI provider to generate a workflow for, if any
    pub fn ci_provider(&self) -> Option<&'static str> {
        match self {
            CloudChoice::Github => Some("GitHub Actions"),
            CloudChoice::CircleCi => Some("CircleCI"),
            _ => None,
        }
    }
}

impl fmt::Display for CloudChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for CloudChoice {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yes" => Ok(CloudChoice::Yes),
            "github" => Ok(CloudChoice::Github),
            "circleci" => Ok(CloudChoice::CircleCi),
            "skip" => Ok(CloudChoice::Skip),
            _ => Err(SetupError::UnknownChoice {
                key: "nxCloud".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
