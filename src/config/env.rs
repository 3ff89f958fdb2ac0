//! @acp:module "Environment Flags"
//! @acp:summary "Docs mode, verbose logging and CI detection from environment variables"
//! @acp:domain cli
//! @acp:layer detection
//!
//! Process environment signals read once at startup. Detection only looks at
//! environment variables.

use std::env;

pub const GENERATE_DOCS_VAR: &str = "NX_GENERATE_DOCS_PROCESS";
pub const VERBOSE_LOGGING_VAR: &str = "NX_VERBOSE_LOGGING";

/// Variables set by common CI providers
const CI_VARS: &[&str] = &[
    "CONTINUOUS_INTEGRATION",
    "BUILD_NUMBER",
    "RUN_ID",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TF_BUILD",
    "BUILDKITE",
    "JENKINS_URL",
    "TEAMCITY_VERSION",
];

/// Environment-derived switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeFlags {
    /// Select the first variant of every prompt
    pub generate_docs: bool,
    /// Emit diagnostics on the stats path
    pub verbose_logging: bool,
    /// Running under a CI provider
    pub is_ci: bool,
}

impl RuntimeFlags {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build flags from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            generate_docs: lookup(GENERATE_DOCS_VAR).as_deref() == Some("true"),
            verbose_logging: lookup(VERBOSE_LOGGING_VAR).as_deref() == Some("true"),
            is_ci: detect_ci(&lookup),
        }
    }
}

fn detect_ci<F>(lookup: &F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("CI") {
        // CI=false is used to opt out
        return !matches!(value.to_lowercase().as_str(), "false" | "0" | "");
    }
    CI_VARS.iter().any(|name| lookup(name).is_some())
}
