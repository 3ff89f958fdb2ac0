//! @acp:module "Variant Catalog"
//! @acp:summary "Static table of prompt variants per decision point"
//! @acp:domain prompts
//! @acp:layer model
//!
//! Static table of prompt variants. Every key maps to a non-empty, ordered
//! list of variants; index 0 is the variant used for generated docs.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SetupError;

/// Every choice value the setup flow understands.
pub const NX_CLOUD_CHOICES: &[&str] = &["yes", "github", "circleci", "skip"];

/// Decision points in the setup flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PromptKey {
    #[serde(rename = "setupCI")]
    SetupCi,
    #[serde(rename = "setupNxCloud")]
    SetupNxCloud,
}

impl PromptKey {
    /// All keys, in catalog order
    pub fn all() -> &'static [PromptKey] {
        &[PromptKey::SetupCi, PromptKey::SetupNxCloud]
    }

    /// Wire name of the key
    pub fn name(&self) -> &'static str {
        match self {
            PromptKey::SetupCi => "setupCI",
            PromptKey::SetupNxCloud => "setupNxCloud",
        }
    }

    /// Variants for this key, never empty
    pub fn variants(&self) -> &'static [Variant] {
        match self {
            PromptKey::SetupCi => SETUP_CI,
            PromptKey::SetupNxCloud => SETUP_NX_CLOUD,
        }
    }
}

impl fmt::Display for PromptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PromptKey {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "setupCI" | "setup-ci" => Ok(PromptKey::SetupCi),
            "setupNxCloud" | "setup-nx-cloud" => Ok(PromptKey::SetupNxCloud),
            _ => Err(SetupError::UnknownPromptKey(s.to_string())),
        }
    }
}

/// One selectable answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub name: &'static str,
}

/// Follow-up prompt triggered when the user picks `value`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fallback {
    pub value: &'static str,
    pub key: PromptKey,
}

/// One wording/choice-set option for a prompt key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Variant {
    pub code: &'static str,
    pub message: &'static str,
    pub initial: &'static str,
    pub choices: &'static [Choice],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Fallback>,
}

impl Variant {
    /// Position of the default choice in `choices`
    pub fn initial_index(&self) -> usize {
        self.choices
            .iter()
            .position(|c| c.value == self.initial)
            .unwrap_or(0)
    }

    /// Look up a choice by value
    pub fn choice(&self, value: &str) -> Option<&'static Choice> {
        self.choices.iter().find(|c| c.value == value)
    }

    /// Follow-up key when `value` was picked, if any
    pub fn fallback_for(&self, value: &str) -> Option<PromptKey> {
        self.fallback
            .filter(|fallback| fallback.value == value)
            .map(|fallback| fallback.key)
    }
}

const CACHE_HINT: &str = "\n(it's free and can be disabled any time)";

static SETUP_CI: &[Variant] = &[
    Variant {
        code: "enable-nx-cloud",
        message: "Do you want Nx Cloud to make your CI fast?",
        initial: "github",
        choices: &[
            Choice { value: "yes", name: "Yes, enable Nx Cloud" },
            Choice { value: "github", name: "Yes, configure Nx Cloud for GitHub Actions" },
            Choice { value: "circleci", name: "Yes, configure Nx Cloud for Circle CI" },
            Choice { value: "skip", name: "Skip for now" },
        ],
        footer: Some(
            "\nRead more about remote cache at https://nx.dev/ci/features/remote-cache",
        ),
        hint: Some(CACHE_HINT),
        fallback: None,
    },
    Variant {
        code: "set-up-ci",
        message: "Set up CI with caching, distribution and test deflaking",
        initial: "github",
        choices: &[
            Choice { value: "github", name: "Yes, for GitHub Actions with Nx Cloud" },
            Choice { value: "circleci", name: "Yes, for CircleCI with Nx Cloud" },
            Choice { value: "skip", name: "Skip for now" },
        ],
        footer: Some(
            "\nRead more about CI benefits with Nx at https://nx.dev/ci/intro/ci-with-nx",
        ),
        hint: Some(CACHE_HINT),
        fallback: Some(Fallback {
            value: "skip",
            key: PromptKey::SetupNxCloud,
        }),
    },
];

static SETUP_NX_CLOUD: &[Variant] = &[Variant {
    code: "enable-caching",
    message: "Would you like remote caching to make your build faster?",
    initial: "yes",
    choices: &[
        Choice { value: "yes", name: "Yes" },
        Choice { value: "skip", name: "Skip for now" },
    ],
    footer: Some("\nRead more about remote caching at https://nx.dev/ci/features/remote-cache"),
    hint: Some(CACHE_HINT),
    fallback: None,
}];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_key_has_variants() {
        for key in PromptKey::all() {
            assert!(!key.variants().is_empty(), "{} has no variants", key);
        }
    }

    #[test]
    fn test_codes_unique_per_key() {
        for key in PromptKey::all() {
            let codes: HashSet<_> = key.variants().iter().map(|v| v.code).collect();
            assert_eq!(codes.len(), key.variants().len());
        }
    }

    #[test]
    fn test_initial_is_a_choice_and_values_unique() {
        for key in PromptKey::all() {
            for variant in key.variants() {
                assert!(variant.choice(variant.initial).is_some(), "{}", variant.code);
                let values: HashSet<_> = variant.choices.iter().map(|c| c.value).collect();
                assert_eq!(values.len(), variant.choices.len());
                for choice in variant.choices {
                    assert!(NX_CLOUD_CHOICES.contains(&choice.value));
                }
            }
        }
    }

    #[test]
    fn test_fallback_points_at_a_choice() {
        let variant = &PromptKey::SetupCi.variants()[1];
        assert_eq!(variant.fallback_for("skip"), Some(PromptKey::SetupNxCloud));
        assert_eq!(variant.fallback_for("github"), None);
        assert_eq!(PromptKey::SetupCi.variants()[0].fallback_for("skip"), None);
    }

    #[test]
    fn test_initial_index() {
        assert_eq!(PromptKey::SetupCi.variants()[0].initial_index(), 1);
        assert_eq!(PromptKey::SetupNxCloud.variants()[0].initial_index(), 0);
    }

    #[test]
    fn test_key_from_str() {
        assert_eq!("setupCI".parse::<PromptKey>().unwrap(), PromptKey::SetupCi);
        assert_eq!(
            "setup-nx-cloud".parse::<PromptKey>().unwrap(),
            PromptKey::SetupNxCloud
        );
        assert!(matches!(
            "setupDocs".parse::<PromptKey>(),
            Err(SetupError::UnknownPromptKey(_))
        ));
    }
}
