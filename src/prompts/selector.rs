//! @acp:module "Prompt Selector"
//! @acp:summary "Memoized per-key variant selection for one run"
//! @acp:domain prompts
//! @acp:layer logic
//!
//! Picks one variant per prompt key on first access and keeps that pick for
//! the lifetime of the selector.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use rand::Rng;

use super::catalog::{PromptKey, Variant};
use crate::config::RuntimeFlags;
use crate::error::Result;

/// How the first pick for a key is made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Uniform over the key's variants
    Random,
    /// Always the first variant, for reproducible generated docs
    Deterministic,
}

impl SelectionMode {
    pub fn from_flags(flags: &RuntimeFlags) -> Self {
        if flags.generate_docs {
            SelectionMode::Deterministic
        } else {
            SelectionMode::Random
        }
    }
}

/// Memoized variant selection for one CLI invocation
#[derive(Debug)]
pub struct PromptMessages {
    mode: SelectionMode,
    selected: Mutex<BTreeMap<PromptKey, usize>>,
}

impl PromptMessages {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: Mutex::new(BTreeMap::new()),
        }
    }

    /// Selector whose mode follows `NX_GENERATE_DOCS_PROCESS`
    pub fn from_env() -> Self {
        Self::new(SelectionMode::from_flags(&RuntimeFlags::from_env()))
    }

    /// Variant for `key`, selecting one on first access.
    ///
    /// The check and the insert happen under one lock, so concurrent callers
    /// always observe the same index for a key.
    pub fn get_prompt(&self, key: PromptKey) -> &'static Variant {
        let variants = key.variants();
        let index = *self.state().entry(key).or_insert_with(|| {
            let index = match self.mode {
                SelectionMode::Deterministic => 0,
                SelectionMode::Random => rand::rng().random_range(0..variants.len()),
            };
            tracing::debug!("Selected variant {} ({}) for {}", index, variants[index].code, key);
            index
        });
        &variants[index]
    }

    /// Same as [`get_prompt`](Self::get_prompt) for a key given by name
    pub fn get_prompt_by_name(&self, name: &str) -> Result<&'static Variant> {
        let key: PromptKey = name.parse()?;
        Ok(self.get_prompt(key))
    }

    /// Code of the variant already shown for `key`, or `""` if none was.
    ///
    /// Never selects.
    pub fn code_of_selected_prompt_message(&self, key: PromptKey) -> &'static str {
        match self.state().get(&key) {
            Some(&index) => key.variants()[index].code,
            None => "",
        }
    }

    /// Codes for `keys` in order, `""` for keys never shown
    pub fn selected_codes(&self, keys: &[PromptKey]) -> Vec<&'static str> {
        keys.iter()
            .map(|&key| self.code_of_selected_prompt_message(key))
            .collect()
    }

    /// Snapshot of the selections made so far
    pub fn selections(&self) -> BTreeMap<PromptKey, usize> {
        self.state().clone()
    }

    fn state(&self) -> MutexGuard<'_, BTreeMap<PromptKey, usize>> {
        // The map is always left consistent, so a poisoned lock is still usable
        self.selected
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for PromptMessages {
    fn default() -> Self {
        Self::new(SelectionMode::Random)
    }
}
