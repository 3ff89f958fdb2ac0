//! @acp:module "Prompts Command"
//! @acp:summary "Show the prompt variant selected for each key"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `nx-setup prompts`: shows the variant this run selects for
//! each prompt key. With `NX_GENERATE_DOCS_PROCESS=true` the output is
//! stable and can be pasted into generated docs.

use anyhow::Result;
use console::style;
use serde::Serialize;

use crate::config::RuntimeFlags;
use crate::prompts::{PromptKey, PromptMessages, SelectionMode, Variant};

/// Options for the prompts command
#[derive(Debug, Clone, Default)]
pub struct PromptsOptions {
    /// Only this key (by name)
    pub key: Option<String>,
    /// Output as JSON
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SelectedPrompt {
    key: PromptKey,
    index: usize,
    variants: usize,
    variant: &'static Variant,
}

/// Execute the prompts command
pub fn execute_prompts(options: PromptsOptions, flags: RuntimeFlags) -> Result<()> {
    let messages = PromptMessages::new(SelectionMode::from_flags(&flags));

    let keys = match &options.key {
        Some(name) => vec![name.parse::<PromptKey>()?],
        None => PromptKey::all().to_vec(),
    };

    let selected = select_all(&messages, &keys);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    for prompt in &selected {
        print_prompt(prompt);
    }
    Ok(())
}

fn select_all(messages: &PromptMessages, keys: &[PromptKey]) -> Vec<SelectedPrompt> {
    keys.iter()
        .map(|&key| {
            let variant = messages.get_prompt(key);
            let index = messages.selections().get(&key).copied().unwrap_or_default();
            SelectedPrompt {
                key,
                index,
                variants: key.variants().len(),
                variant,
            }
        })
        .collect()
}

fn print_prompt(prompt: &SelectedPrompt) {
    let variant = prompt.variant;
    println!(
        "{} {} [{} {}/{}]",
        style("→").cyan(),
        style(prompt.key).bold(),
        variant.code,
        prompt.index + 1,
        prompt.variants
    );
    println!("  {}", variant.message);
    for choice in variant.choices {
        let marker = if choice.value == variant.initial { "●" } else { "○" };
        println!("    {} {} {}", marker, choice.name, style(format!("({})", choice.value)).dim());
    }
    if let Some(fallback) = variant.fallback {
        println!(
            "  {} '{}' continues with {}",
            style("↳").dim(),
            fallback.value,
            fallback.key
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all_deterministic() {
        let messages = PromptMessages::new(SelectionMode::Deterministic);
        let selected = select_all(&messages, PromptKey::all());

        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|p| p.index == 0));
        assert_eq!(selected[0].variant.code, "enable-nx-cloud");
        assert_eq!(selected[1].variants, 1);
    }

    #[test]
    fn test_unknown_key_fails() {
        let options = PromptsOptions {
            key: Some("setupDocs".to_string()),
            json: true,
        };
        let err = execute_prompts(options, RuntimeFlags::default()).unwrap_err();
        assert!(err.to_string().contains("setupDocs"));
    }
}
