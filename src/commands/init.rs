//! @acp:module "Init Command"
//! @acp:summary "Interactive CI and remote caching setup"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `nx-setup init`: asks how to set up CI and remote caching,
//! following prompt fallbacks, then reports a usage stat in the background.

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Select};

use crate::config::{Config, RuntimeFlags};
use crate::prompts::{CloudChoice, PromptKey, PromptMessages, SelectionMode, Variant};
use crate::stats::{StatEvent, StatOutcome, StatsReporter};

use super::stat::stats_reporter;

/// Command name reported with setup stats
pub const STAT_COMMAND: &str = "create-nx-workspace";

/// Options for the init command
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Skip interactive prompts
    pub yes: bool,
    /// Preselected answer; no prompt is shown
    pub nx_cloud: Option<CloudChoice>,
    /// Don't send a usage stat
    pub no_stats: bool,
}

/// Renders one prompt variant and returns the chosen value
pub trait Prompter {
    fn select(&mut self, key: PromptKey, variant: &'static Variant) -> crate::Result<&'static str>;
}

/// Terminal prompter backed by dialoguer
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&mut self, _key: PromptKey, variant: &'static Variant) -> crate::Result<&'static str> {
        let mut prompt = variant.message.to_string();
        if let Some(hint) = variant.hint {
            prompt.push_str(&style(hint).dim().to_string());
        }
        let items: Vec<&str> = variant.choices.iter().map(|c| c.name).collect();

        let index = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&items)
            .default(variant.initial_index())
            .interact()?;

        if let Some(footer) = variant.footer {
            println!("{}", style(footer.trim_start()).dim());
        }
        Ok(variant.choices[index].value)
    }
}

/// Walk the setup prompts starting at `setupCI`, following fallbacks.
pub fn resolve_cloud_choice(
    messages: &PromptMessages,
    prompter: &mut dyn Prompter,
) -> crate::Result<CloudChoice> {
    let mut key = PromptKey::SetupCi;
    let mut visited = vec![key];
    loop {
        let variant = messages.get_prompt(key);
        let value = prompter.select(key, variant)?;
        match variant.fallback_for(value) {
            Some(next) if !visited.contains(&next) => {
                tracing::debug!("'{}' on {} falls back to {}", value, key, next);
                visited.push(next);
                key = next;
            }
            _ => return value.parse(),
        }
    }
}

/// Execute the init command
pub async fn execute_init(options: InitOptions, config: Config, flags: RuntimeFlags) -> Result<()> {
    let messages = PromptMessages::new(SelectionMode::from_flags(&flags));

    let interactive = !options.yes && !flags.is_ci && console::user_attended();
    let choice = match options.nx_cloud {
        Some(choice) => choice,
        None if interactive => {
            println!("{} Nx workspace setup\n", style("→").cyan());
            resolve_cloud_choice(&messages, &mut DialoguerPrompter::new())?
        }
        None => CloudChoice::Skip,
    };

    let reporter = stats_reporter(config.stats, flags);
    let pending_stat = if options.no_stats {
        None
    } else {
        let event = setup_event(&messages, choice, reporter.config().reported_version());
        Some(reporter.spawn_record_stat(event))
    };

    print_summary(choice);

    if let Some(handle) = pending_stat {
        // only a skip is worth a hint; other outcomes are dropped
        if let Ok(outcome) = handle.await {
            if let Some(hint) = skipped_stat_hint(&reporter, outcome) {
                println!("{} {}", style("→").dim(), style(hint).dim());
            }
        }
    }
    Ok(())
}

/// Hint shown when the reported version kept a setup stat from being sent.
pub fn skipped_stat_hint(reporter: &StatsReporter, outcome: StatOutcome) -> Option<String> {
    if outcome != StatOutcome::Skipped {
        return None;
    }
    let version = reporter.config().reported_version();
    Some(format!(
        "Usage stat not sent: version {} is outside {}..={} (set stats.version in {})",
        version,
        reporter.config().min_major,
        reporter.config().max_major,
        crate::config::CONFIG_FILE_NAME
    ))
}

/// Stats event for a finished setup, tagged with the codes of the prompts
/// that were actually shown.
pub fn setup_event(messages: &PromptMessages, choice: CloudChoice, nx_version: &str) -> StatEvent {
    StatEvent {
        command: STAT_COMMAND.to_string(),
        nx_version: nx_version.to_string(),
        use_cloud: choice.uses_cloud(),
        meta: messages
            .selected_codes(PromptKey::all())
            .into_iter()
            .map(String::from)
            .collect(),
    }
}

fn print_summary(choice: CloudChoice) {
    if choice.uses_cloud() {
        println!("{} Remote caching enabled", style("✓").green());
    } else {
        println!("{} Skipped Nx Cloud setup", style("⚠").yellow());
    }
    if let Some(provider) = choice.ci_provider() {
        println!("{} CI workflow: {}", style("✓").green(), style(provider).cyan());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatsConfig;
    use std::collections::VecDeque;

    struct Scripted {
        answers: VecDeque<&'static str>,
        shown: Vec<PromptKey>,
    }

    impl Scripted {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                shown: Vec::new(),
            }
        }
    }

    impl Prompter for Scripted {
        fn select(&mut self, key: PromptKey, variant: &'static Variant) -> crate::Result<&'static str> {
            self.shown.push(key);
            let answer = self.answers.pop_front().unwrap_or(variant.initial);
            Ok(variant.choice(answer).map(|c| c.value).unwrap_or(variant.initial))
        }
    }

    #[test]
    fn test_first_variant_has_no_fallback() {
        let messages = PromptMessages::new(SelectionMode::Deterministic);
        let mut prompter = Scripted::new(&["skip"]);

        let choice = resolve_cloud_choice(&messages, &mut prompter).unwrap();
        assert_eq!(choice, CloudChoice::Skip);
        assert_eq!(prompter.shown, vec![PromptKey::SetupCi]);
        assert_eq!(messages.code_of_selected_prompt_message(PromptKey::SetupNxCloud), "");
    }

    /// Fresh selector that already picked `code` for setupCI
    fn selector_showing(code: &str) -> PromptMessages {
        for _ in 0..1000 {
            let messages = PromptMessages::new(SelectionMode::Random);
            if messages.get_prompt(PromptKey::SetupCi).code == code {
                return messages;
            }
        }
        panic!("variant {} never selected", code);
    }

    #[test]
    fn test_skip_follows_fallback() {
        let messages = selector_showing("set-up-ci");
        let mut prompter = Scripted::new(&["skip", "yes"]);
        let choice = resolve_cloud_choice(&messages, &mut prompter).unwrap();

        assert_eq!(choice, CloudChoice::Yes);
        assert_eq!(prompter.shown, vec![PromptKey::SetupCi, PromptKey::SetupNxCloud]);
        let event = setup_event(&messages, choice, "14.2.0");
        assert_eq!(event.meta, vec!["set-up-ci", "enable-caching"]);
        assert!(event.use_cloud);
    }

    #[test]
    fn test_skip_hint_names_version_and_range() {
        let reporter = stats_reporter(StatsConfig::default(), RuntimeFlags::default());
        assert!(reporter.is_filtered(reporter.config().reported_version()));

        let hint = skipped_stat_hint(&reporter, StatOutcome::Skipped).unwrap();
        assert!(hint.contains(crate::VERSION));
        assert!(hint.contains("10..=16"));
        assert_eq!(skipped_stat_hint(&reporter, StatOutcome::Sent), None);
        assert_eq!(skipped_stat_hint(&reporter, StatOutcome::Discarded), None);
    }

    #[test]
    fn test_event_without_prompts_has_empty_codes() {
        let messages = PromptMessages::default();
        let event = setup_event(&messages, CloudChoice::Skip, "15.0.0");
        assert_eq!(event.command, STAT_COMMAND);
        assert_eq!(event.meta, vec!["", ""]);
        assert!(!event.use_cloud);
    }
}
