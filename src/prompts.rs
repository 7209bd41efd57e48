//! Prompt resolution
//!
//! Merges the CLI and config prompt sources into the final system and
//! user prompts: CLI flag first, then trailing prompt words (user prompt
//! only), then the config value. The winner is whitespace-trimmed and
//! meta-variables are expanded.

use crate::cli::Cli;
use crate::config::Config;
use crate::meta;

/// Fallback user prompt when every source is empty
const DEFAULT_USER_PROMPT: &str = "Generate a short message.";

/// Resolve the system prompt from CLI and config
///
/// An empty result means no system message will be seeded.
pub fn resolve_system_prompt(config: &Config, cli: &Cli) -> String {
    let base = cli
        .system_prompt
        .clone()
        .unwrap_or_else(|| config.prompts.system.clone());
    meta::expand(base.trim())
}

/// Resolve the user prompt from CLI, trailing words, and config
///
/// Falls back to a canned prompt so a bare invocation still produces a
/// request the provider can answer.
pub fn resolve_user_prompt(config: &Config, cli: &Cli) -> String {
    let base = if let Some(prompt) = &cli.user_prompt {
        prompt.clone()
    } else if !cli.rest.is_empty() {
        cli.rest.join(" ")
    } else {
        config.prompts.user.clone()
    };

    let base = base.trim();
    let base = if base.is_empty() {
        DEFAULT_USER_PROMPT
    } else {
        base
    };
    meta::expand(base)
}
