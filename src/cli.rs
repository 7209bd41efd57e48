//! Command-line interface definition for termchat
//!
//! This module defines the CLI structure using clap's derive API. The
//! surface is a single flat command: prompt words go straight on the
//! command line, with flags for overrides and the control switches.

use clap::Parser;

/// termchat - Simple AI assistant for your terminal
///
/// Reads prompts from the CLI or a YAML config file and prints a single
/// chat-completion reply. Meta variables like `<<date>>` are expanded in
/// prompts before sending.
#[derive(Parser, Debug, Clone)]
#[command(name = "termchat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Override the system prompt from the config file
    #[arg(short = 's', long)]
    pub system_prompt: Option<String>,

    /// Override the user prompt from the config file
    #[arg(short = 'p', long)]
    pub user_prompt: Option<String>,

    /// Override the model name (e.g., gpt-4.1-mini)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Send a single request without reading or saving chat history
    #[arg(short = '1', long)]
    pub oneshot: bool,

    /// Clear chat history and exit
    #[arg(long)]
    pub clear_history: bool,

    /// Enable debug logging (prompts and outgoing messages go to stderr)
    #[arg(long)]
    pub debug: bool,

    /// Prompt words used when --user-prompt is omitted
    #[arg(value_name = "PROMPT")]
    pub rest: Vec<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: "config.yaml".to_string(),
            system_prompt: None,
            user_prompt: None,
            model: None,
            oneshot: false,
            clear_history: false,
            debug: false,
            rest: Vec::new(),
        }
    }
}
