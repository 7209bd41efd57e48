//! termchat - Simple AI assistant for your terminal
//!
//! Main entry point: resolves configuration and prompts, dispatches one
//! request through the conversation engine, and prints the reply.

use anyhow::Result;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use termchat::cli::Cli;
use termchat::config::Config;
use termchat::engine::{ConversationEngine, TurnRequest};
use termchat::history::HistoryStore;
use termchat::providers::create_provider;
use termchat::prompts;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let config = Config::load(&cli.config, &cli)?;
    config.validate()?;

    let store = HistoryStore::new(&config.history.path);

    if cli.clear_history {
        store.clear();
        tracing::info!(path = %config.history.path.display(), "cleared chat history");
        return Ok(());
    }

    let system_prompt = prompts::resolve_system_prompt(&config, &cli);
    let user_prompt = prompts::resolve_user_prompt(&config, &cli);
    let model = config.provider.model().to_string();

    // No user prompt on the command line means there is nothing to
    // continue a conversation with, so the run is one-shot even without -1.
    let oneshot = cli.oneshot || (cli.user_prompt.is_none() && cli.rest.is_empty());

    tracing::debug!(
        provider = %config.provider.kind,
        %model,
        oneshot,
        system_prompt = %system_prompt,
        user_prompt = %user_prompt,
        "resolved request"
    );

    let provider = create_provider(&config.provider)?;
    let engine = ConversationEngine::new(provider, store);

    let reply = if oneshot {
        engine
            .run_oneshot(&system_prompt, &user_prompt, &model)
            .await?
    } else {
        engine
            .run_turn(&TurnRequest {
                system_prompt,
                user_prompt,
                model,
                history_expire: Duration::from_secs(config.history.expire_seconds),
                max_turns: config.history.max_turns,
            })
            .await?
    };

    println!("{}", reply);
    Ok(())
}

/// Initialize tracing with an environment filter
///
/// Logs go to stderr so stdout stays clean for the reply; `--debug`
/// raises the default level to debug.
fn init_tracing(debug: bool) {
    let default_filter = if debug { "termchat=debug" } else { "termchat=warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
