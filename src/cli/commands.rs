//! CLI command implementations.
//!
//! Contains the business logic for each CLI command. The chat loop keeps
//! the conversation history in memory for the session only; nothing is
//! persisted.

// The CLI is the one place that writes to the terminal.
#![allow(clippy::print_stdout)]

use std::io::Write as IoWrite;

use anyhow::Context;
use futures_util::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::agent::Orchestrator;
use crate::agent::message::{ChatMessage, assistant_message, user_message};
use crate::config::Config;
use crate::livestorm::{
    AnalyticsArgs, AnalyticsClient, ApiClient, EventsClient, ListEventsFilters,
};

use super::parser::{Cli, Commands};

/// Executes the parsed CLI command.
///
/// # Errors
///
/// Returns an error for configuration problems (missing keys, bad
/// provider). Runtime failures inside a chat turn are rendered as text by
/// the agent layer and do not error out of the process.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Chat {
            model,
            temperature,
            max_tokens,
        } => {
            let config = resolve_config(model, temperature, max_tokens)?;
            cmd_chat(&config).await
        }
        Commands::Ask {
            question,
            model,
            temperature,
            max_tokens,
        } => {
            let config = resolve_config(model, temperature, max_tokens)?;
            cmd_ask(&config, &question).await
        }
        Commands::Events {
            title,
            status,
            created_since,
            created_until,
            updated_since,
            updated_until,
            include_sessions,
        } => {
            let config = resolve_config(None, None, None)?;
            let filters = ListEventsFilters {
                filter_title: title,
                filter_scheduling_status: status,
                filter_created_since: created_since,
                filter_created_until: created_until,
                filter_updated_since: updated_since,
                filter_updated_until: updated_until,
                include_sessions: include_sessions.then_some(true),
                page_number: None,
            };
            cmd_events(&config, &filters).await
        }
        Commands::Analytics { no_sessions } => {
            let config = resolve_config(None, None, None)?;
            cmd_analytics(&config, !no_sessions).await
        }
    }
}

/// Resolves configuration: environment first, then CLI overrides.
fn resolve_config(
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
) -> anyhow::Result<Config> {
    let mut builder = Config::builder().from_env();
    if let Some(model) = model {
        builder = builder.model(model);
    }
    if let Some(temperature) = temperature {
        builder = builder.temperature(temperature);
    }
    if let Some(max_tokens) = max_tokens {
        builder = builder.max_tokens(max_tokens);
    }
    builder.build().context(
        "missing credentials: set GROQ_API_KEY and LIVESTORM_API_KEY \
         (or put them in a .env file)",
    )
}

/// Interactive chat loop: read a line, stream the reply, repeat.
async fn cmd_chat(config: &Config) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::from_config(config)?;
    let mut history: Vec<ChatMessage> = Vec::new();

    println!("stormline - ask about your Livestorm events (ctrl-d or 'exit' to quit)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        history.push(user_message(line));
        let reply = stream_reply(&orchestrator, &history).await?;
        history.push(assistant_message(&reply));
    }

    println!();
    Ok(())
}

/// One-shot question: stream the reply and exit.
async fn cmd_ask(config: &Config, question: &str) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::from_config(config)?;
    let history = vec![user_message(question)];
    stream_reply(&orchestrator, &history).await?;
    Ok(())
}

/// Renders a streamed reply fragment by fragment, returning the full text.
async fn stream_reply(
    orchestrator: &Orchestrator,
    history: &[ChatMessage],
) -> anyhow::Result<String> {
    let mut stream = orchestrator.respond_stream(history).await;
    let mut reply = String::new();
    while let Some(fragment) = stream.next().await {
        print!("{fragment}");
        std::io::stdout().flush()?;
        reply.push_str(&fragment);
    }
    println!();
    Ok(reply)
}

/// Direct event listing, bypassing the model.
async fn cmd_events(config: &Config, filters: &ListEventsFilters) -> anyhow::Result<()> {
    let client = EventsClient::new(livestorm_client(config)?);
    println!("{}", client.list_events(filters).await);
    Ok(())
}

/// Direct analytics report, bypassing the model.
async fn cmd_analytics(config: &Config, include_sessions: bool) -> anyhow::Result<()> {
    let client = AnalyticsClient::new(livestorm_client(config)?);
    let args = AnalyticsArgs { include_sessions };
    println!("{}", client.comprehensive_analytics(&args).await);
    Ok(())
}

fn livestorm_client(config: &Config) -> anyhow::Result<ApiClient> {
    Ok(ApiClient::new(
        &config.livestorm_base_url,
        &config.livestorm_api_key,
        config.request_timeout,
    )?)
}
