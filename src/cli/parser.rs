//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};

/// stormline: conversational CLI for the Livestorm events API.
///
/// Ask about your events and analytics in natural language, or call the
/// underlying query tools directly for scripting.
#[derive(Parser, Debug)]
#[command(name = "stormline")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session with streaming replies.
    #[command(after_help = r#"Examples:
  stormline chat                                  # Chat with defaults
  stormline chat --model llama-3.3-70b-versatile  # Different Groq model
  GROQ_API_KEY=... LIVESTORM_API_KEY=... stormline chat
"#)]
    Chat {
        /// Completion model override.
        #[arg(long)]
        model: Option<String>,

        /// Sampling temperature.
        #[arg(long)]
        temperature: Option<f32>,

        /// Maximum tokens per reply.
        #[arg(long)]
        max_tokens: Option<u32>,
    },

    /// Ask a single question and print the reply.
    #[command(after_help = r#"Examples:
  stormline ask "How many events ended last quarter?"
  stormline ask "List upcoming webinars" --model llama-3.3-70b-versatile
"#)]
    Ask {
        /// The question to ask.
        question: String,

        /// Completion model override.
        #[arg(long)]
        model: Option<String>,

        /// Sampling temperature.
        #[arg(long)]
        temperature: Option<f32>,

        /// Maximum tokens per reply.
        #[arg(long)]
        max_tokens: Option<u32>,
    },

    /// List events directly, without the model.
    ///
    /// Fetches every page and prints the same summary the chat agent
    /// sees. Useful for scripting and for verifying credentials.
    #[command(after_help = r#"Examples:
  stormline events                                # All events
  stormline events --status ended                 # Only ended events
  stormline events --title "webinar" --include-sessions
  stormline events --created-since 2026-01-01T00:00:00Z
"#)]
    Events {
        /// Filter by event title.
        #[arg(long)]
        title: Option<String>,

        /// Filter by scheduling status (upcoming, live, ended, ...).
        #[arg(long)]
        status: Option<String>,

        /// Only events created at or after this ISO-8601 timestamp.
        #[arg(long)]
        created_since: Option<String>,

        /// Only events created at or before this ISO-8601 timestamp.
        #[arg(long)]
        created_until: Option<String>,

        /// Only events updated at or after this ISO-8601 timestamp.
        #[arg(long)]
        updated_since: Option<String>,

        /// Only events updated at or before this ISO-8601 timestamp.
        #[arg(long)]
        updated_until: Option<String>,

        /// Include related session data.
        #[arg(long)]
        include_sessions: bool,
    },

    /// Print comprehensive event analytics, without the model.
    #[command(after_help = r#"Examples:
  stormline analytics                  # Full report, sessions included
  stormline analytics --no-sessions    # Skip related session data
"#)]
    Analytics {
        /// Exclude related session data from the fetch.
        #[arg(long)]
        no_sessions: bool,
    },
}
