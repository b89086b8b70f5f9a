//! CLI command implementations for Gridbot.

pub(crate) mod replay;
pub(crate) mod serve;

mod output;

use clap::ValueEnum;
use gridbot::AgentError;
use gridbot::SessionConfig;
use gridbot::game::EvictionPolicy;
use std::error::Error;
use std::fmt;

/// Session options shared by every command that plays turns.
#[derive(clap::Args, Debug, Clone, Copy, Default)]
pub(crate) struct SessionArgs {
    /// Seed for exploration tie-breaks (default: random)
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,

    /// Forget units not mentioned for this many turns (default: never)
    #[arg(long, value_name = "TURNS")]
    pub(crate) evict_stale_after: Option<u64>,
}

impl SessionArgs {
    /// Session configuration for these options.
    pub(crate) fn config(&self) -> SessionConfig {
        let eviction = self
            .evict_stale_after
            .map_or(EvictionPolicy::Never, EvictionPolicy::AfterTurns);
        SessionConfig { eviction }
    }
}

/// Output format for the `replay` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReplayFormat {
    /// Exact response lines as sent on the wire.
    Json,
    /// Human-readable command listing per turn.
    Text,
}

/// Install the log subscriber. Filter comes from `RUST_LOG`, default `info`.
pub(crate) fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<AgentError> for CliError {
    fn from(e: AgentError) -> Self {
        Self::new(e.to_string())
    }
}
