//! Gridbot CLI - run the agent against a game server or replay a transcript.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;
use std::process::ExitCode;

/// Gridbot - a rule-based grid RTS agent
#[derive(Parser, Debug)]
#[command(name = "gridbot")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Listen for the game server and play (default)
    Serve {
        /// Port to listen on
        #[arg(default_value = "9090")]
        port: u16,

        /// Address to bind
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: IpAddr,

        #[command(flatten)]
        session: cli::SessionArgs,
    },

    /// Feed a recorded transcript of updates through a fresh session
    Replay {
        /// File with one update message per line
        #[arg(required = true)]
        transcript: PathBuf,

        /// Output format: json or text
        #[arg(short, long, default_value = "json")]
        format: cli::ReplayFormat,

        #[command(flatten)]
        session: cli::SessionArgs,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Self::Serve {
            port: 9090,
            bind: IpAddr::from([0, 0, 0, 0]),
            session: cli::SessionArgs::default(),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_logging();

    let result = match args.command.unwrap_or_default() {
        Commands::Serve {
            port,
            bind,
            session,
        } => cli::serve::execute(bind, port, &session),

        Commands::Replay {
            transcript,
            format,
            session,
        } => cli::replay::execute(&transcript, format, &session),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
