//! Replay command implementation.

use super::output::format_turn;
use super::{CliError, ReplayFormat, SessionArgs};
use gridbot::transport::{serve_connection, session_rng};
use gridbot::{TurnSession, Update};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use tracing::info;

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the transcript cannot be read or a line in it is
/// not a valid update.
pub(crate) fn execute(
    transcript: &Path,
    format: ReplayFormat,
    session: &SessionArgs,
) -> Result<(), CliError> {
    let file = File::open(transcript).map_err(|e| {
        CliError::new(format!("Failed to read {}: {e}", transcript.display()))
    })?;
    let reader = BufReader::new(file);
    let mut turns = TurnSession::new(session.config(), session_rng(session.seed));

    let played = match format {
        ReplayFormat::Json => {
            let stdout = io::stdout();
            serve_connection(reader, stdout.lock(), &mut turns)?
        }
        ReplayFormat::Text => replay_text(reader, &mut turns)?,
    };

    info!(turns = played, transcript = %transcript.display(), "replay finished");
    Ok(())
}

/// Print a readable listing of each turn's decisions.
fn replay_text<R: BufRead, G: rand::Rng>(
    reader: R,
    session: &mut TurnSession<G>,
) -> Result<u64, CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut played = 0u64;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let update = Update::parse(&line)
            .map_err(|e| CliError::new(format!("Line {}: {e}", index + 1)))?;
        let response = session.take_turn(update);
        write!(out, "{}", format_turn(session.state(), &response))?;
        played += 1;
    }

    Ok(played)
}
