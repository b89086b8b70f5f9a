//! Line-delimited JSON transport.
//!
//! One update per inbound line, one response per outbound line. Connections
//! are served one at a time and each gets a fresh session. A message that
//! fails to parse ends its connection; the listener keeps accepting.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, trace, warn};

use crate::error::AgentResult;
use crate::session::{SessionConfig, TurnSession};

/// Listener settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,
    /// Seed for the exploration tie-break; entropy when `None`.
    pub seed: Option<u64>,
    /// Per-connection session settings.
    pub session: SessionConfig,
}

/// Build the random source for a new session.
#[must_use]
pub fn session_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

/// Serve turns from `reader` to `writer` until end of input.
///
/// Blank lines are skipped. Returns the number of turns answered.
///
/// # Errors
///
/// Returns the first read, parse, encode or write failure; the turn that
/// failed is not answered.
pub fn serve_connection<R, W, G>(
    mut reader: R,
    mut writer: W,
    session: &mut TurnSession<G>,
) -> AgentResult<u64>
where
    R: BufRead,
    W: Write,
    G: Rng,
{
    let mut line = String::new();
    let mut turns = 0u64;

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.is_empty() {
            trace!("skipping blank line");
            continue;
        }

        let response = session.handle_line(message)?;
        writer.write_all(response.as_bytes())?;
        writer.flush()?;
        turns += 1;
    }

    Ok(turns)
}

/// Serve one accepted TCP stream with a fresh session.
///
/// # Errors
///
/// Returns any failure from [`serve_connection`].
pub fn serve_stream(stream: TcpStream, config: &ServerConfig) -> AgentResult<u64> {
    let reader = BufReader::new(stream.try_clone()?);
    let writer = BufWriter::new(stream);
    let mut session = TurnSession::new(config.session, session_rng(config.seed));
    serve_connection(reader, writer, &mut session)
}

/// Bind the listener and serve connections forever.
///
/// # Errors
///
/// Returns an error only if the listener cannot be bound.
pub fn run_server(config: &ServerConfig) -> AgentResult<()> {
    let listener = TcpListener::bind(config.addr)?;
    info!(addr = %config.addr, "listening");

    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(err) => {
                warn!(error = %err, "accept failed");
                continue;
            }
        };

        let peer = stream
            .peer_addr()
            .map_or_else(|_| "unknown".to_owned(), |addr| addr.to_string());
        info!(%peer, "connection accepted");

        match serve_stream(stream, config) {
            Ok(turns) => info!(%peer, turns, "connection closed"),
            Err(err) => warn!(%peer, error = %err, "connection terminated"),
        }
    }

    Ok(())
}
