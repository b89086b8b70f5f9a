//! Serve command implementation.

use super::{CliError, SessionArgs};
use gridbot::transport::{ServerConfig, run_server};
use std::net::{IpAddr, SocketAddr};

/// Execute the serve command.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound.
pub(crate) fn execute(bind: IpAddr, port: u16, session: &SessionArgs) -> Result<(), CliError> {
    let config = ServerConfig {
        addr: SocketAddr::new(bind, port),
        seed: session.seed,
        session: session.config(),
    };

    run_server(&config)
        .map_err(|e| CliError::new(format!("Failed to listen on {}: {e}", config.addr)))
}
