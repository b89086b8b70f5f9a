//! Error types for the agent.

use std::fmt;
use std::io;

use serde_json::error::Category;

/// Failures that abort processing of a turn or a connection.
///
/// Logically absent data (an unknown tile, no base yet, no resource in
/// sight) is never an error; queries return `Option` for those.
#[derive(Debug)]
pub enum AgentError {
    /// The inbound line is not valid JSON.
    MalformedMessage(serde_json::Error),
    /// The inbound line is JSON but a record does not match the grammar,
    /// e.g. a unit record without an `id`.
    InvalidRecord(serde_json::Error),
    /// The response could not be serialized.
    Encode(serde_json::Error),
    /// Reading from or writing to the transport failed.
    Io(io::Error),
}

impl AgentError {
    /// Classify a decode failure as malformed JSON or an invalid record.
    #[must_use]
    pub fn from_decode(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => Self::InvalidRecord(err),
            Category::Syntax | Category::Eof | Category::Io => Self::MalformedMessage(err),
        }
    }
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedMessage(e) => write!(f, "malformed message: {e}"),
            Self::InvalidRecord(e) => write!(f, "invalid record: {e}"),
            Self::Encode(e) => write!(f, "failed to encode response: {e}"),
            Self::Io(e) => write!(f, "transport error: {e}"),
        }
    }
}

impl std::error::Error for AgentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedMessage(e) | Self::InvalidRecord(e) | Self::Encode(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for AgentError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Result type for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;
