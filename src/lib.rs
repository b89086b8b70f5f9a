// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Gridbot: a rule-based agent for a turn-based grid RTS competition.
//!
//! The game server streams one JSON update per turn; the agent folds it
//! into its world model and answers with one batch of unit commands.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Transport (line-delimited JSON)   │
//! ├─────────────────────────────────────┤
//! │          Turn Session               │
//! ├─────────────────────────────────────┤
//! │    Policy Engine  →  Production     │
//! ├─────────────────────────────────────┤
//! │       Spatial Query Layer           │
//! ├─────────────────────────────────────┤
//! │    World Model + Session State      │
//! └─────────────────────────────────────┘
//! ```
//!
//! Everything runs on one thread, one turn at a time.

pub mod error;
pub mod game;
pub mod policy;
pub mod protocol;
pub mod session;
pub mod spatial;
pub mod transport;

pub use error::{AgentError, AgentResult};

// Re-export key types at crate root for convenience
pub use game::{Coord, Direction, GameState, Tile, Unit, UnitId, UnitType, World};
pub use protocol::{Command, Response, Update};
pub use session::{SessionConfig, TurnSession};
