//! Wire messages exchanged with the game server.
//!
//! Each turn the server sends one JSON object per line and expects one JSON
//! object per line back:
//!
//! ```text
//! in:  {"game_info": {...}, "unit_updates": [...], "tile_updates": [...]}
//! out: {"commands":[{"command":"MOVE","unit":1,"dir":"N"}, ...]}
//! ```
//!
//! Every top-level inbound key is optional and unknown keys are ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, AgentResult};
use crate::game::{Direction, PlayerId, TileUnit, UnitId, UnitStatus, UnitType};

/// One inbound turn message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Update {
    /// Session constants, expected on the first turn only.
    #[serde(default)]
    pub game_info: Option<GameInfo>,
    /// Changed units.
    #[serde(default)]
    pub unit_updates: Vec<UnitRecord>,
    /// Changed tiles.
    #[serde(default)]
    pub tile_updates: Vec<TileRecord>,
}

impl Update {
    /// Parse one inbound line.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::MalformedMessage`] if the line is not JSON and
    /// [`AgentError::InvalidRecord`] if a record is missing a required field.
    pub fn parse(line: &str) -> AgentResult<Self> {
        serde_json::from_str(line).map_err(AgentError::from_decode)
    }
}

/// Map dimensions and unit catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameInfo {
    /// Map width in tiles.
    pub map_width: u16,
    /// Map height in tiles.
    pub map_height: u16,
    /// Per-type unit information keyed by type name.
    #[serde(default)]
    pub unit_info: HashMap<String, UnitInfo>,
}

/// Catalogue entry for one unit type. Only the cost is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UnitInfo {
    /// Production cost, if the type can be produced.
    #[serde(default)]
    pub cost: Option<u32>,
}

/// A unit as reported in `unit_updates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    /// Unit identifier.
    pub id: UnitId,
    /// Owning player.
    pub player_id: PlayerId,
    /// X position.
    pub x: i32,
    /// Y position.
    pub y: i32,
    /// Unit type.
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    /// Current status.
    pub status: UnitStatus,
    /// Current health.
    pub health: i32,
    /// Carried resources (stockpile, for a base), if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<u32>,
}

/// A tile as reported in `tile_updates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    /// X position.
    pub x: i32,
    /// Y position.
    pub y: i32,
    /// Whether the tile is in sight.
    pub visible: bool,
    /// Whether the tile is impassable.
    pub blocked: bool,
    /// Resource quantity, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<u32>,
    /// Units on the tile, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<Vec<TileUnit>>,
}

/// An order for one unit, or a production request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "UPPERCASE")]
pub enum Command {
    /// Step one tile.
    Move {
        /// Unit to move.
        unit: UnitId,
        /// Direction of the step.
        dir: Direction,
    },
    /// Harvest the adjacent tile.
    Gather {
        /// Gathering unit.
        unit: UnitId,
        /// Direction of the resource tile.
        dir: Direction,
    },
    /// Attack an adjacent unit.
    Melee {
        /// Attacking unit.
        unit: UnitId,
        /// Unit under attack.
        target: UnitId,
    },
    /// Fire at a relative offset.
    Shoot {
        /// Firing unit.
        unit: UnitId,
        /// X offset to the target.
        dx: i32,
        /// Y offset to the target.
        dy: i32,
    },
    /// Produce a unit at the base.
    Create {
        /// Type to produce.
        #[serde(rename = "type")]
        unit_type: UnitType,
    },
}

impl Command {
    /// The commanded unit, if the command targets one.
    #[must_use]
    pub const fn unit(&self) -> Option<UnitId> {
        match self {
            Self::Move { unit, .. }
            | Self::Gather { unit, .. }
            | Self::Melee { unit, .. }
            | Self::Shoot { unit, .. } => Some(*unit),
            Self::Create { .. } => None,
        }
    }
}

/// One outbound turn message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Commands in issue order.
    pub commands: Vec<Command>,
}

impl Response {
    /// Encode as a single compact line including the trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Encode`] if serialization fails.
    pub fn to_line(&self) -> AgentResult<String> {
        let mut line = serde_json::to_string(self).map_err(AgentError::Encode)?;
        line.push('\n');
        Ok(line)
    }
}
