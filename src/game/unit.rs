//! Unit state and classification.

use serde::{Deserialize, Serialize};

use crate::game::Coord;
use crate::protocol::UnitRecord;

/// Unique identifier for a unit, stable across turns.
pub type UnitId = u64;

/// Unique identifier for a player.
pub type PlayerId = u32;

/// Kind of unit.
///
/// The server may introduce types this agent has no rule for; those are
/// kept verbatim in [`UnitType::Other`] and never commanded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UnitType {
    /// Gathers resources and carries them home.
    Worker,
    /// Fast explorer with a long sight radius.
    Scout,
    /// Combat unit.
    Tank,
    /// The player's base; produces units.
    Base,
    /// Any other type reported by the server.
    Other(String),
}

impl UnitType {
    /// Wire spelling of the type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Worker => "worker",
            Self::Scout => "scout",
            Self::Tank => "tank",
            Self::Base => "base",
            Self::Other(name) => name,
        }
    }

    /// Vision/engagement radius used for range checks.
    #[must_use]
    pub const fn engagement_range(&self) -> u32 {
        match self {
            Self::Scout => 5,
            Self::Worker | Self::Tank | Self::Base | Self::Other(_) => 2,
        }
    }
}

impl From<String> for UnitType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "worker" => Self::Worker,
            "scout" => Self::Scout,
            "tank" => Self::Tank,
            "base" => Self::Base,
            _ => Self::Other(name),
        }
    }
}

impl From<&str> for UnitType {
    fn from(name: &str) -> Self {
        Self::from(name.to_owned())
    }
}

impl From<UnitType> for String {
    fn from(unit_type: UnitType) -> Self {
        match unit_type {
            UnitType::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last reported activity of a unit.
///
/// Only idleness matters to the policy; every other status string is kept
/// as reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UnitStatus {
    /// Waiting for orders.
    Idle,
    /// Any other status (moving, building, dead, ...).
    Other(String),
}

impl From<String> for UnitStatus {
    fn from(status: String) -> Self {
        if status == "idle" {
            Self::Idle
        } else {
            Self::Other(status)
        }
    }
}

impl From<&str> for UnitStatus {
    fn from(status: &str) -> Self {
        Self::from(status.to_owned())
    }
}

impl From<UnitStatus> for String {
    fn from(status: UnitStatus) -> Self {
        match status {
            UnitStatus::Idle => "idle".to_owned(),
            UnitStatus::Other(status) => status,
        }
    }
}

/// A unit known to the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Identifier. Never changes once created.
    pub id: UnitId,
    /// Owning player. Never changes once created.
    pub player_id: PlayerId,
    /// Unit type, fixed at creation.
    pub unit_type: UnitType,
    /// Current position.
    pub position: Coord,
    /// Last reported status.
    pub status: UnitStatus,
    /// Last reported health.
    pub health: i32,
    /// Carried resources; keeps its last known value when an update omits it.
    pub resource: u32,
    /// Turn on which the unit was last mentioned in an update.
    pub last_seen: u64,
}

impl Unit {
    /// Build a unit from its first appearance in an update.
    #[must_use]
    pub fn from_record(record: &UnitRecord, turn: u64) -> Self {
        Self {
            id: record.id,
            player_id: record.player_id,
            unit_type: record.unit_type.clone(),
            position: Coord::new(record.x, record.y),
            status: record.status.clone(),
            health: record.health,
            resource: record.resource.unwrap_or(0),
            last_seen: turn,
        }
    }

    /// Merge a later record for the same unit in place.
    ///
    /// Identity and type are kept; position, status and health are
    /// overwritten; resource only when the record carries one.
    pub fn merge(&mut self, record: &UnitRecord, turn: u64) {
        self.position = Coord::new(record.x, record.y);
        self.status = record.status.clone();
        self.health = record.health;
        if let Some(resource) = record.resource {
            self.resource = resource;
        }
        self.last_seen = turn;
    }

    /// Whether the unit is waiting for orders.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.status == UnitStatus::Idle
    }

    /// Whether the unit is carrying anything.
    #[must_use]
    pub const fn is_carrying(&self) -> bool {
        self.resource > 0
    }
}
