//! Coordinates, directions and tile types.

use serde::{Deserialize, Serialize};

use crate::game::{PlayerId, UnitId, UnitStatus, UnitType};

/// A coordinate on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// X coordinate (column).
    pub x: i32,
    /// Y coordinate (row, growing southwards).
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate.
    #[must_use]
    #[inline]
    pub fn distance(self, other: Coord) -> u64 {
        u64::from(self.x.abs_diff(other.x)) + u64::from(self.y.abs_diff(other.y))
    }

    /// The coordinate `steps` tiles away in `dir`, or `None` if it falls
    /// outside the `i32` range.
    #[must_use]
    #[inline]
    pub const fn offset(self, dir: Direction, steps: i32) -> Option<Self> {
        let (dx, dy) = dir.delta();
        let (Some(sx), Some(sy)) = (dx.checked_mul(steps), dy.checked_mul(steps)) else {
            return None;
        };
        match (self.x.checked_add(sx), self.y.checked_add(sy)) {
            (Some(x), Some(y)) => Some(Self::new(x, y)),
            _ => None,
        }
    }
}

/// One of the four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards y - 1.
    #[serde(rename = "N")]
    North,
    /// Towards y + 1.
    #[serde(rename = "S")]
    South,
    /// Towards x + 1.
    #[serde(rename = "E")]
    East,
    /// Towards x - 1.
    #[serde(rename = "W")]
    West,
}

impl Direction {
    /// All directions in their fixed evaluation order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit step `(dx, dy)` for this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Index into [`Direction::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Wire spelling of the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit as listed on a tile.
///
/// Tiles report whoever stands on them, friend or foe, with whatever
/// details the server chooses to include. Only `id` is guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileUnit {
    /// Unit identifier.
    pub id: UnitId,
    /// Owning player, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    /// Unit type, if reported.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<UnitType>,
    /// Unit status, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UnitStatus>,
    /// Health, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<i32>,
}

impl TileUnit {
    /// A tile unit known only by id.
    #[must_use]
    pub const fn with_id(id: UnitId) -> Self {
        Self {
            id,
            player_id: None,
            unit_type: None,
            status: None,
            health: None,
        }
    }
}

/// An observed map tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Position of this tile. Never changes.
    pub coord: Coord,
    /// Whether the tile is currently in sight.
    pub visible: bool,
    /// Whether the tile is impassable.
    pub blocked: bool,
    /// Resource quantity, if any was ever reported.
    pub resources: Option<u32>,
    /// Units standing on the tile as of the last report.
    pub units: Vec<TileUnit>,
}

impl Tile {
    /// Create an empty tile with the given flags.
    #[must_use]
    pub const fn new(coord: Coord, visible: bool, blocked: bool) -> Self {
        Self {
            coord,
            visible,
            blocked,
            resources: None,
            units: Vec::new(),
        }
    }

    /// Whether the tile holds a positive amount of resources.
    #[must_use]
    pub fn has_resources(&self) -> bool {
        self.resources.is_some_and(|amount| amount > 0)
    }

    /// Whether the tile can be harvested: visible, stocked and not blocked.
    #[must_use]
    pub fn is_harvestable(&self) -> bool {
        self.visible && self.has_resources() && !self.blocked
    }

    /// Whether the tile is visible and has at least one unit on it.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.visible && !self.units.is_empty()
    }
}
