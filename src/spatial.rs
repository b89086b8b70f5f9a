//! Spatial queries over the world model.
//!
//! All proximity uses Manhattan distance. Grid searches visit coordinates
//! in scan order (x outer, y inner) and keep the first candidate at the
//! minimum distance, so ties always resolve the same way.
//!
//! The grid is scanned once per turn when a [`Spatial`] is built; each
//! query then walks only the tiles that can qualify, in the same scan
//! order, and returns exactly what a full rescan would.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::game::{Coord, Direction, GameState, Tile, TileUnit, Unit, UnitType, World};

/// How far ahead exploration looks along each direction.
const LOOKAHEAD: i32 = 3;

/// Weight removed from a scout's homeward direction.
const SCOUT_HOME_PENALTY: i32 = 2;

/// A unit seen on a tile, together with where it was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sighting<'a> {
    /// The unit as listed on the tile.
    pub unit: &'a TileUnit,
    /// Coordinate of the tile it stands on.
    pub position: Coord,
}

/// Read-only query view over one turn's world and session state.
#[derive(Debug)]
pub struct Spatial<'a> {
    world: &'a World,
    state: &'a GameState,
    /// Harvestable tiles in scan order.
    resource_tiles: Vec<&'a Tile>,
    /// Visible tiles with units on them, in scan order.
    occupied_tiles: Vec<&'a Tile>,
}

impl<'a> Spatial<'a> {
    /// Scan the map once and build the query view.
    #[must_use]
    pub fn new(world: &'a World, state: &'a GameState) -> Self {
        let mut resource_tiles = Vec::new();
        let mut occupied_tiles = Vec::new();

        for coord in state.scan_order() {
            let Some(tile) = world.get_tile(coord) else {
                continue;
            };
            if tile.is_harvestable() {
                resource_tiles.push(tile);
            }
            if tile.is_occupied() {
                occupied_tiles.push(tile);
            }
        }

        Self {
            world,
            state,
            resource_tiles,
            occupied_tiles,
        }
    }

    /// Closest visible, unblocked tile with resources.
    #[must_use]
    pub fn nearest_visible_resource_tile(&self, unit: &Unit) -> Option<&'a Tile> {
        self.resource_tiles
            .iter()
            .copied()
            .min_by_key(|tile| unit.position.distance(tile.coord))
    }

    /// First unit listed on the closest visible occupied tile.
    ///
    /// Distance is measured to the tile, not per unit, and ownership is not
    /// checked: a tile listing the querying player's own units qualifies.
    #[must_use]
    pub fn nearest_visible_enemy(&self, unit: &Unit) -> Option<Sighting<'a>> {
        let tile = self
            .occupied_tiles
            .iter()
            .copied()
            .min_by_key(|tile| unit.position.distance(tile.coord))?;

        tile.units.first().map(|found| Sighting {
            unit: found,
            position: tile.coord,
        })
    }

    /// Closest other known unit of the given type.
    ///
    /// Ties go to the lowest id.
    #[must_use]
    pub fn nearest_friendly_unit_of_type(
        &self,
        unit: &Unit,
        unit_type: &UnitType,
    ) -> Option<&'a Unit> {
        self.world
            .units()
            .filter(|other| &other.unit_type == unit_type && other.id != unit.id)
            .min_by_key(|other| unit.position.distance(other.position))
    }

    /// Score each direction by how much unseen ground lies ahead.
    ///
    /// Indexed by [`Direction::index`].
    #[must_use]
    pub fn exploration_weights(&self, unit: &Unit) -> [i32; 4] {
        let mut weights = [0i32; 4];

        for dir in Direction::ALL {
            for steps in 1..=LOOKAHEAD {
                let Some(dest) = unit.position.offset(dir, steps) else {
                    continue;
                };
                if !self.state.in_bounds(dest) {
                    continue;
                }
                let unseen = self.world.get_tile(dest).is_none_or(|tile| !tile.visible);
                if unseen {
                    weights[dir.index()] += LOOKAHEAD - steps;
                }
            }
        }

        if unit.unit_type == UnitType::Scout
            && let Some(base) = self.state.base_location
        {
            weights[direction_towards(unit.position, base).index()] -= SCOUT_HOME_PENALTY;
        }

        weights
    }

    /// Pick an exploration direction, breaking ties with `rng`.
    pub fn exploration_direction<R: Rng + ?Sized>(&self, unit: &Unit, rng: &mut R) -> Direction {
        let weights = self.exploration_weights(unit);
        let best = weights.iter().copied().max().unwrap_or(0);

        let candidates: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|dir| weights[dir.index()] == best)
            .collect();

        candidates.choose(rng).copied().unwrap_or(Direction::North)
    }
}

/// Whether two coordinates are exactly one step apart.
#[must_use]
pub fn is_adjacent(a: Coord, b: Coord) -> bool {
    a.distance(b) == 1
}

/// Whether `target` lies within the unit's engagement radius.
#[must_use]
pub fn is_in_range(unit: &Unit, target: Coord) -> bool {
    unit.position.distance(target) <= u64::from(unit.unit_type.engagement_range())
}

/// Cardinal direction that best approaches `to` from `from`.
///
/// The axis with the strictly larger offset wins; equal offsets go
/// vertical. Identical coordinates yield [`Direction::North`].
#[must_use]
pub fn direction_towards(from: Coord, to: Coord) -> Direction {
    let dx = i64::from(to.x) - i64::from(from.x);
    let dy = i64::from(to.y) - i64::from(from.y);

    if dx.abs() > dy.abs() {
        if dx > 0 { Direction::East } else { Direction::West }
    } else if dy > 0 {
        Direction::South
    } else {
        Direction::North
    }
}
