//! Incremental world model.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::game::{Coord, Tile, Unit, UnitId, UnitType};
use crate::protocol::{TileRecord, UnitRecord};

/// What to do with units that stop appearing in updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Keep every unit forever.
    #[default]
    Never,
    /// Drop a unit once it has gone unmentioned for more than this many turns.
    AfterTurns(u64),
}

/// Everything the agent has observed so far.
///
/// Units are keyed by id and iterate in ascending id order. Tiles are keyed
/// by coordinate; most of the map is absent until first observed.
#[derive(Debug, Clone, Default)]
pub struct World {
    units: BTreeMap<UnitId, Unit>,
    tiles: HashMap<Coord, Tile>,
}

impl World {
    /// Create an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a batch of unit records.
    ///
    /// Known units are updated in place, unknown ones are created. Nothing
    /// is removed here.
    pub fn apply_unit_updates(&mut self, records: &[UnitRecord], turn: u64) {
        for record in records {
            self.units
                .entry(record.id)
                .and_modify(|unit| unit.merge(record, turn))
                .or_insert_with(|| Unit::from_record(record, turn));
        }
    }

    /// Store a batch of tile records.
    ///
    /// Each record replaces the tile at its coordinate wholesale, except that
    /// omitted `resources` and `units` fall back to the previous tile's values.
    pub fn apply_tile_updates(&mut self, records: Vec<TileRecord>) {
        for record in records {
            let coord = Coord::new(record.x, record.y);
            let previous = self.tiles.remove(&coord);

            let mut tile = Tile::new(coord, record.visible, record.blocked);
            tile.resources = record
                .resources
                .or_else(|| previous.as_ref().and_then(|t| t.resources));
            tile.units = match (record.units, previous) {
                (Some(units), _) => units,
                (None, Some(prev)) => prev.units,
                (None, None) => Vec::new(),
            };

            self.tiles.insert(coord, tile);
        }
    }

    /// The tile at `coord`, if it has ever been observed.
    #[must_use]
    pub fn get_tile(&self, coord: Coord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    /// The unit with the given id, if known.
    #[must_use]
    pub fn get_unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// All known units in ascending id order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// Number of known units.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Number of observed tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Number of known units of a type, whatever their status.
    #[must_use]
    pub fn count_of_type(&self, unit_type: &UnitType) -> usize {
        self.units().filter(|u| &u.unit_type == unit_type).count()
    }

    /// Apply the eviction policy as of `turn`. Returns the number of units removed.
    pub fn evict_stale(&mut self, policy: EvictionPolicy, turn: u64) -> usize {
        let EvictionPolicy::AfterTurns(max_age) = policy else {
            return 0;
        };

        let before = self.units.len();
        self.units
            .retain(|_, unit| turn.saturating_sub(unit.last_seen) <= max_age);
        let evicted = before - self.units.len();

        if evicted > 0 {
            debug!(turn, evicted, max_age, "evicted stale units");
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{TileUnit, UnitStatus};

    fn unit(id: UnitId, x: i32, y: i32, resource: Option<u32>) -> UnitRecord {
        UnitRecord {
            id,
            player_id: 1,
            x,
            y,
            unit_type: UnitType::Worker,
            status: UnitStatus::Idle,
            health: 10,
            resource,
        }
    }

    fn tile(x: i32, y: i32, resources: Option<u32>, units: Option<Vec<TileUnit>>) -> TileRecord {
        TileRecord {
            x,
            y,
            visible: true,
            blocked: false,
            resources,
            units,
        }
    }

    #[test]
    fn test_empty_world_lookups() {
        let world = World::new();
        assert!(world.get_tile(Coord::new(0, 0)).is_none());
        assert!(world.get_unit(1).is_none());
        assert_eq!(world.unit_count(), 0);
    }

    #[test]
    fn test_unit_created_then_merged() {
        let mut world = World::new();
        world.apply_unit_updates(&[unit(1, 0, 0, Some(3))], 1);
        world.apply_unit_updates(&[unit(1, 4, 5, None)], 2);

        let stored = world.get_unit(1).unwrap();
        assert_eq!(stored.position, Coord::new(4, 5));
        assert_eq!(stored.resource, 3);
        assert_eq!(world.unit_count(), 1);
    }

    #[test]
    fn test_units_iterate_in_id_order() {
        let mut world = World::new();
        world.apply_unit_updates(&[unit(9, 0, 0, None), unit(2, 0, 0, None), unit(5, 0, 0, None)], 1);
        let ids: Vec<UnitId> = world.units().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn test_tile_fallback_for_omitted_fields() {
        let mut world = World::new();
        world.apply_tile_updates(vec![tile(1, 1, Some(40), Some(vec![TileUnit::with_id(8)]))]);

        let mut hidden = tile(1, 1, None, None);
        hidden.visible = false;
        hidden.blocked = true;
        world.apply_tile_updates(vec![hidden]);

        let stored = world.get_tile(Coord::new(1, 1)).unwrap();
        assert!(!stored.visible);
        assert!(stored.blocked);
        assert_eq!(stored.resources, Some(40));
        assert_eq!(stored.units, vec![TileUnit::with_id(8)]);
    }

    #[test]
    fn test_tile_explicit_fields_overwrite() {
        let mut world = World::new();
        world.apply_tile_updates(vec![tile(2, 3, Some(40), Some(vec![TileUnit::with_id(8)]))]);
        world.apply_tile_updates(vec![tile(2, 3, Some(0), Some(Vec::new()))]);

        let stored = world.get_tile(Coord::new(2, 3)).unwrap();
        assert_eq!(stored.resources, Some(0));
        assert!(stored.units.is_empty());
    }

    #[test]
    fn test_first_tile_defaults() {
        let mut world = World::new();
        world.apply_tile_updates(vec![tile(0, 0, None, None)]);

        let stored = world.get_tile(Coord::new(0, 0)).unwrap();
        assert_eq!(stored.resources, None);
        assert!(stored.units.is_empty());
        assert_eq!(world.tile_count(), 1);
    }

    #[test]
    fn test_count_of_type() {
        let mut world = World::new();
        let mut tank = unit(3, 0, 0, None);
        tank.unit_type = UnitType::Tank;
        world.apply_unit_updates(&[unit(1, 0, 0, None), unit(2, 0, 0, None), tank], 1);

        assert_eq!(world.count_of_type(&UnitType::Worker), 2);
        assert_eq!(world.count_of_type(&UnitType::Tank), 1);
        assert_eq!(world.count_of_type(&UnitType::Scout), 0);
    }

    #[test]
    fn test_never_evicts_by_default() {
        let mut world = World::new();
        world.apply_unit_updates(&[unit(1, 0, 0, None)], 1);
        assert_eq!(world.evict_stale(EvictionPolicy::default(), 1_000), 0);
        assert!(world.get_unit(1).is_some());
    }

    #[test]
    fn test_evicts_after_turns() {
        let mut world = World::new();
        world.apply_unit_updates(&[unit(1, 0, 0, None), unit(2, 0, 0, None)], 1);
        world.apply_unit_updates(&[unit(2, 1, 0, None)], 3);

        assert_eq!(world.evict_stale(EvictionPolicy::AfterTurns(2), 3), 0);
        assert_eq!(world.evict_stale(EvictionPolicy::AfterTurns(2), 4), 1);
        assert!(world.get_unit(1).is_none());
        assert!(world.get_unit(2).is_some());
    }
}
