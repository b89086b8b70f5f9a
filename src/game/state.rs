//! Session state that is not part of the observed world.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::game::{Coord, UnitType};
use crate::protocol::{GameInfo, UnitRecord};

/// Production cost per unit type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitCosts {
    costs: HashMap<UnitType, u32>,
}

impl Default for UnitCosts {
    fn default() -> Self {
        let costs = HashMap::from([
            (UnitType::Worker, 100),
            (UnitType::Scout, 130),
            (UnitType::Tank, 150),
        ]);
        Self { costs }
    }
}

impl UnitCosts {
    /// Cost of a unit type, if it can be produced at all.
    #[must_use]
    pub fn cost(&self, unit_type: &UnitType) -> Option<u32> {
        self.costs.get(unit_type).copied()
    }

    /// Override the cost of a unit type.
    pub fn set(&mut self, unit_type: UnitType, cost: u32) {
        self.costs.insert(unit_type, cost);
    }

    /// Whether `stockpile` covers the cost. Types without a cost are never affordable.
    #[must_use]
    pub fn can_afford(&self, unit_type: &UnitType, stockpile: u32) -> bool {
        self.cost(unit_type).is_some_and(|cost| stockpile >= cost)
    }
}

/// Per-session state: map size, home base, stockpile and costs.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    /// Map width in tiles. Zero until game info arrives.
    pub map_width: u16,
    /// Map height in tiles. Zero until game info arrives.
    pub map_height: u16,
    /// Location of the first base seen.
    pub base_location: Option<Coord>,
    /// Spendable resources as of the latest update.
    pub resources: u32,
    /// Production costs.
    pub costs: UnitCosts,
    /// Number of updates applied so far.
    pub turn: u64,
    game_info_applied: bool,
}

impl GameState {
    /// Create an empty session state with default costs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether game info has been received.
    #[must_use]
    pub const fn has_game_info(&self) -> bool {
        self.game_info_applied
    }

    /// Set map dimensions and cost overrides. Only the first call has any effect.
    pub fn apply_game_info(&mut self, info: &GameInfo) {
        if self.game_info_applied {
            debug!(turn = self.turn, "ignoring repeated game info");
            return;
        }

        self.map_width = info.map_width;
        self.map_height = info.map_height;
        for (name, unit_info) in &info.unit_info {
            if let Some(cost) = unit_info.cost {
                self.costs.set(UnitType::from(name.as_str()), cost);
            }
        }
        self.game_info_applied = true;

        info!(
            width = self.map_width,
            height = self.map_height,
            unit_types = info.unit_info.len(),
            "game info applied"
        );
    }

    /// Track the home base and stockpile from a batch of unit records.
    ///
    /// The base location is fixed by the first base ever seen. Any base
    /// record that reports `resource` refreshes the stockpile.
    pub fn observe_units(&mut self, records: &[UnitRecord]) {
        for record in records.iter().filter(|r| r.unit_type == UnitType::Base) {
            if self.base_location.is_none() {
                let location = Coord::new(record.x, record.y);
                info!(x = location.x, y = location.y, "base located");
                self.base_location = Some(location);
            }
            if let Some(stockpile) = record.resource {
                self.resources = stockpile;
            }
        }
    }

    /// Whether a coordinate lies on the map.
    #[must_use]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        (0..i32::from(self.map_width)).contains(&coord.x)
            && (0..i32::from(self.map_height)).contains(&coord.y)
    }

    /// Every map coordinate in scan order: x outer, y inner.
    pub fn scan_order(&self) -> impl Iterator<Item = Coord> {
        let width = i32::from(self.map_width);
        let height = i32::from(self.map_height);
        (0..width).flat_map(move |x| (0..height).map(move |y| Coord::new(x, y)))
    }
}
