//! World model for the agent.
//!
//! Holds everything the agent knows about the match:
//! - Map coordinates, directions and observed tiles
//! - Units with their in-place merged state
//! - The world (unit table + tile table) that absorbs incremental updates
//! - Session constants and per-turn economy (map size, base, stockpile, costs)

mod map;
mod state;
mod unit;
mod world;

pub use map::{Coord, Direction, Tile, TileUnit};
pub use state::{GameState, UnitCosts};
pub use unit::{PlayerId, Unit, UnitId, UnitStatus, UnitType};
pub use world::{EvictionPolicy, World};
