//! Per-turn decision engine.
//!
//! The policy is stateless: every turn it looks only at the current world
//! and session state and decides from scratch.
//!
//! 1. Idle workers, scouts and tanks are bucketed by type.
//! 2. Workers haul cargo home, gather next to resources, walk towards the
//!    nearest resource, or explore.
//! 3. Scouts explore.
//! 4. Tanks attack the nearest sighting in range (melee when adjacent,
//!    otherwise a raw-offset shot), else shadow the nearest worker.
//! 5. At most one unit is produced.
//!
//! Commands come out as workers, then scouts, then tanks (each in ascending
//! id order), then the production command.

mod production;

pub use production::production_command;

use rand::Rng;

use crate::game::{GameState, Unit, UnitType, World};
use crate::protocol::Command;
use crate::spatial::{Spatial, direction_towards, is_adjacent, is_in_range};

/// Idle units eligible for orders this turn, bucketed by role.
#[derive(Debug, Default)]
pub struct IdleUnits<'a> {
    /// Idle workers in id order.
    pub workers: Vec<&'a Unit>,
    /// Idle scouts in id order.
    pub scouts: Vec<&'a Unit>,
    /// Idle tanks in id order.
    pub tanks: Vec<&'a Unit>,
}

impl<'a> IdleUnits<'a> {
    /// Partition the world's idle units. Busy units and other types are skipped.
    #[must_use]
    pub fn partition(world: &'a World) -> Self {
        let mut idle = Self::default();
        for unit in world.units().filter(|u| u.is_idle()) {
            match unit.unit_type {
                UnitType::Worker => idle.workers.push(unit),
                UnitType::Scout => idle.scouts.push(unit),
                UnitType::Tank => idle.tanks.push(unit),
                UnitType::Base | UnitType::Other(_) => {}
            }
        }
        idle
    }
}

/// Decide every command for this turn.
pub fn decide<R: Rng + ?Sized>(world: &World, state: &GameState, rng: &mut R) -> Vec<Command> {
    let spatial = Spatial::new(world, state);
    let idle = IdleUnits::partition(world);
    let capacity = idle.workers.len() + idle.scouts.len() + idle.tanks.len() + 1;
    let mut commands = Vec::with_capacity(capacity);

    for worker in &idle.workers {
        commands.extend(worker_command(&spatial, state, worker, rng));
    }
    for scout in &idle.scouts {
        commands.push(scout_command(&spatial, scout, rng));
    }
    for tank in &idle.tanks {
        commands.extend(tank_command(&spatial, tank));
    }
    commands.extend(production_command(world, state));

    commands
}

/// Order for an idle worker.
///
/// A loaded worker with no known base gets no order.
pub fn worker_command<R: Rng + ?Sized>(
    spatial: &Spatial<'_>,
    state: &GameState,
    worker: &Unit,
    rng: &mut R,
) -> Option<Command> {
    if worker.is_carrying() {
        let base = state.base_location?;
        return Some(Command::Move {
            unit: worker.id,
            dir: direction_towards(worker.position, base),
        });
    }

    let command = match spatial.nearest_visible_resource_tile(worker) {
        Some(tile) if is_adjacent(worker.position, tile.coord) => Command::Gather {
            unit: worker.id,
            dir: direction_towards(worker.position, tile.coord),
        },
        Some(tile) => Command::Move {
            unit: worker.id,
            dir: direction_towards(worker.position, tile.coord),
        },
        None => Command::Move {
            unit: worker.id,
            dir: spatial.exploration_direction(worker, rng),
        },
    };
    Some(command)
}

/// Order for an idle scout: always explore.
pub fn scout_command<R: Rng + ?Sized>(spatial: &Spatial<'_>, scout: &Unit, rng: &mut R) -> Command {
    Command::Move {
        unit: scout.id,
        dir: spatial.exploration_direction(scout, rng),
    }
}

/// Order for an idle tank.
///
/// With nothing in range the tank heads for the nearest other worker; with
/// no worker either it gets no order.
#[must_use]
pub fn tank_command(spatial: &Spatial<'_>, tank: &Unit) -> Option<Command> {
    if let Some(sighting) = spatial.nearest_visible_enemy(tank)
        && is_in_range(tank, sighting.position)
    {
        let command = if is_adjacent(tank.position, sighting.position) {
            Command::Melee {
                unit: tank.id,
                target: sighting.unit.id,
            }
        } else {
            Command::Shoot {
                unit: tank.id,
                dx: sighting.position.x - tank.position.x,
                dy: sighting.position.y - tank.position.y,
            }
        };
        return Some(command);
    }

    let worker = spatial.nearest_friendly_unit_of_type(tank, &UnitType::Worker)?;
    Some(Command::Move {
        unit: tank.id,
        dir: direction_towards(tank.position, worker.position),
    })
}
