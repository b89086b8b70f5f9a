//! Unit production: at most one creation per turn.

use crate::game::{GameState, UnitType, World};
use crate::protocol::Command;

/// Production targets in priority order, with the unit cap for each.
fn production_plan() -> [(UnitType, usize); 3] {
    [
        (UnitType::Worker, 5),
        (UnitType::Scout, 2),
        (UnitType::Tank, 3),
    ]
}

/// Decide this turn's creation command, if any.
///
/// Nothing is produced until the base is known. Otherwise the first type
/// in priority order that is both affordable and under its cap is chosen.
/// Caps count every known unit of the type, busy or idle.
#[must_use]
pub fn production_command(world: &World, state: &GameState) -> Option<Command> {
    state.base_location?;

    production_plan()
        .into_iter()
        .find(|(unit_type, cap)| {
            state.costs.can_afford(unit_type, state.resources)
                && world.count_of_type(unit_type) < *cap
        })
        .map(|(unit_type, _)| Command::Create { unit_type })
}
