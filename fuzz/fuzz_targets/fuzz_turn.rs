#![no_main]

//! Structured turn fuzzer.
//!
//! Builds arbitrary unit and tile updates, plays several turns and checks
//! the per-turn command rules:
//! 1. At most one order per unit, only for known units
//! 2. At most one CREATE, always last, always affordable
//! 3. No CREATE before a base has been seen

use arbitrary::Arbitrary;
use gridbot::game::{TileUnit, UnitStatus};
use gridbot::protocol::{GameInfo, TileRecord, UnitRecord};
use gridbot::transport::session_rng;
use gridbot::{Command, SessionConfig, TurnSession, UnitType, Update};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated unit report.
#[derive(Arbitrary, Debug)]
struct FuzzUnit {
    id: u8,
    player_id: u8,
    kind: u8,
    x: u8,
    y: u8,
    idle: bool,
    resource: Option<u16>,
}

/// A fuzzer-generated tile report.
#[derive(Arbitrary, Debug)]
struct FuzzTile {
    x: u8,
    y: u8,
    visible: bool,
    blocked: bool,
    resources: Option<u16>,
    occupant: Option<(u8, u8)>,
}

/// Structured input: map size plus a few turns of updates.
#[derive(Arbitrary, Debug)]
struct TurnInput {
    width: u8,
    height: u8,
    seed: u64,
    turns: Vec<(Vec<FuzzUnit>, Vec<FuzzTile>)>,
}

fn unit_type(kind: u8) -> UnitType {
    match kind % 5 {
        0 => UnitType::Worker,
        1 => UnitType::Scout,
        2 => UnitType::Tank,
        3 => UnitType::Base,
        _ => UnitType::Other("drone".to_owned()),
    }
}

fn unit_record(unit: &FuzzUnit) -> UnitRecord {
    UnitRecord {
        id: u64::from(unit.id),
        player_id: u32::from(unit.player_id % 3),
        x: i32::from(unit.x % 32),
        y: i32::from(unit.y % 32),
        unit_type: unit_type(unit.kind),
        status: if unit.idle {
            UnitStatus::Idle
        } else {
            UnitStatus::Other("moving".to_owned())
        },
        health: 10,
        resource: unit.resource.map(u32::from),
    }
}

fn tile_record(tile: &FuzzTile) -> TileRecord {
    TileRecord {
        x: i32::from(tile.x % 32),
        y: i32::from(tile.y % 32),
        visible: tile.visible,
        blocked: tile.blocked,
        resources: tile.resources.map(u32::from),
        units: tile.occupant.map(|(id, player)| {
            vec![TileUnit {
                player_id: Some(u32::from(player % 3)),
                ..TileUnit::with_id(u64::from(id))
            }]
        }),
    }
}

fuzz_target!(|input: TurnInput| {
    let mut session = TurnSession::new(SessionConfig::default(), session_rng(Some(input.seed)));
    session.take_turn(Update {
        game_info: Some(GameInfo {
            map_width: u16::from(input.width % 32) + 1,
            map_height: u16::from(input.height % 32) + 1,
            unit_info: Default::default(),
        }),
        ..Update::default()
    });

    for (units, tiles) in input.turns.iter().take(8) {
        let update = Update {
            game_info: None,
            unit_updates: units.iter().map(unit_record).collect(),
            tile_updates: tiles.iter().map(tile_record).collect(),
        };

        session.apply_update(update);
        let stockpile = session.state().resources;
        let base_known = session.state().base_location.is_some();
        let commands = session.decide();

        let mut ordered: Vec<u64> = commands.iter().filter_map(Command::unit).collect();
        let total = ordered.len();
        ordered.sort_unstable();
        ordered.dedup();
        assert_eq!(ordered.len(), total, "unit ordered twice");
        for id in &ordered {
            assert!(session.world().get_unit(*id).is_some(), "order for unknown unit {id}");
        }

        let creates: Vec<&Command> = commands
            .iter()
            .filter(|c| matches!(c, Command::Create { .. }))
            .collect();
        assert!(creates.len() <= 1);
        if let Some(Command::Create { unit_type }) = creates.first() {
            assert!(base_known);
            assert!(matches!(commands.last(), Some(Command::Create { .. })));
            let cost = session.state().costs.cost(unit_type);
            assert!(cost.is_some_and(|c| c <= stockpile));
        }
    }
});
