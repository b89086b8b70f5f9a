//! Output formatting utilities for CLI.

use gridbot::{Command, GameState, Response};

/// Format one turn's response as human-readable text.
pub(super) fn format_turn(state: &GameState, response: &Response) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Turn {} (stockpile: {}, commands: {})\n",
        state.turn,
        state.resources,
        response.commands.len()
    ));
    for command in &response.commands {
        output.push_str(&format!("  {}\n", describe(command)));
    }

    output
}

/// One-line description of a command.
fn describe(command: &Command) -> String {
    match command {
        Command::Move { unit, dir } => format!("unit {unit}: move {dir}"),
        Command::Gather { unit, dir } => format!("unit {unit}: gather {dir}"),
        Command::Melee { unit, target } => format!("unit {unit}: melee unit {target}"),
        Command::Shoot { unit, dx, dy } => format!("unit {unit}: shoot ({dx:+}, {dy:+})"),
        Command::Create { unit_type } => format!("base: create {unit_type}"),
    }
}
