//! One game's worth of agent state, advanced one update at a time.

use rand::Rng;
use tracing::debug;

use crate::error::AgentResult;
use crate::game::{EvictionPolicy, GameState, World};
use crate::policy;
use crate::protocol::{Command, Response, Update};

/// Session configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// What to do with units that stop appearing in updates.
    pub eviction: EvictionPolicy,
}

/// Applies updates to the world model and produces each turn's commands.
///
/// The random source only breaks exploration ties; seed it for
/// reproducible runs.
#[derive(Debug)]
pub struct TurnSession<R> {
    world: World,
    state: GameState,
    config: SessionConfig,
    rng: R,
}

impl<R: Rng> TurnSession<R> {
    /// Start a session with an empty world.
    #[must_use]
    pub fn new(config: SessionConfig, rng: R) -> Self {
        Self {
            world: World::new(),
            state: GameState::new(),
            config,
            rng,
        }
    }

    /// The world model.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The session state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable session state, for seeding scenarios.
    #[must_use]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Fold one update into the world model.
    pub fn apply_update(&mut self, update: Update) {
        self.state.turn += 1;
        let turn = self.state.turn;

        if let Some(info) = &update.game_info {
            self.state.apply_game_info(info);
        }

        self.world.apply_unit_updates(&update.unit_updates, turn);
        self.state.observe_units(&update.unit_updates);
        self.world.apply_tile_updates(update.tile_updates);
        self.world.evict_stale(self.config.eviction, turn);
    }

    /// Decide this turn's commands from the current model.
    pub fn decide(&mut self) -> Vec<Command> {
        policy::decide(&self.world, &self.state, &mut self.rng)
    }

    /// Apply an update and respond to it.
    pub fn take_turn(&mut self, update: Update) -> Response {
        self.apply_update(update);
        let commands = self.decide();

        debug!(
            turn = self.state.turn,
            units = self.world.unit_count(),
            tiles = self.world.tile_count(),
            commands = commands.len(),
            stockpile = self.state.resources,
            "turn decided"
        );

        Response { commands }
    }

    /// Handle one inbound wire line and produce the outbound line.
    ///
    /// A line that fails to parse leaves the model untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is not a valid update or the response
    /// cannot be encoded.
    pub fn handle_line(&mut self, line: &str) -> AgentResult<String> {
        let update = Update::parse(line)?;
        self.take_turn(update).to_line()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::error::AgentError;
    use crate::game::Coord;

    fn session() -> TurnSession<StdRng> {
        TurnSession::new(SessionConfig::default(), StdRng::seed_from_u64(5))
    }

    #[test]
    fn test_turn_counter_advances() {
        let mut session = session();
        session.handle_line("{}").unwrap();
        session.handle_line("{}").unwrap();
        assert_eq!(session.state().turn, 2);
    }

    #[test]
    fn test_empty_update_yields_no_commands() {
        let mut session = session();
        assert_eq!(session.handle_line("{}").unwrap(), "{\"commands\":[]}\n");
    }

    #[test]
    fn test_base_tracked_from_updates() {
        let mut session = session();
        session
            .handle_line(
                r#"{"unit_updates":[{"id":1,"player_id":0,"x":4,"y":6,"type":"base",
                    "status":"idle","health":300,"resource":250}]}"#,
            )
            .unwrap();
        assert_eq!(session.state().base_location, Some(Coord::new(4, 6)));
        assert_eq!(session.state().resources, 250);
    }

    #[test]
    fn test_bad_record_leaves_model_untouched() {
        let mut session = session();
        let err = session
            .handle_line(
                r#"{"unit_updates":[{"id":1,"player_id":0,"x":0,"y":0,"type":"worker",
                    "status":"idle","health":10},{"player_id":0}]}"#,
            )
            .unwrap_err();
        assert!(matches!(err, AgentError::InvalidRecord(_)));
        assert_eq!(session.world().unit_count(), 0);
        assert_eq!(session.state().turn, 0);
    }

    #[test]
    fn test_seeded_stockpile_drives_production() {
        let mut session = session();
        session
            .handle_line(
                r#"{"unit_updates":[{"id":1,"player_id":0,"x":4,"y":6,"type":"base",
                    "status":"idle","health":300}]}"#,
            )
            .unwrap();
        assert_eq!(session.handle_line("{}").unwrap(), "{\"commands\":[]}\n");

        session.state_mut().resources = 130;
        assert_eq!(
            session.handle_line("{}").unwrap(),
            "{\"commands\":[{\"command\":\"CREATE\",\"type\":\"worker\"}]}\n"
        );
    }

    #[test]
    fn test_eviction_policy_applied() {
        let config = SessionConfig {
            eviction: EvictionPolicy::AfterTurns(1),
        };
        let mut session = TurnSession::new(config, StdRng::seed_from_u64(5));
        session
            .handle_line(
                r#"{"unit_updates":[{"id":1,"player_id":0,"x":0,"y":0,"type":"worker",
                    "status":"moving","health":10}]}"#,
            )
            .unwrap();
        session.handle_line("{}").unwrap();
        assert_eq!(session.world().unit_count(), 1);
        session.handle_line("{}").unwrap();
        assert_eq!(session.world().unit_count(), 0);
    }
}
