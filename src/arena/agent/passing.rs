use crate::arena::{action::AgentAction, game_state::GameState};

use super::{Agent, AgentGenerator};

/// An agent that never does anything. Useful as a seat filler and for
/// testing the turn controller.
#[derive(Default, Debug, Clone, Copy)]
pub struct PassingAgent {}

impl Agent for PassingAgent {
    fn act(&mut self, _id: &uuid::Uuid, _game_state: &GameState, _player_idx: usize) -> AgentAction {
        AgentAction::Pass
    }
}

#[derive(Default, Debug, Clone, Copy)]
pub struct PassingAgentGenerator;

impl AgentGenerator for PassingAgentGenerator {
    fn generate(&self, _player_idx: usize, _game_state: &GameState) -> Box<dyn Agent> {
        Box::new(PassingAgent {})
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::{EndReason, GameSimulationBuilder, test_util::assert_valid_game_state};

    use super::*;

    #[test_log::test]
    fn test_passing_agents_hit_round_cap() {
        let game_state = GameState::standard(420, 3).unwrap();
        let starting_bank = *game_state.bank();
        let mut sim = GameSimulationBuilder::default()
            .game_state(game_state)
            .agents(vec![
                Box::new(PassingAgent {}),
                Box::new(PassingAgent {}),
                Box::new(PassingAgent {}),
            ])
            .max_rounds(Some(3))
            .build()
            .unwrap();

        sim.run();

        assert_eq!(Some(EndReason::RoundCap), sim.game_state.end_reason());
        assert_eq!(4, sim.game_state.round);
        assert_eq!(9, sim.game_state.turn);
        assert_eq!(starting_bank, *sim.game_state.bank());
        assert_eq!(vec![0, 0, 0], sim.game_state.scores());
        assert_valid_game_state(&sim.game_state);
    }
}
