use crate::arena::{action::AgentAction, game_state::GameState};

use super::Agent;

/// A replay agent that will replay a sequence of actions from a vector.
/// Once the vector runs out it repeats a fallback action, `Pass` unless set
/// with `with_default`.
#[derive(Debug, Clone)]
pub struct VecReplayAgent {
    actions: Vec<AgentAction>,
    idx: usize,
    default: AgentAction,
}

impl VecReplayAgent {
    pub fn new(actions: Vec<AgentAction>) -> Self {
        Self {
            actions,
            idx: 0,
            default: AgentAction::Pass,
        }
    }

    /// What to play once the recorded actions run out.
    pub fn with_default(mut self, default: AgentAction) -> Self {
        self.default = default;
        self
    }
}

impl Agent for VecReplayAgent {
    fn act(&mut self, _id: &uuid::Uuid, _game_state: &GameState, _player_idx: usize) -> AgentAction {
        let idx = self.idx;
        self.idx += 1;
        self.actions
            .get(idx)
            .map_or_else(|| self.default.clone(), |a| a.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::{
        Agent, GameSimulationBuilder,
        action::{Action, AgentAction},
        agent::VecReplayAgent,
        errors::GameStateError,
        historian::VecHistorian,
        test_util::assert_valid_game_state,
    };
    use crate::core::{Color, Gems, Tier};

    use super::*;

    #[test_log::test]
    fn test_replay_opening_take() {
        let game_state = GameState::standard(0, 2).unwrap();
        let agents: Vec<Box<dyn Agent>> = vec![
            Box::new(VecReplayAgent::new(vec![AgentAction::take(&[
                Color::White,
                Color::Blue,
                Color::Black,
            ])])),
            Box::new(VecReplayAgent::new(vec![])),
        ];

        let mut sim = GameSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .max_rounds(Some(1))
            .build()
            .unwrap();
        sim.run();

        assert_eq!(
            Gems::from_pairs(&[
                (Color::White, 3),
                (Color::Blue, 3),
                (Color::Black, 3),
                (Color::Red, 4),
                (Color::Green, 4),
                (Color::Gold, 5),
            ]),
            *sim.game_state.bank()
        );
        assert_eq!(
            Gems::from_pairs(&[(Color::White, 1), (Color::Blue, 1), (Color::Black, 1)]),
            *sim.game_state.players()[0].tokens()
        );
        assert_valid_game_state(&sim.game_state);
    }

    #[test_log::test]
    fn test_rejected_action_forfeits_turn() {
        let game_state = GameState::standard(5, 2).unwrap();
        let expensive = game_state.river(Tier::Three)[0];
        let records = VecHistorian::new_storage();

        let agents: Vec<Box<dyn Agent>> = vec![
            Box::new(VecReplayAgent::new(vec![AgentAction::Buy(expensive)])),
            Box::new(VecReplayAgent::new(vec![AgentAction::take(&[Color::Red])])),
        ];
        let before = game_state.clone();
        let mut sim = GameSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .historians(vec![Box::new(VecHistorian::new(records.clone()))])
            .max_rounds(Some(1))
            .build()
            .unwrap();
        sim.run();

        // Player zero changed nothing, player one still got their turn.
        assert_eq!(before.players()[0], sim.game_state.players()[0]);
        assert_eq!(1, sim.game_state.players()[1].tokens()[Color::Red]);

        let failed: Vec<GameStateError> = records
            .borrow()
            .iter()
            .filter_map(|r| match &r.action {
                Action::FailedAction(payload) => Some(payload.error.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            vec![GameStateError::UnaffordableCard {
                player: 0,
                card: expensive
            }],
            failed
        );
    }

    #[test_log::test]
    fn test_default_repeats_after_script() {
        let game_state = GameState::standard(2, 2).unwrap();
        let agents: Vec<Box<dyn Agent>> = vec![
            Box::new(
                VecReplayAgent::new(vec![AgentAction::take(&[Color::Blue, Color::Blue])])
                    .with_default(AgentAction::take(&[Color::Green])),
            ),
            Box::new(VecReplayAgent::new(vec![])),
        ];
        let mut sim = GameSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .max_rounds(Some(3))
            .build()
            .unwrap();
        sim.run();

        assert_eq!(
            Gems::from_pairs(&[(Color::Blue, 2), (Color::Green, 2)]),
            *sim.game_state.players()[0].tokens()
        );
        assert!(sim.game_state.players()[1].tokens().is_empty());
        assert_valid_game_state(&sim.game_state);
    }
}
