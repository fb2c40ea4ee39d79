use super::{
    Agent, GameSimulation, GameState,
    agent::PassingAgent,
    errors::GameSimulationError,
    historian::Historian,
    simulation::DEFAULT_VICTORY_POINTS,
};

fn build_agents(num_agents: usize) -> Vec<Box<dyn Agent>> {
    (0..num_agents)
        .map(|_| -> Box<dyn Agent> { Box::<PassingAgent>::default() })
        .collect()
}

/// # GameSimulationBuilder
///
/// `GameSimulationBuilder` is a builder to allow for complex
/// configurations of a game played via agents. A game state is
/// required, other fields are optional.
///
/// ## Setters
///
/// Each setter will set the optional value to the passed in value. Then return
/// the mutated builder.
///
/// While agents are not required the default is a full table of passing
/// agents. So likely not that interesting a simulation. Without a round cap
/// a table of passing agents never finishes.
///
/// ## Examples
///
/// ```
/// use splendid_cards::arena::agent::{GreedyAgent, RandomAgent};
/// use splendid_cards::arena::{Agent, GameSimulationBuilder, GameState};
///
/// let game_state = GameState::standard(420, 2).unwrap();
/// let agents: Vec<Box<dyn Agent>> = vec![
///     Box::<GreedyAgent>::default(),
///     Box::new(RandomAgent::new(7)),
/// ];
/// let mut sim = GameSimulationBuilder::default()
///     .game_state(game_state)
///     .agents(agents)
///     .max_rounds(Some(100))
///     .build()
///     .unwrap();
///
/// sim.run();
/// assert!(sim.game_state.is_complete());
/// ```
pub struct GameSimulationBuilder {
    agents: Option<Vec<Box<dyn Agent>>>,
    historians: Vec<Box<dyn Historian>>,
    game_state: Option<GameState>,
    panic_on_historian_error: bool,
    victory_points: u32,
    max_rounds: Option<u32>,
}

impl GameSimulationBuilder {
    /// Set the agents for the simulation created by this builder.
    pub fn agents(mut self, agents: Vec<Box<dyn Agent>>) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Set the game state for ths simulation created by this builder.
    pub fn game_state(mut self, game_state: GameState) -> Self {
        self.game_state = Some(game_state);
        self
    }

    pub fn historians(mut self, historians: Vec<Box<dyn Historian>>) -> Self {
        self.historians = historians;
        self
    }

    /// Should the simulation panic if a historian errors. Default is false
    /// and the failing historian is dropped.
    pub fn panic_on_historian_error(mut self, panic_on_historian_error: bool) -> Self {
        self.panic_on_historian_error = panic_on_historian_error;
        self
    }

    /// Points that start the final round. Defaults to 15.
    pub fn victory_points(mut self, victory_points: u32) -> Self {
        self.victory_points = victory_points;
        self
    }

    /// The last round that may be played. `None` or `Some(0)` means
    /// unlimited.
    pub fn max_rounds(mut self, max_rounds: Option<u32>) -> Self {
        self.max_rounds = max_rounds.filter(|r| *r > 0);
        self
    }

    pub fn build(self) -> Result<GameSimulation, GameSimulationError> {
        let game_state = self.game_state.ok_or(GameSimulationError::NeedGameState)?;
        let num_players = game_state.num_players();

        let agents = self.agents.unwrap_or_else(|| build_agents(num_players));
        if agents.len() != num_players {
            return Err(GameSimulationError::AgentCountMismatch {
                agents: agents.len(),
                players: num_players,
            });
        }

        Ok(GameSimulation::new(
            game_state,
            agents,
            self.historians,
            self.panic_on_historian_error,
            self.victory_points,
            self.max_rounds,
        ))
    }
}

impl Default for GameSimulationBuilder {
    fn default() -> Self {
        Self {
            agents: None,
            historians: vec![],
            game_state: None,
            panic_on_historian_error: false,
            victory_points: DEFAULT_VICTORY_POINTS,
            max_rounds: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::EndReason;

    use super::*;

    #[test]
    fn test_need_game_state() {
        let result = GameSimulationBuilder::default().build();
        assert!(matches!(result, Err(GameSimulationError::NeedGameState)));
    }

    #[test]
    fn test_agent_count_must_match() {
        let game_state = GameState::standard(0, 3).unwrap();
        let result = GameSimulationBuilder::default()
            .game_state(game_state)
            .agents(vec![Box::<PassingAgent>::default()])
            .build();
        assert!(matches!(
            result,
            Err(GameSimulationError::AgentCountMismatch {
                agents: 1,
                players: 3
            })
        ));
    }

    #[test]
    fn test_defaults() {
        let game_state = GameState::standard(0, 4).unwrap();
        let mut sim = GameSimulationBuilder::default()
            .game_state(game_state)
            .max_rounds(Some(2))
            .build()
            .unwrap();
        assert_eq!(DEFAULT_VICTORY_POINTS, sim.victory_points());
        assert_eq!(Some(2), sim.max_rounds());

        sim.run();
        assert_eq!(Some(EndReason::RoundCap), sim.game_state.end_reason());
    }

    #[test]
    fn test_zero_round_cap_is_unlimited() {
        let game_state = GameState::standard(0, 2).unwrap();
        let sim = GameSimulationBuilder::default()
            .game_state(game_state)
            .max_rounds(Some(0))
            .build()
            .unwrap();
        assert_eq!(None, sim.max_rounds());
    }
}
