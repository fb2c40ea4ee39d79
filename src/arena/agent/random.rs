use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::arena::{action::AgentAction, game_state::GameState};
use crate::core::Color;

use super::{Agent, AgentGenerator, buyable_cards, is_affordable};

/// Buys a random affordable card when there is one, otherwise takes up to
/// three random colors from the bank.
///
/// The agent owns its rng so a seeded agent plays the same game every time.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }
}

impl Agent for RandomAgent {
    fn act(&mut self, _id: &uuid::Uuid, game_state: &GameState, player_idx: usize) -> AgentAction {
        let affordable: Vec<_> = buyable_cards(game_state, player_idx)
            .into_iter()
            .filter(|card| is_affordable(game_state, player_idx, *card))
            .collect();

        if let Some(card) = affordable.choose(&mut self.rng) {
            return AgentAction::Buy(*card);
        }

        let available: Vec<Color> = Color::gems()
            .into_iter()
            .filter(|c| game_state.bank()[*c] > 0)
            .collect();
        let colors: Vec<Color> = available
            .choose_multiple(&mut self.rng, 3)
            .copied()
            .collect();
        AgentAction::take(&colors)
    }
}

/// Builds seeded `RandomAgent`s. Without a fixed seed the game's seed is
/// used, offset per seat so two random seats don't mirror each other.
#[derive(Default, Debug, Clone, Copy)]
pub struct RandomAgentGenerator {
    seed: Option<u64>,
}

impl RandomAgentGenerator {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl AgentGenerator for RandomAgentGenerator {
    fn generate(&self, player_idx: usize, game_state: &GameState) -> Box<dyn Agent> {
        let base = self.seed.unwrap_or(game_state.seed);
        let seed = base.wrapping_add((player_idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Box::new(RandomAgent::new(seed))
    }
}
