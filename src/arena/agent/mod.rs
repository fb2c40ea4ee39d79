//! `Agent`s are the automatic players in the simulations. They are the
//! strategies being compared.
//!
//! A few baseline agents are provided: one that always passes, one that
//! plays randomly, a greedy buyer, a stingy buyer and one that scores
//! every legal move.
mod greedy;
mod passing;
mod random;
mod replay;
mod stingy;
mod value;

use crate::core::{CardId, Color, Gems};

use super::{action::AgentAction, game_state::GameState};

/// This is the trait that you need to implement in order to implement
/// different strategies. It's up to you to implement the logic and state.
///
/// Agents only ever see the game state read only. The simulation applies
/// whatever they return.
pub trait Agent {
    /// This is the method that will be called by the game to get the action
    /// for the seat at `player_idx`.
    fn act(&mut self, id: &uuid::Uuid, game_state: &GameState, player_idx: usize) -> AgentAction;
}

/// AgentGenerator is used to build agents for competitions where each game
/// needs a fresh agent.
pub trait AgentGenerator {
    /// This method is called before each game to build a new agent for a
    /// seat.
    fn generate(&self, player_idx: usize, game_state: &GameState) -> Box<dyn Agent>;
}

pub trait CloneAgent: Agent {
    fn clone_box(&self) -> Box<dyn Agent>;
}

impl<T> CloneAgent for T
where
    T: 'static + Agent + Clone,
{
    fn clone_box(&self) -> Box<dyn Agent> {
        Box::new(self.clone())
    }
}

pub struct CloneAgentGenerator<T> {
    agent: T,
}

impl<T> CloneAgentGenerator<T>
where
    T: CloneAgent,
{
    pub fn new(agent: T) -> Self {
        CloneAgentGenerator { agent }
    }
}

impl<T> AgentGenerator for CloneAgentGenerator<T>
where
    T: CloneAgent,
{
    fn generate(&self, _player_idx: usize, _game_state: &GameState) -> Box<dyn Agent> {
        self.agent.clone_box()
    }
}

/// Cards the seat could buy this turn: every visible card, then their own
/// reserved cards.
fn buyable_cards(game_state: &GameState, player_idx: usize) -> Vec<CardId> {
    game_state.buyable_cards(player_idx).unwrap_or_default()
}

fn is_affordable(game_state: &GameState, player_idx: usize, card: CardId) -> bool {
    game_state
        .affordability(player_idx, card)
        .is_ok_and(|a| a.affordable)
}

fn total_cost(game_state: &GameState, card: CardId) -> u32 {
    game_state.card(card).map_or(0, |c| c.total_cost())
}

/// Tokens still missing for a card once the player's wildcards are spent,
/// covering the biggest gaps first.
fn missing_after_wildcards(game_state: &GameState, player_idx: usize, card: CardId) -> Gems {
    let Ok(mut missing) = game_state.missing_tokens(player_idx, card) else {
        return Gems::default();
    };
    let mut gold = game_state
        .player(player_idx)
        .map_or(0, |p| p.tokens()[Color::Gold]);

    let mut by_need: Vec<Color> = Color::gems()
        .into_iter()
        .filter(|c| missing[*c] > 0)
        .collect();
    by_need.sort_by(|a, b| missing[*b].cmp(&missing[*a]));

    for color in by_need {
        if gold == 0 {
            break;
        }
        let used = gold.min(missing[color]);
        missing[color] -= used;
        gold -= used;
    }
    missing
}

/// Up to three distinct gem colors the bank still has, in color order.
fn diverse_colors(game_state: &GameState) -> Vec<Color> {
    Color::gems()
        .into_iter()
        .filter(|c| game_state.bank()[*c] > 0)
        .take(3)
        .collect()
}

pub use greedy::{GreedyAgent, GreedyAgentGenerator};
pub use passing::{PassingAgent, PassingAgentGenerator};
pub use random::{RandomAgent, RandomAgentGenerator};
pub use replay::VecReplayAgent;
pub use stingy::{StingyAgent, StingyAgentGenerator};
pub use value::{ValueAgent, ValueAgentGenerator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcards_cover_biggest_gap_first() {
        let mut gs = GameState::standard(0, 4).unwrap();
        // Card 7 costs three red.
        gs.give_tokens(0, Gems::from_pairs(&[(Color::Gold, 2)]));
        assert_eq!(
            Gems::from_pairs(&[(Color::Red, 1)]),
            missing_after_wildcards(&gs, 0, CardId(7))
        );
    }

    #[test]
    fn test_diverse_colors_skip_empty() {
        let mut gs = GameState::standard(0, 2).unwrap();
        gs.give_tokens(1, Gems::from_pairs(&[(Color::White, 4)]));
        assert_eq!(
            vec![Color::Blue, Color::Green, Color::Red],
            diverse_colors(&gs)
        );
    }

    #[test]
    fn test_clone_generator() {
        let gs = GameState::standard(0, 2).unwrap();
        let generator = CloneAgentGenerator::new(VecReplayAgent::new(vec![AgentAction::Buy(
            CardId(3),
        )]));
        let mut agent = generator.generate(0, &gs);
        let id = uuid::Uuid::now_v7();
        assert_eq!(AgentAction::Buy(CardId(3)), agent.act(&id, &gs, 0));
        assert_eq!(AgentAction::Pass, agent.act(&id, &gs, 0));
    }
}
