use crate::arena::{action::AgentAction, game_state::GameState, ledger::DOUBLE_TAKE_MIN_BANK};
use crate::core::{CardId, Color, Tier};

use super::{
    Agent, AgentGenerator, buyable_cards, diverse_colors, is_affordable, missing_after_wildcards,
    total_cost,
};

/// Always buys the most expensive card it can afford.
///
/// When nothing is affordable it collects tokens toward the most expensive
/// card it could buy after one more take, and failing that reserves from the
/// highest tier.
#[derive(Default, Debug, Clone, Copy)]
pub struct GreedyAgent {}

impl GreedyAgent {
    fn most_expensive_affordable(game_state: &GameState, idx: usize) -> Option<CardId> {
        let mut cards = buyable_cards(game_state, idx);
        // Stable sort keeps river order between equal costs.
        cards.sort_by_key(|c| std::cmp::Reverse(total_cost(game_state, *c)));
        cards
            .into_iter()
            .find(|c| is_affordable(game_state, idx, *c))
    }

    /// Could a single take close the gap to this card?
    fn one_take_away(game_state: &GameState, idx: usize, card: CardId) -> bool {
        let missing = missing_after_wildcards(game_state, idx, card);
        let bank = game_state.bank();
        let short: Vec<(Color, u8)> = missing.iter().collect();
        match short.as_slice() {
            [(color, 2)] => bank[*color] >= DOUBLE_TAKE_MIN_BANK,
            _ => short.len() <= 3 && short.iter().all(|(c, n)| *n == 1 && bank[*c] > 0),
        }
    }

    fn target(game_state: &GameState, idx: usize) -> Option<CardId> {
        let visible: Vec<CardId> = game_state.market().visible().map(|(_, c)| c).collect();
        let close = visible
            .iter()
            .copied()
            .filter(|c| Self::one_take_away(game_state, idx, *c))
            .max_by_key(|c| total_cost(game_state, *c));
        // Otherwise aim for whatever needs the fewest tokens.
        close.or_else(|| {
            visible
                .iter()
                .copied()
                .min_by_key(|c| missing_after_wildcards(game_state, idx, *c).total())
        })
    }

    fn collect_tokens(game_state: &GameState, idx: usize) -> Option<AgentAction> {
        let needed: Vec<Color> = Self::target(game_state, idx)
            .map(|card| missing_after_wildcards(game_state, idx, card))
            .map(|missing| {
                missing
                    .iter()
                    .map(|(c, _)| c)
                    .filter(|c| game_state.bank()[*c] > 0)
                    .take(3)
                    .collect()
            })
            .unwrap_or_default();

        let colors = if needed.is_empty() {
            diverse_colors(game_state)
        } else {
            needed
        };
        if colors.is_empty() {
            None
        } else {
            Some(AgentAction::take(&colors))
        }
    }

    fn reserve(game_state: &GameState, idx: usize) -> AgentAction {
        let can_reserve = game_state.player(idx).is_ok_and(|p| p.can_reserve());
        if !can_reserve {
            return AgentAction::Pass;
        }
        [Tier::Three, Tier::Two, Tier::One]
            .into_iter()
            .find_map(|tier| game_state.river(tier).first().copied())
            .map_or(AgentAction::Pass, AgentAction::Reserve)
    }
}

impl Agent for GreedyAgent {
    fn act(&mut self, _id: &uuid::Uuid, game_state: &GameState, player_idx: usize) -> AgentAction {
        if let Some(card) = Self::most_expensive_affordable(game_state, player_idx) {
            return AgentAction::Buy(card);
        }
        Self::collect_tokens(game_state, player_idx)
            .unwrap_or_else(|| Self::reserve(game_state, player_idx))
    }
}

#[derive(Default, Debug, Clone, Copy)]
pub struct GreedyAgentGenerator;

impl AgentGenerator for GreedyAgentGenerator {
    fn generate(&self, _player_idx: usize, _game_state: &GameState) -> Box<dyn Agent> {
        Box::new(GreedyAgent {})
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::{GameSimulationBuilder, test_util::assert_valid_game_state};
    use crate::core::Gems;

    use super::*;

    #[test]
    fn test_buys_most_expensive() {
        let mut game_state = GameState::standard(3, 4).unwrap();
        game_state.give_tokens(0, Gems::uniform(7, 5));

        let id = uuid::Uuid::now_v7();
        let action = GreedyAgent::default().act(&id, &game_state, 0);
        let AgentAction::Buy(card) = action else {
            panic!("expected a purchase, got {action:?}");
        };
        let bought = total_cost(&game_state, card);
        for (_, other) in game_state.market().visible() {
            if game_state.affordability(0, other).unwrap().affordable {
                assert!(total_cost(&game_state, other) <= bought);
            }
        }
    }

    #[test]
    fn test_takes_tokens_when_broke() {
        let game_state = GameState::standard(3, 2).unwrap();
        let id = uuid::Uuid::now_v7();
        let action = GreedyAgent::default().act(&id, &game_state, 0);
        assert!(matches!(action, AgentAction::TakeTokens(_)));
    }

    #[test]
    fn test_reserves_when_bank_is_dry() {
        let mut game_state = GameState::standard(3, 2).unwrap();
        game_state.give_tokens(1, Gems::uniform(4, 0));
        let id = uuid::Uuid::now_v7();
        let action = GreedyAgent::default().act(&id, &game_state, 0);
        assert_eq!(
            AgentAction::Reserve(game_state.river(Tier::Three)[0]),
            action
        );
    }

    #[test_log::test]
    fn test_greedy_game() {
        let game_state = GameState::standard(11, 2).unwrap();
        let mut sim = GameSimulationBuilder::default()
            .game_state(game_state)
            .agents(vec![Box::new(GreedyAgent {}), Box::new(GreedyAgent {})])
            .max_rounds(Some(100))
            .build()
            .unwrap();
        sim.run();

        assert!(sim.game_state.is_complete());
        assert_valid_game_state(&sim.game_state);
    }
}
