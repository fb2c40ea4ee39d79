use std::cmp::Reverse;

use crate::arena::{action::AgentAction, game_state::GameState, ledger::DOUBLE_TAKE_MIN_BANK};
use crate::core::{CardId, Color};

use super::{
    Agent, AgentGenerator, buyable_cards, diverse_colors, is_affordable, missing_after_wildcards,
    total_cost,
};

/// Plans further out than this many takes are treated as unreachable.
const MAX_PLAN_TAKES: u32 = 5;

/// Buys the cheapest card it can afford and otherwise saves toward the card
/// that is the fewest token takes away.
#[derive(Default, Debug, Clone, Copy)]
pub struct StingyAgent {}

/// Sort key for cheap first: total cost, then more colors in the cost, then
/// more points.
fn cheapness(game_state: &GameState, card: CardId) -> (u32, Reverse<usize>, Reverse<u8>) {
    match game_state.card(card) {
        Some(c) => (c.total_cost(), Reverse(c.cost_colors()), Reverse(c.points)),
        None => (u32::MAX, Reverse(0), Reverse(0)),
    }
}

/// How many token takes until `idx` could buy `card`. Zero means it's
/// affordable now, `None` that it can't be planned for with the current
/// bank.
pub fn purchase_distance(game_state: &GameState, idx: usize, card: CardId) -> Option<u32> {
    if is_affordable(game_state, idx, card) {
        return Some(0);
    }
    let bank = game_state.bank();
    let mut remaining = missing_after_wildcards(game_state, idx, card);

    let short: Vec<(Color, u8)> = remaining.iter().collect();
    if let [(color, n)] = short.as_slice() {
        if *n <= 2 && bank[*color] >= *n {
            return Some(1);
        }
    }

    let mut takes = 0;
    while !remaining.is_empty() {
        takes += 1;
        if takes > MAX_PLAN_TAKES {
            return None;
        }

        let double = Color::gems()
            .into_iter()
            .find(|c| remaining[*c] >= 2 && bank[*c] >= DOUBLE_TAKE_MIN_BANK);
        if let Some(color) = double {
            remaining[color] -= 2;
            continue;
        }

        let mut taken = 0;
        for color in Color::gems() {
            if remaining[color] > 0 && bank[color] > 0 {
                remaining[color] -= 1;
                taken += 1;
                if taken == 3 {
                    break;
                }
            }
        }
        if taken == 0 {
            return None;
        }
    }
    Some(takes)
}

impl StingyAgent {
    fn cheapest_affordable(game_state: &GameState, idx: usize) -> Option<CardId> {
        let mut cards = buyable_cards(game_state, idx);
        cards.sort_by_key(|c| cheapness(game_state, *c));
        cards
            .into_iter()
            .find(|c| is_affordable(game_state, idx, *c))
    }

    fn target(game_state: &GameState, idx: usize) -> Option<CardId> {
        game_state
            .market()
            .visible()
            .filter_map(|(_, card)| {
                purchase_distance(game_state, idx, card).map(|distance| (distance, card))
            })
            .min_by_key(|(distance, card)| (*distance, cheapness(game_state, *card)))
            .map(|(_, card)| card)
    }

    fn collect_tokens(game_state: &GameState, idx: usize) -> Option<AgentAction> {
        let bank = game_state.bank();
        if let Some(card) = Self::target(game_state, idx) {
            let missing = missing_after_wildcards(game_state, idx, card);

            let double = Color::gems()
                .into_iter()
                .find(|c| missing[*c] >= 2 && bank[*c] >= DOUBLE_TAKE_MIN_BANK);
            if let Some(color) = double {
                return Some(AgentAction::take(&[color, color]));
            }

            let needed: Vec<Color> = missing
                .iter()
                .map(|(c, _)| c)
                .filter(|c| bank[*c] > 0)
                .take(3)
                .collect();
            if !needed.is_empty() {
                return Some(AgentAction::take(&needed));
            }
        }

        // Nothing specific to save for. Doubles are the most tokens per turn.
        let double = Color::gems()
            .into_iter()
            .find(|c| bank[*c] >= DOUBLE_TAKE_MIN_BANK);
        if let Some(color) = double {
            return Some(AgentAction::take(&[color, color]));
        }
        let colors = diverse_colors(game_state);
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
        game_state
            .market()
            .visible()
            .map(|(_, card)| card)
            .min_by_key(|card| total_cost(game_state, *card))
            .map_or(AgentAction::Pass, AgentAction::Reserve)
    }
}

impl Agent for StingyAgent {
    fn act(&mut self, _id: &uuid::Uuid, game_state: &GameState, player_idx: usize) -> AgentAction {
        if let Some(card) = Self::cheapest_affordable(game_state, player_idx) {
            return AgentAction::Buy(card);
        }
        Self::collect_tokens(game_state, player_idx)
            .unwrap_or_else(|| Self::reserve(game_state, player_idx))
    }
}

#[derive(Default, Debug, Clone, Copy)]
pub struct StingyAgentGenerator;

impl AgentGenerator for StingyAgentGenerator {
    fn generate(&self, _player_idx: usize, _game_state: &GameState) -> Box<dyn Agent> {
        Box::new(StingyAgent {})
    }
}
