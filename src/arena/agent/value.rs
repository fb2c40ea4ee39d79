use crate::arena::{
    action::AgentAction, game_state::GameState, ledger::DOUBLE_TAKE_MIN_BANK, player::PlayerState,
};
use crate::core::{CardId, Color};

use super::{Agent, AgentGenerator, buyable_cards, is_affordable};

/// Visible cards at most this many tokens away count as targets when
/// weighing a token take.
const TARGET_MAX_MISSING: u32 = 3;

/// Holding more tokens than this makes another take less attractive.
const CROWDED_HAND: u32 = 7;

/// Scores every legal buy, reservation and token take and plays the highest
/// scoring one. The first option seen wins ties.
///
/// Card points dominate the score. Cards of colors it owns few of, cheap
/// points and progress toward a bonus tile add to it. Reservations are
/// worth a share of the purchase plus the wildcard, and token takes are
/// worth whatever they bring reserved and nearly affordable cards closer.
#[derive(Default, Debug, Clone, Copy)]
pub struct ValueAgent {}

impl ValueAgent {
    fn purchase_value(game_state: &GameState, player: &PlayerState, card: CardId) -> f64 {
        let Some(card) = game_state.card(card) else {
            return f64::MIN;
        };
        let points = f64::from(card.points);
        let owned = player.discount(card.color);

        let mut value = points * 10.0 + f64::from(5u8.saturating_sub(owned));
        let total = card.total_cost();
        if total > 0 {
            value += points / f64::from(total) * 5.0;
        }

        let mut after = player.discounts();
        after[card.color] += 1;
        for tile in game_state
            .available_tiles()
            .iter()
            .filter_map(|id| game_state.tile(*id))
        {
            let required = tile.requirement[card.color];
            if required == 0 || owned >= required {
                continue;
            }
            let (sum, colors) = tile
                .requirement
                .iter()
                .fold((0.0, 0u32), |(sum, colors), (color, count)| {
                    let share = (f64::from(after[color]) / f64::from(count)).min(1.0);
                    (sum + share, colors + 1)
                });
            let completion = sum / f64::from(colors);

            value += if owned + 1 >= required {
                25.0 + f64::from(tile.points) * 5.0
            } else if completion >= 0.75 {
                20.0
            } else if completion >= 0.5 {
                15.0
            } else {
                10.0
            };
        }
        value
    }

    fn reservation_value(game_state: &GameState, player: &PlayerState, card: CardId) -> f64 {
        let mut value = Self::purchase_value(game_state, player, card) * 0.6;
        if game_state.bank()[Color::Gold] > 0 && player.tokens()[Color::Gold] < 5 {
            value += 5.0;
        }
        if player.reserved().len() >= 2 {
            value -= 5.0;
        }
        value
    }

    /// Visible cards within a few tokens of being affordable.
    fn target_cards(game_state: &GameState, idx: usize) -> Vec<CardId> {
        game_state
            .market()
            .visible()
            .map(|(_, card)| card)
            .filter(|card| {
                game_state
                    .missing_tokens(idx, *card)
                    .is_ok_and(|m| m.total() <= TARGET_MAX_MISSING)
            })
            .collect()
    }

    fn token_value(
        game_state: &GameState,
        player: &PlayerState,
        idx: usize,
        colors: &[Color],
    ) -> f64 {
        let mut value = 5.0;

        let mut reserved_value = 0.0;
        for card in player.reserved() {
            let Ok(missing) = game_state.missing_tokens(idx, *card) else {
                continue;
            };
            let mut helpful = 0u32;
            for color in colors {
                if missing[*color] > 0 {
                    helpful += 1;
                    let repeats = colors.iter().filter(|c| *c == color).count();
                    if repeats > 1 && missing[*color] > 1 {
                        helpful += 1;
                    }
                }
            }
            let points = game_state.card(*card).map_or(0, |c| c.points).max(1);
            reserved_value += f64::from(helpful * 3 * u32::from(points));
        }
        value += reserved_value;

        for card in Self::target_cards(game_state, idx) {
            let Ok(missing) = game_state.missing_tokens(idx, card) else {
                continue;
            };
            let helpful = colors.iter().filter(|c| missing[**c] > 0).count();
            value += helpful as f64 * 2.0;
        }

        if reserved_value == 0.0 && colors.len() == 3 {
            value += 3.0;
        }
        if player.tokens().total() > CROWDED_HAND {
            value -= 3.0;
        }
        value
    }

    /// Every take the bank allows: doubles, then three distinct colors, then
    /// singles.
    fn token_options(game_state: &GameState) -> Vec<Vec<Color>> {
        let bank = game_state.bank();
        let stocked: Vec<Color> = Color::gems()
            .into_iter()
            .filter(|c| bank[*c] > 0)
            .collect();

        let mut options: Vec<Vec<Color>> = stocked
            .iter()
            .filter(|c| bank[**c] >= DOUBLE_TAKE_MIN_BANK)
            .map(|c| vec![*c, *c])
            .collect();
        for (i, first) in stocked.iter().enumerate() {
            for (j, second) in stocked.iter().enumerate().skip(i + 1) {
                for third in stocked.iter().skip(j + 1) {
                    options.push(vec![*first, *second, *third]);
                }
            }
        }
        options.extend(stocked.iter().map(|c| vec![*c]));
        options
    }

    fn best_action(game_state: &GameState, idx: usize) -> Option<(AgentAction, f64)> {
        let player = game_state.player(idx).ok()?;

        let buys = buyable_cards(game_state, idx)
            .into_iter()
            .filter(|card| is_affordable(game_state, idx, *card))
            .map(|card| {
                (
                    AgentAction::Buy(card),
                    Self::purchase_value(game_state, player, card),
                )
            });
        let reservations = game_state
            .market()
            .visible()
            .filter(|_| player.can_reserve())
            .map(|(_, card)| {
                (
                    AgentAction::Reserve(card),
                    Self::reservation_value(game_state, player, card),
                )
            });
        let takes = Self::token_options(game_state).into_iter().map(|colors| {
            let value = Self::token_value(game_state, player, idx, &colors);
            (AgentAction::take(&colors), value)
        });

        buys.chain(reservations)
            .chain(takes)
            .fold(None, |best, (action, value)| match best {
                Some((_, best_value)) if value <= best_value => best,
                _ => Some((action, value)),
            })
    }
}

impl Agent for ValueAgent {
    fn act(&mut self, _id: &uuid::Uuid, game_state: &GameState, player_idx: usize) -> AgentAction {
        Self::best_action(game_state, player_idx).map_or(AgentAction::Pass, |(action, _)| action)
    }
}

#[derive(Default, Debug, Clone, Copy)]
pub struct ValueAgentGenerator;

impl AgentGenerator for ValueAgentGenerator {
    fn generate(&self, _player_idx: usize, _game_state: &GameState) -> Box<dyn Agent> {
        Box::new(ValueAgent {})
    }
}
