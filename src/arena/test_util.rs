use crate::core::Color;

use super::game_state::GameState;
use super::player::MAX_RESERVED;

/// Bank plus every holding must still add up to the starting bank.
pub fn assert_tokens_conserved(game_state: &GameState) {
    assert_eq!(
        *game_state.starting_bank(),
        game_state.total_tokens(),
        "tokens were created or destroyed"
    );
}

pub fn assert_valid_game_state(game_state: &GameState) {
    assert_tokens_conserved(game_state);

    // No river ever shows more than four and every visible card is real.
    for (tier, card) in game_state.market().visible() {
        assert!(game_state.river(tier).len() <= 4);
        assert_eq!(Some(tier), game_state.card(card).map(|c| c.tier));
    }

    for player in game_state.players() {
        assert!(player.reserved().len() <= MAX_RESERVED);
        // Cards are filed under their own color.
        for color in Color::gems() {
            for card in player.owned(color) {
                assert_eq!(Some(color), game_state.card(*card).map(|c| c.color));
            }
        }
        for tile in player.tiles() {
            assert!(!game_state.available_tiles().contains(tile));
        }
    }

    assert!(game_state.to_act_idx < game_state.num_players());
    assert!(game_state.round >= 1);
}
