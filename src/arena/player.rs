use crate::core::{CardId, Color, Gems, TileId};

/// A player may hold at most this many reserved cards at once.
pub const MAX_RESERVED: usize = 3;

/// Everything a single seat holds.
///
/// Owned cards and claimed tiles only ever grow. Points are not stored here;
/// the score is always summed from the catalog when asked for.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerState {
    tokens: Gems,
    /// Owned cards grouped by their color, `Color::idx` order.
    owned: [Vec<CardId>; 5],
    reserved: Vec<CardId>,
    tiles: Vec<TileId>,
}

impl PlayerState {
    pub fn tokens(&self) -> &Gems {
        &self.tokens
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut Gems {
        &mut self.tokens
    }

    /// Cards of one color this player owns, in purchase order. Always empty
    /// for the wildcard.
    pub fn owned(&self, color: Color) -> &[CardId] {
        if color.is_gem() {
            &self.owned[color.idx()]
        } else {
            &[]
        }
    }

    /// Every owned card grouped by color.
    pub fn owned_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.owned.iter().flatten().copied()
    }

    pub fn num_owned(&self) -> usize {
        self.owned.iter().map(Vec::len).sum()
    }

    pub fn reserved(&self) -> &[CardId] {
        &self.reserved
    }

    pub fn can_reserve(&self) -> bool {
        self.reserved.len() < MAX_RESERVED
    }

    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    /// How much cheaper every cost of this color is for this player.
    pub fn discount(&self, color: Color) -> u8 {
        u8::try_from(self.owned(color).len()).unwrap_or(u8::MAX)
    }

    /// All discounts at once, gold always zero. Also the owned card counts
    /// that tile requirements are checked against.
    pub fn discounts(&self) -> Gems {
        let mut discounts = Gems::default();
        for color in Color::gems() {
            discounts[color] = self.discount(color);
        }
        discounts
    }

    pub(crate) fn add_owned(&mut self, color: Color, card: CardId) {
        if color.is_gem() {
            self.owned[color.idx()].push(card);
        }
    }

    pub(crate) fn add_reserved(&mut self, card: CardId) {
        self.reserved.push(card);
    }

    /// Returns false if the card wasn't reserved by this player.
    pub(crate) fn remove_reserved(&mut self, card: CardId) -> bool {
        match self.reserved.iter().position(|c| *c == card) {
            Some(pos) => {
                self.reserved.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn claim_tile(&mut self, tile: TileId) {
        self.tiles.push(tile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discounts_follow_owned_cards() {
        let mut player = PlayerState::default();
        player.add_owned(Color::Red, CardId(1));
        player.add_owned(Color::Red, CardId(2));
        player.add_owned(Color::Blue, CardId(3));
        // Gold is never a card color.
        player.add_owned(Color::Gold, CardId(4));

        assert_eq!(2, player.discount(Color::Red));
        assert_eq!(0, player.discount(Color::Gold));
        assert_eq!(
            Gems::from_pairs(&[(Color::Red, 2), (Color::Blue, 1)]),
            player.discounts()
        );
        assert_eq!(3, player.num_owned());
        assert_eq!(&[CardId(1), CardId(2)], player.owned(Color::Red));
    }

    #[test]
    fn test_reserved_cap() {
        let mut player = PlayerState::default();
        for i in 0..MAX_RESERVED {
            assert!(player.can_reserve());
            player.add_reserved(CardId(i as u16));
        }
        assert!(!player.can_reserve());

        assert!(player.remove_reserved(CardId(1)));
        assert!(!player.remove_reserved(CardId(1)));
        assert!(player.can_reserve());
        assert_eq!(&[CardId(0), CardId(2)], player.reserved());
    }
}
