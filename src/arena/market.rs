use std::collections::VecDeque;

use tracing::{Level, event};

use crate::core::{CardId, Shuffle, Tier};

/// How many face up cards each tier shows.
pub const RIVER_SIZE: usize = 4;

/// One tier's draw pile and its face up window.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierRow {
    deck: VecDeque<CardId>,
    river: Vec<CardId>,
}

impl TierRow {
    fn deal(deck: &[CardId]) -> Self {
        let mut deck: VecDeque<CardId> = deck.iter().copied().collect();
        let mut river = Vec::with_capacity(RIVER_SIZE);
        while river.len() < RIVER_SIZE {
            match deck.pop_front() {
                Some(card) => river.push(card),
                None => break,
            }
        }
        Self { deck, river }
    }

    /// Take a card out of the river and refill from the deck if it has any
    /// cards left. Returns the refilled card.
    fn remove(&mut self, card: CardId) -> Option<Option<CardId>> {
        let pos = self.river.iter().position(|c| *c == card)?;
        self.river.remove(pos);
        let refill = self.deck.pop_front();
        if let Some(next) = refill {
            self.river.push(next);
        }
        Some(refill)
    }
}

/// The three tiers of face up cards and the decks behind them.
///
/// Cards only ever leave the market. Each removal from a river immediately
/// pulls the next card from that tier's deck, so a river is only short of
/// four once its deck has run dry.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    rows: [TierRow; 3],
}

impl Market {
    /// Deal the opening rivers from the front of each shuffled deck.
    pub fn new(shuffle: &Shuffle) -> Self {
        Self {
            rows: Tier::tiers().map(|tier| TierRow::deal(shuffle.deck(tier))),
        }
    }

    pub fn river(&self, tier: Tier) -> &[CardId] {
        &self.rows[tier.idx()].river
    }

    /// Number of cards still face down. The order is hidden from players.
    pub fn deck_len(&self, tier: Tier) -> usize {
        self.rows[tier.idx()].deck.len()
    }

    /// Which river is this card showing in, if any.
    pub fn locate(&self, card: CardId) -> Option<Tier> {
        Tier::tiers()
            .into_iter()
            .find(|tier| self.river(*tier).contains(&card))
    }

    /// Every face up card, tier one first.
    pub fn visible(&self) -> impl Iterator<Item = (Tier, CardId)> + '_ {
        Tier::tiers().into_iter().flat_map(move |tier| {
            self.river(tier).iter().map(move |card| (tier, *card))
        })
    }

    /// Remove a card from the river of `tier` because it was bought,
    /// refilling the slot.
    ///
    /// Returns `None` when the card isn't showing in that river, in which
    /// case nothing changed.
    pub fn remove_from_river(&mut self, tier: Tier, card: CardId) -> Option<CardId> {
        let refill = self.rows[tier.idx()].remove(card)?;
        event!(Level::DEBUG, ?tier, ?card, ?refill, "river_refill");
        Some(card)
    }

    /// Same movement as a purchase. Kept separate so the event stream says
    /// why the card left.
    pub fn reserve_from_river(&mut self, tier: Tier, card: CardId) -> Option<CardId> {
        let refill = self.rows[tier.idx()].remove(card)?;
        event!(Level::DEBUG, ?tier, ?card, ?refill, "river_refill_after_reserve");
        Some(card)
    }

    /// Total cards left in the market, face up and face down.
    pub fn len(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.deck.len() + row.river.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
