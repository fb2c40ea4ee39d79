use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::card::{CardId, Tier};
use super::catalog::Catalog;
use super::tile::TileId;

/// The seeded ordering of every deck and of the tile stack for one game.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shuffle {
    /// One sequence per tier, `Tier::idx` order. Index 0 is drawn first.
    pub decks: [Vec<CardId>; 3],
    pub tiles: Vec<TileId>,
}

impl Shuffle {
    pub fn deck(&self, tier: Tier) -> &[CardId] {
        &self.decks[tier.idx()]
    }
}

/// Produce the deck and tile orderings for `seed`.
///
/// The seed is the only source of randomness: a single rng is seeded from it
/// and then used to shuffle tier one, two, three and the tiles in that order.
/// Calling this twice with the same seed and catalog gives identical output.
///
/// ```
/// use splendid_cards::core::{Catalog, shuffle};
///
/// let catalog = Catalog::load().unwrap();
/// assert_eq!(shuffle(&catalog, 42), shuffle(&catalog, 42));
/// assert_ne!(shuffle(&catalog, 42), shuffle(&catalog, 43));
/// ```
pub fn shuffle(catalog: &Catalog, seed: u64) -> Shuffle {
    let mut rng = StdRng::seed_from_u64(seed);

    let decks = Tier::tiers().map(|tier| {
        // card_ids is in id order so the input to the shuffle is stable.
        let mut ids = catalog.card_ids(tier);
        ids.shuffle(&mut rng);
        ids
    });

    let mut tiles = catalog.tile_ids();
    tiles.shuffle(&mut rng);

    Shuffle { decks, tiles }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_output() {
        let catalog = Catalog::load().unwrap();
        for seed in [0, 1, 420, u64::MAX] {
            assert_eq!(shuffle(&catalog, seed), shuffle(&catalog, seed));
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let catalog = Catalog::load().unwrap();
        let outputs: Vec<Shuffle> = (0..10).map(|seed| shuffle(&catalog, seed)).collect();
        for (i, a) in outputs.iter().enumerate() {
            for b in outputs.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_is_a_permutation_partitioned_by_tier() {
        let catalog = Catalog::load().unwrap();
        let shuffled = shuffle(&catalog, 7);

        for tier in Tier::tiers() {
            let mut deck = shuffled.deck(tier).to_vec();
            deck.sort();
            assert_eq!(catalog.card_ids(tier), deck);
            assert!(
                shuffled
                    .deck(tier)
                    .iter()
                    .all(|id| catalog.card(*id).map(|c| c.tier) == Some(tier))
            );
        }

        let mut tiles = shuffled.tiles.clone();
        tiles.sort();
        assert_eq!(catalog.tile_ids(), tiles);
    }
}
