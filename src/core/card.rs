use std::fmt;

use super::color::Color;
use super::gems::Gems;

/// Card strength level. Each tier has its own deck and river.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub enum Tier {
    One = 1,
    Two = 2,
    Three = 3,
}

/// All of the `Tier`'s, lowest first.
const TIERS: [Tier; 3] = [Tier::One, Tier::Two, Tier::Three];

impl Tier {
    pub fn tiers() -> [Tier; 3] {
        TIERS
    }

    pub fn from_u8(v: u8) -> Option<Tier> {
        match v {
            1 => Some(Tier::One),
            2 => Some(Tier::Two),
            3 => Some(Tier::Three),
            _ => None,
        }
    }

    /// Zero based index for per tier storage.
    pub fn idx(&self) -> usize {
        *self as usize - 1
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", *self as u8)
    }
}

/// Stable identifier of a card in the catalog.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub struct CardId(pub u16);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A development card. Immutable reference data loaded from the catalog.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub struct Card {
    pub id: CardId,
    pub tier: Tier,
    /// The gem color this card provides a permanent discount in.
    pub color: Color,
    pub points: u8,
    /// Gem cost. Gold is always zero.
    pub cost: Gems,
}

impl Card {
    /// Sum of the printed cost, ignoring discounts.
    pub fn total_cost(&self) -> u32 {
        self.cost.gem_total()
    }

    /// How many different gem colors appear in the cost.
    pub fn cost_colors(&self) -> usize {
        self.cost.iter().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_u8() {
        assert_eq!(Some(Tier::One), Tier::from_u8(1));
        assert_eq!(Some(Tier::Three), Tier::from_u8(3));
        assert_eq!(None, Tier::from_u8(0));
        assert_eq!(None, Tier::from_u8(4));
    }

    #[test]
    fn test_tier_idx() {
        let idxs: Vec<usize> = Tier::tiers().iter().map(Tier::idx).collect();
        assert_eq!(vec![0, 1, 2], idxs);
    }

    #[test]
    fn test_total_cost() {
        let card = Card {
            id: CardId(7),
            tier: Tier::One,
            color: Color::Blue,
            points: 0,
            cost: Gems::from_pairs(&[(Color::White, 2), (Color::Red, 1)]),
        };
        assert_eq!(3, card.total_cost());
        assert_eq!(2, card.cost_colors());
    }
}
