use std::fmt;
use std::ops::{Index, IndexMut};

use super::color::{Color, NUM_COLORS};

/// A count per token color.
///
/// This is the shape of a card cost, a tile requirement, the bank, a player's
/// token holding and a payment. Costs and requirements simply leave the gold
/// entry at zero.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, Default)]
pub struct Gems {
    counts: [u8; NUM_COLORS],
}

impl Gems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(color, count)` pairs. Repeated colors add up.
    ///
    /// ```
    /// use splendid_cards::core::{Color, Gems};
    ///
    /// let cost = Gems::from_pairs(&[(Color::White, 3), (Color::Red, 1)]);
    /// assert_eq!(3, cost[Color::White]);
    /// assert_eq!(4, cost.total());
    /// ```
    pub fn from_pairs(pairs: &[(Color, u8)]) -> Self {
        let mut gems = Gems::default();
        for (color, count) in pairs {
            gems[*color] += count;
        }
        gems
    }

    /// Every gem color set to `count` and gold set to `gold`.
    pub fn uniform(count: u8, gold: u8) -> Self {
        let mut gems = Gems::default();
        for c in Color::gems() {
            gems[c] = count;
        }
        gems[Color::Gold] = gold;
        gems
    }

    pub fn get(&self, color: Color) -> u8 {
        self.counts[color.idx()]
    }

    /// Sum over every color, wildcard included.
    pub fn total(&self) -> u32 {
        self.counts.iter().map(|c| u32::from(*c)).sum()
    }

    /// Sum over the gem colors only.
    pub fn gem_total(&self) -> u32 {
        Color::gems().iter().map(|c| u32::from(self.get(*c))).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|c| *c == 0)
    }

    /// Iterate the colors with a non zero count.
    pub fn iter(&self) -> impl Iterator<Item = (Color, u8)> + '_ {
        Color::all()
            .into_iter()
            .map(|c| (c, self.get(c)))
            .filter(|(_, n)| *n > 0)
    }

    /// Does `self` hold at least as much as `other` in every color?
    pub fn covers(&self, other: &Gems) -> bool {
        Color::all().iter().all(|c| self.get(*c) >= other.get(*c))
    }

    /// Per color subtraction. `None` when any color would go negative, in
    /// which case nothing is changed.
    pub fn checked_sub(&self, other: &Gems) -> Option<Gems> {
        let mut out = *self;
        for c in Color::all() {
            out[c] = self.get(c).checked_sub(other.get(c))?;
        }
        Some(out)
    }

    pub fn saturating_add(&self, other: &Gems) -> Gems {
        let mut out = *self;
        for c in Color::all() {
            out[c] = self.get(c).saturating_add(other.get(c));
        }
        out
    }
}

impl Index<Color> for Gems {
    type Output = u8;
    fn index(&self, color: Color) -> &u8 {
        &self.counts[color.idx()]
    }
}

impl IndexMut<Color> for Gems {
    fn index_mut(&mut self, color: Color) -> &mut u8 {
        &mut self.counts[color.idx()]
    }
}

impl fmt::Display for Gems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (color, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{color}:{count}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform() {
        let bank = Gems::uniform(4, 5);
        assert_eq!(25, bank.total());
        assert_eq!(20, bank.gem_total());
        assert_eq!(5, bank[Color::Gold]);
    }

    #[test]
    fn test_checked_sub_never_goes_negative() {
        let a = Gems::from_pairs(&[(Color::Red, 2), (Color::Gold, 1)]);
        let b = Gems::from_pairs(&[(Color::Red, 1), (Color::Gold, 1)]);
        assert_eq!(
            Some(Gems::from_pairs(&[(Color::Red, 1)])),
            a.checked_sub(&b)
        );
        assert_eq!(None, b.checked_sub(&a));
    }

    #[test]
    fn test_covers() {
        let holding = Gems::from_pairs(&[(Color::Blue, 2), (Color::Green, 1)]);
        assert!(holding.covers(&Gems::from_pairs(&[(Color::Blue, 2)])));
        assert!(!holding.covers(&Gems::from_pairs(&[(Color::Blue, 3)])));
        assert!(holding.covers(&Gems::default()));
    }

    #[test]
    fn test_display_skips_zero() {
        let g = Gems::from_pairs(&[(Color::White, 1), (Color::Gold, 1)]);
        assert_eq!("{white:1, gold:1}", g.to_string());
        assert_eq!("{}", Gems::default().to_string());
    }
}
