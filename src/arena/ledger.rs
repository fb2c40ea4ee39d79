//! Token economy rules: which token takes are legal and how a card cost is
//! paid out of a player's holding.
//!
//! Tokens are never created or destroyed. Taking moves them bank to player,
//! paying moves them player to bank, so the sum over the bank and every
//! holding stays what it was when the game was set up.

use std::fmt;

use crate::core::{Color, Gems};

use super::errors::GameStateError;

/// A double take of one color is only allowed while the bank holds at least
/// this many of it.
pub const DOUBLE_TAKE_MIN_BANK: u8 = 4;

/// The most tokens a single take can pick up.
pub const MAX_TOKENS_PER_TAKE: usize = 3;

/// A token take that has the right shape: one to three gem colors, either all
/// distinct or exactly two of the same color.
///
/// Whether the bank can actually supply it is checked when it's applied with
/// [`TokenSelection::check_bank`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Color>", into = "Vec<Color>")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenSelection {
    colors: Vec<Color>,
}

impl TokenSelection {
    /// Validate the shape of a take.
    ///
    /// ```
    /// use splendid_cards::arena::ledger::TokenSelection;
    /// use splendid_cards::core::Color;
    ///
    /// assert!(TokenSelection::new(&[Color::Red, Color::Blue, Color::White]).is_ok());
    /// assert!(TokenSelection::new(&[Color::Red, Color::Red]).is_ok());
    /// assert!(TokenSelection::new(&[Color::Red, Color::Red, Color::Blue]).is_err());
    /// assert!(TokenSelection::new(&[Color::Gold]).is_err());
    /// ```
    pub fn new(colors: &[Color]) -> Result<Self, GameStateError> {
        if colors.is_empty() || colors.len() > MAX_TOKENS_PER_TAKE {
            return Err(GameStateError::InvalidTokenSelection(format!(
                "must take 1 to {MAX_TOKENS_PER_TAKE} tokens, got {}",
                colors.len()
            )));
        }
        if colors.contains(&Color::Gold) {
            return Err(GameStateError::InvalidTokenSelection(
                "the wildcard can't be taken directly".to_string(),
            ));
        }
        let distinct = colors
            .iter()
            .enumerate()
            .all(|(i, c)| !colors[..i].contains(c));
        // Two of a kind is the only repeat allowed.
        if !distinct && colors.len() != 2 {
            return Err(GameStateError::InvalidTokenSelection(format!(
                "colors must be distinct when taking {}",
                colors.len()
            )));
        }
        Ok(Self {
            colors: colors.to_vec(),
        })
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Is this the two of one color take?
    pub fn is_double(&self) -> bool {
        self.colors.len() == 2 && self.colors[0] == self.colors[1]
    }

    /// The take as per color counts.
    pub fn as_gems(&self) -> Gems {
        let mut gems = Gems::default();
        for c in &self.colors {
            gems[*c] += 1;
        }
        gems
    }

    /// Can the bank supply this take right now?
    pub fn check_bank(&self, bank: &Gems) -> Result<(), GameStateError> {
        if self.is_double() {
            let color = self.colors[0];
            if bank[color] < DOUBLE_TAKE_MIN_BANK {
                return Err(GameStateError::InvalidTokenSelection(format!(
                    "can't take two {color} with only {} in the bank",
                    bank[color]
                )));
            }
            return Ok(());
        }
        match self.colors.iter().find(|c| bank[**c] == 0) {
            Some(color) => Err(GameStateError::InvalidTokenSelection(format!(
                "no {color} tokens left in the bank"
            ))),
            None => Ok(()),
        }
    }
}

impl TryFrom<Vec<Color>> for TokenSelection {
    type Error = GameStateError;
    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        TokenSelection::new(&colors)
    }
}

impl From<TokenSelection> for Vec<Color> {
    fn from(selection: TokenSelection) -> Self {
        selection.colors
    }
}

impl fmt::Display for TokenSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.colors.iter().map(Color::to_string).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// Result of checking a card cost against a player.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordability {
    /// Can the player pay right now?
    pub affordable: bool,
    /// The exact tokens that would change hands. Gem entries are what comes
    /// out of the player's own colored tokens, the gold entry is the total
    /// shortfall covered by wildcards.
    pub payment: Gems,
}

impl Affordability {
    pub fn wildcards_needed(&self) -> u8 {
        self.payment[Color::Gold]
    }
}

/// Work out what a player pays for a cost.
///
/// Per gem color the player owes `cost - discount` (never below zero). They
/// pay as much of that as they can from their own tokens of that color; what
/// is left over adds to a single wildcard bill. The cost is affordable when
/// the player holds at least that many wildcards.
///
/// This is a single greedy pass, each color on its own. There's no attempt
/// to spread wildcards cleverly across colors.
///
/// ```
/// use splendid_cards::arena::ledger::resolve_payment;
/// use splendid_cards::core::{Color, Gems};
///
/// let cost = Gems::from_pairs(&[(Color::White, 3)]);
/// let discounts = Gems::from_pairs(&[(Color::White, 1)]);
/// let holding = Gems::from_pairs(&[(Color::White, 1), (Color::Gold, 1)]);
///
/// let result = resolve_payment(&cost, &discounts, &holding);
/// assert!(result.affordable);
/// assert_eq!(
///     Gems::from_pairs(&[(Color::White, 1), (Color::Gold, 1)]),
///     result.payment
/// );
/// ```
pub fn resolve_payment(cost: &Gems, discounts: &Gems, holding: &Gems) -> Affordability {
    let mut payment = Gems::default();
    let mut shortfall: u32 = 0;

    for color in Color::gems() {
        let required = cost[color].saturating_sub(discounts[color]);
        if required == 0 {
            continue;
        }
        let own = required.min(holding[color]);
        payment[color] = own;
        shortfall += u32::from(required - own);
    }

    payment[Color::Gold] = u8::try_from(shortfall).unwrap_or(u8::MAX);
    Affordability {
        affordable: u32::from(holding[Color::Gold]) >= shortfall,
        payment,
    }
}

/// Per gem color, how many more tokens the player would need to hold to pay
/// without any wildcards.
pub fn missing_tokens(cost: &Gems, discounts: &Gems, holding: &Gems) -> Gems {
    let mut missing = Gems::default();
    for color in Color::gems() {
        let required = cost[color].saturating_sub(discounts[color]);
        missing[color] = required.saturating_sub(holding[color]);
    }
    missing
}
