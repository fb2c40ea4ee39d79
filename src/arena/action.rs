use std::fmt;

use crate::core::{CardId, Color, Gems, TileId};

use super::errors::GameStateError;
use super::game_state::{EndReason, Purchase};
use super::ledger::TokenSelection;

/// The action an agent chose for its turn.
///
/// Token takes are validated for shape when the selection is built, so an
/// agent can't even describe a four token take.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AgentAction {
    TakeTokens(TokenSelection),
    Reserve(CardId),
    Buy(CardId),
    Pass,
}

impl AgentAction {
    /// Shortcut for building a token take. Falls back to `Pass` if the
    /// colors don't make a legal shape.
    pub fn take(colors: &[Color]) -> AgentAction {
        TokenSelection::new(colors).map_or(AgentAction::Pass, AgentAction::TakeTokens)
    }
}

impl fmt::Display for AgentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentAction::TakeTokens(selection) => write!(f, "take {selection}"),
            AgentAction::Reserve(card) => write!(f, "reserve {card}"),
            AgentAction::Buy(card) => write!(f, "buy {card}"),
            AgentAction::Pass => write!(f, "pass"),
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStartPayload {
    pub seed: u64,
    pub num_players: usize,
    pub bank: Gems,
    pub tiles: Vec<TileId>,
}

/// An action that was accepted and applied.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedActionPayload {
    pub action: AgentAction,
    pub idx: usize,
    pub round: u32,
    pub turn: u32,
    pub starting_tokens: Gems,
    pub final_tokens: Gems,
    pub final_bank: Gems,
    pub final_score: u32,
    /// Only set for purchases.
    pub purchase: Option<Purchase>,
}

/// An action the engine rejected. Nothing changed and the turn is lost.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedActionPayload {
    pub action: AgentAction,
    pub idx: usize,
    pub round: u32,
    pub turn: u32,
    pub error: GameStateError,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileClaimedPayload {
    pub idx: usize,
    pub tile: TileId,
    pub points: u8,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalRoundPayload {
    /// The seat whose action crossed the victory points.
    pub idx: usize,
    pub score: u32,
    pub round: u32,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEndPayload {
    pub reason: EndReason,
    pub round: u32,
    pub scores: Vec<u32>,
    pub winners: Vec<usize>,
}

/// Everything that happens in a simulation, in order. This is what
/// historians are fed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    GameStart(GameStartPayload),
    PlayedAction(PlayedActionPayload),
    FailedAction(FailedActionPayload),
    TileClaimed(TileClaimedPayload),
    FinalRound(FinalRoundPayload),
    /// A new round started. Carries the new round number.
    RoundAdvance(u32),
    GameEnd(GameEndPayload),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_shortcut() {
        assert!(matches!(
            AgentAction::take(&[Color::Red, Color::Blue]),
            AgentAction::TakeTokens(_)
        ));
        assert_eq!(
            AgentAction::Pass,
            AgentAction::take(&[Color::Red, Color::Red, Color::Red])
        );
    }

    #[test]
    fn test_display() {
        assert_eq!("buy #12", AgentAction::Buy(CardId(12)).to_string());
        assert_eq!("pass", AgentAction::Pass.to_string());
        assert_eq!(
            "take [red, blue]",
            AgentAction::take(&[Color::Red, Color::Blue]).to_string()
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_rejects_bad_selection_from_json() {
        let ok: AgentAction = serde_json::from_str(r#"{"TakeTokens":["Red","Red"]}"#).unwrap();
        assert_eq!(AgentAction::take(&[Color::Red, Color::Red]), ok);

        let bad = serde_json::from_str::<AgentAction>(r#"{"TakeTokens":["Gold"]}"#);
        assert!(bad.is_err());
    }
}
