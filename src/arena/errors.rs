use thiserror::Error;

use crate::core::{CardId, DataLoadError};

/// Why an action was rejected. Every variant leaves the game state exactly as
/// it was before the action was attempted.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameStateError {
    #[error("Invalid token selection: {0}")]
    InvalidTokenSelection(String),
    #[error("Card {0} is not in any source this action can use")]
    IllegalCardReference(CardId),
    #[error("Player {player} already has {reserved} reserved cards")]
    CapacityExceeded { player: usize, reserved: usize },
    #[error("Player {player} can't afford card {card}")]
    UnaffordableCard { player: usize, card: CardId },
    #[error("Invalid player index {0}")]
    InvalidPlayerIndex(usize),
}

/// Errors building or running a `GameSimulation`.
#[derive(Error, Debug)]
pub enum GameSimulationError {
    #[error("Game state is required to build a simulation")]
    NeedGameState,
    #[error("Agent generators are required to run a competition")]
    NeedAgents,
    #[error("Expected {players} agents, one per seat, but got {agents}")]
    AgentCountMismatch { agents: usize, players: usize },
    #[error("Game on seed {seed} stopped before it was complete")]
    GameIncomplete { seed: u64 },
    #[error("Unable to load the catalog: {0}")]
    DataLoad(#[from] DataLoadError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_game_names_the_seed() {
        let err = GameSimulationError::GameIncomplete { seed: 42 };
        assert_eq!(
            "Game on seed 42 stopped before it was complete",
            err.to_string()
        );
    }
}
