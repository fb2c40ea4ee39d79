use thiserror::Error;

use super::{GameState, action::Action};

/// HistorianError is the error type for historian implementations.
#[derive(Error, Debug)]
pub enum HistorianError {
    #[error("Unable to record action")]
    UnableToRecordAction,
    #[error("Borrow Mut Error: {0}")]
    BorrowMutError(#[from] std::cell::BorrowMutError),
    #[error("Borrow Error: {0}")]
    BorrowError(#[from] std::cell::BorrowError),
}

/// Historians are how the simulation reports what is happening while a game
/// is played. Every accepted or rejected action, tile claim, round change and
/// the end of the game is handed to each historian in order.
///
/// This is useful for logging, debugging, replays and for gathering
/// statistics over many games.
pub trait Historian {
    /// This method is called by the simulation when an action is recorded.
    ///
    /// # Arguments
    /// - `id` - The id of the simulation that the action was recorded on.
    /// - `game_state` - The game state after the action was applied
    /// - `action` - What happened
    ///
    /// # Returns
    /// - `Ok(())` if the action was recorded successfully
    /// - `Err(HistorianError)` if there was an error recording the action.
    ///
    /// Returning an error will cause the historian to be dropped from the
    /// `GameSimulation`.
    fn record_action(
        &mut self,
        id: &uuid::Uuid,
        game_state: &GameState,
        action: Action,
    ) -> Result<(), HistorianError>;
}

/// Builds a fresh historian for each game of a competition.
pub trait HistorianGenerator {
    fn generate(&self, game_state: &GameState) -> Box<dyn Historian>;
}

pub trait CloneHistorian: Historian {
    fn clone_box(&self) -> Box<dyn Historian>;
}

impl<T> CloneHistorian for T
where
    T: 'static + Historian + Clone,
{
    fn clone_box(&self) -> Box<dyn Historian> {
        Box::new(self.clone())
    }
}

/// Hands out clones of a single historian. Cloning a `VecHistorian` shares
/// its storage, so every game in a competition lands in the same vector.
pub struct CloneHistorianGenerator<T> {
    historian: T,
}

impl<T> CloneHistorianGenerator<T>
where
    T: CloneHistorian,
{
    pub fn new(historian: T) -> Self {
        CloneHistorianGenerator { historian }
    }
}

impl<T> HistorianGenerator for CloneHistorianGenerator<T>
where
    T: CloneHistorian,
{
    fn generate(&self, _game_state: &GameState) -> Box<dyn Historian> {
        self.historian.clone_box()
    }
}

mod failing;
mod fn_historian;
mod null;
mod vec;

pub use failing::FailingHistorian;
pub use fn_historian::FnHistorian;
pub use null::NullHistorian;
pub use vec::{HistoryRecord, VecHistorian};
