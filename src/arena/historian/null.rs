use super::{Historian, HistorianError};
use crate::arena::{GameState, action::Action};

/// Drops everything it's given.
#[derive(Default, Debug, Clone, Copy)]
pub struct NullHistorian;

impl Historian for NullHistorian {
    fn record_action(
        &mut self,
        _id: &uuid::Uuid,
        _game_state: &GameState,
        _action: Action,
    ) -> Result<(), HistorianError> {
        Ok(())
    }
}
