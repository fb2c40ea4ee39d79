use crate::arena::{GameState, Historian, action::Action, historian::HistorianError};

/// A historian that will always fail to record an action
/// and will return an error.
///
/// This historian is useful for testing the behavior of the simulation
#[derive(Default, Debug, Clone, Copy)]
pub struct FailingHistorian;

impl Historian for FailingHistorian {
    fn record_action(
        &mut self,
        _id: &uuid::Uuid,
        _game_state: &GameState,
        _action: Action,
    ) -> Result<(), HistorianError> {
        Err(HistorianError::UnableToRecordAction)
    }
}
