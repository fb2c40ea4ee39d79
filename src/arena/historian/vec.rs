use std::{cell::RefCell, rc::Rc};

use crate::arena::{GameState, action::Action};

use super::{Historian, HistorianError};

#[derive(Debug, Clone)]
pub struct HistoryRecord {
    pub before_game_state: Option<GameState>,
    pub action: Action,
    pub after_game_state: GameState,
}

/// VecHistorian is a historian that will
/// append each action to a vector.
#[derive(Debug, Clone)]
pub struct VecHistorian {
    previous: Option<GameState>,
    records: Rc<RefCell<Vec<HistoryRecord>>>,
}

impl VecHistorian {
    /// Create a new storage for the historian
    /// that can be introspected later.
    pub fn new_storage() -> Rc<RefCell<Vec<HistoryRecord>>> {
        Rc::new(RefCell::new(vec![]))
    }

    /// Create a new VecHistorian with the provided storage
    /// `Rc<RefCell<Vec<HistoryRecord>>>`
    pub fn new(records: Rc<RefCell<Vec<HistoryRecord>>>) -> Self {
        Self {
            records,
            previous: None,
        }
    }
}

impl Historian for VecHistorian {
    fn record_action(
        &mut self,
        _id: &uuid::Uuid,
        game_state: &GameState,
        action: Action,
    ) -> Result<(), HistorianError> {
        let mut records = self.records.try_borrow_mut()?;

        records.push(HistoryRecord {
            before_game_state: self.previous.take(),
            action,
            after_game_state: game_state.clone(),
        });

        self.previous = Some(game_state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::{
        Agent, GameSimulationBuilder,
        agent::{GreedyAgent, PassingAgent},
    };

    use super::*;

    #[test_log::test]
    fn test_vec_historian() {
        let records = VecHistorian::new_storage();
        let hist = Box::new(VecHistorian::new(records.clone()));

        let agents: Vec<Box<dyn Agent>> = vec![
            Box::<GreedyAgent>::default(),
            Box::<GreedyAgent>::default(),
            Box::<GreedyAgent>::default(),
        ];
        let game_state = GameState::standard(5, 3).unwrap();
        let mut sim = GameSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .historians(vec![hist])
            .max_rounds(Some(100))
            .build()
            .unwrap();

        sim.run();

        let records = records.borrow();
        assert!(records.len() > 10);
        assert!(matches!(records[0].action, Action::GameStart(_)));
        assert!(records[0].before_game_state.is_none());
        assert!(matches!(
            records.last().map(|r| &r.action),
            Some(Action::GameEnd(_))
        ));
        for pair in records.windows(2) {
            assert_eq!(
                Some(&pair[0].after_game_state),
                pair[1].before_game_state.as_ref()
            );
        }
    }

    #[test]
    fn test_shared_storage_is_borrowed() {
        let records = VecHistorian::new_storage();
        let mut hist = VecHistorian::new(records.clone());
        let game_state = GameState::standard(0, 2).unwrap();
        let id = uuid::Uuid::now_v7();

        let guard = records.borrow();
        let result = hist.record_action(&id, &game_state, Action::RoundAdvance(2));
        assert!(matches!(result, Err(HistorianError::BorrowMutError(_))));
        drop(guard);

        let mut sim = GameSimulationBuilder::default()
            .game_state(game_state)
            .agents(vec![Box::new(PassingAgent {}), Box::new(PassingAgent {})])
            .historians(vec![Box::new(hist)])
            .max_rounds(Some(1))
            .build()
            .unwrap();
        sim.run();
        assert!(!records.borrow().is_empty());
    }
}
