use crate::arena::{GameState, action::Action};

use super::{Historian, HistorianError};

/// Hands every recorded event to a closure.
///
/// Handy for counting or asserting on a game's event stream, like tallying
/// purchases or tile claims, without keeping whole snapshots the way
/// `VecHistorian` does. The closure is `Fn`, so shared counters go through
/// `Rc<RefCell<_>>`.
#[derive(Debug, Clone)]
pub struct FnHistorian<F> {
    func: F,
}

impl<F: Fn(&uuid::Uuid, &GameState, Action) -> Result<(), HistorianError>> FnHistorian<F> {
    /// `f` gets the simulation id, the state after the event and the event.
    pub fn new(f: F) -> Self {
        Self { func: f }
    }
}

impl<F: Fn(&uuid::Uuid, &GameState, Action) -> Result<(), HistorianError>> Historian
    for FnHistorian<F>
{
    fn record_action(
        &mut self,
        id: &uuid::Uuid,
        game_state: &GameState,
        action: Action,
    ) -> Result<(), HistorianError> {
        (self.func)(id, game_state, action)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crate::arena::{
        Agent, GameSimulationBuilder,
        action::AgentAction,
        agent::{GreedyAgent, RandomAgent},
    };

    use super::*;

    #[test_log::test]
    fn test_can_record_actions_with_agents() {
        let last_action: Rc<RefCell<Option<Action>>> = Rc::new(RefCell::new(None));
        let count = Rc::new(RefCell::new(0));

        let agents: Vec<Box<dyn Agent>> = (0..2)
            .map(|i| Box::new(RandomAgent::new(i)) as Box<dyn Agent>)
            .collect();
        let game_state = GameState::standard(4, 2).unwrap();

        let borrow_count = count.clone();
        let borrow_last_action = last_action.clone();

        let historian = Box::new(FnHistorian::new(move |_id, _game_state, action| {
            *borrow_count.borrow_mut() += 1;
            *borrow_last_action.borrow_mut() = Some(action);
            Ok(())
        }));

        let mut sim = GameSimulationBuilder::default()
            .agents(agents)
            .game_state(game_state)
            .historians(vec![historian])
            .max_rounds(Some(40))
            .build()
            .unwrap();

        sim.run();

        assert_ne!(0, count.take());
        assert!(matches!(last_action.take(), Some(Action::GameEnd(_))));
    }

    #[test]
    fn test_fn_historian_can_withstand_error() {
        // A historian that always errors is dropped from the simulation but
        // the game still runs to the end.
        let agents: Vec<Box<dyn Agent>> = (0..2)
            .map(|i| Box::new(RandomAgent::new(i)) as Box<dyn Agent>)
            .collect();

        let game_state = GameState::standard(4, 2).unwrap();
        let historian = Box::new(FnHistorian::new(|_, _, _| {
            Err(HistorianError::UnableToRecordAction)
        }));

        let mut sim = GameSimulationBuilder::default()
            .agents(agents)
            .game_state(game_state)
            .historians(vec![historian])
            .max_rounds(Some(10))
            .build()
            .unwrap();
        sim.run();
        assert!(sim.game_state.is_complete());
    }

    #[test_log::test]
    fn test_purchases_match_owned_cards() {
        let purchases = Rc::new(RefCell::new(0usize));
        let tiles = Rc::new(RefCell::new(0usize));
        let (p, t) = (purchases.clone(), tiles.clone());
        let historian = Box::new(FnHistorian::new(move |_, _, action| {
            match action {
                Action::PlayedAction(payload) if matches!(payload.action, AgentAction::Buy(_)) => {
                    *p.borrow_mut() += 1
                }
                Action::TileClaimed(_) => *t.borrow_mut() += 1,
                _ => {}
            }
            Ok(())
        }));

        let agents: Vec<Box<dyn Agent>> = vec![Box::new(GreedyAgent {}), Box::new(GreedyAgent {})];
        let mut sim = GameSimulationBuilder::default()
            .agents(agents)
            .game_state(GameState::standard(12, 2).unwrap())
            .historians(vec![historian])
            .max_rounds(Some(100))
            .build()
            .unwrap();
        sim.run();

        let owned: usize = sim.game_state.players().iter().map(|p| p.num_owned()).sum();
        let claimed: usize = sim.game_state.players().iter().map(|p| p.tiles().len()).sum();
        assert_eq!(owned, *purchases.borrow());
        assert_eq!(claimed, *tiles.borrow());
    }
}
