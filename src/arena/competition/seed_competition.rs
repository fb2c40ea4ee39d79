use std::sync::Arc;

use tracing::{Level, event, trace_span};

use crate::arena::{
    GameSimulationBuilder, GameState,
    agent::AgentGenerator,
    errors::GameSimulationError,
    game_state::EndReason,
    historian::HistorianGenerator,
    simulation::DEFAULT_VICTORY_POINTS,
};
use crate::core::Catalog;

use super::CompetitionSummary;

/// How a single game of a competition went.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub seed: u64,
    /// Rounds actually played.
    pub rounds: u32,
    pub scores: Vec<u32>,
    pub winners: Vec<usize>,
    pub end_reason: EndReason,
}

impl GameResult {
    /// `None` until the game is complete.
    pub fn from_game_state(game_state: &GameState) -> Option<Self> {
        let end_reason = game_state.end_reason()?;
        Some(Self {
            seed: game_state.seed,
            // The round counter has already moved past the last round.
            rounds: game_state.round.saturating_sub(1),
            scores: game_state.scores(),
            winners: game_state.winners(),
            end_reason,
        })
    }

    pub fn reached_threshold(&self) -> bool {
        self.end_reason == EndReason::VictoryThreshold
    }
}

/// Builds a `SeedCompetition`.
///
/// One agent generator per seat is required. A single generator makes a
/// solo time trial.
#[derive(Default)]
pub struct SeedCompetitionBuilder {
    agent_generators: Option<Vec<Box<dyn AgentGenerator>>>,
    historian_generators: Option<Vec<Box<dyn HistorianGenerator>>>,
    catalog: Option<Arc<Catalog>>,
    panic_on_historian_error: bool,
    victory_points: Option<u32>,
    max_rounds: Option<u32>,
}

impl SeedCompetitionBuilder {
    /// Sets the agent generators, one per seat in seat order.
    pub fn agent_generators(mut self, agent_generators: Vec<Box<dyn AgentGenerator>>) -> Self {
        self.agent_generators = Some(agent_generators);
        self
    }

    /// Sets the historian generators. Each game gets freshly generated
    /// historians.
    pub fn historian_generators(
        mut self,
        historian_generators: Vec<Box<dyn HistorianGenerator>>,
    ) -> Self {
        self.historian_generators = Some(historian_generators);
        self
    }

    /// The catalog to deal from. Defaults to the standard catalog.
    pub fn catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn panic_on_historian_error(mut self, panic_on_historian_error: bool) -> Self {
        self.panic_on_historian_error = panic_on_historian_error;
        self
    }

    pub fn victory_points(mut self, victory_points: u32) -> Self {
        self.victory_points = Some(victory_points);
        self
    }

    pub fn max_rounds(mut self, max_rounds: Option<u32>) -> Self {
        self.max_rounds = max_rounds.filter(|r| *r > 0);
        self
    }

    pub fn build(self) -> Result<SeedCompetition, GameSimulationError> {
        let agent_generators = self
            .agent_generators
            .filter(|g| !g.is_empty())
            .ok_or(GameSimulationError::NeedAgents)?;
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => Arc::new(Catalog::load()?),
        };

        Ok(SeedCompetition {
            agent_generators,
            historian_generators: self.historian_generators.unwrap_or_default(),
            catalog,
            panic_on_historian_error: self.panic_on_historian_error,
            victory_points: self.victory_points.unwrap_or(DEFAULT_VICTORY_POINTS),
            max_rounds: self.max_rounds,
            results: vec![],
        })
    }
}

/// Plays one game per seed with freshly generated agents and keeps every
/// result. Calling `run` again adds to the results so far.
pub struct SeedCompetition {
    agent_generators: Vec<Box<dyn AgentGenerator>>,
    historian_generators: Vec<Box<dyn HistorianGenerator>>,
    catalog: Arc<Catalog>,
    panic_on_historian_error: bool,
    victory_points: u32,
    max_rounds: Option<u32>,
    results: Vec<GameResult>,
}

impl SeedCompetition {
    pub fn num_players(&self) -> usize {
        self.agent_generators.len()
    }

    pub fn results(&self) -> &[GameResult] {
        &self.results
    }

    fn starting_game_state(&self, seed: u64) -> GameState {
        if self.num_players() == 1 {
            GameState::new_solo(self.catalog.clone(), seed)
        } else {
            GameState::new(self.catalog.clone(), seed, self.num_players())
        }
    }

    /// Play a single game on `seed`.
    pub fn run_seed(&mut self, seed: u64) -> Result<GameResult, GameSimulationError> {
        let span = trace_span!("SeedCompetition::run_seed", seed);
        let _enter = span.enter();

        let game_state = self.starting_game_state(seed);
        let agents = self
            .agent_generators
            .iter()
            .enumerate()
            .map(|(idx, generator)| generator.generate(idx, &game_state))
            .collect::<Vec<_>>();
        let historians = self
            .historian_generators
            .iter()
            .map(|generator| generator.generate(&game_state))
            .collect::<Vec<_>>();

        let mut sim = GameSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .historians(historians)
            .panic_on_historian_error(self.panic_on_historian_error)
            .victory_points(self.victory_points)
            .max_rounds(self.max_rounds)
            .build()?;
        sim.run();

        let result = GameResult::from_game_state(&sim.game_state)
            .ok_or(GameSimulationError::GameIncomplete { seed })?;
        event!(
            Level::DEBUG,
            seed,
            rounds = result.rounds,
            reason = ?result.end_reason,
            "competition_game"
        );
        self.results.push(result.clone());
        Ok(result)
    }

    /// Play one game for each seed.
    pub fn run<I>(&mut self, seeds: I) -> Result<Vec<GameResult>, GameSimulationError>
    where
        I: IntoIterator<Item = u64>,
    {
        let span = trace_span!("SeedCompetition::run");
        let _enter = span.enter();

        seeds.into_iter().map(|seed| self.run_seed(seed)).collect()
    }

    /// Aggregate everything run so far.
    pub fn summary(&self) -> CompetitionSummary {
        CompetitionSummary::from_results(self.num_players(), &self.results)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crate::arena::{
        AgentGenerator, CloneHistorianGenerator, HistorianGenerator,
        action::Action,
        agent::{GreedyAgentGenerator, PassingAgentGenerator, RandomAgentGenerator},
        historian::FnHistorian,
    };

    use super::*;

    #[test]
    fn test_need_agents() {
        let result = SeedCompetitionBuilder::default().build();
        assert!(matches!(result, Err(GameSimulationError::NeedAgents)));

        let result = SeedCompetitionBuilder::default()
            .agent_generators(vec![])
            .build();
        assert!(matches!(result, Err(GameSimulationError::NeedAgents)));
    }

    #[test_log::test]
    fn test_passing_competition_never_succeeds() {
        let agent_gens: Vec<Box<dyn AgentGenerator>> = vec![
            Box::<PassingAgentGenerator>::default(),
            Box::<PassingAgentGenerator>::default(),
        ];
        let mut competition = SeedCompetitionBuilder::default()
            .agent_generators(agent_gens)
            .max_rounds(Some(5))
            .build()
            .unwrap();

        let results = competition.run(0..4).unwrap();
        assert_eq!(4, results.len());
        for (seed, result) in results.iter().enumerate() {
            assert_eq!(seed as u64, result.seed);
            assert_eq!(5, result.rounds);
            assert_eq!(EndReason::RoundCap, result.end_reason);
            assert_eq!(vec![0, 1], result.winners);
        }

        let summary = competition.summary();
        assert_eq!(4, summary.games);
        assert_eq!(0.0, summary.success_rate);
        assert_eq!(None, summary.mean_rounds);
    }

    #[test_log::test]
    fn test_historians_are_generated_per_game() {
        let games = Rc::new(RefCell::new(0));
        let counter = games.clone();
        let historian = FnHistorian::new(move |_, _, action| {
            if matches!(action, Action::GameStart(_)) {
                *counter.borrow_mut() += 1;
            }
            Ok(())
        });
        let historian_gens: Vec<Box<dyn HistorianGenerator>> =
            vec![Box::new(CloneHistorianGenerator::new(historian))];

        let mut competition = SeedCompetitionBuilder::default()
            .agent_generators(vec![
                Box::<RandomAgentGenerator>::default(),
                Box::<GreedyAgentGenerator>::default(),
            ])
            .historian_generators(historian_gens)
            .max_rounds(Some(30))
            .build()
            .unwrap();
        competition.run([3, 5, 8]).unwrap();

        assert_eq!(3, *games.borrow());
        assert_eq!(3, competition.results().len());
    }

    #[test_log::test]
    fn test_solo_competition() {
        let mut competition = SeedCompetitionBuilder::default()
            .agent_generators(vec![Box::<GreedyAgentGenerator>::default()])
            .max_rounds(Some(150))
            .build()
            .unwrap();
        let results = competition.run(10..13).unwrap();

        for result in &results {
            assert_eq!(1, result.scores.len());
            assert_eq!(vec![0], result.winners);
            if result.reached_threshold() {
                assert!(result.scores[0] >= DEFAULT_VICTORY_POINTS);
            }
        }
        assert_eq!(1, competition.summary().wins.len());
    }

    #[test]
    fn test_same_seeds_same_results() {
        let run = || {
            let mut competition = SeedCompetitionBuilder::default()
                .agent_generators(vec![
                    Box::<RandomAgentGenerator>::default(),
                    Box::<RandomAgentGenerator>::default(),
                    Box::<GreedyAgentGenerator>::default(),
                ])
                .max_rounds(Some(40))
                .build()
                .unwrap();
            competition.run(100..103).unwrap()
        };
        assert_eq!(run(), run());
    }
}
