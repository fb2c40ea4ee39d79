//! This is the arena module for simulation via agents.
//!
//! It holds the rules engine: the token ledger, the card market, player
//! holdings and the `GameState` that ties them together. On top of that sit
//! the turn controller (`GameSimulation`), the agents that play and the
//! historians that watch.
//!
//! # Single Simulation
//!
//! The same seed always deals the same game, and seeded agents always make
//! the same choices.
//!
//! ## Single Simulation Example
//!
//! ```
//! use splendid_cards::arena::agent::{GreedyAgent, RandomAgent, StingyAgent};
//! use splendid_cards::arena::{Agent, GameSimulationBuilder, GameState};
//!
//! let agents: Vec<Box<dyn Agent>> = vec![
//!     Box::<GreedyAgent>::default(),
//!     Box::<StingyAgent>::default(),
//!     Box::new(RandomAgent::new(420)),
//! ];
//!
//! let game_state = GameState::standard(420, 3).unwrap();
//! let mut sim = GameSimulationBuilder::default()
//!     .game_state(game_state)
//!     .agents(agents)
//!     .max_rounds(Some(100))
//!     .build()
//!     .unwrap();
//!
//! sim.run();
//! println!("{:?}", sim.game_state.scores());
//! ```
//!
//! # Competition Example
//!
//! A `SeedCompetition` plays one game per seed with fresh agents and
//! tabulates the results. A single agent generator plays solo time trials.
//!
//! ```
//! use splendid_cards::arena::AgentGenerator;
//! use splendid_cards::arena::agent::{GreedyAgentGenerator, RandomAgentGenerator};
//! use splendid_cards::arena::competition::SeedCompetitionBuilder;
//!
//! let agent_gens: Vec<Box<dyn AgentGenerator>> = vec![
//!     Box::<GreedyAgentGenerator>::default(),
//!     Box::<RandomAgentGenerator>::default(),
//! ];
//! let mut competition = SeedCompetitionBuilder::default()
//!     .agent_generators(agent_gens)
//!     .max_rounds(Some(100))
//!     .build()
//!     .unwrap();
//!
//! let results = competition.run(0..5).unwrap();
//! assert_eq!(5, results.len());
//! println!("{}", competition.summary());
//! ```
pub mod action;
pub mod agent;
pub mod competition;
pub mod errors;
pub mod game_state;
pub mod historian;
pub mod ledger;
pub mod market;
pub mod player;
pub mod sim_builder;
pub mod simulation;

#[cfg(any(test, feature = "arena-test-util"))]
pub mod test_util;

pub use agent::{Agent, AgentGenerator, CloneAgentGenerator};
pub use game_state::{EndReason, GameState, Phase};
pub use historian::{CloneHistorianGenerator, Historian, HistorianError, HistorianGenerator};
pub use sim_builder::GameSimulationBuilder;
pub use simulation::GameSimulation;
