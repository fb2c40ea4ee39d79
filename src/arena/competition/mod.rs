//! Running many games and tabulating how the agents did.
mod seed_competition;
mod summary;

pub use seed_competition::{GameResult, SeedCompetition, SeedCompetitionBuilder};
pub use summary::CompetitionSummary;
