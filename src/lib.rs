//! Splendid Cards is a rules engine for a gem trading card game, along with
//! the tools to have automatic players compete in it.
//!
//! Players take gem tokens from a shared bank, reserve cards and buy cards
//! whose owned colors become permanent discounts. Enough owned cards of the
//! right colors earn a bonus tile. The first player to reach the victory
//! points starts the final round.

/// The reference data: colors, gem counts, cards, tiles, the catalog and the
/// seeded shuffle. Nothing in core knows about players or turns.
pub mod core;

/// The rules engine and the simulation of agents playing it.
pub mod arena;
