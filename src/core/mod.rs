//! This is the core module. It holds the reference data of the game: colors,
//! gem counts, cards, tiles, the catalog they are loaded into and the seeded
//! shuffle. Nothing in here knows about players or turns.

/// color.rs has the five gem colors and the wildcard.
mod color;
/// Re-export Color
pub use self::color::{Color, NUM_COLORS};

/// Per color counts used for costs, banks and holdings.
mod gems;
pub use self::gems::Gems;

/// Cards and their tiers.
mod card;
pub use self::card::{Card, CardId, Tier};

/// Bonus tiles.
mod tile;
pub use self::tile::{Tile, TileId};

/// Loading the card and tile tables.
mod catalog;
pub use self::catalog::Catalog;

/// Seeded deck and tile ordering.
mod shuffle;
pub use self::shuffle::{Shuffle, shuffle};

/// Catalog loading errors.
mod error;
pub use self::error::DataLoadError;
