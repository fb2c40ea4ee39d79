use std::fmt;

use super::gems::Gems;

/// Stable identifier of a bonus tile in the catalog.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub struct TileId(pub u16);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile #{}", self.0)
    }
}

/// A bonus tile. Claimed once a player owns enough cards of each required
/// color.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub struct Tile {
    pub id: TileId,
    /// Owned card count required per gem color.
    pub requirement: Gems,
    pub points: u8,
}

impl Tile {
    /// Is the requirement met by these owned card counts?
    pub fn is_met_by(&self, owned: &Gems) -> bool {
        owned.covers(&self.requirement)
    }
}
