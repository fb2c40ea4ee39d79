use std::fmt;

/// The six token colors.
///
/// The first five are gem colors: they show up in card costs, as a card's own
/// color and as token denominations. `Gold` is the wildcard. It only ever
/// exists as a token and is never the color of a card.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub enum Color {
    /// wht
    White = 0,
    /// blu
    Blue = 1,
    /// grn
    Green = 2,
    /// red
    Red = 3,
    /// blk
    Black = 4,
    /// gld, the wildcard
    Gold = 5,
}

/// The number of distinct token colors including the wildcard.
pub const NUM_COLORS: usize = 6;

/// All of the gem colors. This is what `Color::gems()` returns and the order
/// costs are listed in the catalog tables.
const GEMS: [Color; 5] = [
    Color::White,
    Color::Blue,
    Color::Green,
    Color::Red,
    Color::Black,
];

const ALL: [Color; NUM_COLORS] = [
    Color::White,
    Color::Blue,
    Color::Green,
    Color::Red,
    Color::Black,
    Color::Gold,
];

impl Color {
    /// The five non-wildcard colors.
    pub fn gems() -> [Color; 5] {
        GEMS
    }

    /// Every token color, wildcard last.
    pub fn all() -> [Color; NUM_COLORS] {
        ALL
    }

    pub fn is_gem(&self) -> bool {
        !matches!(self, Color::Gold)
    }

    /// Index into per-color storage.
    pub fn idx(&self) -> usize {
        *self as usize
    }

    /// The three letter code used by the catalog tables.
    pub fn code(&self) -> &'static str {
        match self {
            Color::White => "wht",
            Color::Blue => "blu",
            Color::Green => "grn",
            Color::Red => "red",
            Color::Black => "blk",
            Color::Gold => "gld",
        }
    }

    pub fn from_code(code: &str) -> Option<Color> {
        match code.trim().to_ascii_lowercase().as_str() {
            "wht" | "white" => Some(Color::White),
            "blu" | "blue" => Some(Color::Blue),
            "grn" | "green" => Some(Color::Green),
            "red" => Some(Color::Red),
            "blk" | "black" => Some(Color::Black),
            "gld" | "gold" => Some(Color::Gold),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::White => "white",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Red => "red",
            Color::Black => "black",
            Color::Gold => "gold",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gems_exclude_gold() {
        assert_eq!(5, Color::gems().len());
        assert!(Color::gems().iter().all(Color::is_gem));
        assert!(!Color::Gold.is_gem());
    }

    #[test]
    fn test_codes() {
        for c in Color::all() {
            assert_eq!(Some(c), Color::from_code(c.code()));
        }
        assert_eq!(Some(Color::Black), Color::from_code(" BLK "));
        assert_eq!(None, Color::from_code("pink"));
    }

    #[test]
    fn test_idx_is_dense() {
        let idxs: Vec<usize> = Color::all().iter().map(Color::idx).collect();
        assert_eq!(vec![0, 1, 2, 3, 4, 5], idxs);
    }
}
