use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use tracing::{Level, event};

use super::card::{Card, CardId, Tier};
use super::color::Color;
use super::error::DataLoadError;
use super::gems::Gems;
use super::tile::{Tile, TileId};

/// The standard card table shipped with the crate.
const STANDARD_CARDS: &str = include_str!("../../data/cards.csv");
/// The standard tile table shipped with the crate.
const STANDARD_TILES: &str = include_str!("../../data/tiles.csv");

const CARDS_TABLE: &str = "cards.csv";
const TILES_TABLE: &str = "tiles.csv";

/// Cost columns, in `Color::gems()` order.
const COST_COLUMNS: [&str; 5] = ["wht", "blu", "grn", "red", "blk"];

/// Immutable reference data for every card and tile.
///
/// A catalog is loaded once and then shared (usually behind an `Arc`) by
/// every game built from it.
///
/// ```
/// use splendid_cards::core::{Catalog, Tier};
///
/// let catalog = Catalog::load().unwrap();
/// assert_eq!(40, catalog.card_ids(Tier::One).len());
/// assert_eq!(10, catalog.tile_ids().len());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    cards: BTreeMap<CardId, Card>,
    tiles: BTreeMap<TileId, Tile>,
    synthetic: bool,
}

impl Catalog {
    /// Load the standard tables embedded in the crate.
    pub fn load() -> Result<Catalog, DataLoadError> {
        Catalog::parse(STANDARD_CARDS, STANDARD_TILES)
    }

    /// Load `cards.csv` and `tiles.csv` from a directory.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Catalog, DataLoadError> {
        let dir = dir.as_ref();
        let cards = read_table(&dir.join(CARDS_TABLE))?;
        let tiles = read_table(&dir.join(TILES_TABLE))?;
        Catalog::parse(&cards, &tiles)
    }

    /// Parse the two tables from their CSV text.
    ///
    /// Cards: `index,deck,color,wht,blu,grn,red,blk,points`.
    /// Tiles: `index,wht,blu,grn,red,blk,points`.
    /// Column order is free; extra columns are ignored.
    pub fn parse(cards_csv: &str, tiles_csv: &str) -> Result<Catalog, DataLoadError> {
        let cards = parse_cards(cards_csv)?;
        let tiles = parse_tiles(tiles_csv)?;
        event!(
            Level::DEBUG,
            num_cards = cards.len(),
            num_tiles = tiles.len(),
            "catalog_loaded"
        );
        Ok(Catalog {
            cards,
            tiles,
            synthetic: false,
        })
    }

    /// A deterministic, formula generated catalog for degraded or test
    /// operation. It is flagged with `is_synthetic` so it can never pass for
    /// the real tables.
    pub fn synthetic() -> Catalog {
        let mut cards = BTreeMap::new();
        for i in 1..=90_u16 {
            let tier = if i <= 40 {
                Tier::One
            } else if i <= 70 {
                Tier::Two
            } else {
                Tier::Three
            };
            let level = tier as u16;
            let color = Color::gems()[usize::from(i % 5)];
            // Each tier widens the modulus so later tiers cost more.
            let m = |base: u16| (i % (base + level - 1)) as u8;
            let cost = Gems::from_pairs(&[
                (Color::White, m(5)),
                (Color::Blue, m(4)),
                (Color::Green, m(3)),
                (Color::Red, m(2)),
                (Color::Black, m(1)),
            ]);
            let points = (level * 2).min(i % 5 + level) as u8;
            let id = CardId(i);
            cards.insert(
                id,
                Card {
                    id,
                    tier,
                    color,
                    points,
                    cost,
                },
            );
        }

        let gems = Color::gems();
        let tiles = (0..10_usize)
            .map(|k| {
                let id = TileId(k as u16 + 1);
                let requirement = Gems::from_pairs(&[(gems[k % 5], 3), (gems[(k + 2) % 5], 3)]);
                (
                    id,
                    Tile {
                        id,
                        requirement,
                        points: 3,
                    },
                )
            })
            .collect();

        event!(Level::WARN, "using synthetic catalog");
        Catalog {
            cards,
            tiles,
            synthetic: true,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// Every card, in id order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Every tile, in id order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Ids of the cards in a tier, in id order.
    pub fn card_ids(&self, tier: Tier) -> Vec<CardId> {
        self.cards
            .values()
            .filter(|c| c.tier == tier)
            .map(|c| c.id)
            .collect()
    }

    pub fn tile_ids(&self) -> Vec<TileId> {
        self.tiles.keys().copied().collect()
    }

    pub fn num_cards(&self) -> usize {
        self.cards.len()
    }
}

fn read_table(path: &Path) -> Result<String, DataLoadError> {
    fs::read_to_string(path).map_err(|source| DataLoadError::MissingSource {
        path: path.display().to_string(),
        source,
    })
}

/// A header plus its data rows, with 1 based line numbers kept for errors.
struct Table<'a> {
    name: &'static str,
    columns: HashMap<&'a str, usize>,
    rows: Vec<(usize, Vec<&'a str>)>,
}

impl<'a> Table<'a> {
    fn parse(name: &'static str, text: &'a str) -> Result<Table<'a>, DataLoadError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, header) = lines.next().ok_or(DataLoadError::EmptyTable { table: name })?;
        let columns: HashMap<&str, usize> = header
            .split(',')
            .enumerate()
            .map(|(idx, col)| (col.trim(), idx))
            .collect();

        let rows: Vec<(usize, Vec<&str>)> = lines
            .map(|(line, row)| (line, row.split(',').map(str::trim).collect()))
            .collect();

        if rows.is_empty() {
            return Err(DataLoadError::EmptyTable { table: name });
        }

        Ok(Table {
            name,
            columns,
            rows,
        })
    }

    fn column(&self, column: &'static str) -> Result<usize, DataLoadError> {
        self.columns
            .get(column)
            .copied()
            .ok_or(DataLoadError::MissingColumn {
                table: self.name,
                column,
            })
    }

    fn field(&self, line: usize, row: &[&'a str], col: usize) -> Result<&'a str, DataLoadError> {
        row.get(col)
            .copied()
            .ok_or_else(|| DataLoadError::MalformedRow {
                table: self.name,
                line,
                reason: format!("expected at least {} fields, found {}", col + 1, row.len()),
            })
    }

    fn number<T: std::str::FromStr>(
        &self,
        line: usize,
        row: &[&'a str],
        col: usize,
    ) -> Result<T, DataLoadError> {
        let raw = self.field(line, row, col)?;
        raw.parse::<T>().map_err(|_| DataLoadError::MalformedRow {
            table: self.name,
            line,
            reason: format!("`{raw}` is not a valid non-negative number"),
        })
    }

    fn cost(&self, line: usize, row: &[&'a str], cols: &[usize; 5]) -> Result<Gems, DataLoadError> {
        let mut cost = Gems::default();
        for (color, col) in Color::gems().into_iter().zip(cols.iter()) {
            cost[color] = self.number(line, row, *col)?;
        }
        Ok(cost)
    }

    fn cost_columns(&self) -> Result<[usize; 5], DataLoadError> {
        let mut cols = [0; 5];
        for (slot, name) in cols.iter_mut().zip(COST_COLUMNS) {
            *slot = self.column(name)?;
        }
        Ok(cols)
    }
}

fn parse_cards(text: &str) -> Result<BTreeMap<CardId, Card>, DataLoadError> {
    let table = Table::parse(CARDS_TABLE, text)?;
    let index_col = table.column("index")?;
    let deck_col = table.column("deck")?;
    let color_col = table.column("color")?;
    let points_col = table.column("points")?;
    let cost_cols = table.cost_columns()?;

    let mut cards = BTreeMap::new();
    for (line, row) in table.rows.iter() {
        let line = *line;
        let id = CardId(table.number(line, row, index_col)?);

        let tier_num: u8 = table.number(line, row, deck_col)?;
        let tier = Tier::from_u8(tier_num).ok_or(DataLoadError::InvalidTier {
            table: CARDS_TABLE,
            line,
            tier: tier_num,
        })?;

        let code = table.field(line, row, color_col)?;
        let color = Color::from_code(code)
            .filter(Color::is_gem)
            .ok_or_else(|| DataLoadError::UnknownColor {
                table: CARDS_TABLE,
                line,
                code: code.to_string(),
            })?;

        let card = Card {
            id,
            tier,
            color,
            points: table.number(line, row, points_col)?,
            cost: table.cost(line, row, &cost_cols)?,
        };

        if cards.insert(id, card).is_some() {
            return Err(DataLoadError::DuplicateId {
                table: CARDS_TABLE,
                line,
                id: id.0,
            });
        }
    }
    Ok(cards)
}

fn parse_tiles(text: &str) -> Result<BTreeMap<TileId, Tile>, DataLoadError> {
    let table = Table::parse(TILES_TABLE, text)?;
    let index_col = table.column("index")?;
    let points_col = table.column("points")?;
    let cost_cols = table.cost_columns()?;

    let mut tiles = BTreeMap::new();
    for (line, row) in table.rows.iter() {
        let line = *line;
        let id = TileId(table.number(line, row, index_col)?);
        let tile = Tile {
            id,
            requirement: table.cost(line, row, &cost_cols)?,
            points: table.number(line, row, points_col)?,
        };
        if tiles.insert(id, tile).is_some() {
            return Err(DataLoadError::DuplicateId {
                table: TILES_TABLE,
                line,
                id: id.0,
            });
        }
    }
    Ok(tiles)
}
