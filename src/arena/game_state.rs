use core::fmt;
use std::sync::Arc;

use tracing::{Level, event};

use crate::core::{Card, CardId, Catalog, Color, DataLoadError, Gems, Tier, Tile, TileId, shuffle};

use super::errors::GameStateError;
use super::ledger::{Affordability, TokenSelection, missing_tokens, resolve_payment};
use super::market::Market;
use super::player::{MAX_RESERVED, PlayerState};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Wildcards in the bank at the start of every game.
pub const STARTING_GOLD: u8 = 5;

/// Tokens of each gem color in the bank for a player count.
fn gems_per_color(num_players: usize) -> u8 {
    match num_players {
        0..=2 => 4,
        3 => 5,
        _ => 7,
    }
}

/// Why a game stopped.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// Someone reached the victory points and the final round was played out.
    VictoryThreshold,
    /// The round cap was hit before anyone got there.
    RoundCap,
}

/// Where the turn controller is.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    AwaitingAction,
    /// Someone has reached the victory points. The rest of this round is
    /// played and then the game is over.
    FinalRound,
    Complete(EndReason),
}

/// What happened when a card was bought.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Purchase {
    pub card: CardId,
    /// `None` when the card came out of the buyer's reserved cards.
    pub tier: Option<Tier>,
    pub payment: Gems,
    pub tile: Option<TileId>,
}

/// The full state of one game.
///
/// Every change goes through the three actions, `take_tokens`,
/// `reserve_card` and `buy_card`. Each validates completely before it
/// touches anything, so a rejected action leaves the state as it was.
///
/// The turn bookkeeping lives here as well so a cloned state can be handed
/// to a new simulation and picked up from the same seat.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, PartialEq)]
pub struct GameState {
    pub seed: u64,
    #[cfg_attr(feature = "serde", serde(skip))]
    catalog: Arc<Catalog>,
    bank: Gems,
    /// The bank as it was dealt. Bank plus holdings always adds to this.
    starting_bank: Gems,
    market: Market,
    players: Vec<PlayerState>,
    available_tiles: Vec<TileId>,

    /// The seat that's up next.
    pub to_act_idx: usize,
    /// Rounds start with this seat.
    pub starting_idx: usize,
    /// Starts at 1.
    pub round: u32,
    /// Actions attempted so far, rejected ones included.
    pub turn: u32,
    pub phase: Phase,
}

impl GameState {
    /// Deal a new game from a catalog and seed. The player count is clamped
    /// to the supported two to four.
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use splendid_cards::arena::GameState;
    /// use splendid_cards::core::{Catalog, Color};
    ///
    /// let catalog = Arc::new(Catalog::load().unwrap());
    /// let game_state = GameState::new(catalog, 0, 3);
    ///
    /// assert_eq!(3, game_state.num_players());
    /// assert_eq!(5, game_state.bank()[Color::Red]);
    /// assert_eq!(4, game_state.available_tiles().len());
    /// ```
    pub fn new(catalog: Arc<Catalog>, seed: u64, num_players: usize) -> Self {
        let num_players = num_players.clamp(MIN_PLAYERS, MAX_PLAYERS);
        Self::deal(catalog, seed, num_players, num_players + 1)
    }

    /// A single seat game for solo time trials. The bank and tile pool are
    /// sized as for a two player game with one tile less.
    pub fn new_solo(catalog: Arc<Catalog>, seed: u64) -> Self {
        Self::deal(catalog, seed, 1, 2)
    }

    /// Build a game on the standard embedded catalog.
    pub fn standard(seed: u64, num_players: usize) -> Result<Self, DataLoadError> {
        let catalog = Arc::new(Catalog::load()?);
        Ok(Self::new(catalog, seed, num_players))
    }

    fn deal(catalog: Arc<Catalog>, seed: u64, num_players: usize, num_tiles: usize) -> Self {
        let mut shuffled = shuffle(&catalog, seed);
        shuffled.tiles.truncate(num_tiles);

        let bank = Gems::uniform(gems_per_color(num_players), STARTING_GOLD);
        let market = Market::new(&shuffled);

        event!(
            Level::DEBUG,
            seed,
            num_players,
            ?bank,
            tiles = ?shuffled.tiles,
            "game_dealt"
        );

        Self {
            seed,
            catalog,
            bank,
            starting_bank: bank,
            market,
            players: vec![PlayerState::default(); num_players],
            available_tiles: shuffled.tiles,
            to_act_idx: 0,
            starting_idx: 0,
            round: 1,
            turn: 0,
            phase: Phase::AwaitingAction,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn bank(&self) -> &Gems {
        &self.bank
    }

    pub fn starting_bank(&self) -> &Gems {
        &self.starting_bank
    }

    pub fn player(&self, idx: usize) -> Result<&PlayerState, GameStateError> {
        self.players
            .get(idx)
            .ok_or(GameStateError::InvalidPlayerIndex(idx))
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn river(&self, tier: Tier) -> &[CardId] {
        self.market.river(tier)
    }

    pub fn deck_len(&self, tier: Tier) -> usize {
        self.market.deck_len(tier)
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    pub fn available_tiles(&self) -> &[TileId] {
        &self.available_tiles
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.catalog.card(id)
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.catalog.tile(id)
    }

    /// Bank plus every holding.
    pub fn total_tokens(&self) -> Gems {
        self.players
            .iter()
            .fold(self.bank, |total, p| total.saturating_add(p.tokens()))
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, Phase::Complete(_))
    }

    pub fn is_final_round(&self) -> bool {
        self.phase == Phase::FinalRound
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self.phase {
            Phase::Complete(reason) => Some(reason),
            _ => None,
        }
    }

    /// Points from owned cards plus claimed tiles, summed fresh each call.
    pub fn score(&self, idx: usize) -> Result<u32, GameStateError> {
        let player = self.player(idx)?;
        let cards: u32 = player
            .owned_cards()
            .filter_map(|id| self.catalog.card(id))
            .map(|c| u32::from(c.points))
            .sum();
        let tiles: u32 = player
            .tiles()
            .iter()
            .filter_map(|id| self.catalog.tile(*id))
            .map(|t| u32::from(t.points))
            .sum();
        Ok(cards + tiles)
    }

    pub fn scores(&self) -> Vec<u32> {
        (0..self.num_players())
            .map(|idx| self.score(idx).unwrap_or_default())
            .collect()
    }

    /// Players with the top score. Ties go to whoever owns fewer cards and
    /// anything still tied is shared.
    pub fn winners(&self) -> Vec<usize> {
        let scores = self.scores();
        let Some(best) = scores.iter().max().copied() else {
            return vec![];
        };
        let leaders: Vec<usize> = (0..scores.len()).filter(|i| scores[*i] == best).collect();
        let fewest = leaders
            .iter()
            .map(|i| self.players[*i].num_owned())
            .min()
            .unwrap_or_default();
        leaders
            .into_iter()
            .filter(|i| self.players[*i].num_owned() == fewest)
            .collect()
    }

    /// Can `idx` pay for `card` right now, and with what.
    ///
    /// This doesn't check where the card is, only its cost against the
    /// player's discounts and tokens.
    pub fn affordability(&self, idx: usize, card: CardId) -> Result<Affordability, GameStateError> {
        let player = self.player(idx)?;
        let card = self
            .catalog
            .card(card)
            .ok_or(GameStateError::IllegalCardReference(card))?;
        Ok(resolve_payment(
            &card.cost,
            &player.discounts(),
            player.tokens(),
        ))
    }

    /// Per color tokens `idx` is short of for `card`, ignoring wildcards.
    pub fn missing_tokens(&self, idx: usize, card: CardId) -> Result<Gems, GameStateError> {
        let player = self.player(idx)?;
        let card = self
            .catalog
            .card(card)
            .ok_or(GameStateError::IllegalCardReference(card))?;
        Ok(missing_tokens(
            &card.cost,
            &player.discounts(),
            player.tokens(),
        ))
    }

    /// Tiles in the pool whose requirement `idx` meets, lowest id first.
    pub fn eligible_tiles(&self, idx: usize) -> Result<Vec<TileId>, GameStateError> {
        let owned = self.player(idx)?.discounts();
        let mut eligible: Vec<TileId> = self
            .available_tiles
            .iter()
            .filter(|id| self.catalog.tile(**id).is_some_and(|t| t.is_met_by(&owned)))
            .copied()
            .collect();
        eligible.sort();
        Ok(eligible)
    }

    /// Cards `idx` could buy this turn: the visible rivers and their own
    /// reserved cards.
    pub fn buyable_cards(&self, idx: usize) -> Result<Vec<CardId>, GameStateError> {
        let player = self.player(idx)?;
        Ok(self
            .market
            .visible()
            .map(|(_, card)| card)
            .chain(player.reserved().iter().copied())
            .collect())
    }

    /// Take tokens from the bank. See [`TokenSelection`] for which takes are
    /// legal.
    pub fn take_tokens(&mut self, idx: usize, colors: &[Color]) -> Result<Gems, GameStateError> {
        let selection = TokenSelection::new(colors)?;
        self.take_selection(idx, &selection)
    }

    /// Apply an already shaped take, checking it against the bank.
    pub fn take_selection(
        &mut self,
        idx: usize,
        selection: &TokenSelection,
    ) -> Result<Gems, GameStateError> {
        self.player(idx)?;
        selection.check_bank(&self.bank)?;

        let taken = selection.as_gems();
        // check_bank guarantees the bank covers the take.
        self.bank = self
            .bank
            .checked_sub(&taken)
            .ok_or_else(|| GameStateError::InvalidTokenSelection(selection.to_string()))?;
        let tokens = self.players[idx].tokens_mut();
        *tokens = tokens.saturating_add(&taken);

        event!(Level::DEBUG, idx, %selection, bank = %self.bank, "tokens_taken");
        Ok(taken)
    }

    /// Move a river card into `idx`'s reserved cards and hand them a
    /// wildcard if the bank has one. Returns whether a wildcard was given.
    ///
    /// Affordability is never checked.
    pub fn reserve_card(&mut self, idx: usize, card: CardId) -> Result<bool, GameStateError> {
        let player = self.player(idx)?;
        if !player.can_reserve() {
            return Err(GameStateError::CapacityExceeded {
                player: idx,
                reserved: MAX_RESERVED,
            });
        }
        let tier = self
            .market
            .locate(card)
            .ok_or(GameStateError::IllegalCardReference(card))?;
        self.market
            .reserve_from_river(tier, card)
            .ok_or(GameStateError::IllegalCardReference(card))?;

        let player = &mut self.players[idx];
        player.add_reserved(card);

        let got_gold = self.bank[Color::Gold] > 0;
        if got_gold {
            self.bank[Color::Gold] -= 1;
            player.tokens_mut()[Color::Gold] += 1;
        }

        event!(Level::DEBUG, idx, ?card, ?tier, got_gold, "card_reserved");
        Ok(got_gold)
    }

    /// Buy a card from a river or from `idx`'s own reserved cards.
    ///
    /// A card bought from a river is replaced from that tier's deck. A
    /// reserved card leaves no gap to fill. After paying, the buyer claims at
    /// most one tile whose requirement they now meet, lowest id first.
    pub fn buy_card(&mut self, idx: usize, card: CardId) -> Result<Purchase, GameStateError> {
        let player = self.player(idx)?;
        let tier = self.market.locate(card);
        if tier.is_none() && !player.reserved().contains(&card) {
            return Err(GameStateError::IllegalCardReference(card));
        }
        let color = self
            .catalog
            .card(card)
            .map(|c| c.color)
            .ok_or(GameStateError::IllegalCardReference(card))?;

        let affordability = self.affordability(idx, card)?;
        if !affordability.affordable {
            return Err(GameStateError::UnaffordableCard { player: idx, card });
        }
        let payment = affordability.payment;

        match tier {
            Some(tier) => {
                self.market
                    .remove_from_river(tier, card)
                    .ok_or(GameStateError::IllegalCardReference(card))?;
            }
            None => {
                self.players[idx].remove_reserved(card);
            }
        }
        self.apply_payment(idx, card, &payment)?;
        self.players[idx].add_owned(color, card);

        event!(Level::DEBUG, idx, ?card, ?tier, %payment, "card_bought");

        let tile = self.claim_tile(idx)?;
        Ok(Purchase {
            card,
            tier,
            payment,
            tile,
        })
    }

    /// Move `payment` from `idx`'s tokens back to the bank.
    pub(crate) fn apply_payment(
        &mut self,
        idx: usize,
        card: CardId,
        payment: &Gems,
    ) -> Result<(), GameStateError> {
        let player = self
            .players
            .get_mut(idx)
            .ok_or(GameStateError::InvalidPlayerIndex(idx))?;
        let remaining = player
            .tokens()
            .checked_sub(payment)
            .ok_or(GameStateError::UnaffordableCard { player: idx, card })?;
        *player.tokens_mut() = remaining;
        self.bank = self.bank.saturating_add(payment);
        Ok(())
    }

    fn claim_tile(&mut self, idx: usize) -> Result<Option<TileId>, GameStateError> {
        let Some(tile) = self.eligible_tiles(idx)?.first().copied() else {
            return Ok(None);
        };
        self.available_tiles.retain(|t| *t != tile);
        self.players[idx].claim_tile(tile);
        event!(Level::INFO, idx, ?tile, "tile_claimed");
        Ok(Some(tile))
    }

    /// Move on to the next seat. Returns true when that starts a new round.
    pub(crate) fn advance_turn(&mut self) -> bool {
        self.turn += 1;
        self.to_act_idx = (self.to_act_idx + 1) % self.num_players();
        if self.to_act_idx == self.starting_idx {
            self.round += 1;
            return true;
        }
        false
    }

    pub(crate) fn arm_final_round(&mut self) {
        if self.phase == Phase::AwaitingAction {
            self.phase = Phase::FinalRound;
        }
    }

    pub(crate) fn complete(&mut self, reason: EndReason) {
        self.phase = Phase::Complete(reason);
    }
}

/// Shortcuts for setting up positions in tests.
#[cfg(any(test, feature = "arena-test-util"))]
impl GameState {
    /// Move tokens from the bank straight to a player.
    pub fn give_tokens(&mut self, idx: usize, gems: Gems) {
        self.bank = self
            .bank
            .checked_sub(&gems)
            .unwrap_or_else(|| panic!("bank {} can't cover {gems}", self.bank));
        let tokens = self.players[idx].tokens_mut();
        *tokens = tokens.saturating_add(&gems);
    }

    /// File a card as owned by a player without paying for it.
    pub fn give_card(&mut self, idx: usize, color: Color, card: CardId) {
        self.players[idx].add_owned(color, card);
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("seed", &self.seed)
            .field("bank", &self.bank)
            .field("market", &self.market)
            .field("players", &self.players)
            .field("available_tiles", &self.available_tiles)
            .field("to_act_idx", &self.to_act_idx)
            .field("round", &self.round)
            .field("turn", &self.turn)
            .field("phase", &self.phase)
            .finish()
    }
}
