use tracing::{Level, debug_span, event, trace_span};

use super::{
    Agent, GameState,
    action::{
        Action, AgentAction, FailedActionPayload, FinalRoundPayload, GameEndPayload,
        GameStartPayload, PlayedActionPayload, TileClaimedPayload,
    },
    errors::GameStateError,
    game_state::{EndReason, Phase, Purchase},
    historian::Historian,
};

/// Points a player needs before the final round starts.
pub const DEFAULT_VICTORY_POINTS: u32 = 15;

/// A single game played by agents, one per seat.
///
/// Each turn the seat to act is asked for an action, which is applied to the
/// game state. A rejected action changes nothing and the seat loses the turn.
/// When a player reaches the victory points the current round is finished and
/// then the game ends. A round cap, when set, ends games nobody wins.
///
/// Everything that happens is handed to the historians in order.
pub struct GameSimulation {
    agents: Vec<Box<dyn Agent>>,
    pub game_state: GameState,
    historians: Vec<Box<dyn Historian>>,
    pub id: uuid::Uuid,
    panic_on_historian_error: bool,
    victory_points: u32,
    max_rounds: Option<u32>,
}

impl GameSimulation {
    pub(crate) fn new(
        game_state: GameState,
        agents: Vec<Box<dyn Agent>>,
        historians: Vec<Box<dyn Historian>>,
        panic_on_historian_error: bool,
        victory_points: u32,
        max_rounds: Option<u32>,
    ) -> Self {
        Self {
            agents,
            game_state,
            historians,
            id: uuid::Uuid::now_v7(),
            panic_on_historian_error,
            victory_points,
            max_rounds,
        }
    }

    pub fn victory_points(&self) -> u32 {
        self.victory_points
    }

    pub fn max_rounds(&self) -> Option<u32> {
        self.max_rounds
    }

    pub fn more_turns(&self) -> bool {
        !self.game_state.is_complete()
    }

    /// Run the simulation all the way to completion. This will mutate the
    /// current state.
    pub fn run(&mut self) {
        let span = debug_span!("run", id = %self.id, seed = self.game_state.seed);
        let _enter = span.enter();

        if self.game_state.turn == 0 && self.more_turns() {
            self.record_action(Action::GameStart(GameStartPayload {
                seed: self.game_state.seed,
                num_players: self.game_state.num_players(),
                bank: *self.game_state.bank(),
                tiles: self.game_state.available_tiles().to_vec(),
            }));
        }

        while self.more_turns() {
            self.run_turn();
        }
    }

    /// Play a single turn for the seat that's up, then advance.
    pub fn run_turn(&mut self) {
        if !self.more_turns() {
            return;
        }
        let idx = self.game_state.to_act_idx;
        let span = trace_span!("run_turn", idx, round = self.game_state.round);
        let _enter = span.enter();

        let action = self.agents[idx].act(&self.id, &self.game_state, idx);
        event!(Level::TRACE, idx, %action, "agent_action");

        self.run_agent_action(idx, action);
        self.check_victory(idx);
        self.advance_turn();
    }

    fn run_agent_action(&mut self, idx: usize, action: AgentAction) {
        let starting_tokens = self
            .game_state
            .player(idx)
            .map(|p| *p.tokens())
            .unwrap_or_default();

        let result: Result<Option<Purchase>, GameStateError> = match &action {
            AgentAction::TakeTokens(selection) => self
                .game_state
                .take_selection(idx, selection)
                .map(|_| None),
            AgentAction::Reserve(card) => self.game_state.reserve_card(idx, *card).map(|_| None),
            AgentAction::Buy(card) => self.game_state.buy_card(idx, *card).map(Some),
            AgentAction::Pass => Ok(None),
        };

        match result {
            Ok(purchase) => {
                let final_tokens = self
                    .game_state
                    .player(idx)
                    .map(|p| *p.tokens())
                    .unwrap_or_default();
                let final_score = self.game_state.score(idx).unwrap_or_default();
                self.record_action(Action::PlayedAction(PlayedActionPayload {
                    action,
                    idx,
                    round: self.game_state.round,
                    turn: self.game_state.turn,
                    starting_tokens,
                    final_tokens,
                    final_bank: *self.game_state.bank(),
                    final_score,
                    purchase,
                }));

                if let Some(tile) = purchase.and_then(|p| p.tile) {
                    let points = self.game_state.tile(tile).map_or(0, |t| t.points);
                    self.record_action(Action::TileClaimed(TileClaimedPayload {
                        idx,
                        tile,
                        points,
                    }));
                }
            }
            Err(error) => {
                event!(Level::WARN, idx, %action, %error, "action_rejected");
                self.record_action(Action::FailedAction(FailedActionPayload {
                    action,
                    idx,
                    round: self.game_state.round,
                    turn: self.game_state.turn,
                    error,
                }));
            }
        }
    }

    fn check_victory(&mut self, idx: usize) {
        if self.game_state.phase != Phase::AwaitingAction {
            return;
        }
        let scores = self.game_state.scores();
        if scores.iter().any(|s| *s >= self.victory_points) {
            self.game_state.arm_final_round();
            let score = scores.get(idx).copied().unwrap_or_default();
            event!(Level::INFO, idx, score, round = self.game_state.round, "final_round");
            self.record_action(Action::FinalRound(FinalRoundPayload {
                idx,
                score,
                round: self.game_state.round,
            }));
        }
    }

    fn advance_turn(&mut self) {
        if !self.game_state.advance_turn() {
            return;
        }
        if self.game_state.is_final_round() {
            self.end_game(EndReason::VictoryThreshold);
        } else if self.max_rounds.is_some_and(|cap| self.game_state.round > cap) {
            self.end_game(EndReason::RoundCap);
        } else {
            self.record_action(Action::RoundAdvance(self.game_state.round));
        }
    }

    fn end_game(&mut self, reason: EndReason) {
        self.game_state.complete(reason);
        let scores = self.game_state.scores();
        let winners = self.game_state.winners();
        event!(
            Level::INFO,
            ?reason,
            round = self.game_state.round,
            ?scores,
            ?winners,
            "game_complete"
        );
        self.record_action(Action::GameEnd(GameEndPayload {
            reason,
            round: self.game_state.round,
            scores,
            winners,
        }));
    }

    // Make sure that all modifications to game_state are complete before calling
    // `record_action`. This is critical for making sure replays are deterministic.
    fn record_action(&mut self, action: Action) {
        event!(Level::TRACE, ?action, "add_action");
        let id = self.id;
        let game_state = &self.game_state;
        let panic_on_historian_error = self.panic_on_historian_error;

        self.historians.retain_mut(|historian| {
            match historian.record_action(&id, game_state, action.clone()) {
                Ok(()) => true,
                Err(error) => {
                    if panic_on_historian_error {
                        panic!("Historian failed to record action: {error}");
                    }
                    event!(Level::WARN, %error, "historian_dropped");
                    false
                }
            }
        });
    }
}
