//! Turn engine - owns the session and resolves rolls
//!
//! This module ties together board generation, movement, scoring, records and
//! turn order. A session moves through these phases:
//!
//! ```text
//! Idle --start_game--> AwaitingRoll --begin_roll--> Moving --last step--+
//!                          ^   ^                                        |
//!                          |   +------ resolve_bonus(true) --- BonusOffer <--(multiple of 5)
//!                          +-- rotate (resolve_bonus(false) or plain node) <-+
//!                                                          Finished <--(node 64)
//! ```
//!
//! Only `AwaitingRoll` accepts a roll. `Moving` and `BonusOffer` count as a
//! turn in progress; a second roll request is rejected rather than queued.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::board::Board;
use crate::error::GameError;
use crate::leaderboard::{self, Standing};
use crate::movement::{compute_path, ladder_hint};
use crate::player::Player;
use crate::record::RecordBook;
use crate::rng::{RandomSource, SimpleRng};
use crate::rules::{is_bonus_node, is_ladder_eligible, roll_die, roll_direction, star_points};
use crate::snapshot::GameSnapshot;
use crate::types::{
    Direction, GameAction, GameEvent, Ladder, Node, Token, FINISH_NODE, MAX_PLAYERS, MIN_PLAYERS,
};

/// Where the session is in its turn cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum TurnPhase {
    /// No session has been started.
    #[default]
    Idle,
    /// The current player may roll.
    AwaitingRoll,
    /// A path is being applied node by node.
    Moving,
    /// The current player ended on a multiple of 5 and may roll again.
    BonusOffer { node: Node },
    /// Someone reached the finish; `winner` indexes the roster.
    Finished { winner: usize },
}

/// The draws and path of one roll, before any of it is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub player: String,
    pub dice: u8,
    pub direction: Direction,
    pub ladder_eligible: bool,
    pub start: Node,
    pub path: Vec<Node>,
}

/// One applied node of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub from: Node,
    pub to: Node,
    pub ladder: Option<Ladder>,
    pub points: Option<u32>,
}

/// How a turn ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// Play moved on to `next`.
    Passed { next: String },
    /// The same player may roll again.
    BonusRollOffered { node: Node },
    /// The session is over.
    Won {
        name: String,
        total_wins: u32,
        total_score: u32,
        session_score: u32,
    },
}

/// Everything that happened in a fully resolved roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    pub roll: RollOutcome,
    pub steps: Vec<Step>,
    /// Star points earned during this roll.
    pub points: u32,
    pub outcome: TurnOutcome,
}

#[derive(Debug, Clone)]
struct Session {
    players: Vec<Player>,
    turn_queue: VecDeque<usize>,
    current: usize,
    board: Board,
    round: u32,
}

impl Session {
    fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    /// Refill the queue in roster order and promote its head.
    fn restart_queue(&mut self) {
        self.turn_queue = (0..self.players.len()).collect();
        self.current = self.turn_queue.pop_front().unwrap_or(0);
    }
}

/// The game engine.
///
/// Generic over its random source so tests can script every draw; play uses
/// [`SimpleRng`].
#[derive(Debug, Clone)]
pub struct TurnEngine<R = SimpleRng> {
    rng: R,
    records: RecordBook,
    session: Option<Session>,
    phase: TurnPhase,
    pending_path: VecDeque<Node>,
    last_roll: Option<RollOutcome>,
    last_outcome: Option<TurnOutcome>,
    /// Sessions started on this engine (rounds not counted).
    sessions_started: u32,
    events: VecDeque<GameEvent>,
}

impl TurnEngine<SimpleRng> {
    /// Create an engine whose draws all come from `seed`.
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl Default for TurnEngine<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<R: RandomSource> TurnEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            records: RecordBook::new(),
            session: None,
            phase: TurnPhase::Idle,
            pending_path: VecDeque::new(),
            last_roll: None,
            last_outcome: None,
            sessions_started: 0,
            events: VecDeque::new(),
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// A session is running and has not been won yet.
    pub fn is_started(&self) -> bool {
        matches!(
            self.phase,
            TurnPhase::AwaitingRoll | TurnPhase::Moving | TurnPhase::BonusOffer { .. }
        )
    }

    pub fn turn_in_progress(&self) -> bool {
        matches!(self.phase, TurnPhase::Moving | TurnPhase::BonusOffer { .. })
    }

    pub fn can_roll(&self) -> bool {
        self.phase == TurnPhase::AwaitingRoll
    }

    /// Round number within the current session (1 for a fresh session).
    pub fn round(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.round)
    }

    pub fn sessions_started(&self) -> u32 {
        self.sessions_started
    }

    /// Current roster in seating order.
    pub fn players(&self) -> &[Player] {
        match &self.session {
            Some(s) => &s.players,
            None => &[],
        }
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.session.as_ref().and_then(Session::current_player)
    }

    /// Seat index of the current player.
    pub fn current_seat(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.current)
    }

    /// Players waiting for their turn, next first (the current player excluded).
    pub fn turn_queue(&self) -> Vec<&Player> {
        match &self.session {
            Some(s) => s
                .turn_queue
                .iter()
                .filter_map(|&i| s.players.get(i))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn board(&self) -> Option<&Board> {
        self.session.as_ref().map(|s| &s.board)
    }

    pub fn records(&self) -> &RecordBook {
        &self.records
    }

    pub fn last_roll(&self) -> Option<&RollOutcome> {
        self.last_roll.as_ref()
    }

    pub fn last_outcome(&self) -> Option<&TurnOutcome> {
        self.last_outcome.as_ref()
    }

    /// Nodes of the current roll not yet applied.
    pub fn pending_path(&self) -> impl Iterator<Item = Node> + '_ {
        self.pending_path.iter().copied()
    }

    pub fn winner(&self) -> Option<&Player> {
        match self.phase {
            TurnPhase::Finished { winner } => self.players().get(winner),
            _ => None,
        }
    }

    /// Roster best-first; see [`leaderboard::rank`].
    pub fn rank(&self) -> Vec<&Player> {
        leaderboard::rank(self.players())
    }

    pub fn standings(&self) -> Vec<Standing> {
        leaderboard::standings(self.players())
    }

    /// Take every event emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.phase = self.phase;
        out.started = self.is_started();
        out.turn_in_progress = self.turn_in_progress();
        out.round = self.round();
        out.sessions_started = self.sessions_started;
        out.current = self.current_player().map(|p| p.name().to_owned());
        out.current_seat = self.current_seat();
        out.turn_queue.clear();
        out.turn_queue
            .extend(self.turn_queue().iter().map(|p| p.name().to_owned()));
        out.players.clear();
        out.players.extend(self.players().iter().map(Into::into));
        out.ladders.clear();
        out.score_nodes.clear();
        if let Some(board) = self.board() {
            out.ladders.extend_from_slice(board.ladders());
            out.score_nodes.extend(board.score_nodes().iter().copied());
        }
        out.last_roll = self.last_roll.clone();
        out.last_outcome = self.last_outcome().cloned();
        out.pending_path.clear();
        out.pending_path.extend(self.pending_path.iter().copied());
        out.winner = self.winner().map(|p| p.name().to_owned());
        out.standings = self.standings();
    }

    /// Start a session with a freshly generated board.
    ///
    /// Names are trimmed and blank names become `"Player N"`. Each name's
    /// record is looked up or created; the previous roster is dropped but the
    /// records remain.
    pub fn start_game<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), GameError> {
        self.check_can_start(names.len())?;
        let board = Board::generate(&mut self.rng)?;
        self.install_session(names, board);
        Ok(())
    }

    /// Start a session on a known board.
    pub fn start_game_with_board<S: AsRef<str>>(
        &mut self,
        names: &[S],
        board: Board,
    ) -> Result<(), GameError> {
        self.check_can_start(names.len())?;
        self.install_session(names, board);
        Ok(())
    }

    fn check_can_start(&self, count: usize) -> Result<(), GameError> {
        if self.phase == TurnPhase::Moving {
            return Err(GameError::TurnInProgress);
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(GameError::InvalidPlayerCount { count });
        }
        Ok(())
    }

    fn install_session<S: AsRef<str>>(&mut self, names: &[S], board: Board) {
        let players: Vec<Player> = names
            .iter()
            .enumerate()
            .map(|(seat, raw)| {
                let name = seat_name(raw.as_ref(), seat);
                let record = self.records.get_or_create(&name);
                Player::new(name, Token::for_seat(seat), record)
            })
            .collect();

        let mut session = Session {
            players,
            turn_queue: VecDeque::new(),
            current: 0,
            board,
            round: 1,
        };
        session.restart_queue();

        let roster: Vec<String> = session
            .players
            .iter()
            .map(|p| p.name().to_owned())
            .collect();
        debug!(players = ?roster, ladders = ?session.board.ladders(), "game started");

        self.session = Some(session);
        self.sessions_started = self.sessions_started.wrapping_add(1);
        self.reset_turn_state();
        self.phase = TurnPhase::AwaitingRoll;
        self.events.push_back(GameEvent::GameStarted {
            players: roster,
            round: 1,
        });
    }

    fn reset_turn_state(&mut self) {
        self.pending_path.clear();
        self.last_roll = None;
        self.last_outcome = None;
    }

    /// Replay with the same roster after a win.
    ///
    /// Positions and session scores go back to zero, a new board is
    /// generated and the first seat rolls first. Records are untouched.
    pub fn start_new_round(&mut self) -> Result<(), GameError> {
        match self.phase {
            TurnPhase::Finished { .. } => {}
            TurnPhase::Idle => return Err(GameError::NotStarted),
            _ => return Err(GameError::RoundNotOver),
        }
        let board = Board::generate(&mut self.rng)?;

        let Some(session) = self.session.as_mut() else {
            return Err(GameError::NotStarted);
        };
        for player in &mut session.players {
            player.reset_for_round();
        }
        session.board = board;
        session.round = session.round.wrapping_add(1);
        session.restart_queue();
        let round = session.round;

        debug!(round, "new round");
        self.reset_turn_state();
        self.phase = TurnPhase::AwaitingRoll;
        self.events.push_back(GameEvent::RoundReset { round });
        Ok(())
    }

    /// Roll and apply the whole path at once.
    pub fn roll_dice(&mut self) -> Result<TurnResult, GameError> {
        let (roll, mut outcome) = self.start_roll()?;
        let mut steps = Vec::with_capacity(roll.path.len());

        while outcome.is_none() {
            match self.apply_next_step() {
                Some((step, done)) => {
                    steps.push(step);
                    outcome = done;
                }
                None => break,
            }
        }

        let outcome = match outcome {
            Some(outcome) => outcome,
            None => self.complete_turn().ok_or(GameError::NotStarted)?,
        };
        let points = steps.iter().filter_map(|s| s.points).sum();

        Ok(TurnResult {
            roll,
            steps,
            points,
            outcome,
        })
    }

    /// Draw the roll and compute its path without applying it.
    ///
    /// The turn counts as in progress until [`advance_step`](Self::advance_step)
    /// has applied every node. A roll with an empty path (backward from the
    /// start) completes immediately.
    pub fn begin_roll(&mut self) -> Result<RollOutcome, GameError> {
        self.start_roll().map(|(roll, _)| roll)
    }

    /// Apply the next node of the current roll.
    ///
    /// Returns `None` when no roll is being applied. Applying the last node
    /// also completes the turn (win, bonus offer, or rotation).
    pub fn advance_step(&mut self) -> Option<Step> {
        self.apply_next_step().map(|(step, _)| step)
    }

    /// Accept or decline the bonus roll on offer.
    pub fn resolve_bonus(&mut self, accept: bool) -> Result<(), GameError> {
        if !matches!(self.phase, TurnPhase::BonusOffer { .. }) {
            return Err(GameError::NoBonusPending);
        }
        if accept {
            debug!("bonus roll accepted");
            self.phase = TurnPhase::AwaitingRoll;
        } else {
            self.rotate();
        }
        Ok(())
    }

    /// Apply a front-end command.
    ///
    /// `Roll` only begins the roll; callers animate it with
    /// [`advance_step`](Self::advance_step). `NewGame` restarts with the
    /// current roster's names.
    pub fn apply_action(&mut self, action: GameAction) -> Result<(), GameError> {
        match action {
            GameAction::Roll => self.begin_roll().map(|_| ()),
            GameAction::AcceptBonus => self.resolve_bonus(true),
            GameAction::DeclineBonus => self.resolve_bonus(false),
            GameAction::NewRound => self.start_new_round(),
            GameAction::NewGame => {
                let names: Vec<String> =
                    self.players().iter().map(|p| p.name().to_owned()).collect();
                if names.is_empty() {
                    return Err(GameError::NotStarted);
                }
                self.start_game(&names)
            }
        }
    }

    fn start_roll(&mut self) -> Result<(RollOutcome, Option<TurnOutcome>), GameError> {
        match self.phase {
            TurnPhase::AwaitingRoll => {}
            TurnPhase::Idle | TurnPhase::Finished { .. } => return Err(GameError::NotStarted),
            TurnPhase::Moving => return Err(GameError::TurnInProgress),
            TurnPhase::BonusOffer { .. } => return Err(GameError::BonusDecisionPending),
        }
        let Some(session) = self.session.as_ref() else {
            return Err(GameError::NotStarted);
        };
        let Some(player) = session.current_player() else {
            return Err(GameError::NotStarted);
        };

        let start = player.position();
        let dice = roll_die(&mut self.rng);
        let direction = roll_direction(&mut self.rng);
        let ladder_eligible = is_ladder_eligible(start);
        let path = compute_path(
            session.board.ladders(),
            start,
            dice,
            ladder_eligible,
            direction,
        );

        let roll = RollOutcome {
            player: player.name().to_owned(),
            dice,
            direction,
            ladder_eligible,
            start,
            path,
        };
        debug!(
            player = %roll.player,
            dice,
            direction = direction.as_str(),
            ladder_eligible,
            path = ?roll.path,
            "rolled"
        );

        self.phase = TurnPhase::Moving;
        self.last_outcome = None;
        self.pending_path = roll.path.iter().copied().collect();
        self.last_roll = Some(roll.clone());
        self.events.push_back(GameEvent::Rolled {
            player: roll.player.clone(),
            dice,
            direction,
            ladder_eligible,
            path: roll.path.clone(),
        });

        let outcome = if self.pending_path.is_empty() {
            self.complete_turn()
        } else {
            None
        };
        Ok((roll, outcome))
    }

    fn apply_next_step(&mut self) -> Option<(Step, Option<TurnOutcome>)> {
        if self.phase != TurnPhase::Moving {
            return None;
        }
        let to = self.pending_path.pop_front()?;
        let session = self.session.as_mut()?;

        let from = session.players.get(session.current)?.position();
        let ladder = ladder_hint(session.board.ladders(), from, to);
        let on_star = session.board.is_score_node(to) && to != from;

        let player = session.players.get_mut(session.current)?;
        player.set_position(to);
        let points = if on_star {
            let points = star_points(&mut self.rng);
            player.add_score(points);
            Some(points)
        } else {
            None
        };

        let step = Step {
            from,
            to,
            ladder,
            points,
        };
        trace!(player = %player.name(), from, to, ?ladder, ?points, "step");
        self.events.push_back(GameEvent::Stepped {
            player: player.name().to_owned(),
            from,
            to,
            ladder,
            points,
        });

        let outcome = if self.pending_path.is_empty() {
            self.complete_turn()
        } else {
            None
        };
        Some((step, outcome))
    }

    /// Win check, then bonus offer, then rotation.
    fn complete_turn(&mut self) -> Option<TurnOutcome> {
        self.pending_path.clear();
        let session = self.session.as_ref()?;
        let seat = session.current;
        let player = session.current_player()?;
        let position = player.position();

        let outcome = if position == FINISH_NODE {
            player.add_win();
            let totals = player.record_totals();
            let name = player.name().to_owned();
            let session_score = player.session_score();
            debug!(
                winner = %name,
                total_wins = totals.total_wins,
                total_score = totals.total_score,
                "player won"
            );
            self.phase = TurnPhase::Finished { winner: seat };
            self.events.push_back(GameEvent::PlayerWon {
                name: name.clone(),
                total_wins: totals.total_wins,
                total_score: totals.total_score,
                session_score,
            });
            TurnOutcome::Won {
                name,
                total_wins: totals.total_wins,
                total_score: totals.total_score,
                session_score,
            }
        } else if is_bonus_node(position) {
            let name = player.name().to_owned();
            debug!(player = %name, node = position, "bonus roll offered");
            self.phase = TurnPhase::BonusOffer { node: position };
            self.events.push_back(GameEvent::BonusRollOffered {
                player: name,
                node: position,
            });
            TurnOutcome::BonusRollOffered { node: position }
        } else {
            self.rotate()?
        };

        self.last_outcome = Some(outcome.clone());
        Some(outcome)
    }

    /// Current player to the back of the queue; the head becomes current.
    fn rotate(&mut self) -> Option<TurnOutcome> {
        let session = self.session.as_mut()?;
        let previous = session.current;
        session.turn_queue.push_back(previous);
        let next = session.turn_queue.pop_front()?;
        session.current = next;

        let from = session.players.get(previous)?.name().to_owned();
        let to = session.players.get(next)?.name().to_owned();
        debug!(from = %from, to = %to, "turn passed");

        self.phase = TurnPhase::AwaitingRoll;
        self.events.push_back(GameEvent::TurnPassed {
            from,
            to: to.clone(),
        });
        let outcome = TurnOutcome::Passed { next: to };
        self.last_outcome = Some(outcome.clone());
        Some(outcome)
    }

    #[cfg(test)]
    fn session_mut(&mut self) -> &mut Session {
        self.session.as_mut().expect("session started")
    }
}

/// Trimmed name, or `"Player N"` (1-based) when blank.
pub fn seat_name(raw: &str, seat: usize) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        format!("Player {}", seat + 1)
    } else {
        trimmed.to_owned()
    }
}
