use thiserror::Error;
use tracing::{debug, info, warn};
use web_time::Instant;

use crate::board::{Board, RulesError};
use crate::check;
use crate::config::GameConfig;
use crate::notation::{self, NotationError};
use crate::rules::{self, Violation};
use crate::types::{BoardView, Color, Coord, GameState, LogEntry, Move, Mover, UiEvent};

/// The human player is White and sits at the bottom of the board.
pub const PLAYER_COLOR: Color = Color::White;
pub const OPPONENT_COLOR: Color = Color::Black;

pub const STATUS_YOUR_MOVE: &str = "Your move.";
pub const STATUS_THINKING: &str = "Black is thinking...";
pub const STATUS_CHECKMATE: &str = "Checkmate!";
pub const STATUS_CHECK: &str = "**Check!**";
pub const STATUS_BAD_REPLY: &str = "Bad reply from opponent.";

/// What the opponent answers to a player move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpponentReply {
    /// A 4-character token such as "e7e5".
    Move(String),
    /// The opponent has no legal reply; the game is over.
    NoLegalReply,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("opponent failed: {0}")]
pub struct OpponentError(pub String);

/// The move-deciding opponent. Called synchronously once per accepted player
/// move; the turn blocks until it answers.
pub trait Opponent {
    fn reply(&mut self, player_move: &str) -> Result<OpponentReply, OpponentError>;

    /// Called whenever a new game starts.
    fn reset(&mut self) {}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("game is already over")]
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum ReplyError {
    #[error(transparent)]
    Opponent(#[from] OpponentError),
    #[error("unreadable reply: {0}")]
    Notation(#[from] NotationError),
    #[error("reply moves from {0}, which holds no opponent piece")]
    NotOpponentPiece(Coord),
    #[error("reply is illegal: {0:?}")]
    Illegal(Vec<Violation>),
    #[error("reply would leave the board without a player king: {0}")]
    KingLost(#[from] RulesError),
}

/// One game against the opponent. Owns the board; every mutation goes through
/// a click.
pub struct GameSession {
    board: Board,
    state: GameState,
    selected: Option<Coord>,
    status: String,
    log: Vec<LogEntry>,
    config: GameConfig,
    opponent: Box<dyn Opponent>,
}

impl GameSession {
    pub fn new(config: GameConfig, opponent: Box<dyn Opponent>) -> Self {
        let board = config.start.board();
        Self::with_board(config, opponent, board)
    }

    /// Starts from a custom arrangement instead of the configured one.
    pub fn with_board(config: GameConfig, opponent: Box<dyn Opponent>, board: Board) -> Self {
        let mut session = Self {
            board,
            state: GameState::InProgress,
            selected: None,
            status: String::new(),
            log: Vec::new(),
            config,
            opponent,
        };
        session.start(board);
        session
    }

    pub fn new_game(&mut self) {
        self.start(self.config.start.board());
    }

    /// Restarts with a custom arrangement, e.g. one read from layout bytes.
    pub fn new_game_with(&mut self, board: Board) {
        self.start(board);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn move_log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn snapshot(&self) -> BoardView {
        BoardView {
            squares: self.board.to_codes().to_vec(),
            tints: Coord::all().map(|at| self.board.square(at).tint).collect(),
            state: self.state,
            status: self.status.clone(),
            selected: self.selected,
        }
    }

    /// Handles one click on a board square and returns the rendering requests
    /// it produced. A click that completes a move runs the whole turn,
    /// including the opponent's reply, before returning.
    pub fn handle_click(&mut self, at: Coord) -> Result<Vec<UiEvent>, SessionError> {
        if self.state == GameState::Stopped {
            return Err(SessionError::GameOver);
        }

        let mut events = Vec::new();
        match self.selected.take() {
            None => {
                if self.board.get(at).is_some_and(|p| p.color == PLAYER_COLOR) {
                    debug!(square = %at, "piece selected");
                    self.selected = Some(at);
                    events.push(UiEvent::Highlight { at });
                } else {
                    events.push(UiEvent::ClearHighlight);
                }
            }
            Some(from) => self.play_turn(Move::new(from, at), &mut events),
        }
        Ok(events)
    }

    fn start(&mut self, board: Board) {
        self.board = board;
        self.state = GameState::InProgress;
        self.selected = None;
        self.log.clear();
        self.opponent.reset();
        self.status = STATUS_YOUR_MOVE.to_string();
        info!(pieces = board.pieces().count(), "new game");
    }

    fn play_turn(&mut self, mv: Move, events: &mut Vec<UiEvent>) {
        let validation = rules::validate(&self.board, mv);
        if !validation.is_legal() {
            debug!(
                %mv,
                count = validation.count(),
                violations = ?validation.violations(),
                "move rejected"
            );
            events.push(UiEvent::Rejected { at: mv.to });
            events.push(UiEvent::ClearHighlight);
            return;
        }

        let before = self.board;
        let log_len = self.log.len();
        let events_len = events.len();

        self.apply(Mover::Player, mv, events);
        events.push(UiEvent::ClearHighlight);
        self.set_status(STATUS_THINKING, events);

        let token = mv.to_notation();
        let started = Instant::now();
        let reply = self.opponent.reply(&token);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        if elapsed_ms > self.config.slow_reply_warn_ms {
            warn!(elapsed_ms, "slow opponent reply");
        } else {
            debug!(elapsed_ms, "opponent replied");
        }

        let reply = match reply {
            Ok(OpponentReply::NoLegalReply) => {
                info!(moves = self.log.len(), "opponent has no legal reply, game over");
                self.state = GameState::Stopped;
                self.set_status(STATUS_CHECKMATE, events);
                return;
            }
            Ok(OpponentReply::Move(token)) => self.read_reply(&token),
            Err(err) => Err(err.into()),
        };

        match reply {
            Ok(reply) => {
                self.set_status(STATUS_YOUR_MOVE, events);
                self.apply(Mover::Opponent, reply, events);
                self.warn_if_in_check(events);
            }
            Err(err) => {
                warn!(%mv, error = %err, "opponent reply refused, rolling back turn");
                self.board = before;
                self.log.truncate(log_len);
                events.truncate(events_len);
                for at in [mv.from, mv.to] {
                    events.push(UiEvent::Repaint {
                        at,
                        piece: self.board.get(at),
                    });
                }
                events.push(UiEvent::Rejected { at: mv.to });
                events.push(UiEvent::ClearHighlight);
                self.set_status(STATUS_BAD_REPLY, events);
            }
        }
    }

    fn read_reply(&self, token: &str) -> Result<Move, ReplyError> {
        let mv = notation::parse_move(token)?;
        if !self
            .board
            .get(mv.from)
            .is_some_and(|p| p.color == OPPONENT_COLOR)
        {
            return Err(ReplyError::NotOpponentPiece(mv.from));
        }
        if self.config.revalidate_replies {
            let validation = rules::validate(&self.board, mv);
            if !validation.is_legal() {
                return Err(ReplyError::Illegal(validation.violations().to_vec()));
            }
        }
        self.board.with_move(mv).find_king(PLAYER_COLOR)?;
        Ok(mv)
    }

    fn apply(&mut self, mover: Mover, mv: Move, events: &mut Vec<UiEvent>) {
        let captured = self.board.apply_move(mv);
        let token = mv.to_notation();
        debug!(?mover, %token, ?captured, "move applied");

        self.log.push(LogEntry {
            mover,
            token: token.clone(),
        });
        events.push(UiEvent::Log { mover, token });
        events.push(UiEvent::Redraw {
            vacated: mv.from,
            occupied: mv.to,
            piece: self.board.get(mv.to),
        });
    }

    fn warn_if_in_check(&mut self, events: &mut Vec<UiEvent>) {
        match check::in_check(&self.board, PLAYER_COLOR) {
            Ok(true) => self.set_status(STATUS_CHECK, events),
            Ok(false) => {}
            Err(err) => warn!(error = %err, "cannot test player king for check"),
        }
    }

    fn set_status(&mut self, text: &str, events: &mut Vec<UiEvent>) {
        self.status = text.to_string();
        events.push(UiEvent::Status {
            text: text.to_string(),
        });
    }
}
