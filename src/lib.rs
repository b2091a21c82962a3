use wasm_bindgen::prelude::*;

pub mod board;
pub mod check;
pub mod config;
pub mod game;
pub mod layout;
pub mod notation;
pub mod rules;
pub mod types;
pub mod wasm;

pub use board::{Board, RulesError};
pub use config::{GameConfig, StartPosition};
pub use game::{GameSession, Opponent, OpponentError, OpponentReply, SessionError};
pub use rules::{Validation, Violation, validate};
pub use types::{Color, Coord, GameState, Move, Piece, PieceKind, UiEvent};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
