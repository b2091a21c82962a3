use thiserror::Error;

use crate::types::{Color, Coord, Move, NUM_SQUARES, Piece, PieceKind, Square, Tint};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("no {0} king on the board")]
    KingNotFound(Color),
    #[error("more than one {0} king on the board")]
    MultipleKings(Color),
}

/// 8x8 chess board. Row 0 is Black's back rank.
///
/// The board does not enforce one king per color; whoever populates it is
/// responsible for that. Lookups that need the king report a [`RulesError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [Square; NUM_SQUARES],
}

impl Board {
    /// Creates the standard starting arrangement.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            for color in [Color::White, Color::Black] {
                board.put(color.back_row(), col as u8, Piece::new(color, kind));
                board.put(color.pawn_row(), col as u8, Piece::new(color, PieceKind::Pawn));
            }
        }
        board
    }

    /// Creates a board with no pieces, for setup variants.
    pub fn empty() -> Self {
        let mut squares = [Square {
            piece: None,
            tint: Tint::Light,
        }; NUM_SQUARES];
        for coord in Coord::all() {
            squares[coord.index()].tint = Tint::of(coord);
        }
        Self { squares }
    }

    pub fn get(&self, at: Coord) -> Option<Piece> {
        self.squares[at.index()].piece
    }

    pub fn square(&self, at: Coord) -> Square {
        self.squares[at.index()]
    }

    /// Places (or with `None`, removes) a piece. Returns what was there.
    pub fn set(&mut self, at: Coord, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[at.index()].piece, piece)
    }

    /// Moves the piece on `mv.from` to `mv.to` and clears the source.
    /// Returns the captured piece, if any. No legality check.
    pub fn apply_move(&mut self, mv: Move) -> Option<Piece> {
        let moving = self.set(mv.from, None);
        self.set(mv.to, moving)
    }

    /// Returns a copy of the board with `mv` applied.
    pub fn with_move(&self, mv: Move) -> Self {
        let mut next = *self;
        next.apply_move(mv);
        next
    }

    pub fn is_empty_at(&self, at: Coord) -> bool {
        self.get(at).is_none()
    }

    /// Iterates occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(|at| self.get(at).map(|piece| (at, piece)))
    }

    /// Locates the sole king of `color`.
    pub fn find_king(&self, color: Color) -> Result<Coord, RulesError> {
        let king = Piece::new(color, PieceKind::King);
        let mut found = self.pieces().filter(|(_, piece)| *piece == king);
        let (at, _) = found.next().ok_or(RulesError::KingNotFound(color))?;
        if found.next().is_some() {
            return Err(RulesError::MultipleKings(color));
        }
        Ok(at)
    }

    /// Converts the board to piece codes (see [`Piece::code`]), row-major.
    pub fn to_codes(&self) -> [u8; NUM_SQUARES] {
        let mut codes = [0u8; NUM_SQUARES];
        for (cell, square) in codes.iter_mut().zip(self.squares.iter()) {
            *cell = square.piece.map_or(0, Piece::code);
        }
        codes
    }

    fn put(&mut self, row: u8, col: u8, piece: Piece) {
        if let Some(at) = Coord::new(row, col) {
            self.set(at, Some(piece));
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
