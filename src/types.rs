use serde::{Deserialize, Serialize};

use crate::notation;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// A board coordinate. Row 0 is the opponent's back rank, col 0 the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub const fn row(self) -> u8 {
        self.row
    }

    pub const fn col(self) -> u8 {
        self.col
    }

    /// Row-major index in `0..64`.
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub(crate) const fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    /// Steps by `(dr, dc)`; `None` past the board edge.
    pub fn offset(self, dr: i32, dc: i32) -> Option<Self> {
        let row = self.row as i32 + dr;
        let col = self.col as i32 + dc;
        if (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUM_SQUARES).map(Self::from_index)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(notation::encode(*self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row delta of a pawn advance. White plays up the board toward row 0.
    pub const fn forward(self) -> i32 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    pub const fn pawn_row(self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    pub const fn back_row(self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::White => write!(f, "White"),
            Self::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl PieceKind {
    const ALL: [Self; 6] = [
        Self::King,
        Self::Queen,
        Self::Bishop,
        Self::Knight,
        Self::Rook,
        Self::Pawn,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    pub const fn white(kind: PieceKind) -> Self {
        Self::new(Color::White, kind)
    }

    pub const fn black(kind: PieceKind) -> Self {
        Self::new(Color::Black, kind)
    }

    /// Wire code: 1..=6 White K Q B N R P, 7..=12 Black in the same order.
    pub fn code(self) -> u8 {
        let kind = match self.kind {
            PieceKind::King => 0,
            PieceKind::Queen => 1,
            PieceKind::Bishop => 2,
            PieceKind::Knight => 3,
            PieceKind::Rook => 4,
            PieceKind::Pawn => 5,
        };
        match self.color {
            Color::White => 1 + kind,
            Color::Black => 7 + kind,
        }
    }

    /// Inverse of [`Piece::code`]. `Some(None)` for the empty code 0.
    pub fn from_code(code: u8) -> Option<Option<Self>> {
        match code {
            0 => Some(None),
            1..=6 => Some(Some(Self::white(PieceKind::ALL[code as usize - 1]))),
            7..=12 => Some(Some(Self::black(PieceKind::ALL[code as usize - 7]))),
            _ => None,
        }
    }
}

/// Checkerboard tint. Only the renderer cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tint {
    Light,
    Dark,
}

impl Tint {
    pub const fn of(coord: Coord) -> Self {
        if (coord.row + coord.col) % 2 == 0 {
            Self::Light
        } else {
            Self::Dark
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    pub piece: Option<Piece>,
    pub tint: Tint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }

    pub fn to_notation(self) -> String {
        notation::encode_move(self.from, Some(self.to))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    InProgress,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mover {
    Player,
    Opponent,
}

/// One line of the move log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub mover: Mover,
    pub token: String,
}

/// Requests for the rendering collaborator, in the order they were produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UiEvent {
    Highlight { at: Coord },
    ClearHighlight,
    Rejected { at: Coord },
    Redraw {
        vacated: Coord,
        occupied: Coord,
        piece: Option<Piece>,
    },
    /// Repaint one square as it now stands, used when a turn is rolled back.
    Repaint { at: Coord, piece: Option<Piece> },
    Status { text: String },
    Log { mover: Mover, token: String },
}

/// Full board state for a re-render from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    /// Piece codes, row-major (see [`Piece::code`]).
    pub squares: Vec<u8>,
    pub tints: Vec<Tint>,
    pub state: GameState,
    pub status: String,
    pub selected: Option<Coord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_rejects_out_of_range() {
        assert!(Coord::new(0, 0).is_some());
        assert!(Coord::new(7, 7).is_some());
        assert!(Coord::new(8, 0).is_none());
        assert!(Coord::new(0, 8).is_none());
    }

    #[test]
    fn offset_stops_at_edges() {
        let corner = Coord::new(0, 7).unwrap();
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, 1), None);
        assert_eq!(corner.offset(1, -1), Coord::new(1, 6));
    }

    #[test]
    fn piece_codes_cover_both_colors() {
        for code in 0..=12u8 {
            let piece = Piece::from_code(code).unwrap();
            assert_eq!(piece.map_or(0, Piece::code), code);
        }
        assert_eq!(Piece::from_code(13), None);
        assert_eq!(Piece::white(PieceKind::King).code(), 1);
        assert_eq!(Piece::black(PieceKind::Pawn).code(), 12);
    }

    #[test]
    fn top_left_square_is_light() {
        assert_eq!(Tint::of(Coord::new(0, 0).unwrap()), Tint::Light);
        assert_eq!(Tint::of(Coord::new(0, 1).unwrap()), Tint::Dark);
        assert_eq!(Tint::of(Coord::new(7, 7).unwrap()), Tint::Light);
    }
}
