//! Move legality: per-kind geometry, path obstruction, and the rule that a
//! move may not leave the mover's own king attacked.

use serde::Serialize;

use crate::board::Board;
use crate::check::{self, square_attacked};
use crate::types::{Color, Move, Piece, PieceKind};

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    EmptySource,
    NullMove,
    OwnPieceAtDestination,
    BadGeometry,
    PathBlocked,
    KingStepsIntoAttack,
    LeavesKingInCheck,
    /// The mover has no unique king, so the self-check guard cannot run.
    KingMissing,
}

/// Outcome of [`validate`]. Legal iff no violations were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validation {
    violations: Vec<Violation>,
}

impl Validation {
    pub fn is_legal(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn count(&self) -> usize {
        self.violations.len()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    fn record(&mut self, violation: Violation) {
        self.violations.push(violation);
    }
}

/// Checks `mv` against the position. The board is never mutated; the
/// self-check guard runs on a copy.
pub fn validate(board: &Board, mv: Move) -> Validation {
    let mut out = Validation::default();

    let Some(moving) = board.get(mv.from) else {
        out.record(Violation::EmptySource);
        return out;
    };
    if mv.from == mv.to {
        out.record(Violation::NullMove);
        return out;
    }

    if board.get(mv.to).is_some_and(|piece| piece.color == moving.color) {
        out.record(Violation::OwnPieceAtDestination);
        return out;
    }

    check_geometry(board, moving, mv, &mut out);

    let trial = board.with_move(mv);
    match check::in_check(&trial, moving.color) {
        Ok(true) => out.record(Violation::LeavesKingInCheck),
        Ok(false) => {}
        Err(_) => out.record(Violation::KingMissing),
    }

    out
}

pub fn is_legal(board: &Board, mv: Move) -> bool {
    validate(board, mv).is_legal()
}

fn check_geometry(board: &Board, moving: Piece, mv: Move, out: &mut Validation) {
    let dr = mv.to.row() as i32 - mv.from.row() as i32;
    let dc = mv.to.col() as i32 - mv.from.col() as i32;
    let straight = dr == 0 || dc == 0;
    let diagonal = dr.abs() == dc.abs();

    match moving.kind {
        PieceKind::King => {
            if dr.abs() > 1 || dc.abs() > 1 {
                out.record(Violation::BadGeometry);
            }
            if square_attacked(board, mv.to, moving.color) {
                out.record(Violation::KingStepsIntoAttack);
            }
        }
        PieceKind::Queen => slide(board, mv, straight || diagonal, out),
        PieceKind::Bishop => slide(board, mv, diagonal, out),
        PieceKind::Rook => slide(board, mv, straight, out),
        PieceKind::Knight => {
            let (ar, ac) = (dr.abs(), dc.abs());
            if !((ar == 2 && ac == 1) || (ar == 1 && ac == 2)) {
                out.record(Violation::BadGeometry);
            }
        }
        PieceKind::Pawn => check_pawn(board, moving.color, mv, dr, dc, out),
    }
}

fn slide(board: &Board, mv: Move, on_line: bool, out: &mut Validation) {
    if !on_line {
        out.record(Violation::BadGeometry);
    } else if !path_clear(board, mv) {
        out.record(Violation::PathBlocked);
    }
}

/// True when every square strictly between the endpoints is empty.
/// Endpoints must share a rank, file or diagonal.
fn path_clear(board: &Board, mv: Move) -> bool {
    let dr = (mv.to.row() as i32 - mv.from.row() as i32).signum();
    let dc = (mv.to.col() as i32 - mv.from.col() as i32).signum();

    let mut cur = mv.from.offset(dr, dc);
    while let Some(sq) = cur {
        if sq == mv.to {
            return true;
        }
        if !board.is_empty_at(sq) {
            return false;
        }
        cur = sq.offset(dr, dc);
    }
    true
}

fn check_pawn(board: &Board, color: Color, mv: Move, dr: i32, dc: i32, out: &mut Validation) {
    let forward = color.forward();
    let target_empty = board.is_empty_at(mv.to);

    let ok = if dr == 2 * forward && dc == 0 {
        mv.from.row() == color.pawn_row() && target_empty && path_clear(board, mv)
    } else if dr == forward && dc == 0 {
        target_empty
    } else if dr == forward && dc.abs() == 1 {
        // Own pieces were rejected earlier, so occupied means enemy.
        !target_empty
    } else {
        false
    };

    if !ok {
        out.record(Violation::BadGeometry);
    }
}
