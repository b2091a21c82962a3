use crate::board::{Board, RulesError};
use crate::types::{Color, Coord, Piece, PieceKind};

const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Returns true when a king of `defender` standing on `at` would be attacked.
///
/// The square itself is not inspected, so this also answers "may the king step
/// here" for an empty or enemy-occupied square.
pub fn square_attacked(board: &Board, at: Coord, defender: Color) -> bool {
    let enemy = |kind| Some(Piece::new(defender.opponent(), kind));

    let slider_hits = |dirs: &[(i32, i32)], kind: PieceKind| {
        dirs.iter().any(|&(dr, dc)| {
            let first = first_occupied(board, at, dr, dc);
            first == enemy(PieceKind::Queen) || first == enemy(kind)
        })
    };
    if slider_hits(&ORTHOGONAL[..], PieceKind::Rook)
        || slider_hits(&DIAGONAL[..], PieceKind::Bishop)
    {
        return true;
    }

    let occupant = |dr, dc| at.offset(dr, dc).and_then(|sq| board.get(sq));

    if KNIGHT_JUMPS
        .iter()
        .any(|&(dr, dc)| occupant(dr, dc) == enemy(PieceKind::Knight))
    {
        return true;
    }

    // Enemy pawns strike from the two squares ahead of the defender.
    let ahead = defender.forward();
    if [-1, 1]
        .into_iter()
        .any(|dc| occupant(ahead, dc) == enemy(PieceKind::Pawn))
    {
        return true;
    }

    NEIGHBOURS
        .iter()
        .any(|&(dr, dc)| occupant(dr, dc) == enemy(PieceKind::King))
}

/// Is the king of `defender` attacked? With `king` unset the king is located by
/// a full board scan, which requires exactly one such king.
pub fn is_attacked(
    board: &Board,
    king: Option<Coord>,
    defender: Color,
) -> Result<bool, RulesError> {
    let at = match king {
        Some(at) => at,
        None => board.find_king(defender)?,
    };
    Ok(square_attacked(board, at, defender))
}

pub fn in_check(board: &Board, color: Color) -> Result<bool, RulesError> {
    is_attacked(board, None, color)
}

fn first_occupied(board: &Board, from: Coord, dr: i32, dc: i32) -> Option<Piece> {
    let mut cur = from.offset(dr, dc);
    while let Some(sq) = cur {
        if let Some(piece) = board.get(sq) {
            return Some(piece);
        }
        cur = sq.offset(dr, dc);
    }
    None
}
