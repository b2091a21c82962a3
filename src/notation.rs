//! File+rank tokens for squares and moves ("e2", "e2e4").
//!
//! Row 0 is rank 8 and col 0 is file a, so the player's king starts on "e1".

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::types::{BOARD_SIZE, Coord, Move};

static TOKENS: Lazy<Vec<String>> = Lazy::new(|| {
    Coord::all()
        .map(|c| {
            let file = (b'a' + c.col()) as char;
            let rank = (b'8' - c.row()) as char;
            format!("{file}{rank}")
        })
        .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("square token must be 2 characters, got {0:?}")]
    SquareLength(String),
    #[error("move token must be 4 characters, got {0:?}")]
    MoveLength(String),
    #[error("file must be a-h, got {0:?}")]
    File(char),
    #[error("rank must be 1-8, got {0:?}")]
    Rank(char),
}

pub fn encode(coord: Coord) -> &'static str {
    &TOKENS[coord.index()]
}

pub fn decode(token: &str) -> Result<Coord, NotationError> {
    let &[file, rank] = token.as_bytes() else {
        return Err(NotationError::SquareLength(token.to_string()));
    };
    if !(b'a'..=b'h').contains(&file) {
        return Err(NotationError::File(file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(NotationError::Rank(rank as char));
    }

    // Both bytes were range-checked above.
    let row = (b'8' - rank) as usize;
    let col = (file - b'a') as usize;
    Ok(Coord::from_index(row * BOARD_SIZE + col))
}

/// Concatenates the source and destination tokens. Without a destination only
/// the source token is produced, for partial display.
pub fn encode_move(from: Coord, to: Option<Coord>) -> String {
    let mut out = String::with_capacity(4);
    out.push_str(encode(from));
    if let Some(to) = to {
        out.push_str(encode(to));
    }
    out
}

pub fn parse_move(token: &str) -> Result<Move, NotationError> {
    if token.len() != 4 || !token.is_ascii() {
        return Err(NotationError::MoveLength(token.to_string()));
    }
    Ok(Move::new(decode(&token[0..2])?, decode(&token[2..4])?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: u8, col: u8) -> Coord {
        Coord::new(row, col).unwrap()
    }

    #[test]
    fn encode_maps_rows_to_descending_ranks() {
        assert_eq!(encode(at(0, 0)), "a8");
        assert_eq!(encode(at(7, 0)), "a1");
        assert_eq!(encode(at(6, 4)), "e2");
        assert_eq!(encode(at(0, 7)), "h8");
    }

    #[test]
    fn decode_inverts_encode_for_every_square() {
        assert_eq!(TOKENS.len(), crate::types::NUM_SQUARES);
        for coord in Coord::all() {
            assert_eq!(decode(encode(coord)), Ok(coord));
        }
    }

    #[test]
    fn decode_reads_board_corners() {
        assert_eq!(decode("a8"), Ok(at(0, 0)));
        assert_eq!(decode("h1"), Ok(at(7, 7)));
        assert_eq!(decode("a1"), Ok(at(7, 0)));
        assert_eq!(decode("h8"), Ok(at(0, 7)));
    }

    #[test]
    fn decode_rejects_malformed_tokens() {
        assert_eq!(decode("e"), Err(NotationError::SquareLength("e".into())));
        assert_eq!(decode("e22"), Err(NotationError::SquareLength("e22".into())));
        assert_eq!(decode("i2"), Err(NotationError::File('i')));
        assert_eq!(decode("e9"), Err(NotationError::Rank('9')));
        assert_eq!(decode("E2"), Err(NotationError::File('E')));
    }

    #[test]
    fn encode_move_handles_missing_destination() {
        assert_eq!(encode_move(at(6, 4), Some(at(4, 4))), "e2e4");
        assert_eq!(encode_move(at(6, 4), None), "e2");
        assert_eq!(Move::new(at(1, 4), at(3, 4)).to_notation(), "e7e5");
    }

    #[test]
    fn parse_move_reads_four_character_tokens() {
        assert_eq!(parse_move("e7e5"), Ok(Move::new(at(1, 4), at(3, 4))));
        assert!(parse_move("e7e").is_err());
        assert!(parse_move("e7e5q").is_err());
        assert!(parse_move("é7e5").is_err());
        assert_eq!(parse_move("e7z5"), Err(NotationError::File('z')));
    }
}
