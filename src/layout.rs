use thiserror::Error;

use crate::board::Board;
use crate::types::{Coord, NUM_SQUARES, Piece};

const MAGIC: &[u8; 4] = b"CHBD";
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout data must be {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },
    #[error("invalid layout magic (expected CHBD)")]
    Magic,
    #[error("unsupported layout version {0}")]
    Version(u32),
    #[error("CRC32 mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Checksum { expected: u32, actual: u32 },
    #[error("unknown piece code {code} at square {index}")]
    PieceCode { index: usize, code: u8 },
}

impl Board {
    /// Serializes the piece arrangement: magic, version, CRC32, 64 piece codes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let payload = self.to_codes();
        let mut out = Vec::with_capacity(HEADER_SIZE + NUM_SQUARES);
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
        out.extend_from_slice(&payload);
        out
    }

    /// Loads a custom arrangement written by [`Board::to_bytes`].
    /// Square tints are recomputed, never read.
    pub fn from_bytes(data: &[u8]) -> Result<Self, LayoutError> {
        if data.len() != HEADER_SIZE + NUM_SQUARES {
            return Err(LayoutError::Length {
                expected: HEADER_SIZE + NUM_SQUARES,
                actual: data.len(),
            });
        }
        if &data[0..4] != MAGIC {
            return Err(LayoutError::Magic);
        }

        let version = read_u32_le(data, 4);
        if version != VERSION {
            return Err(LayoutError::Version(version));
        }

        let expected = read_u32_le(data, 8);
        let payload = &data[HEADER_SIZE..];
        let actual = crc32fast::hash(payload);
        if actual != expected {
            return Err(LayoutError::Checksum { expected, actual });
        }

        let mut board = Board::empty();
        for (coord, &code) in Coord::all().zip(payload) {
            let piece = Piece::from_code(code).ok_or(LayoutError::PieceCode {
                index: coord.index(),
                code,
            })?;
            board.set(coord, piece);
        }
        Ok(board)
    }
}

// Callers check the length up front.
fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn reseal(bytes: &mut [u8]) {
        let crc = crc32fast::hash(&bytes[HEADER_SIZE..]);
        bytes[8..12].copy_from_slice(&crc.to_le_bytes());
    }

    #[test]
    fn from_bytes_restores_custom_arrangement() {
        let mut board = Board::empty();
        board.set(Coord::new(7, 4).unwrap(), Some(Piece::white(PieceKind::King)));
        board.set(Coord::new(0, 0).unwrap(), Some(Piece::black(PieceKind::King)));
        board.set(Coord::new(3, 3).unwrap(), Some(Piece::black(PieceKind::Queen)));

        let loaded = Board::from_bytes(&board.to_bytes()).expect("must parse");

        assert_eq!(loaded, board);
    }

    #[test]
    fn from_bytes_rejects_invalid_magic() {
        let mut bytes = Board::standard().to_bytes();
        bytes[0] = b'X';

        assert_eq!(Board::from_bytes(&bytes), Err(LayoutError::Magic));
    }

    #[test]
    fn from_bytes_rejects_unsupported_version() {
        let mut bytes = Board::standard().to_bytes();
        bytes[4..8].copy_from_slice(&2u32.to_le_bytes());

        assert_eq!(Board::from_bytes(&bytes), Err(LayoutError::Version(2)));
    }

    #[test]
    fn from_bytes_rejects_crc_mismatch() {
        let mut bytes = Board::standard().to_bytes();
        bytes[HEADER_SIZE + 30] = 5;

        let err = Board::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, LayoutError::Checksum { .. }));
        assert!(err.to_string().contains("CRC32 mismatch"));
    }

    #[test]
    fn from_bytes_rejects_unknown_piece_code() {
        let mut bytes = Board::empty().to_bytes();
        bytes[HEADER_SIZE + 9] = 42;
        reseal(&mut bytes);

        assert_eq!(
            Board::from_bytes(&bytes),
            Err(LayoutError::PieceCode { index: 9, code: 42 })
        );
    }

    #[test]
    fn from_bytes_rejects_truncated_data() {
        let bytes = Board::standard().to_bytes();

        assert_eq!(
            Board::from_bytes(&bytes[..40]),
            Err(LayoutError::Length {
                expected: 76,
                actual: 40
            })
        );
    }
}
