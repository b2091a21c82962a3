use serde::Deserialize;

use crate::board::Board;

const DEFAULT_SLOW_REPLY_WARN_MS: u64 = 5_000;

/// Arrangement a new game starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartPosition {
    #[default]
    Standard,
    /// No pieces; a custom arrangement is loaded afterwards.
    Empty,
}

impl StartPosition {
    pub fn board(self) -> Board {
        match self {
            Self::Standard => Board::standard(),
            Self::Empty => Board::empty(),
        }
    }
}

/// Session settings. Every field is optional when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub start: StartPosition,
    /// Run the opponent's replies through the move validator before applying
    /// them. Off by default: the opponent is trusted to play legal chess.
    pub revalidate_replies: bool,
    /// Opponent replies slower than this are logged as warnings.
    pub slow_reply_warn_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start: StartPosition::Standard,
            revalidate_replies: false,
            slow_reply_warn_ms: DEFAULT_SLOW_REPLY_WARN_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::de::value::{Error as ValueError, MapDeserializer};

    use super::*;

    #[test]
    fn default_trusts_opponent_and_uses_standard_board() {
        let config = GameConfig::default();

        assert_eq!(config.start, StartPosition::Standard);
        assert!(!config.revalidate_replies);
        assert_eq!(config.slow_reply_warn_ms, 5_000);
        assert_eq!(config.start.board(), Board::standard());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let fields = vec![("revalidate_replies", true)];
        let de = MapDeserializer::<_, ValueError>::new(fields.into_iter());

        let config = GameConfig::deserialize(de).unwrap();

        assert!(config.revalidate_replies);
        assert_eq!(config.start, StartPosition::Standard);
        assert_eq!(config.slow_reply_warn_ms, 5_000);
    }

    #[test]
    fn empty_start_has_no_pieces() {
        assert_eq!(StartPosition::Empty.board().pieces().count(), 0);
    }
}
