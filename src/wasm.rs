//! Browser bindings. The page renders the board, resolves clicks to squares
//! and hosts the opponent engine as a plain JS function.

use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::board::Board;
use crate::config::GameConfig;
use crate::game::{GameSession, Opponent, OpponentError, OpponentReply};
use crate::types::Coord;

/// Opponent backed by a JS callback: `(move) => reply | null`.
struct JsOpponent {
    reply: Function,
    reset: Option<Function>,
}

impl Opponent for JsOpponent {
    fn reply(&mut self, player_move: &str) -> Result<OpponentReply, OpponentError> {
        let value = self
            .reply
            .call1(&JsValue::NULL, &JsValue::from_str(player_move))
            .map_err(|err| OpponentError(format!("{err:?}")))?;
        if value.is_null() || value.is_undefined() {
            return Ok(OpponentReply::NoLegalReply);
        }
        value
            .as_string()
            .map(OpponentReply::Move)
            .ok_or_else(|| OpponentError("reply is not a string".to_string()))
    }

    fn reset(&mut self) {
        if let Some(reset) = &self.reset
            && let Err(err) = reset.call0(&JsValue::NULL)
        {
            tracing::warn!(error = ?err, "opponent reset failed");
        }
    }
}

#[wasm_bindgen]
pub struct WasmGame {
    session: GameSession,
}

#[wasm_bindgen]
impl WasmGame {
    /// `config` may be `undefined`; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        opponent: Function,
        on_reset: Option<Function>,
        config: JsValue,
    ) -> Result<WasmGame, JsValue> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let opponent = JsOpponent {
            reply: opponent,
            reset: on_reset,
        };
        Ok(Self {
            session: GameSession::new(config, Box::new(opponent)),
        })
    }

    /// Returns the list of rendering events produced by the click.
    pub fn click(&mut self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        let at = Coord::new(row, col).ok_or_else(|| JsValue::from_str("row/col out of range"))?;
        let events = self.session.handle_click(at).map_err(to_js)?;
        Ok(serde_wasm_bindgen::to_value(&events)?)
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) {
        self.session.new_game();
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.session.snapshot())?)
    }

    #[wasm_bindgen(js_name = moveLog)]
    pub fn move_log(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.session.move_log())?)
    }

    #[wasm_bindgen(js_name = layoutBytes)]
    pub fn layout_bytes(&self) -> Vec<u8> {
        self.session.board().to_bytes()
    }

    /// Starts a new game from a layout written by `layoutBytes`.
    #[wasm_bindgen(js_name = loadLayout)]
    pub fn load_layout(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let board = Board::from_bytes(bytes).map_err(to_js)?;
        self.session.new_game_with(board);
        Ok(())
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
