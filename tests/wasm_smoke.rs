#![cfg(target_arch = "wasm32")]

use chess_session::wasm::WasmGame;
use js_sys::{Function, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn opponent(reply: &str) -> Function {
    Function::new_with_args("mv", &format!("return {reply};"))
}

fn field(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn click_runs_a_full_turn() {
    let mut game = WasmGame::new(opponent("'e7e5'"), None, JsValue::UNDEFINED).unwrap();

    game.click(6, 4).unwrap();
    game.click(4, 4).unwrap();

    let log = js_sys::Array::from(&game.move_log().unwrap());
    assert_eq!(log.length(), 2);
    assert_eq!(field(&log.get(1), "token").as_string().as_deref(), Some("e7e5"));
}

#[wasm_bindgen_test]
fn null_reply_ends_the_game() {
    let mut game = WasmGame::new(opponent("null"), None, JsValue::UNDEFINED).unwrap();

    game.click(6, 4).unwrap();
    game.click(4, 4).unwrap();

    let view = game.snapshot().unwrap();
    assert_eq!(field(&view, "state").as_string().as_deref(), Some("stopped"));
    assert!(game.click(6, 3).is_err());
}

#[wasm_bindgen_test]
fn layout_bytes_load_back() {
    let mut game = WasmGame::new(opponent("null"), None, JsValue::UNDEFINED).unwrap();
    let bytes = game.layout_bytes();

    assert!(game.load_layout(&bytes).is_ok());
    assert!(game.load_layout(&bytes[..10]).is_err());
}
