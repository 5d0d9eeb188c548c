//! WebAssembly bindings for the twenty48 game engine.
//!
//! This module exposes the game session to JavaScript through wasm-bindgen.
//! Structured values cross the boundary as JSON strings.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::actions::GameAction;
#[cfg(feature = "wasm")]
use crate::config::GameConfig;
#[cfg(feature = "wasm")]
use crate::game::GameState;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmGame {
    /// Start a game, resuming from `save_json` when it holds a valid save
    #[wasm_bindgen(constructor)]
    pub fn new(save_json: Option<String>, config_json: Option<String>) -> Result<WasmGame, JsValue> {
        let config: GameConfig = match config_json {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?,
            None => GameConfig::default(),
        };
        config
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let state = match save_json {
            Some(json) => GameState::restore_or_new(&json, config),
            None => GameState::new(config),
        };
        Ok(WasmGame { state })
    }

    /// Get the full session (grid, scores, status, history) as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        self.state
            .to_save()
            .to_json()
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the current grid as JSON (array of rows)
    #[wasm_bindgen(js_name = getGrid)]
    pub fn get_grid(&self) -> String {
        serde_json::to_string(&self.state.grid).unwrap_or_else(|_| "[]".to_string())
    }

    #[wasm_bindgen(js_name = getScore)]
    pub fn get_score(&self) -> u32 {
        self.state.score
    }

    #[wasm_bindgen(js_name = getBest)]
    pub fn get_best(&self) -> u32 {
        self.state.best
    }

    /// Get the current status as a string
    #[wasm_bindgen(js_name = getStatus)]
    pub fn get_status(&self) -> String {
        serde_json::to_string(&self.state.status).unwrap_or_else(|_| "\"Unknown\"".to_string())
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.state.can_undo()
    }

    /// Get valid actions as JSON array
    #[wasm_bindgen(js_name = getValidActions)]
    pub fn get_valid_actions(&self) -> String {
        serde_json::to_string(&self.state.valid_actions()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Apply an action from JSON, returns events JSON or error
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: GameAction = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action JSON: {}", e)))?;

        match self.state.apply_action(action) {
            Ok(events) => {
                Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string()))
            }
            Err(e) => Err(JsValue::from_str(&format!("Action failed: {}", e))),
        }
    }

    /// Effects of the last move as JSON; cleared once read
    #[wasm_bindgen(js_name = takeEffects)]
    pub fn take_effects(&mut self) -> String {
        let effects = self.state.take_effects();
        serde_json::to_string(&effects).unwrap_or_else(|_| "{}".to_string())
    }

    /// Serialize the session for local storage
    #[wasm_bindgen(js_name = saveJson)]
    pub fn save_json(&self) -> Result<String, JsValue> {
        self.state
            .to_save()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
