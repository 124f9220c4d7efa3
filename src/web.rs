//! Browser binding
//!
//! The page owns the camera, marker tracking and rendering. It forwards
//! marker and input callbacks here, calls `frame()` from its animation
//! callback while `is_scheduled()` holds, and draws from `snapshot()`.

use std::sync::mpsc::Sender;

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::driver::{Driver, InputEvent};
use crate::input::{orientation_to_target, touch_to_target};
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn wasm_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("AR Pong simulation loaded");
}

/// One match as seen from the page
#[wasm_bindgen]
pub struct WebMatch {
    driver: Driver,
    input: Sender<InputEvent>,
}

#[wasm_bindgen]
impl WebMatch {
    /// Set up a match from optional settings JSON and difficulty preset
    /// name ("easy", "normal", "hard")
    #[wasm_bindgen(constructor)]
    pub fn new(
        settings_json: Option<String>,
        difficulty: Option<String>,
    ) -> Result<WebMatch, JsError> {
        let settings = Settings::load(settings_json.as_deref(), difficulty.as_deref())?;
        let mut driver = Driver::new();
        driver.setup(settings)?;
        let input = driver.input_sender();
        Ok(Self { driver, input })
    }

    /// Start the match. Returns true if the page must begin requesting frames.
    pub fn start(&mut self) -> Result<bool, JsError> {
        let was_scheduled = self.driver.is_scheduled();
        self.driver.start()?;
        Ok(!was_scheduled && self.driver.is_scheduled())
    }

    /// Restart the match. Returns true if the page must begin requesting frames.
    pub fn restart(&mut self) -> Result<bool, JsError> {
        let was_scheduled = self.driver.is_scheduled();
        self.driver.restart()?;
        Ok(!was_scheduled && self.driver.is_scheduled())
    }

    pub fn stop(&mut self) {
        self.driver.stop();
    }

    #[wasm_bindgen(js_name = isScheduled)]
    pub fn is_scheduled(&self) -> bool {
        self.driver.is_scheduled()
    }

    /// Advance one frame; returns the events it produced as JSON
    pub fn frame(&mut self) -> Result<String, JsError> {
        let events = self.driver.frame()?;
        Ok(serde_json::to_string(&events)?)
    }

    /// Current positions, scores and phase as JSON
    pub fn snapshot(&self) -> Result<String, JsError> {
        match self.driver.snapshot() {
            Some(frame) => Ok(frame.to_json()?),
            None => Ok("null".to_string()),
        }
    }

    #[wasm_bindgen(js_name = markerFound)]
    pub fn marker_found(&self) {
        let _ = self.input.send(InputEvent::MarkerFound);
    }

    #[wasm_bindgen(js_name = markerLost)]
    pub fn marker_lost(&self) {
        let _ = self.input.send(InputEvent::MarkerLost);
    }

    #[wasm_bindgen(js_name = setBypass)]
    pub fn set_bypass(&self, enabled: bool) {
        let _ = self.input.send(InputEvent::Bypass(enabled));
    }

    /// Touch point in viewport pixels
    pub fn touch(&self, x: f32, y: f32, width: f32, height: f32) {
        let Some(ctx) = self.driver.context() else {
            return;
        };
        if let Some(target) =
            touch_to_target(Vec2::new(x, y), Vec2::new(width, height), &ctx.settings)
        {
            let _ = self.input.send(InputEvent::PaddleTarget(target));
        }
    }

    /// Device orientation angles in degrees
    pub fn orientation(&self, beta: Option<f32>, gamma: Option<f32>) {
        let Some(ctx) = self.driver.context() else {
            return;
        };
        if let Some(target) = orientation_to_target(beta, gamma, &ctx.settings) {
            let _ = self.input.send(InputEvent::PaddleTarget(target));
        }
    }
}
