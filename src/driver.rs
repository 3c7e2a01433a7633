//! Per-frame loop driver
//!
//! The host calls [`Game::step`] from its animation callback with a
//! millisecond timestamp. Each call runs exactly one simulation tick followed
//! by one render-frame refresh, synchronously. Key and pointer events are
//! forwarded as they arrive, between steps.

use crate::frame::{RenderFrame, SpriteSheet};
use crate::input::{InputState, Key};
use crate::sim::{GameState, tick};
use crate::tuning::{Tuning, TuningError};

pub struct Game {
    state: GameState,
    input: InputState,
    /// Timestamp of the previous step in ms (None before the first step)
    last_timestamp: Option<f64>,
    frame: RenderFrame,
    sprite_sheet: Option<SpriteSheet>,
}

impl Game {
    pub fn new(tuning: Tuning) -> Result<Self, TuningError> {
        let state = GameState::new(tuning)?;
        let frame = RenderFrame::capture(&state, None, Vec::new());
        log::info!(
            "Game created ({}x{}, {:?})",
            state.tuning.field_width,
            state.tuning.field_height,
            state.tuning.hit_policy
        );
        Ok(Self {
            state,
            input: InputState::new(),
            last_timestamp: None,
            frame,
            sprite_sheet: None,
        })
    }

    /// Host key-down. Unbound keys are ignored.
    pub fn key_down(&mut self, raw: &str) {
        let Some(key) = Key::from_host(raw) else {
            return;
        };
        let was_held = self.input.is_held(key);
        self.input.press(key);

        match key {
            // Edge-triggered; auto-repeat while held does not refire
            Key::Fire if !was_held => {
                self.state.shoot();
            }
            Key::Restart if self.state.round.game_over() => {
                self.state.reset();
            }
            _ => {}
        }
    }

    pub fn key_up(&mut self, raw: &str) {
        if let Some(key) = Key::from_host(raw) {
            self.input.release(key);
        }
    }

    /// Pointer click spawns an extra enemy while the round is live
    pub fn pointer_click(&mut self) {
        if self.state.round.running() {
            self.state.spawn_enemy();
        }
    }

    /// Sprite sheet finished loading; frames switch from placeholders to sprites
    pub fn set_sprite_sheet(&mut self, sheet: Option<SpriteSheet>) {
        self.sprite_sheet = sheet;
    }

    /// Advance one frame and return the snapshot to draw
    pub fn step(&mut self, timestamp_ms: f64) -> &RenderFrame {
        let dt = self.frame_dt(timestamp_ms);
        tick(&mut self.state, self.input.controls(), dt);

        let events = self.state.take_events();
        self.frame = RenderFrame::capture(&self.state, self.sprite_sheet, events);
        &self.frame
    }

    /// Seconds since the previous step, clamped to the tuning's ceiling
    fn frame_dt(&mut self, timestamp_ms: f64) -> f32 {
        let Some(last) = self.last_timestamp.replace(timestamp_ms) else {
            return 0.0;
        };

        let elapsed_ms = timestamp_ms - last;
        if elapsed_ms < 0.0 {
            log::warn!("Timestamp went backwards by {:.1} ms", -elapsed_ms);
            return 0.0;
        }

        let dt = (elapsed_ms / 1000.0) as f32;
        let clamped = self.state.tuning.clamp_dt(dt);
        if clamped < dt {
            log::debug!("Clamping dt {:.3}s to {:.3}s", dt, clamped);
        }
        clamped
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }
}
