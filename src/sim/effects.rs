//! Purely visual timers: screen flash and parallax scroll

use serde::{Deserialize, Serialize};

use crate::consts::FLASH_MAX_ALPHA;
use crate::tuning::LayerSpec;

/// White flash that fades out after a hit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenFlash {
    pub timer: f32,
    pub duration: f32,
}

impl ScreenFlash {
    pub fn trigger(&mut self, duration: f32) {
        self.duration = duration;
        self.timer = duration;
    }

    pub fn update(&mut self, dt: f32) {
        if self.timer > 0.0 {
            self.timer = (self.timer - dt).max(0.0);
        }
    }

    /// Overlay opacity, fading linearly to zero
    pub fn alpha(&self) -> f32 {
        if self.timer <= 0.0 || self.duration <= 0.0 {
            return 0.0;
        }
        FLASH_MAX_ALPHA * self.timer / self.duration
    }
}

/// One scrolling background layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParallaxLayer {
    /// Horizontal scroll offset, always in `[0, wrap)`
    pub offset: f32,
    pub speed_multiplier: f32,
    pub offset_y: f32,
}

impl ParallaxLayer {
    pub fn from_spec(spec: &LayerSpec) -> Self {
        Self {
            offset: spec.phase,
            speed_multiplier: spec.speed_multiplier,
            offset_y: spec.offset_y,
        }
    }

    pub fn update(&mut self, dt: f32, base_speed: f32, wrap: f32) {
        self.offset = (self.offset + base_speed * self.speed_multiplier * dt).rem_euclid(wrap);
    }
}
