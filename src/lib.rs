//! Side Runner - A side-scrolling arcade runner/shooter
//!
//! Core modules:
//! - `sim`: Simulation (physics, pooling, spawning, collisions, round state)
//! - `input`: Host key events mapped to logical keys
//! - `driver`: Per-frame loop driver (timestamp in, render frame out)
//! - `frame`: Draw-ready snapshots handed to the render sink
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod frame;
pub mod input;
pub mod sim;
pub mod tuning;

pub use driver::Game;
pub use frame::RenderFrame;
pub use input::{InputState, Key};
pub use tuning::{HitPolicy, Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
///
/// All times are in seconds, distances in pixels.
pub mod consts {
    /// Largest dt a single step will simulate
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 960.0;
    pub const FIELD_HEIGHT: f32 = 540.0;
    /// Ground line sits this far above the bottom edge
    pub const GROUND_OFFSET: f32 = 80.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 64.0;
    pub const PLAYER_START_X: f32 = 120.0;
    /// Start height above the bottom edge (player drops onto the ground)
    pub const PLAYER_START_RISE: f32 = 200.0;
    pub const PLAYER_SPEED: f32 = 260.0;
    pub const PLAYER_EDGE_MARGIN: f32 = 8.0;
    pub const GRAVITY: f32 = 1800.0;
    pub const JUMP_IMPULSE: f32 = -520.0;

    /// Shooting
    pub const SHOOT_COOLDOWN: f32 = 0.22;
    pub const BULLET_SPEED: f32 = 700.0;
    pub const BULLET_SIZE: f32 = 12.0;
    pub const BULLET_CULL_MARGIN: f32 = 80.0;

    /// Knockback ("pushed back and up")
    pub const KNOCKBACK_VX: f32 = -360.0;
    pub const KNOCKBACK_VY: f32 = -280.0;
    pub const KNOCKBACK_DURATION: f32 = 0.28;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 48.0;
    pub const ENEMY_SPEED_MIN: f32 = 120.0;
    pub const ENEMY_SPEED_MAX: f32 = 120.0;
    pub const ENEMY_CULL_MARGIN: f32 = 120.0;
    pub const SPAWN_X_JITTER: f32 = 300.0;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.7;
    pub const SPAWN_INTERVAL_JITTER: f32 = 1.3;

    /// Scoring
    pub const KILL_SCORE: u32 = 10;
    pub const CONTACT_PENALTY: u32 = 20;
    pub const STARTING_LIVES: u32 = 3;

    /// Animation / trail
    pub const ANIM_FRAME_INTERVAL: f32 = 0.08;
    pub const ANIM_FRAME_COUNT: u32 = 8;
    pub const IDLE_SPEED_EPSILON: f32 = 1.0;
    pub const TRAIL_CAPACITY: usize = 6;
    pub const TRAIL_STEP: f32 = 0.06;

    /// Visual effects
    pub const FLASH_DURATION: f32 = 0.16;
    pub const FLASH_MAX_ALPHA: f32 = 0.7;
    pub const PARALLAX_BASE_SPEED: f32 = 160.0;
    pub const PARALLAX_WRAP_MARGIN: f32 = 500.0;

    /// Character sprite sheet layout (idle row 0, run row 1)
    pub const SHEET_COLS: u32 = 8;
    pub const SHEET_ROWS: u32 = 3;

    /// Pool warm-up sizes
    pub const BULLET_POOL_SIZE: usize = 32;
    pub const ENEMY_POOL_SIZE: usize = 16;
}

/// Axis-aligned overlap of two rectangles given as (top-left, size)
#[inline]
pub fn rects_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}
