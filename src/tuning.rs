//! Data-driven game balance
//!
//! Every constant the simulation reads lives in [`Tuning`]. Values are fixed
//! for the lifetime of a [`crate::sim::GameState`]; loading happens once at
//! startup and invalid values are rejected before any state is built.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// What happens when an enemy touches the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HitPolicy {
    /// Any contact costs points and ends the round immediately
    #[default]
    InstantGameOver,
    /// Each contact costs a life and knocks the player back; the round ends at zero lives
    Lives {
        #[serde(default = "default_starting_lives")]
        starting: u32,
    },
}

fn default_starting_lives() -> u32 {
    STARTING_LIVES
}

impl HitPolicy {
    /// Lives variant with the standard number of lives
    pub fn lives() -> Self {
        HitPolicy::Lives {
            starting: STARTING_LIVES,
        }
    }
}

/// One parallax background layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    /// Multiplier applied to the shared base scroll speed
    pub speed_multiplier: f32,
    /// Initial scroll offset
    pub phase: f32,
    /// Vertical draw offset (render-only)
    pub offset_y: f32,
}

/// Rejected configuration
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be non-negative and finite, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("{name}: min {min} is greater than max {max}")]
    InvertedRange { name: &'static str, min: f32, max: f32 },
    #[error("ground offset {offset} leaves no room in a field {height} px tall")]
    GroundOutsideField { offset: f32, height: f32 },
    #[error("player of width {player} does not fit a field {width} px wide")]
    PlayerTooWide { player: f32, width: f32 },
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
}

/// Full set of simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Loop ===
    /// Per-step dt ceiling in seconds (None = never clamp)
    pub max_frame_dt: Option<f32>,
    /// Seed for the spawner RNG
    pub seed: u64,

    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,
    pub ground_offset: f32,

    // === Player ===
    pub player_size: Vec2,
    pub player_start: Vec2,
    pub player_speed: f32,
    pub player_edge_margin: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub knockback: Vec2,
    pub knockback_duration: f32,

    // === Shooting ===
    pub shoot_cooldown: f32,
    pub bullet_speed: f32,
    pub bullet_size: Vec2,
    pub bullet_cull_margin: f32,

    // === Enemies ===
    pub enemy_size: Vec2,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    pub enemy_cull_margin: f32,
    pub spawn_x_jitter: f32,
    pub spawn_interval_min: f32,
    pub spawn_interval_jitter: f32,

    // === Round ===
    pub hit_policy: HitPolicy,
    pub kill_score: u32,
    pub contact_penalty: u32,

    // === Animation ===
    pub anim_frame_interval: f32,
    pub anim_frame_count: u32,
    pub idle_speed_epsilon: f32,
    pub trail_capacity: usize,
    pub trail_step: f32,

    // === Effects ===
    pub flash_duration: f32,
    pub parallax_base_speed: f32,
    pub parallax_wrap_margin: f32,
    pub parallax_layers: Vec<LayerSpec>,

    // === Pools ===
    pub bullet_pool_size: usize,
    pub enemy_pool_size: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_frame_dt: Some(MAX_FRAME_DT),
            seed: 0x5eed,

            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_offset: GROUND_OFFSET,

            player_size: Vec2::splat(PLAYER_SIZE),
            player_start: Vec2::new(PLAYER_START_X, FIELD_HEIGHT - PLAYER_START_RISE),
            player_speed: PLAYER_SPEED,
            player_edge_margin: PLAYER_EDGE_MARGIN,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            knockback: Vec2::new(KNOCKBACK_VX, KNOCKBACK_VY),
            knockback_duration: KNOCKBACK_DURATION,

            shoot_cooldown: SHOOT_COOLDOWN,
            bullet_speed: BULLET_SPEED,
            bullet_size: Vec2::splat(BULLET_SIZE),
            bullet_cull_margin: BULLET_CULL_MARGIN,

            enemy_size: Vec2::splat(ENEMY_SIZE),
            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_max: ENEMY_SPEED_MAX,
            enemy_cull_margin: ENEMY_CULL_MARGIN,
            spawn_x_jitter: SPAWN_X_JITTER,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_jitter: SPAWN_INTERVAL_JITTER,

            hit_policy: HitPolicy::InstantGameOver,
            kill_score: KILL_SCORE,
            contact_penalty: CONTACT_PENALTY,

            anim_frame_interval: ANIM_FRAME_INTERVAL,
            anim_frame_count: ANIM_FRAME_COUNT,
            idle_speed_epsilon: IDLE_SPEED_EPSILON,
            trail_capacity: TRAIL_CAPACITY,
            trail_step: TRAIL_STEP,

            flash_duration: FLASH_DURATION,
            parallax_base_speed: PARALLAX_BASE_SPEED,
            parallax_wrap_margin: PARALLAX_WRAP_MARGIN,
            parallax_layers: vec![
                LayerSpec { speed_multiplier: 0.12, phase: 0.0, offset_y: -40.0 },
                LayerSpec { speed_multiplier: 0.45, phase: 80.0, offset_y: -10.0 },
                LayerSpec { speed_multiplier: 1.1, phase: 160.0, offset_y: 10.0 },
            ],

            bullet_pool_size: BULLET_POOL_SIZE,
            enemy_pool_size: ENEMY_POOL_SIZE,
        }
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Negative { name, value })
    }
}

impl Tuning {
    /// Parse from JSON (missing fields take defaults) and validate
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and validate a JSON tuning file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if let Some(max_dt) = self.max_frame_dt {
            positive("max_frame_dt", max_dt)?;
        }

        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        non_negative("ground_offset", self.ground_offset)?;
        if self.ground_offset >= self.field_height {
            return Err(TuningError::GroundOutsideField {
                offset: self.ground_offset,
                height: self.field_height,
            });
        }

        positive("player_size.x", self.player_size.x)?;
        positive("player_size.y", self.player_size.y)?;
        positive("player_speed", self.player_speed)?;
        non_negative("player_edge_margin", self.player_edge_margin)?;
        if self.player_size.x + 2.0 * self.player_edge_margin > self.field_width {
            return Err(TuningError::PlayerTooWide {
                player: self.player_size.x,
                width: self.field_width,
            });
        }
        non_negative("gravity", self.gravity)?;
        positive("jump_impulse magnitude", -self.jump_impulse)?;
        positive("knockback_duration", self.knockback_duration)?;

        positive("shoot_cooldown", self.shoot_cooldown)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("bullet_size.x", self.bullet_size.x)?;
        positive("bullet_size.y", self.bullet_size.y)?;
        non_negative("bullet_cull_margin", self.bullet_cull_margin)?;

        positive("enemy_size.x", self.enemy_size.x)?;
        positive("enemy_size.y", self.enemy_size.y)?;
        positive("enemy_speed_min", self.enemy_speed_min)?;
        positive("enemy_speed_max", self.enemy_speed_max)?;
        if self.enemy_speed_min > self.enemy_speed_max {
            return Err(TuningError::InvertedRange {
                name: "enemy_speed",
                min: self.enemy_speed_min,
                max: self.enemy_speed_max,
            });
        }
        non_negative("enemy_cull_margin", self.enemy_cull_margin)?;
        non_negative("spawn_x_jitter", self.spawn_x_jitter)?;
        positive("spawn_interval_min", self.spawn_interval_min)?;
        non_negative("spawn_interval_jitter", self.spawn_interval_jitter)?;

        if let HitPolicy::Lives { starting: 0 } = self.hit_policy {
            return Err(TuningError::ZeroCount("hit_policy.starting"));
        }

        positive("anim_frame_interval", self.anim_frame_interval)?;
        if self.anim_frame_count == 0 {
            return Err(TuningError::ZeroCount("anim_frame_count"));
        }
        non_negative("idle_speed_epsilon", self.idle_speed_epsilon)?;
        positive("trail_step", self.trail_step)?;

        positive("flash_duration", self.flash_duration)?;
        non_negative("parallax_base_speed", self.parallax_base_speed)?;
        non_negative("parallax_wrap_margin", self.parallax_wrap_margin)?;
        for layer in &self.parallax_layers {
            non_negative("parallax_layers.speed_multiplier", layer.speed_multiplier)?;
        }

        Ok(())
    }

    /// Y coordinate of the ground line
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.field_height - self.ground_offset
    }

    /// Starting lives under the configured hit policy
    pub fn starting_lives(&self) -> Option<u32> {
        match self.hit_policy {
            HitPolicy::InstantGameOver => None,
            HitPolicy::Lives { starting } => Some(starting),
        }
    }

    /// Clamp a raw frame delta (seconds) to the configured ceiling
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        let dt = dt.max(0.0);
        match self.max_frame_dt {
            Some(max_dt) => dt.min(max_dt),
            None => dt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_dimensions() {
        let tuning = Tuning {
            field_width: -10.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NotPositive { name: "field_width", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_cooldown() {
        let tuning = Tuning {
            shoot_cooldown: 0.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_enemy_speed() {
        let tuning = Tuning {
            enemy_speed_min: 300.0,
            enemy_speed_max: 100.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_lives() {
        let tuning = Tuning {
            hit_policy: HitPolicy::Lives { starting: 0 },
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::ZeroCount(_))));
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let tuning =
            Tuning::from_json(r#"{ "gravity": 900.0, "hit_policy": { "Lives": { "starting": 5 } } }"#)
                .unwrap();
        assert_eq!(tuning.gravity, 900.0);
        assert_eq!(tuning.starting_lives(), Some(5));
        assert_eq!(tuning.field_width, FIELD_WIDTH);
    }

    #[test]
    fn test_from_json_rejects_garbage_and_bad_values() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
        assert!(Tuning::from_json(r#"{ "bullet_speed": -1.0 }"#).is_err());
    }

    #[test]
    fn test_clamp_dt() {
        let tuning = Tuning::default();
        assert_eq!(tuning.clamp_dt(-0.5), 0.0);
        assert_eq!(tuning.clamp_dt(0.016), 0.016);
        assert_eq!(tuning.clamp_dt(5.0), MAX_FRAME_DT);

        let unclamped = Tuning {
            max_frame_dt: None,
            ..Default::default()
        };
        assert_eq!(unclamped.clamp_dt(5.0), 5.0);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Tuning::load("/nonexistent/side-runner-tuning.json"),
            Err(TuningError::Io(_))
        ));
    }

    #[test]
    fn test_lives_default_to_three() {
        assert_eq!(HitPolicy::lives(), HitPolicy::Lives { starting: STARTING_LIVES });
        let tuning = Tuning::from_json(r#"{ "hit_policy": { "Lives": {} } }"#).unwrap();
        assert_eq!(tuning.starting_lives(), Some(3));
    }
}
