//! Timer-driven enemy spawner with randomized inter-arrival times

use glam::Vec2;
use rand::Rng;

use super::entity::EnemyArgs;
use crate::tuning::Tuning;

/// Countdown to the next enemy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spawner {
    /// Seconds until the next spawn; spawns as soon as this reaches zero
    pub timer: f32,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cleared timer spawns on the next tick
    pub fn reset(&mut self) {
        self.timer = 0.0;
    }

    /// Count down by `dt`; when due, re-arm with a random interval and
    /// return the enemy to spawn
    pub fn tick<R: Rng>(&mut self, dt: f32, rng: &mut R, tuning: &Tuning) -> Option<EnemyArgs> {
        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }
        self.timer = next_interval(rng, tuning);
        Some(enemy_args(rng, tuning))
    }
}

/// `min + U(0, jitter)` seconds
pub fn next_interval<R: Rng>(rng: &mut R, tuning: &Tuning) -> f32 {
    tuning.spawn_interval_min + rng.random::<f32>() * tuning.spawn_interval_jitter
}

/// A ground-level enemy just past the right edge
pub fn enemy_args<R: Rng>(rng: &mut R, tuning: &Tuning) -> EnemyArgs {
    let x = tuning.field_width + rng.random::<f32>() * tuning.spawn_x_jitter;
    let y = tuning.ground_y() - tuning.enemy_size.y;
    let speed = rng.random_range(tuning.enemy_speed_min..=tuning.enemy_speed_max);
    EnemyArgs {
        pos: Vec2::new(x, y),
        size: tuning.enemy_size,
        speed,
    }
}
