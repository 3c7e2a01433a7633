//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`], owned by the
//! loop driver and threaded through each tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{ParallaxLayer, ScreenFlash};
use super::entity::{Bullet, BulletArgs, Enemy, EnemyArgs, Entity};
use super::player::Player;
use super::pool::{Pool, Poolable};
use super::spawner::{self, Spawner};
use crate::tuning::{Tuning, TuningError};

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Active gameplay
    #[default]
    Running,
    /// Round ended; waiting for a reset
    GameOver,
}

/// Something the host may want to react to (HUD updates, sounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyDestroyed { score: u32 },
    PlayerHit { score: u32, lives: Option<u32> },
    GameOver { score: u32 },
    Reset,
}

/// Score, lives and phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundState {
    pub score: u32,
    /// Only tracked under the lives hit policy
    pub lives: Option<u32>,
    pub phase: RoundPhase,
}

impl RoundState {
    pub fn new(lives: Option<u32>) -> Self {
        Self {
            score: 0,
            lives,
            phase: RoundPhase::Running,
        }
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    #[inline]
    pub fn game_over(&self) -> bool {
        self.phase == RoundPhase::GameOver
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Deduct points, never going below zero
    pub fn penalize(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }

    /// Remove one life and return how many remain (None without lives)
    pub fn lose_life(&mut self) -> Option<u32> {
        let lives = self.lives.as_mut()?;
        *lives = lives.saturating_sub(1);
        Some(*lives)
    }

    pub fn end(&mut self) {
        self.phase = RoundPhase::GameOver;
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Spawner randomness, seeded from the tuning
    pub rng: Pcg32,
    pub round: RoundState,
    pub player: Player,
    /// Live bullets in firing order
    pub bullets: Vec<Bullet>,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    pub spawner: Spawner,
    pub flash: ScreenFlash,
    pub layers: Vec<ParallaxLayer>,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
    bullet_pool: Pool<Bullet>,
    enemy_pool: Pool<Enemy>,
}

impl GameState {
    /// Build a fresh round; rejects invalid tuning
    pub fn new(tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;

        Ok(Self {
            rng: Pcg32::seed_from_u64(tuning.seed),
            round: RoundState::new(tuning.starting_lives()),
            player: Player::new(&tuning),
            bullets: Vec::with_capacity(tuning.bullet_pool_size),
            enemies: Vec::with_capacity(tuning.enemy_pool_size),
            spawner: Spawner::new(),
            flash: ScreenFlash::default(),
            layers: tuning
                .parallax_layers
                .iter()
                .map(ParallaxLayer::from_spec)
                .collect(),
            events: Vec::new(),
            bullet_pool: Pool::with_capacity(tuning.bullet_pool_size),
            enemy_pool: Pool::with_capacity(tuning.enemy_pool_size),
            tuning,
        })
    }

    /// Fire from the player if the cooldown allows. Returns whether a bullet spawned.
    pub fn shoot(&mut self) -> bool {
        if !self.round.running() {
            return false;
        }
        match self.player.try_fire(&self.tuning) {
            Some(args) => {
                self.fire_bullet_with(args);
                true
            }
            None => false,
        }
    }

    pub fn fire_bullet_with(&mut self, args: BulletArgs) {
        self.bullets.push(self.bullet_pool.acquire(args));
    }

    /// Spawn a randomized enemy just past the right edge
    pub fn spawn_enemy(&mut self) {
        let args = spawner::enemy_args(&mut self.rng, &self.tuning);
        self.spawn_enemy_with(args);
    }

    pub fn spawn_enemy_with(&mut self, args: EnemyArgs) {
        log::debug!(
            "Spawning enemy at ({:.0}, {:.0}) speed {:.0}",
            args.pos.x,
            args.pos.y,
            args.speed
        );
        self.enemies.push(self.enemy_pool.acquire(args));
    }

    /// Move inactive entities out of the live collections and back to their pools
    pub fn cleanup(&mut self) {
        reclaim(&mut self.bullets, &mut self.bullet_pool);
        reclaim(&mut self.enemies, &mut self.enemy_pool);
    }

    /// Start a new round from the initial state
    pub fn reset(&mut self) {
        for bullet in self.bullets.drain(..) {
            self.bullet_pool.release(bullet);
        }
        for enemy in self.enemies.drain(..) {
            self.enemy_pool.release(enemy);
        }

        self.player.reset(&self.tuning);
        self.round = RoundState::new(self.tuning.starting_lives());
        self.spawner.reset();
        self.events.push(GameEvent::Reset);

        log::info!("Round reset");
    }

    /// Hand pending events to the caller
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn bullet_pool(&self) -> &Pool<Bullet> {
        &self.bullet_pool
    }

    pub fn enemy_pool(&self) -> &Pool<Enemy> {
        &self.enemy_pool
    }
}

/// Release every inactive entity, keeping the survivors in order
fn reclaim<T: Entity + Poolable>(live: &mut Vec<T>, pool: &mut Pool<T>) {
    for i in (0..live.len()).rev() {
        if !live[i].is_active() {
            pool.release(live.remove(i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::HitPolicy;
    use glam::Vec2;

    #[test]
    fn test_new_state() {
        let state = GameState::new(Tuning::default()).unwrap();
        assert_eq!(state.round, RoundState::new(None));
        assert!(state.round.running());
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.layers.len(), 3);
    }

    #[test]
    fn test_new_rejects_invalid_tuning() {
        let tuning = Tuning {
            field_height: 0.0,
            ..Default::default()
        };
        assert!(GameState::new(tuning).is_err());
    }

    #[test]
    fn test_lives_policy_tracks_lives() {
        let tuning = Tuning {
            hit_policy: HitPolicy::lives(),
            ..Default::default()
        };
        let mut state = GameState::new(tuning).unwrap();
        assert_eq!(state.round.lives, Some(3));
        assert_eq!(state.round.lose_life(), Some(2));
    }

    #[test]
    fn test_round_score_clamps_at_zero() {
        let mut round = RoundState::new(None);
        round.award(10);
        round.penalize(20);
        assert_eq!(round.score, 0);
        assert_eq!(round.lose_life(), None);
        round.end();
        assert!(round.game_over());
        assert!(!round.running());
    }

    #[test]
    fn test_cleanup_returns_inactive_to_pool_in_order() {
        let mut state = GameState::new(Tuning::default()).unwrap();
        for i in 0..4 {
            state.spawn_enemy_with(EnemyArgs {
                pos: Vec2::new(1000.0 + i as f32, 0.0),
                size: Vec2::splat(48.0),
                speed: 100.0,
            });
        }
        state.enemies[1].deactivate();
        state.enemies[2].deactivate();

        state.cleanup();

        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.enemies[0].actor.pos.x, 1000.0);
        assert_eq!(state.enemies[1].actor.pos.x, 1003.0);
        assert_eq!(state.enemy_pool().free_len(), 2);
        assert_eq!(state.enemy_pool().outstanding(), 2);
    }

    #[test]
    fn test_shoot_respects_cooldown_and_game_over() {
        let mut state = GameState::new(Tuning::default()).unwrap();
        assert!(state.shoot());
        assert!(!state.shoot());
        assert_eq!(state.bullets.len(), 1);

        state.player.shoot_cooldown = 0.0;
        state.round.end();
        assert!(!state.shoot());
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_reset_recycles_everything() {
        let mut state = GameState::new(Tuning::default()).unwrap();
        state.shoot();
        state.spawn_enemy();
        state.spawn_enemy();
        state.round.award(30);
        state.round.end();

        state.reset();

        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.bullet_pool().free_len(), 1);
        assert_eq!(state.enemy_pool().free_len(), 2);
        assert_eq!(state.bullet_pool().outstanding(), 0);
        assert_eq!(state.round, RoundState::new(None));
        assert_eq!(state.spawner.timer, 0.0);
        assert_eq!(state.take_events(), vec![GameEvent::Reset]);
        assert!(state.events.is_empty());
    }
}
