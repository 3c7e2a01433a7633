//! Simulation module
//!
//! All gameplay logic lives here. This module must stay host-agnostic:
//! - Time arrives as a dt in seconds
//! - Input arrives as polled [`crate::input::Controls`]
//! - Randomness comes from the seeded RNG in [`GameState`]
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod entity;
pub mod player;
pub mod pool;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, resolve_bullet_hits, take_player_contact};
pub use effects::{ParallaxLayer, ScreenFlash};
pub use entity::{Actor, Bullet, BulletArgs, Enemy, EnemyArgs, Entity, Facing, StepContext};
pub use player::{AnimState, Animation, Player};
pub use pool::{Pool, Poolable};
pub use spawner::Spawner;
pub use state::{GameEvent, GameState, RoundPhase, RoundState};
pub use tick::tick;
