//! Shared actor data and the pooled entity kinds (bullets, enemies)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::pool::Poolable;
use crate::input::Controls;
use crate::tuning::Tuning;

/// Horizontal facing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, +1.0 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Kinematic state common to every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Cleared when the entity is pending removal
    pub active: bool,
}

impl Actor {
    pub fn new(pos: Vec2, size: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            size,
            vel,
            active: true,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Everything an entity may read during its update
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// Seconds
    pub dt: f32,
    pub tuning: &'a Tuning,
    /// Polled movement keys (only the player reads these)
    pub controls: Controls,
}

/// Update/bounds/liveness capability shared by player, bullets and enemies
pub trait Entity {
    fn actor(&self) -> &Actor;
    fn actor_mut(&mut self) -> &mut Actor;
    fn update(&mut self, ctx: &StepContext<'_>);

    fn bounds(&self) -> Aabb {
        self.actor().bounds()
    }

    fn is_active(&self) -> bool {
        self.actor().active
    }

    fn deactivate(&mut self) {
        self.actor_mut().active = false;
    }
}

/// Construction arguments for a bullet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletArgs {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub dir: Facing,
}

/// A projectile fired by the player
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub actor: Actor,
}

impl Poolable for Bullet {
    type Args = BulletArgs;

    fn create(args: BulletArgs) -> Self {
        Self {
            actor: Actor::new(args.pos, args.size, Vec2::new(args.speed * args.dir.sign(), 0.0)),
        }
    }

    fn reinitialize(&mut self, args: BulletArgs) {
        self.actor = Actor::new(args.pos, args.size, Vec2::new(args.speed * args.dir.sign(), 0.0));
    }

    fn on_release(&mut self) {
        self.actor.active = false;
    }
}

impl Entity for Bullet {
    fn actor(&self) -> &Actor {
        &self.actor
    }

    fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    fn update(&mut self, ctx: &StepContext<'_>) {
        let margin = ctx.tuning.bullet_cull_margin;
        self.actor.pos.x += self.actor.vel.x * ctx.dt;
        if self.actor.pos.x < -margin || self.actor.pos.x > ctx.tuning.field_width + margin {
            self.actor.active = false;
        }
    }
}

/// Construction arguments for an enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyArgs {
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward speed magnitude
    pub speed: f32,
}

/// A ground enemy walking in from the right
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub actor: Actor,
}

impl Poolable for Enemy {
    type Args = EnemyArgs;

    fn create(args: EnemyArgs) -> Self {
        Self {
            actor: Actor::new(args.pos, args.size, Vec2::new(-args.speed, 0.0)),
        }
    }

    fn reinitialize(&mut self, args: EnemyArgs) {
        self.actor = Actor::new(args.pos, args.size, Vec2::new(-args.speed, 0.0));
    }

    fn on_release(&mut self) {
        self.actor.active = false;
    }
}

impl Entity for Enemy {
    fn actor(&self) -> &Actor {
        &self.actor
    }

    fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    fn update(&mut self, ctx: &StepContext<'_>) {
        self.actor.pos.x += self.actor.vel.x * ctx.dt;
        if self.actor.pos.x + self.actor.size.x < -ctx.tuning.enemy_cull_margin {
            self.actor.active = false;
        }
    }
}
