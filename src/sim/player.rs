//! The player character: ground physics, shooting, knockback and animation

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Actor, BulletArgs, Entity, Facing, StepContext};
use crate::tuning::Tuning;

/// Animation clip currently playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimState {
    Idle,
    #[default]
    Run,
}

impl AnimState {
    /// Sprite sheet row for this clip
    pub fn row(self) -> u32 {
        match self {
            AnimState::Idle => 0,
            AnimState::Run => 1,
        }
    }
}

/// Animation playback state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Animation {
    pub state: AnimState,
    pub frame: u32,
    /// Seconds accumulated toward the next frame
    pub timer: f32,
}

impl Animation {
    /// Switch clip; restarts playback only on an actual change
    pub fn set_state(&mut self, state: AnimState) {
        if self.state != state {
            self.state = state;
            self.frame = 0;
            self.timer = 0.0;
        }
    }

    /// Advance by `dt`, carrying leftover time into the next frame
    pub fn advance(&mut self, dt: f32, interval: f32, frame_count: u32) {
        self.timer += dt;
        if self.timer < interval {
            return;
        }
        // Whole frames at once; repeated subtraction stalls once the timer outgrows f32 precision
        let steps = (self.timer / interval).floor() as u64;
        self.timer %= interval;
        self.frame = ((u64::from(self.frame) + steps) % u64::from(frame_count)) as u32;
    }
}

/// The single player-controlled character
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub actor: Actor,
    pub grounded: bool,
    pub facing: Facing,
    /// Seconds until the next shot is allowed
    pub shoot_cooldown: f32,
    /// Seconds of knockback remaining (input ignored while > 0)
    pub knock_timer: f32,
    pub anim: Animation,
    /// Recent positions, newest first
    pub trail: VecDeque<Vec2>,
    trail_timer: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            actor: Actor::new(tuning.player_start, tuning.player_size, Vec2::ZERO),
            grounded: false,
            facing: Facing::Right,
            shoot_cooldown: 0.0,
            knock_timer: 0.0,
            anim: Animation::default(),
            trail: VecDeque::with_capacity(tuning.trail_capacity),
            trail_timer: 0.0,
        }
    }

    /// Restore every field to its starting value
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    #[inline]
    pub fn is_knocked(&self) -> bool {
        self.knock_timer > 0.0
    }

    /// Start the cooldown and return the bullet to spawn, or `None` while cooling down
    pub fn try_fire(&mut self, tuning: &Tuning) -> Option<BulletArgs> {
        if self.shoot_cooldown > 0.0 {
            return None;
        }
        self.shoot_cooldown = tuning.shoot_cooldown;

        let Actor { pos, size, .. } = self.actor;
        let x = match self.facing {
            Facing::Right => pos.x + size.x,
            Facing::Left => pos.x - tuning.bullet_size.x,
        };
        let y = pos.y + size.y / 2.0 - tuning.bullet_size.y / 2.0;

        Some(BulletArgs {
            pos: Vec2::new(x, y),
            size: tuning.bullet_size,
            speed: tuning.bullet_speed,
            dir: self.facing,
        })
    }

    /// Push the player back and up, suppressing input for a while
    pub fn apply_knockback(&mut self, tuning: &Tuning) {
        self.actor.vel = tuning.knockback;
        self.knock_timer = tuning.knockback_duration;
    }

    fn sample_trail(&mut self, dt: f32, tuning: &Tuning) {
        if tuning.trail_capacity == 0 {
            return;
        }
        self.trail_timer += dt;
        if self.trail_timer >= tuning.trail_step {
            self.trail_timer %= tuning.trail_step;
            self.trail.push_front(self.actor.pos);
            self.trail.truncate(tuning.trail_capacity);
        }
    }
}

impl Entity for Player {
    fn actor(&self) -> &Actor {
        &self.actor
    }

    fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    fn update(&mut self, ctx: &StepContext<'_>) {
        let dt = ctx.dt;
        let tuning = ctx.tuning;

        if self.knock_timer > 0.0 {
            self.knock_timer = (self.knock_timer - dt).max(0.0);
        }
        let knocked = self.is_knocked();

        self.actor.vel.y += tuning.gravity * dt;

        // Knockback owns horizontal velocity until it expires
        if !knocked {
            let mut move_x = 0.0;
            if ctx.controls.left {
                move_x -= 1.0;
            }
            if ctx.controls.right {
                move_x += 1.0;
            }
            self.actor.vel.x = move_x * tuning.player_speed;
            if move_x < 0.0 {
                self.facing = Facing::Left;
            } else if move_x > 0.0 {
                self.facing = Facing::Right;
            }
        }

        if ctx.controls.jump && self.grounded && !knocked {
            self.actor.vel.y = tuning.jump_impulse;
            self.grounded = false;
        }

        self.actor.pos += self.actor.vel * dt;

        let ground_y = tuning.ground_y();
        if self.actor.pos.y + self.actor.size.y >= ground_y {
            self.actor.pos.y = ground_y - self.actor.size.y;
            self.actor.vel.y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }

        let margin = tuning.player_edge_margin;
        self.actor.pos.x = self
            .actor
            .pos
            .x
            .clamp(margin, tuning.field_width - self.actor.size.x - margin);

        self.shoot_cooldown = (self.shoot_cooldown - dt).max(0.0);

        self.sample_trail(dt, tuning);

        if self.actor.vel.x.abs() < tuning.idle_speed_epsilon && self.grounded {
            self.anim.set_state(AnimState::Idle);
        } else {
            self.anim.set_state(AnimState::Run);
        }
        self.anim
            .advance(dt, tuning.anim_frame_interval, tuning.anim_frame_count);
    }
}
