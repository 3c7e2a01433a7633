//! Variable timestep simulation tick
//!
//! One call advances the whole game by `dt` seconds in a fixed order:
//! parallax, player, enemies, bullets, spawning, collisions, cleanup, effects.

use super::collision::{resolve_bullet_hits, take_player_contact};
use super::entity::{Entity, StepContext};
use super::state::{GameEvent, GameState};
use crate::input::Controls;
use crate::tuning::HitPolicy;

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, controls: Controls, dt: f32) {
    // Gameplay is frozen after game over; only visual fades keep running
    if state.round.game_over() {
        state.flash.update(dt);
        return;
    }

    let ctx = StepContext {
        dt,
        tuning: &state.tuning,
        controls,
    };

    let wrap = ctx.tuning.field_width + ctx.tuning.parallax_wrap_margin;
    for layer in &mut state.layers {
        layer.update(dt, ctx.tuning.parallax_base_speed, wrap);
    }

    state.player.update(&ctx);
    for enemy in state.enemies.iter_mut().filter(|e| e.is_active()) {
        enemy.update(&ctx);
    }
    for bullet in state.bullets.iter_mut().filter(|b| b.is_active()) {
        bullet.update(&ctx);
    }

    if let Some(args) = state.spawner.tick(dt, &mut state.rng, &state.tuning) {
        state.spawn_enemy_with(args);
    }

    let kills = resolve_bullet_hits(&mut state.bullets, &mut state.enemies);
    for _ in 0..kills {
        state.round.award(state.tuning.kill_score);
        state.events.push(GameEvent::EnemyDestroyed {
            score: state.round.score,
        });
    }

    resolve_player_contact(state);

    state.cleanup();
    state.flash.update(dt);
}

fn resolve_player_contact(state: &mut GameState) {
    let player_box = state.player.bounds();
    if !take_player_contact(&player_box, &mut state.enemies) {
        return;
    }
    state.flash.trigger(state.tuning.flash_duration);

    match state.tuning.hit_policy {
        HitPolicy::InstantGameOver => contact_ends_round(state),
        HitPolicy::Lives { .. } => contact_costs_life(state),
    }
}

/// Score variant: lose points, round over on the spot
fn contact_ends_round(state: &mut GameState) {
    state.round.penalize(state.tuning.contact_penalty);
    state.events.push(GameEvent::PlayerHit {
        score: state.round.score,
        lives: None,
    });
    end_round(state);
}

/// Lives variant: lose a life and get knocked back; round over at zero lives
fn contact_costs_life(state: &mut GameState) {
    let remaining = state.round.lose_life();
    state.player.apply_knockback(&state.tuning);
    state.events.push(GameEvent::PlayerHit {
        score: state.round.score,
        lives: remaining,
    });
    if remaining == Some(0) {
        end_round(state);
    }
}

fn end_round(state: &mut GameState) {
    state.round.end();
    state.events.push(GameEvent::GameOver {
        score: state.round.score,
    });
    log::info!("Game over with score {}", state.round.score);
}
