//! Axis-aligned bounding box tests between bullets, enemies and the player

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Bullet, Enemy, Entity};
use crate::rects_overlap;

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap; boxes that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        rects_overlap(self.min, self.size, other.min, other.size)
    }
}

/// Match active bullets against active enemies.
///
/// Each bullet destroys at most one enemy per call. When a bullet overlaps
/// several enemies, the first one in enemy order is credited; once an enemy is
/// hit it is inactive, so later bullets cannot score it again.
///
/// Returns the number of enemies destroyed.
pub fn resolve_bullet_hits(bullets: &mut [Bullet], enemies: &mut [Enemy]) -> u32 {
    let mut kills = 0;
    for bullet in bullets.iter_mut().filter(|b| b.is_active()) {
        let bullet_box = bullet.bounds();
        if let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.is_active() && bullet_box.intersects(&e.bounds()))
        {
            bullet.deactivate();
            enemy.deactivate();
            kills += 1;
        }
    }
    kills
}

/// Deactivate the first active enemy touching `player`, if any
pub fn take_player_contact(player: &Aabb, enemies: &mut [Enemy]) -> bool {
    match enemies
        .iter_mut()
        .find(|e| e.is_active() && player.intersects(&e.bounds()))
    {
        Some(enemy) => {
            enemy.deactivate();
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{BulletArgs, EnemyArgs, Facing};
    use crate::sim::pool::Poolable;
    use proptest::prelude::*;

    fn bullet_at(x: f32, y: f32) -> Bullet {
        Bullet::create(BulletArgs {
            pos: Vec2::new(x, y),
            size: Vec2::splat(12.0),
            speed: 700.0,
            dir: Facing::Right,
        })
    }

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy::create(EnemyArgs {
            pos: Vec2::new(x, y),
            size: Vec2::splat(48.0),
            speed: 120.0,
        })
    }

    #[test]
    fn test_intersects_overlap_and_touching() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::new(Vec2::new(5.0, 5.0), Vec2::splat(10.0));
        let touching = Aabb::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let far = Aabb::new(Vec2::new(50.0, 50.0), Vec2::splat(1.0));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&touching));
        assert!(!a.intersects(&far));
        assert_eq!(b.max(), Vec2::splat(15.0));
    }

    #[test]
    fn test_bullet_kills_one_enemy_when_overlapping_two() {
        let mut bullets = vec![bullet_at(100.0, 100.0)];
        let mut enemies = vec![enemy_at(90.0, 90.0), enemy_at(95.0, 95.0)];

        let kills = resolve_bullet_hits(&mut bullets, &mut enemies);

        assert_eq!(kills, 1);
        assert!(!bullets[0].is_active());
        assert!(!enemies[0].is_active());
        assert!(enemies[1].is_active());
    }

    #[test]
    fn test_enemy_credited_once_for_two_bullets() {
        let mut bullets = vec![bullet_at(100.0, 100.0), bullet_at(102.0, 100.0)];
        let mut enemies = vec![enemy_at(90.0, 90.0)];

        let kills = resolve_bullet_hits(&mut bullets, &mut enemies);

        assert_eq!(kills, 1);
        assert!(!bullets[0].is_active());
        assert!(bullets[1].is_active());
    }

    #[test]
    fn test_inactive_entities_ignored() {
        let mut bullets = vec![bullet_at(100.0, 100.0)];
        let mut enemies = vec![enemy_at(90.0, 90.0)];
        enemies[0].deactivate();

        assert_eq!(resolve_bullet_hits(&mut bullets, &mut enemies), 0);
        assert!(bullets[0].is_active());
    }

    #[test]
    fn test_player_contact_takes_first_enemy() {
        let player = Aabb::new(Vec2::new(100.0, 100.0), Vec2::splat(64.0));
        let mut enemies = vec![enemy_at(400.0, 100.0), enemy_at(130.0, 110.0), enemy_at(120.0, 100.0)];

        assert!(take_player_contact(&player, &mut enemies));
        assert!(enemies[0].is_active());
        assert!(!enemies[1].is_active());
        assert!(enemies[2].is_active());
    }

    fn arb_aabb() -> impl Strategy<Value = Aabb> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| Aabb::new(Vec2::new(x, y), Vec2::new(w, h)))
    }

    proptest! {
        #[test]
        fn prop_intersects_is_symmetric(a in arb_aabb(), b in arb_aabb()) {
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn prop_box_with_area_intersects_itself(a in arb_aabb()) {
            prop_assume!(a.size.x > 0.01 && a.size.y > 0.01);
            prop_assert!(a.intersects(&a));
        }
    }
}
