//! Attacks, damage events and knockback
//!
//! The player's melee swing produces an `AttackEvent` with a hitbox in
//! front of the facing direction. Hit detection runs once on the frame the
//! attack starts; a short-lived `AttackFlash` remains for rendering so the
//! swing has a visible footprint.

use crate::animation::Facing;
use sdl2::rect::Rect;
use std::time::{Duration, Instant};

/// What caused a damage event. Logged with each hit; would drive per-source
/// effects if damage kinds ever diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    Enemy,
    FellOutOfWorld,
}

/// A single instance of incoming damage.
#[derive(Debug, Clone)]
pub struct DamageEvent {
    pub amount: i32,
    pub source: DamageSource,
}

impl DamageEvent {
    pub fn enemy_contact() -> Self {
        DamageEvent {
            amount: 1,
            source: DamageSource::Enemy,
        }
    }

    pub fn fell_out_of_world() -> Self {
        DamageEvent {
            amount: 1,
            source: DamageSource::FellOutOfWorld,
        }
    }
}

/// Velocity applied to the player when hurt: up and away from the threat.
/// `threat_direction` is which way the threat lies from the player.
pub fn hurt_knockback(threat_direction: Facing) -> (f32, f32) {
    (threat_direction.sign() * -200.0, -300.0)
}

/// Horizontal velocity for an enemy surviving a hit.
pub fn enemy_knockback(attacker_x: f32, enemy_x: f32) -> f32 {
    if enemy_x >= attacker_x {
        200.0
    } else {
        -200.0
    }
}

/// A melee swing, created when the attack key is accepted.
#[derive(Debug, Clone)]
pub struct AttackEvent {
    pub damage: i32,
    /// Center of the attacker's bounds
    pub origin: (i32, i32),
    pub facing: Facing,
    /// Hitbox edge length in px
    pub range: u32,
}

impl AttackEvent {
    pub fn new(damage: i32, origin: (i32, i32), facing: Facing, range: u32) -> Self {
        AttackEvent {
            damage,
            origin,
            facing,
            range,
        }
    }

    /// The square region the swing covers, butted against the attacker's
    /// leading edge and vertically centered on the origin.
    pub fn hitbox(&self) -> Rect {
        let size = self.range as i32;
        let x = match self.facing {
            Facing::Right => self.origin.0,
            Facing::Left => self.origin.0 - size,
        };

        Rect::new(x, self.origin.1 - size / 2, self.range, self.range)
    }
}

/// Lingering visual for a swing. Purely cosmetic; hit detection already
/// happened when the event was created.
pub struct AttackFlash {
    pub area: Rect,
    created: Instant,
    lifetime: Duration,
}

impl AttackFlash {
    pub fn new(area: Rect) -> Self {
        AttackFlash {
            area,
            created: Instant::now(),
            lifetime: Duration::from_millis(100),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.created.elapsed() >= self.lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hitbox_extends_in_facing_direction() {
        let right = AttackEvent::new(1, (100, 100), Facing::Right, 40);
        let left = AttackEvent::new(1, (100, 100), Facing::Left, 40);

        assert_eq!(right.hitbox(), Rect::new(100, 80, 40, 40));
        assert_eq!(left.hitbox(), Rect::new(60, 80, 40, 40));
    }

    #[test]
    fn test_hitbox_is_vertically_centered() {
        let attack = AttackEvent::new(1, (0, 200), Facing::Right, 40);
        let hitbox = attack.hitbox();

        assert_eq!(hitbox.top(), 180);
        assert_eq!(hitbox.bottom(), 220);
    }

    #[test]
    fn test_enemy_knockback_pushes_away_from_attacker() {
        assert_eq!(enemy_knockback(100.0, 150.0), 200.0);
        assert_eq!(enemy_knockback(100.0, 50.0), -200.0);
    }

    #[test]
    fn test_hurt_knockback_is_up_and_back() {
        let (vx, vy) = hurt_knockback(Facing::Right);
        assert_eq!(vx, -200.0);
        assert_eq!(vy, -300.0);

        let (vx, _) = hurt_knockback(Facing::Left);
        assert_eq!(vx, 200.0);
    }

    #[test]
    fn test_attack_flash_expires() {
        let flash = AttackFlash::new(Rect::new(0, 0, 40, 40));
        assert!(!flash.is_finished());

        std::thread::sleep(Duration::from_millis(120));
        assert!(flash.is_finished());
    }
}
