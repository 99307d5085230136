//! The player: movement, jumping, abilities and damage
//!
//! Movement reads the keyboard every frame (left/right arrows); jumping is
//! edge-triggered from the event loop so holding the key does not bounce.
//! Ability gating lives here: one double jump per airborne phase, a coyote
//! window after walking off a ledge, a melee attack on a cooldown, and the
//! two timed power-up effects.

use crate::animation::{determine_animation_state, AnimationController, Facing};
use crate::collision::Collidable;
use crate::combat::{hurt_knockback, AttackEvent, DamageEvent};
use crate::level::{KILL_PLANE_Y, PLAYER_SPAWN, WORLD_WIDTH};
use crate::physics::Body;
use crate::powerup::{PowerUpKind, SHIELD_DURATION, SPEED_BOOST_DURATION};
use sdl2::keyboard::{KeyboardState, Scancode};
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use std::time::{Duration, Instant};

pub const BASE_SPEED: f32 = 160.0;
const JUMP_VELOCITY: f32 = -500.0;
const DOUBLE_JUMP_VELOCITY: f32 = -400.0;
const COYOTE_WINDOW: Duration = Duration::from_millis(100);
const ATTACK_COOLDOWN: Duration = Duration::from_millis(500);
const ATTACK_RANGE: u32 = 40;
const ATTACK_DAMAGE: i32 = 1;
const HURT_COOLDOWN: Duration = Duration::from_secs(1);

const SPRITE_SIZE: u32 = 48;
const HITBOX_WIDTH: u32 = 32;
const HITBOX_HEIGHT: u32 = 48;

pub struct Player<'a> {
    pub body: Body,
    pub health: i32,
    pub facing: Facing,
    pub is_moving: bool,
    pub is_jumping: bool,
    pub is_attacking: bool,

    speed: f32,
    can_double_jump: bool,
    last_on_ground: Instant,
    last_attack: Option<Instant>,
    last_hurt: Option<Instant>,
    speed_boost_until: Option<Instant>,
    shield_until: Option<Instant>,

    animation_controller: AnimationController<'a>,
}

impl<'a> Player<'a> {
    pub fn new(x: f32, y: f32, health: i32, animation_controller: AnimationController<'a>) -> Self {
        Player {
            body: Body::new(x, y, HITBOX_WIDTH, HITBOX_HEIGHT),
            health,
            facing: Facing::Right,
            is_moving: false,
            is_jumping: false,
            is_attacking: false,
            speed: BASE_SPEED,
            can_double_jump: false,
            last_on_ground: Instant::now(),
            last_attack: None,
            last_hurt: None,
            speed_boost_until: None,
            shield_until: None,
            animation_controller,
        }
    }

    /// Per-frame update: input, timed effect expiry, physics, animation.
    pub fn update(&mut self, keyboard_state: &KeyboardState, delta_time: f32, platforms: &[Rect]) {
        self.expire_effects();

        let left = keyboard_state.is_scancode_pressed(Scancode::Left);
        let right = keyboard_state.is_scancode_pressed(Scancode::Right);

        self.body.velocity_x = match (left, right) {
            (true, false) => -self.speed,
            (false, true) => self.speed,
            _ => 0.0,
        };

        self.is_moving = self.body.velocity_x != 0.0;
        if self.is_moving {
            if let Some(facing) = Facing::from_velocity(self.body.velocity_x) {
                self.facing = facing;
            }
        }

        self.body.step(delta_time, platforms);
        self.body.clamp_to_world(WORLD_WIDTH);

        if self.body.on_ground {
            self.last_on_ground = Instant::now();
            // Standing re-arms the air jump, so walking off a ledge still
            // leaves one jump in hand
            self.can_double_jump = true;
            self.is_jumping = false;
        }

        if self.is_attacking && self.animation_controller.is_animation_finished() {
            self.is_attacking = false;
        }

        let state = if self.is_attacking {
            "attack"
        } else {
            determine_animation_state(self.body.velocity_x, self.body.on_ground)
        };
        self.animation_controller.set_state(state);
        self.animation_controller.update();
    }

    /// Handles one press of the jump key. Grounded (or recently grounded,
    /// the coyote window) presses jump; one more press is allowed midair.
    pub fn try_jump(&mut self) -> bool {
        let grounded = self.body.on_ground || self.last_on_ground.elapsed() <= COYOTE_WINDOW;

        if grounded && !self.is_jumping {
            self.body.velocity_y = JUMP_VELOCITY;
            self.body.on_ground = false;
            self.is_jumping = true;
            self.can_double_jump = true;
            true
        } else if self.can_double_jump {
            self.body.velocity_y = DOUBLE_JUMP_VELOCITY;
            self.can_double_jump = false;
            self.is_jumping = true;
            true
        } else {
            false
        }
    }

    /// Starts a melee swing unless the cooldown is still running.
    pub fn try_attack(&mut self) -> Option<AttackEvent> {
        if let Some(last) = self.last_attack {
            if last.elapsed() < ATTACK_COOLDOWN {
                return None;
            }
        }

        self.last_attack = Some(Instant::now());
        self.is_attacking = true;

        let bounds = self.bounds();
        let origin_x = match self.facing {
            Facing::Right => bounds.right(),
            Facing::Left => bounds.left(),
        };

        Some(AttackEvent::new(
            ATTACK_DAMAGE,
            (origin_x, bounds.center().y()),
            self.facing,
            ATTACK_RANGE,
        ))
    }

    /// Applies incoming damage. Shields absorb it entirely; a fresh hit
    /// starts a short immunity so contact damage cannot tick every frame.
    /// Returns true when damage actually landed.
    pub fn take_damage(&mut self, damage: &DamageEvent, threat_direction: Facing) -> bool {
        if self.is_shielded() {
            return false;
        }
        if let Some(last) = self.last_hurt {
            if last.elapsed() < HURT_COOLDOWN {
                return false;
            }
        }

        self.last_hurt = Some(Instant::now());
        self.health = (self.health - damage.amount).max(0);
        println!("Player hurt ({:?}): {} health left", damage.source, self.health);

        let (vx, vy) = hurt_knockback(threat_direction);
        self.body.velocity_x = vx;
        self.body.velocity_y = vy;

        true
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// True once the player has fallen past the kill plane.
    pub fn fell_out_of_world(&self) -> bool {
        self.body.y > KILL_PLANE_Y
    }

    /// Puts the player back at the spawn point with zeroed motion. Timed
    /// effects keep running; only position and velocity reset.
    pub fn respawn(&mut self) {
        self.body.x = PLAYER_SPAWN.0;
        self.body.y = PLAYER_SPAWN.1;
        self.body.velocity_x = 0.0;
        self.body.velocity_y = 0.0;
        self.body.on_ground = false;
        self.is_jumping = false;
        self.can_double_jump = false;
    }

    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Speed => {
                self.speed = BASE_SPEED * 1.5;
                self.speed_boost_until = Some(Instant::now() + SPEED_BOOST_DURATION);
            }
            PowerUpKind::Shield => {
                self.shield_until = Some(Instant::now() + SHIELD_DURATION);
            }
        }
    }

    pub fn is_shielded(&self) -> bool {
        self.shield_until.is_some_and(|until| Instant::now() < until)
    }

    fn expire_effects(&mut self) {
        if let Some(until) = self.speed_boost_until {
            if Instant::now() >= until {
                self.speed = BASE_SPEED;
                self.speed_boost_until = None;
            }
        }
        if let Some(until) = self.shield_until {
            if Instant::now() >= until {
                self.shield_until = None;
            }
        }
    }

    pub fn render(&self, canvas: &mut Canvas<Window>, screen_x: i32) -> Result<(), String> {
        // Sprite frame is wider than the hitbox; center it
        let sprite_x = screen_x - (SPRITE_SIZE - HITBOX_WIDTH) as i32 / 2;
        let dest_rect = Rect::new(sprite_x, self.body.y.round() as i32, SPRITE_SIZE, SPRITE_SIZE);

        self.animation_controller.render(canvas, dest_rect, self.facing)?;

        // Shield reads as a cyan outline around the sprite
        if self.is_shielded() {
            canvas.set_draw_color(sdl2::pixels::Color::RGB(0, 255, 255));
            canvas
                .draw_rect(Rect::new(
                    sprite_x - 2,
                    self.body.y.round() as i32 - 2,
                    SPRITE_SIZE + 4,
                    SPRITE_SIZE + 4,
                ))
                .map_err(|e| e.to_string())?;
        }

        Ok(())
    }
}

impl Collidable for Player<'_> {
    fn bounds(&self) -> Rect {
        self.body.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_player() -> Player<'static> {
        Player::new(100.0, 400.0, 3, AnimationController::new(2))
    }

    #[test]
    fn test_first_jump_requires_ground() {
        let mut player = test_player();
        // Freshly spawned players are airborne but inside the coyote window;
        // age the ground timestamp past it first
        player.last_on_ground = Instant::now() - Duration::from_millis(500);

        assert!(!player.try_jump());

        player.body.on_ground = true;
        assert!(player.try_jump());
        assert_eq!(player.body.velocity_y, JUMP_VELOCITY);
    }

    #[test]
    fn test_double_jump_exactly_once_per_airborne_phase() {
        let mut player = test_player();
        player.body.on_ground = true;

        assert!(player.try_jump());
        assert!(player.try_jump()); // the double jump
        assert_eq!(player.body.velocity_y, DOUBLE_JUMP_VELOCITY);
        assert!(!player.try_jump()); // spent

        // Landing re-arms the whole sequence
        player.body.on_ground = true;
        player.is_jumping = false;
        player.can_double_jump = false;
        assert!(player.try_jump());
        assert!(player.try_jump());
    }

    #[test]
    fn test_air_jump_after_walking_off_ledge() {
        let mut player = test_player();
        // Walked off a ledge a while ago: airborne, coyote window long gone,
        // but the air jump armed while standing is still available
        player.body.on_ground = false;
        player.can_double_jump = true;
        player.last_on_ground = Instant::now() - Duration::from_millis(500);

        assert!(player.try_jump());
        assert_eq!(player.body.velocity_y, DOUBLE_JUMP_VELOCITY);
        assert!(!player.try_jump());
    }

    #[test]
    fn test_coyote_window_allows_late_jump() {
        let mut player = test_player();
        // Just walked off a ledge: airborne, but grounded moments ago
        player.body.on_ground = false;
        player.last_on_ground = Instant::now();

        assert!(player.try_jump());
        assert_eq!(player.body.velocity_y, JUMP_VELOCITY);
    }

    #[test]
    fn test_attack_respects_cooldown() {
        let mut player = test_player();

        assert!(player.try_attack().is_some());
        assert!(player.try_attack().is_none());
    }

    #[test]
    fn test_attack_hitbox_faces_forward() {
        let mut player = test_player();
        player.facing = Facing::Right;

        let attack = player.try_attack().unwrap();
        assert!(attack.hitbox().left() >= player.bounds().right());
    }

    #[test]
    fn test_damage_reduces_health_and_clamps() {
        let mut player = test_player();

        assert!(player.take_damage(&DamageEvent::enemy_contact(), Facing::Right));
        assert_eq!(player.health, 2);

        // Knocked up and away from the threat
        assert_eq!(player.body.velocity_x, -200.0);
        assert_eq!(player.body.velocity_y, -300.0);

        player.health = 0;
        player.last_hurt = None;
        assert!(player.take_damage(&DamageEvent::enemy_contact(), Facing::Left));
        assert_eq!(player.health, 0);
        assert!(player.is_dead());
    }

    #[test]
    fn test_hurt_cooldown_blocks_rapid_damage() {
        let mut player = test_player();

        assert!(player.take_damage(&DamageEvent::enemy_contact(), Facing::Right));
        assert!(!player.take_damage(&DamageEvent::enemy_contact(), Facing::Right));
        assert_eq!(player.health, 2);
    }

    #[test]
    fn test_shield_absorbs_damage() {
        let mut player = test_player();
        player.apply_power_up(PowerUpKind::Shield);

        assert!(player.is_shielded());
        assert!(!player.take_damage(&DamageEvent::enemy_contact(), Facing::Right));
        assert_eq!(player.health, 3);
    }

    #[test]
    fn test_speed_boost_multiplies_and_expires() {
        let mut player = test_player();
        player.apply_power_up(PowerUpKind::Speed);
        assert_eq!(player.speed, BASE_SPEED * 1.5);

        // Force the timer to the past and let the next update expire it
        player.speed_boost_until = Some(Instant::now() - Duration::from_millis(1));
        player.expire_effects();
        assert_eq!(player.speed, BASE_SPEED);
    }

    #[test]
    fn test_respawn_resets_position_and_motion() {
        let mut player = test_player();
        player.body.x = 900.0;
        player.body.y = KILL_PLANE_Y + 50.0;
        player.body.velocity_y = 400.0;

        assert!(player.fell_out_of_world());
        player.respawn();

        assert_eq!((player.body.x, player.body.y), PLAYER_SPAWN);
        assert_eq!(player.body.velocity_y, 0.0);
        assert!(!player.fell_out_of_world());
    }
}
