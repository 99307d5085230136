//! Collectible power-ups
//!
//! Two kinds, both applying a timed effect to the player on contact: Speed
//! (x1.5 movement for 5 s) and Shield (damage immunity for 8 s). Pickups
//! bob gently around their anchor and are removed from the world when
//! collected.

use crate::animation::{AnimationController, Facing};
use crate::collision::Collidable;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use std::time::Duration;

pub const SPEED_BOOST_DURATION: Duration = Duration::from_secs(5);
pub const SHIELD_DURATION: Duration = Duration::from_secs(8);

/// Points awarded for collecting any power-up.
pub const PICKUP_POINTS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Speed,
    Shield,
}

impl PowerUpKind {
    pub fn status_line(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "SPEED BOOST ACTIVE",
            PowerUpKind::Shield => "SHIELD ACTIVE",
        }
    }

    /// Animation state name in the power-up sheet config.
    pub fn animation_state(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "speed",
            PowerUpKind::Shield => "shield",
        }
    }
}

pub struct PowerUp<'a> {
    pub kind: PowerUpKind,
    pub x: f32,
    anchor_y: f32,
    pub y: f32,
    pub width: u32,
    pub height: u32,
    bob_phase: f32,
    animation_controller: AnimationController<'a>,
}

impl<'a> PowerUp<'a> {
    pub fn new(x: f32, y: f32, kind: PowerUpKind, mut animation_controller: AnimationController<'a>) -> Self {
        animation_controller.set_state(kind.animation_state());
        PowerUp {
            kind,
            x,
            anchor_y: y,
            y,
            width: 24,
            height: 24,
            bob_phase: 0.0,
            animation_controller,
        }
    }

    pub fn update(&mut self, delta_time: f32) {
        // Slow vertical bob so pickups read as collectibles, not scenery
        self.bob_phase += delta_time * std::f32::consts::PI;
        self.y = self.anchor_y + self.bob_phase.sin() * 6.0;

        self.animation_controller.update();
    }

    pub fn render(&self, canvas: &mut Canvas<Window>, screen_x: i32) -> Result<(), String> {
        let dest_rect = Rect::new(screen_x, self.y.round() as i32, 32, 32);
        self.animation_controller.render(canvas, dest_rect, Facing::Right)
    }
}

impl Collidable for PowerUp<'_> {
    fn bounds(&self) -> Rect {
        // Hitbox slightly inset from the 32x32 sprite
        Rect::new(self.x.round() as i32 + 4, self.y.round() as i32 + 4, self.width, self.height)
    }
}
