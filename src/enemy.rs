//! Enemy behavior
//!
//! Two enemy types share one struct with a per-kind behavior state:
//!
//! - **Golem**: gravity-bound ground unit. Patrols around its spawn anchor,
//!   reversing at the patrol edge, and charges when the player lines up
//!   within range. A charge runs for two seconds, then patrol resumes.
//! - **Bat**: weightless flyer. Hovers on a sine wave around its spawn
//!   height, turns to face the player (rate-limited), and occasionally
//!   dives at the player before easing back into the hover.
//!
//! Behavior decisions poll on fixed ticks (100 ms ground, 200 ms air), as
//! periodic distance/chance checks rather than continuous steering; motion
//! itself integrates every frame.

use crate::animation::{AnimationController, Facing};
use crate::collision::Collidable;
use crate::combat::enemy_knockback;
use crate::physics::Body;
use rand::Rng;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use std::time::{Duration, Instant};

const GOLEM_TICK: f32 = 0.1;
const BAT_TICK: f32 = 0.2;

const GOLEM_CHARGE_SPEED: f32 = 300.0;
const GOLEM_CHARGE_RANGE_X: f32 = 200.0;
const GOLEM_CHARGE_RANGE_Y: f32 = 50.0;
const GOLEM_CHARGE_DURATION: Duration = Duration::from_secs(2);

const BAT_HOVER_AMPLITUDE: f32 = 15.0;
const BAT_HOVER_STEP: f32 = 0.05;
const BAT_DIVE_RANGE: f32 = 150.0;
const BAT_DIVE_CHANCE: f64 = 0.001;
const BAT_DIVE_SPEED: f32 = 100.0;
const BAT_FLIP_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Bat,
    Golem,
}

impl EnemyKind {
    pub fn points(&self) -> u32 {
        match self {
            EnemyKind::Bat => 50,
            EnemyKind::Golem => 100,
        }
    }
}

/// Per-kind behavior state.
enum Behavior {
    Golem {
        anchor_x: f32,
        patrol_distance: f32,
        patrol_speed: f32,
        direction: f32,
        charge_until: Option<Instant>,
    },
    Bat {
        hover_y: f32,
        target_y: f32,
        phase: f32,
        diving_since: Option<Instant>,
        last_flip: Instant,
    },
}

pub struct Enemy<'a> {
    pub kind: EnemyKind,
    pub body: Body,
    pub health: i32,
    pub is_alive: bool,
    pub facing: Facing,
    behavior: Behavior,
    tick_accumulator: f32,
    animation_controller: AnimationController<'a>,
}

impl<'a> Enemy<'a> {
    pub fn golem(
        x: f32,
        y: f32,
        health: i32,
        patrol_distance: f32,
        patrol_speed: f32,
        direction: f32,
        animation_controller: AnimationController<'a>,
    ) -> Self {
        Enemy {
            kind: EnemyKind::Golem,
            body: Body::new(x, y, 40, 40),
            health,
            is_alive: true,
            facing: Facing::Left,
            behavior: Behavior::Golem {
                anchor_x: x,
                patrol_distance,
                patrol_speed,
                direction,
                charge_until: None,
            },
            tick_accumulator: 0.0,
            animation_controller,
        }
    }

    pub fn bat(x: f32, y: f32, animation_controller: AnimationController<'a>) -> Self {
        Enemy {
            kind: EnemyKind::Bat,
            body: Body::new(x, y, 24, 24),
            health: 1,
            is_alive: true,
            facing: Facing::Left,
            behavior: Behavior::Bat {
                hover_y: y,
                target_y: y,
                phase: 0.0,
                diving_since: None,
                last_flip: Instant::now(),
            },
            tick_accumulator: 0.0,
            animation_controller,
        }
    }

    /// Per-frame update. `player_center` is the player's bounds center in
    /// world pixels.
    pub fn update(
        &mut self,
        delta_time: f32,
        player_center: (f32, f32),
        platforms: &[Rect],
        rng: &mut impl Rng,
    ) {
        self.tick_accumulator += delta_time;

        match self.kind {
            EnemyKind::Golem => {
                if self.tick_accumulator >= GOLEM_TICK {
                    self.tick_accumulator -= GOLEM_TICK;
                    self.golem_tick(player_center);
                }
                self.body.step(delta_time, platforms);
            }
            EnemyKind::Bat => {
                if self.tick_accumulator >= BAT_TICK {
                    self.tick_accumulator -= BAT_TICK;
                    self.bat_tick(player_center, rng);
                }
                self.bat_move(delta_time);
            }
        }

        let state = match (&self.kind, &self.behavior) {
            (EnemyKind::Golem, Behavior::Golem { charge_until: Some(_), .. }) => "charge",
            (EnemyKind::Golem, _) => "walk",
            (EnemyKind::Bat, _) => "fly",
        };
        self.animation_controller.set_state(state);
        self.animation_controller.update();
    }

    fn golem_tick(&mut self, player_center: (f32, f32)) {
        let Behavior::Golem {
            anchor_x,
            patrol_distance,
            patrol_speed,
            ref mut direction,
            ref mut charge_until,
        } = self.behavior
        else {
            return;
        };

        // A running charge holds its velocity until the timer lapses
        if let Some(until) = *charge_until {
            if Instant::now() < until {
                return;
            }
            *charge_until = None;
        }

        let center = self.body.bounds().center();
        let dist_x = (center.x() as f32 - player_center.0).abs();
        let dist_y = (center.y() as f32 - player_center.1).abs();

        if dist_x < GOLEM_CHARGE_RANGE_X && dist_y < GOLEM_CHARGE_RANGE_Y {
            let toward = if player_center.0 > center.x() as f32 { 1.0 } else { -1.0 };
            self.body.velocity_x = toward * GOLEM_CHARGE_SPEED;
            self.facing = if toward > 0.0 { Facing::Right } else { Facing::Left };
            *charge_until = Some(Instant::now() + GOLEM_CHARGE_DURATION);
            return;
        }

        // Patrol: reverse once past the patrol edge
        let offset = self.body.x - anchor_x;
        if offset.abs() > patrol_distance {
            *direction = -offset.signum();
            // Step back onto the band edge so the check does not retrigger
            self.body.x = anchor_x + patrol_distance * offset.signum();
        }
        self.body.velocity_x = *direction * patrol_speed;
        self.facing = if *direction > 0.0 { Facing::Right } else { Facing::Left };
    }

    fn bat_tick(&mut self, player_center: (f32, f32), rng: &mut impl Rng) {
        let Behavior::Bat {
            hover_y,
            ref mut target_y,
            ref mut phase,
            ref mut diving_since,
            ref mut last_flip,
        } = self.behavior
        else {
            return;
        };

        *phase += BAT_HOVER_STEP;
        *target_y = hover_y + phase.sin() * BAT_HOVER_AMPLITUDE;

        // Face the player, but not more often than the flip interval so the
        // sprite does not flicker when hovering directly overhead
        let toward_player = if player_center.0 > self.body.x { Facing::Right } else { Facing::Left };
        if toward_player != self.facing && last_flip.elapsed() >= BAT_FLIP_INTERVAL {
            self.facing = toward_player;
            *last_flip = Instant::now();
        }

        if diving_since.is_none() {
            let dist_x = (self.body.x - player_center.0).abs();
            if dist_x < BAT_DIVE_RANGE && rng.gen_bool(BAT_DIVE_CHANCE) {
                let dx = player_center.0 - self.body.x;
                let dy = player_center.1 - self.body.y;
                let len = (dx * dx + dy * dy).sqrt().max(1.0);
                self.body.velocity_x = dx / len * BAT_DIVE_SPEED;
                self.body.velocity_y = dy / len * BAT_DIVE_SPEED;
                *diving_since = Some(Instant::now());
            }
        }
    }

    /// Frame integration for bats: no gravity, no platform collision.
    fn bat_move(&mut self, delta_time: f32) {
        let Behavior::Bat {
            ref mut hover_y,
            target_y,
            ref mut diving_since,
            ..
        } = self.behavior
        else {
            return;
        };

        if let Some(since) = *diving_since {
            self.body.x += self.body.velocity_x * delta_time;
            self.body.y += self.body.velocity_y * delta_time;

            let elapsed = since.elapsed().as_secs_f32();
            if elapsed > 0.3 {
                // Ease the dive out instead of stopping dead
                let damping = 0.92_f32;
                self.body.velocity_x *= damping;
                self.body.velocity_y *= damping;
            }
            if elapsed > 1.5 {
                self.body.velocity_x = 0.0;
                self.body.velocity_y = 0.0;
                // Resume hovering around wherever the dive ended
                *hover_y = self.body.y;
                *diving_since = None;
            }
        } else {
            // Drift toward the sine target
            self.body.y += (target_y - self.body.y) * 0.05;
        }
    }

    /// Applies attack damage. Returns the score value when the hit kills,
    /// otherwise knocks the enemy away from the attacker.
    pub fn take_damage(&mut self, amount: i32, attacker_x: f32) -> Option<u32> {
        self.health -= amount;

        if self.health <= 0 {
            self.health = 0;
            self.is_alive = false;
            Some(self.kind.points())
        } else {
            self.body.velocity_x = enemy_knockback(attacker_x, self.body.x);
            None
        }
    }

    pub fn render(&self, canvas: &mut Canvas<Window>, screen_x: i32) -> Result<(), String> {
        let size = match self.kind {
            EnemyKind::Bat => 32,
            EnemyKind::Golem => 40,
        };
        let dest_rect = Rect::new(screen_x, self.body.y.round() as i32, size, size);
        self.animation_controller.render(canvas, dest_rect, self.facing)
    }
}

impl Collidable for Enemy<'_> {
    fn bounds(&self) -> Rect {
        self.body.bounds()
    }
}
