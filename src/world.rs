//! The running level: entities, update order and rendering
//!
//! `GameWorld` owns everything alive in one level run. The frame update
//! follows the loop pattern Update -> Collision -> Render: the player and
//! the clock first, then attack hits (before enemy updates, so a killing
//! blow lands before the enemy can deal contact damage that frame), then
//! enemy motion, contact damage, pickups and the goal check.

use crate::animation::{AnimationConfig, Facing};
use crate::camera::{Camera, VIEW_WIDTH};
use crate::collision::{aabb_intersect, overlapping_indices, Collidable};
use crate::combat::{AttackFlash, DamageEvent};
use crate::difficulty::LevelTheme;
use crate::enemy::Enemy;
use crate::level::Level;
use crate::player::Player;
use crate::powerup::{PowerUp, PowerUpKind, PICKUP_POINTS};
use crate::session::{LevelResult, LevelSession};
use crate::ui::draw_hud;
use crate::text::draw_text_centered;
use rand::Rng;
use sdl2::keyboard::KeyboardState;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas, Texture};
use sdl2::video::Window;
use std::time::Instant;

const PLAYER_STARTING_HEALTH: i32 = 3;

/// Loaded textures and animation configs, shared by every level build.
pub struct Assets<'a> {
    pub player_config: AnimationConfig,
    pub bat_config: AnimationConfig,
    pub golem_config: AnimationConfig,
    pub power_up_config: AnimationConfig,
    pub player_texture: &'a Texture<'a>,
    pub bat_texture: &'a Texture<'a>,
    pub golem_texture: &'a Texture<'a>,
    pub power_up_texture: &'a Texture<'a>,
}

/// How a level run ended this frame, if it did.
pub enum PlayOutcome {
    Completed(LevelResult),
    GameOver { final_score: u32 },
}

/// A transient HUD status line ("SHIELD ACTIVE"), cleared after a delay.
struct StatusLine {
    text: &'static str,
    until: Instant,
}

pub struct GameWorld<'a> {
    pub session: LevelSession,
    pub level: Level,
    pub player: Player<'a>,
    pub enemies: Vec<Enemy<'a>>,
    pub power_ups: Vec<PowerUp<'a>>,
    pub camera: Camera,
    attack_flashes: Vec<AttackFlash>,
    status_line: Option<StatusLine>,
    started: Instant,
}

impl<'a> GameWorld<'a> {
    /// Builds a fresh run of `level_number` from the shared assets.
    pub fn build(
        level_number: u32,
        assets: &Assets<'a>,
        rng: &mut impl Rng,
    ) -> Result<GameWorld<'a>, String> {
        let session = LevelSession::new(level_number);
        let level = Level::generate(level_number, &session.difficulty, rng);

        let player_controller = assets
            .player_config
            .create_controller(assets.player_texture, &["idle", "walk", "jump", "attack"])?;
        let player = Player::new(
            crate::level::PLAYER_SPAWN.0,
            crate::level::PLAYER_SPAWN.1,
            PLAYER_STARTING_HEALTH,
            player_controller,
        );

        let mut enemies = Vec::new();
        for &(x, y) in &level.bat_spawns {
            let controller = assets.bat_config.create_controller(assets.bat_texture, &["fly"])?;
            enemies.push(Enemy::bat(x, y, controller));
        }
        for &(x, y) in &level.golem_spawns {
            let controller = assets
                .golem_config
                .create_controller(assets.golem_texture, &["walk", "charge"])?;
            let patrol_distance = 80.0 + rng.gen_range(0.0..40.0);
            let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            enemies.push(Enemy::golem(
                x,
                y,
                session.difficulty.enemy_health,
                patrol_distance,
                session.difficulty.enemy_speed * 0.7,
                direction,
                controller,
            ));
        }

        let mut power_ups = Vec::new();
        for &(x, y, kind) in &level.power_up_spawns {
            let controller = assets
                .power_up_config
                .create_controller(assets.power_up_texture, &["speed", "shield"])?;
            power_ups.push(PowerUp::new(x, y, kind, controller));
        }

        let mut camera = Camera::new(VIEW_WIDTH);
        camera.snap_to(player.body.x);

        println!(
            "Level {}: {} enemies, {} power-ups, {} theme",
            level.number,
            enemies.len(),
            power_ups.len(),
            level.theme.name
        );

        Ok(GameWorld {
            session,
            level,
            player,
            enemies,
            power_ups,
            camera,
            attack_flashes: Vec::new(),
            status_line: None,
            started: Instant::now(),
        })
    }

    /// Jump key edge from the event loop.
    pub fn handle_jump_pressed(&mut self) {
        self.player.try_jump();
    }

    /// Attack key edge: runs hit detection immediately and leaves a flash
    /// behind for rendering.
    pub fn handle_attack_pressed(&mut self) {
        let Some(attack) = self.player.try_attack() else {
            return;
        };

        let hitbox = attack.hitbox();
        let attacker_x = self.player.body.x;

        for enemy in &mut self.enemies {
            if aabb_intersect(&hitbox, &enemy.bounds()) {
                if let Some(points) = enemy.take_damage(attack.damage, attacker_x) {
                    self.session.add_score(points);
                }
            }
        }

        self.attack_flashes.push(AttackFlash::new(hitbox));
    }

    /// One frame of simulation. Returns the outcome once the run ends.
    pub fn update(
        &mut self,
        keyboard_state: &KeyboardState,
        delta_time: f32,
        rng: &mut impl Rng,
    ) -> Option<PlayOutcome> {
        self.session.tick_clock();
        if self.session.is_game_over() {
            return Some(PlayOutcome::GameOver {
                final_score: self.session.score(),
            });
        }

        self.player
            .update(keyboard_state, delta_time, &self.level.platforms);

        // Fell out of the world: costs a health (shield still counts) and
        // puts the player back at the spawn
        if self.player.fell_out_of_world() {
            self.player
                .take_damage(&DamageEvent::fell_out_of_world(), Facing::Right);
            self.player.respawn();
            self.camera.snap_to(self.player.body.x);
        }

        let player_center = self.player.bounds().center();
        let player_center = (player_center.x() as f32, player_center.y() as f32);

        for enemy in &mut self.enemies {
            enemy.update(delta_time, player_center, &self.level.platforms, rng);
        }

        // Contact damage, knocking the player away from whichever enemy hit
        for index in overlapping_indices(&self.player, &self.enemies) {
            let threat_direction = if self.enemies[index].body.x >= self.player.body.x {
                Facing::Right
            } else {
                Facing::Left
            };
            self.player
                .take_damage(&DamageEvent::enemy_contact(), threat_direction);
        }

        self.enemies.retain(|enemy| enemy.is_alive);

        for power_up in &mut self.power_ups {
            power_up.update(delta_time);
        }
        self.collect_power_ups();

        self.attack_flashes.retain(|flash| !flash.is_finished());

        if let Some(status) = &self.status_line {
            if Instant::now() >= status.until {
                self.status_line = None;
            }
        }

        if self.player.is_dead() {
            self.session.set_game_over();
            return Some(PlayOutcome::GameOver {
                final_score: self.session.score(),
            });
        }

        if aabb_intersect(&self.player.bounds(), &self.level.goal) {
            if let Some(result) = self.session.complete_level() {
                return Some(PlayOutcome::Completed(result));
            }
        }

        self.camera.follow(self.player.body.x + self.player.body.width as f32 / 2.0);

        None
    }

    fn collect_power_ups(&mut self) {
        let player_bounds = self.player.bounds();
        let mut collected: Vec<PowerUpKind> = Vec::new();

        self.power_ups.retain(|power_up| {
            if aabb_intersect(&player_bounds, &power_up.bounds()) {
                collected.push(power_up.kind);
                false
            } else {
                true
            }
        });

        for kind in collected {
            self.session.add_score(PICKUP_POINTS);
            self.player.apply_power_up(kind);

            let display_secs = match kind {
                PowerUpKind::Speed => 5,
                PowerUpKind::Shield => 3,
            };
            self.status_line = Some(StatusLine {
                text: kind.status_line(),
                until: Instant::now() + std::time::Duration::from_secs(display_secs),
            });
            println!("Power-up collected: {:?}", kind);
        }
    }

    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        let theme = self.level.theme;

        canvas.set_draw_color(theme.background);
        canvas.clear();

        self.render_platforms(canvas, &theme)?;
        self.render_goal(canvas)?;

        for power_up in &self.power_ups {
            let screen_x = self.camera.to_screen_x(power_up.x.round() as i32);
            if on_screen(screen_x, 32) {
                power_up.render(canvas, screen_x)?;
            }
        }

        for enemy in &self.enemies {
            let screen_x = self.camera.to_screen_x(enemy.body.x.round() as i32);
            if on_screen(screen_x, 40) {
                enemy.render(canvas, screen_x)?;
            }
        }

        let player_screen_x = self.camera.to_screen_x(self.player.body.x.round() as i32);
        self.player.render(canvas, player_screen_x)?;

        canvas.set_blend_mode(BlendMode::Blend);
        canvas.set_draw_color(Color::RGBA(255, 60, 60, 90));
        for flash in &self.attack_flashes {
            let mut area = flash.area;
            area.set_x(self.camera.to_screen_x(area.x()));
            canvas.fill_rect(area).map_err(|e| e.to_string())?;
        }
        canvas.set_blend_mode(BlendMode::None);

        draw_hud(
            canvas,
            &self.session,
            &self.player,
            self.level.progress(self.player.body.x),
            self.status_line.as_ref().map(|status| status.text),
        )?;

        self.render_level_intro(canvas)?;

        Ok(())
    }

    fn render_platforms(&self, canvas: &mut Canvas<Window>, theme: &LevelTheme) -> Result<(), String> {
        canvas.set_draw_color(theme.platform);
        for platform in &self.level.platforms {
            let mut rect = *platform;
            rect.set_x(self.camera.to_screen_x(rect.x()));
            if on_screen(rect.x(), rect.width()) {
                canvas.fill_rect(rect).map_err(|e| e.to_string())?;
            }
        }
        Ok(())
    }

    fn render_goal(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        let mut goal = self.level.goal;
        goal.set_x(self.camera.to_screen_x(goal.x()));
        if !on_screen(goal.x(), goal.width()) {
            return Ok(());
        }

        // Slow glow pulse so the goal stands out against any theme
        let pulse = (self.started.elapsed().as_secs_f32() * std::f32::consts::PI).sin();
        let alpha = 180 + (pulse * 60.0) as i32;

        canvas.set_blend_mode(BlendMode::Blend);
        canvas.set_draw_color(Color::RGBA(255, 215, 0, alpha.clamp(0, 255) as u8));
        canvas.fill_rect(goal).map_err(|e| e.to_string())?;
        canvas.set_blend_mode(BlendMode::None);
        Ok(())
    }

    /// "LEVEL N" banner: holds for a second, then fades over two more.
    fn render_level_intro(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        let elapsed = self.started.elapsed().as_secs_f32();
        if elapsed >= 3.0 {
            return Ok(());
        }

        let alpha = if elapsed < 1.0 {
            255.0
        } else {
            255.0 * (1.0 - (elapsed - 1.0) / 2.0)
        };

        canvas.set_blend_mode(BlendMode::Blend);
        draw_text_centered(
            canvas,
            &format!("LEVEL {}", self.session.level),
            VIEW_WIDTH as i32 / 2,
            100,
            Color::RGBA(255, 255, 0, alpha as u8),
            4,
        )?;
        canvas.set_blend_mode(BlendMode::None);
        Ok(())
    }
}

/// Cheap horizontal cull against the view.
fn on_screen(screen_x: i32, width: u32) -> bool {
    screen_x + width as i32 >= 0 && screen_x <= VIEW_WIDTH as i32
}
