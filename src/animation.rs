//! Data-driven sprite animation
//!
//! Animation sets live in JSON files under `assets/config/` and deserialize
//! into `AnimationConfig`. A config plus a texture produces an
//! `AnimationController`, which owns one `SpriteSheet` per named state
//! ("idle", "walk", "jump", ...) and steps whichever state is active.
//!
//! Exactly one state is active per controller at any time; switching states
//! resets and restarts the new sheet.

use crate::sprite::{Frame, SpriteSheet};
use sdl2::render::Texture;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Horizontal facing. Platformer sprites only ever face left or right;
/// sheets with two rows keep right-facing art in row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Right,
    Left,
}

impl Facing {
    pub fn to_row(self) -> i32 {
        match self {
            Facing::Right => 0,
            Facing::Left => 1,
        }
    }

    /// Facing implied by a horizontal velocity; `None` when not moving.
    pub fn from_velocity(velocity_x: f32) -> Option<Self> {
        if velocity_x > 0.0 {
            Some(Facing::Right)
        } else if velocity_x < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

/// On-disk animation description for one entity type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub frame_width: u32,
    pub frame_height: u32,
    /// Number of facing rows in the sheet (1 = flip for left, 2 = row per facing)
    #[serde(default = "default_rows")]
    pub facing_rows: u32,
    pub animations: HashMap<String, AnimationData>,
}

fn default_rows() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationData {
    pub frames: Vec<FrameData>,
    pub loop_animation: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameData {
    pub x: i32,
    pub y: i32,
    pub duration_ms: u64,
}

impl FrameData {
    pub fn to_frame(&self, width: u32, height: u32) -> Frame {
        Frame::new(self.x, self.y, width, height, self.duration_ms)
    }
}

impl AnimationConfig {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: AnimationConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn create_frames(&self, state: &str) -> Vec<Frame> {
        match self.animations.get(state) {
            Some(animation_data) => animation_data
                .frames
                .iter()
                .map(|frame_data| frame_data.to_frame(self.frame_width, self.frame_height))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn should_loop(&self, state: &str) -> bool {
        self.animations
            .get(state)
            .map(|data| data.loop_animation)
            .unwrap_or(true)
    }

    /// Builds a controller with one sprite sheet per requested state.
    ///
    /// Errors if the config is missing any of the requested states, so a
    /// typo in a state list fails at load time rather than as a blank sprite
    /// mid-game.
    pub fn create_controller<'a>(
        &self,
        texture: &'a Texture<'a>,
        states: &[&str],
    ) -> Result<AnimationController<'a>, String> {
        let mut controller = AnimationController::new(self.facing_rows);

        for &state in states {
            if !self.animations.contains_key(state) {
                return Err(format!("Animation state '{}' not found in config", state));
            }

            let mut sheet = SpriteSheet::new(texture, self.create_frames(state));
            sheet.set_loop(self.should_loop(state));
            controller.add_animation(state.to_string(), sheet);
        }

        Ok(controller)
    }
}

/// Tracks the active animation state and steps its sheet.
pub struct AnimationController<'a> {
    current_state: String,
    sprite_sheets: HashMap<String, SpriteSheet<'a>>,
    facing_rows: u32,
    state_changed: bool,
}

impl<'a> AnimationController<'a> {
    pub fn new(facing_rows: u32) -> Self {
        AnimationController {
            current_state: String::new(),
            sprite_sheets: HashMap::new(),
            facing_rows,
            state_changed: false,
        }
    }

    pub fn add_animation(&mut self, state: String, sprite_sheet: SpriteSheet<'a>) {
        if self.current_state.is_empty() {
            self.current_state = state.clone();
            self.state_changed = true;
        }
        self.sprite_sheets.insert(state, sprite_sheet);
    }

    pub fn set_state(&mut self, new_state: &str) {
        if new_state != self.current_state {
            self.current_state = new_state.to_string();
            self.state_changed = true;
        }
    }

    pub fn update(&mut self) {
        if self.state_changed {
            if let Some(sheet) = self.sprite_sheets.get_mut(&self.current_state) {
                sheet.reset();
                sheet.play();
            }
            self.state_changed = false;
        }

        if let Some(sheet) = self.sprite_sheets.get_mut(&self.current_state) {
            sheet.update();
        }
    }

    pub fn is_animation_finished(&self) -> bool {
        self.sprite_sheets
            .get(&self.current_state)
            .map(|sheet| sheet.is_finished())
            .unwrap_or(false)
    }

    pub fn render(
        &self,
        canvas: &mut sdl2::render::Canvas<sdl2::video::Window>,
        dest_rect: sdl2::rect::Rect,
        facing: Facing,
    ) -> Result<(), String> {
        match self.sprite_sheets.get(&self.current_state) {
            Some(sheet) => sheet.render_facing(canvas, dest_rect, facing, self.facing_rows),
            None => {
                // No sheet loaded for this state: draw a placeholder block
                // so a broken config is visible instead of invisible
                canvas.set_draw_color(sdl2::pixels::Color::RGB(255, 0, 255));
                canvas.fill_rect(dest_rect).map_err(|e| e.to_string())
            }
        }
    }
}

/// Picks the movement animation for a grounded body.
///
/// Airborne bodies use "jump"; otherwise any horizontal motion selects
/// "walk" and stillness selects "idle".
pub fn determine_animation_state(velocity_x: f32, on_ground: bool) -> &'static str {
    if !on_ground {
        "jump"
    } else if velocity_x.abs() > f32::EPSILON {
        "walk"
    } else {
        "idle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_from_velocity() {
        assert_eq!(Facing::from_velocity(160.0), Some(Facing::Right));
        assert_eq!(Facing::from_velocity(-160.0), Some(Facing::Left));
        assert_eq!(Facing::from_velocity(0.0), None);
    }

    #[test]
    fn test_determine_animation_state() {
        assert_eq!(determine_animation_state(0.0, true), "idle");
        assert_eq!(determine_animation_state(160.0, true), "walk");
        assert_eq!(determine_animation_state(-160.0, true), "walk");
        // Airborne wins regardless of horizontal motion
        assert_eq!(determine_animation_state(0.0, false), "jump");
        assert_eq!(determine_animation_state(160.0, false), "jump");
    }

    #[test]
    fn test_config_parses_and_validates_states() {
        let json = r#"{
            "frame_width": 48,
            "frame_height": 48,
            "facing_rows": 2,
            "animations": {
                "idle": {
                    "frames": [{ "x": 0, "y": 0, "duration_ms": 200 }],
                    "loop_animation": true
                },
                "jump": {
                    "frames": [{ "x": 48, "y": 0, "duration_ms": 100 }],
                    "loop_animation": false
                }
            }
        }"#;

        let config: AnimationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.facing_rows, 2);
        assert_eq!(config.create_frames("idle").len(), 1);
        assert!(config.should_loop("idle"));
        assert!(!config.should_loop("jump"));
        // Unknown states produce no frames and default to looping
        assert!(config.create_frames("swim").is_empty());
    }

    #[test]
    fn test_facing_rows_defaults_to_one() {
        let json = r#"{
            "frame_width": 32,
            "frame_height": 32,
            "animations": {}
        }"#;

        let config: AnimationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.facing_rows, 1);
    }
}
