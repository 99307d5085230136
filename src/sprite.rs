use crate::animation::Facing;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;
use std::time::{Duration, Instant};

/// One frame of a sprite-sheet animation: source rect plus display time.
#[derive(Debug, Clone)]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub duration: Duration,
}

impl Frame {
    pub fn new(x: i32, y: i32, width: u32, height: u32, duration_ms: u64) -> Self {
        Frame {
            x,
            y,
            width,
            height,
            duration: Duration::from_millis(duration_ms),
        }
    }
}

/// A strip of frames on a shared texture, stepped by wall-clock time.
///
/// Sheets are laid out with one row per facing: row 0 faces right, row 1
/// faces left. Single-row sheets (enemies, pickups) render with row 0 and a
/// horizontal flip when facing left.
pub struct SpriteSheet<'a> {
    texture: &'a Texture<'a>,
    frames: Vec<Frame>,
    current_frame: usize,
    last_frame_time: Instant,
    is_playing: bool,
    loop_animation: bool,
}

impl<'a> SpriteSheet<'a> {
    pub fn new(texture: &'a Texture<'a>, frames: Vec<Frame>) -> Self {
        SpriteSheet {
            texture,
            frames,
            current_frame: 0,
            last_frame_time: Instant::now(),
            is_playing: true,
            loop_animation: true,
        }
    }

    pub fn play(&mut self) {
        self.is_playing = true;
        self.last_frame_time = Instant::now();
    }

    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.last_frame_time = Instant::now();
    }

    pub fn set_loop(&mut self, should_loop: bool) {
        self.loop_animation = should_loop;
    }

    pub fn update(&mut self) {
        if !self.is_playing || self.frames.is_empty() {
            return;
        }

        if self.last_frame_time.elapsed() >= self.frames[self.current_frame].duration {
            self.advance_frame();
            self.last_frame_time = Instant::now();
        }
    }

    fn advance_frame(&mut self) {
        if self.current_frame + 1 < self.frames.len() {
            self.current_frame += 1;
        } else if self.loop_animation {
            self.current_frame = 0;
        } else {
            self.is_playing = false;
        }
    }

    /// Renders the current frame, selecting the sheet row for `facing`.
    ///
    /// `rows` is the number of facing rows the sheet actually has; sheets
    /// with a single row fall back to flipping the right-facing art.
    pub fn render_facing(
        &self,
        canvas: &mut Canvas<Window>,
        dest_rect: Rect,
        facing: Facing,
        rows: u32,
    ) -> Result<(), String> {
        if self.frames.is_empty() {
            return Err("No frames to render".to_string());
        }

        let base_frame = &self.frames[self.current_frame];
        let (row, flip) = if rows > 1 {
            (facing.to_row(), false)
        } else {
            (0, facing == Facing::Left)
        };

        let src_rect = Rect::new(
            base_frame.x,
            base_frame.y + row * base_frame.height as i32,
            base_frame.width,
            base_frame.height,
        );

        canvas
            .copy_ex(self.texture, Some(src_rect), Some(dest_rect), 0.0, None, flip, false)
            .map_err(|e| e.to_string())
    }

    pub fn is_finished(&self) -> bool {
        !self.loop_animation && !self.is_playing && self.current_frame == self.frames.len() - 1
    }
}
