//! Side-scrolling follow camera
//!
//! Tracks a target x position with exponential smoothing and clamps the
//! view to the world strip. Only horizontal scrolling: the world is exactly
//! one screen tall.

use crate::level::WORLD_WIDTH;

/// On-screen view size in logical pixels. The window scales this up to the
/// monitor; the world strip is exactly one view tall.
pub const VIEW_WIDTH: u32 = 800;
pub const VIEW_HEIGHT: u32 = 600;

pub struct Camera {
    /// World x of the view's left edge
    pub x: f32,
    view_width: u32,
    follow_strength: f32,
}

impl Camera {
    pub fn new(view_width: u32) -> Self {
        Camera {
            x: 0.0,
            view_width,
            follow_strength: 0.5,
        }
    }

    /// Moves the camera a fraction of the way toward centering the target.
    pub fn follow(&mut self, target_x: f32) {
        let desired = target_x - self.view_width as f32 / 2.0;
        self.x += (desired - self.x) * self.follow_strength;
        self.clamp();
    }

    /// Snaps directly onto the target (level start, respawn).
    pub fn snap_to(&mut self, target_x: f32) {
        self.x = target_x - self.view_width as f32 / 2.0;
        self.clamp();
    }

    fn clamp(&mut self) {
        let max_x = (WORLD_WIDTH - self.view_width) as f32;
        self.x = self.x.clamp(0.0, max_x);
    }

    /// Converts a world x to screen x.
    pub fn to_screen_x(&self, world_x: i32) -> i32 {
        world_x - self.x.round() as i32
    }
}
