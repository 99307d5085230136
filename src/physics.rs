//! Arcade physics for gravity-bound bodies
//!
//! A `Body` is a rectangle with velocity. Each frame it integrates gravity,
//! moves, and gets pushed back out of any platform it clipped into, using
//! the minimum-overlap axis. Landing on a platform top sets the grounded
//! flag; bumping a platform bottom kills upward velocity.
//!
//! Frame speeds stay well below the platform thickness (max fall speed is
//! ~13 px at 60 FPS against 20 px slabs), so overlap resolution is enough
//! and no swept test is needed.

use crate::collision::{aabb_intersect, calculate_overlap};
use sdl2::rect::Rect;

/// Downward acceleration in px/s^2.
pub const GRAVITY: f32 = 800.0;

/// A dynamic rectangle with velocity, in world pixels.
///
/// Positions are `f32` so sub-pixel motion accumulates across frames;
/// collision and rendering round to whole pixels.
#[derive(Debug, Clone)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub width: u32,
    pub height: u32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub on_ground: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, width: u32, height: u32) -> Self {
        Body {
            x,
            y,
            width,
            height,
            velocity_x: 0.0,
            velocity_y: 0.0,
            on_ground: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x.round() as i32, self.y.round() as i32, self.width, self.height)
    }

    /// Advances the body by one frame: gravity, integration, then platform
    /// resolution. `on_ground` reflects whether this step ended standing on
    /// a platform top.
    pub fn step(&mut self, delta_time: f32, platforms: &[Rect]) {
        self.velocity_y += GRAVITY * delta_time;
        self.x += self.velocity_x * delta_time;
        self.y += self.velocity_y * delta_time;

        self.on_ground = false;
        self.resolve_against(platforms);
    }

    /// Pushes the body out of any platform it overlaps.
    fn resolve_against(&mut self, platforms: &[Rect]) {
        for platform in platforms {
            let bounds = self.bounds();
            if !aabb_intersect(&bounds, platform) {
                continue;
            }

            let (overlap_x, overlap_y) = calculate_overlap(&bounds, platform);

            if overlap_y.abs() <= overlap_x.abs() {
                self.y -= overlap_y as f32;
                if overlap_y > 0 {
                    // Body was above the platform: it landed
                    self.on_ground = true;
                    if self.velocity_y > 0.0 {
                        self.velocity_y = 0.0;
                    }
                } else if self.velocity_y < 0.0 {
                    // Head bump from below
                    self.velocity_y = 0.0;
                }
            } else {
                self.x -= overlap_x as f32;
                self.velocity_x = 0.0;
            }
        }
    }

    /// Clamps horizontal position to `[0, world_width - body width]`.
    pub fn clamp_to_world(&mut self, world_width: u32) {
        let max_x = (world_width - self.width) as f32;
        if self.x < 0.0 {
            self.x = 0.0;
            self.velocity_x = self.velocity_x.max(0.0);
        } else if self.x > max_x {
            self.x = max_x;
            self.velocity_x = self.velocity_x.min(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_gravity_accelerates_fall() {
        let mut body = Body::new(0.0, 0.0, 32, 32);

        body.step(DT, &[]);
        let first_fall = body.velocity_y;
        body.step(DT, &[]);

        assert!(first_fall > 0.0);
        assert!(body.velocity_y > first_fall);
        assert!(body.y > 0.0);
    }

    #[test]
    fn test_body_lands_on_platform() {
        let platform = Rect::new(0, 100, 200, 20);
        let mut body = Body::new(50.0, 60.0, 32, 32);

        // Fall until grounded; a second of frames is far more than enough
        for _ in 0..60 {
            body.step(DT, &[platform]);
            if body.on_ground {
                break;
            }
        }

        assert!(body.on_ground);
        assert_eq!(body.velocity_y, 0.0);
        // Resting exactly on the platform top
        assert_eq!(body.bounds().bottom(), 100);
    }

    #[test]
    fn test_head_bump_stops_ascent() {
        let ceiling = Rect::new(0, 0, 200, 20);
        let mut body = Body::new(50.0, 22.0, 32, 32);
        body.velocity_y = -400.0;

        body.step(DT, &[ceiling]);

        assert_eq!(body.velocity_y, 0.0);
        assert!(body.bounds().top() >= 20);
        assert!(!body.on_ground);
    }

    #[test]
    fn test_side_collision_pushes_out() {
        let wall = Rect::new(100, 0, 20, 300);
        // Standing next to the wall, moving right into it
        let mut body = Body::new(65.0, 100.0, 32, 32);
        body.velocity_x = 300.0;

        body.step(DT, &[wall]);

        assert!(body.bounds().right() <= 100);
        assert_eq!(body.velocity_x, 0.0);
    }

    #[test]
    fn test_clamp_to_world() {
        let mut body = Body::new(-5.0, 0.0, 32, 32);
        body.velocity_x = -100.0;
        body.clamp_to_world(3000);
        assert_eq!(body.x, 0.0);
        assert_eq!(body.velocity_x, 0.0);

        body.x = 2990.0;
        body.velocity_x = 100.0;
        body.clamp_to_world(3000);
        assert_eq!(body.x, 2968.0);
        assert_eq!(body.velocity_x, 0.0);
    }
}
