//! World-bound HUD components (drawn over the playfield, fixed to the screen)

mod hud;

pub use hud::draw_hud;
