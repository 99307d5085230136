//! In-game HUD: score, health, clock, level, status line and level progress
//!
//! Everything is screen-fixed and drawn with the bitmap font over small
//! black boxes so it stays readable on any theme background.

use crate::player::Player;
use crate::session::LevelSession;
use crate::text::{draw_text, text_height, text_width};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

const MARGIN: i32 = 16;
const LINE_SPACING: i32 = 34;
const TEXT_SCALE: u32 = 2;

const PROGRESS_BAR_WIDTH: u32 = 200;
const PROGRESS_BAR_HEIGHT: u32 = 8;

/// Draws the full gameplay HUD. `progress` is how far along the level the
/// player is, in `[0, 1]`.
pub fn draw_hud(
    canvas: &mut Canvas<Window>,
    session: &LevelSession,
    player: &Player,
    progress: f32,
    status: Option<&str>,
) -> Result<(), String> {
    let lines = [
        (format!("SCORE: {}", session.score()), Color::RGB(255, 255, 255)),
        (format!("HEALTH: {}", player.health), Color::RGB(255, 255, 255)),
        (
            format!("TIME: {}", session.time_remaining().ceil() as u32),
            Color::RGB(255, 255, 255),
        ),
        (format!("LEVEL: {}", session.level), Color::RGB(255, 255, 0)),
    ];

    let mut y = MARGIN;
    for (line, color) in &lines {
        draw_boxed_text(canvas, line, MARGIN, y, *color)?;
        y += LINE_SPACING;
    }

    if let Some(status) = status {
        draw_boxed_text(canvas, status, MARGIN, y, Color::RGB(0, 255, 0))?;
    }
    y += LINE_SPACING;

    draw_progress_bar(canvas, MARGIN, y, progress)?;

    Ok(())
}

/// A line of text over a padded black backing box.
fn draw_boxed_text(
    canvas: &mut Canvas<Window>,
    text: &str,
    x: i32,
    y: i32,
    color: Color,
) -> Result<(), String> {
    let padding = 4;
    let box_rect = Rect::new(
        x - padding,
        y - padding,
        text_width(text, TEXT_SCALE) + 2 * padding as u32,
        text_height(TEXT_SCALE) + 2 * padding as u32,
    );

    canvas.set_blend_mode(BlendMode::Blend);
    canvas.set_draw_color(Color::RGBA(0, 0, 0, 200));
    canvas.fill_rect(box_rect).map_err(|e| e.to_string())?;
    canvas.set_blend_mode(BlendMode::None);

    draw_text(canvas, text, x, y, color, TEXT_SCALE)
}

/// Distance-to-goal bar: gray track, green fill, white border.
fn draw_progress_bar(
    canvas: &mut Canvas<Window>,
    x: i32,
    y: i32,
    progress: f32,
) -> Result<(), String> {
    let progress = progress.clamp(0.0, 1.0);

    canvas.set_draw_color(Color::RGB(51, 51, 51));
    canvas
        .fill_rect(Rect::new(x, y, PROGRESS_BAR_WIDTH, PROGRESS_BAR_HEIGHT))
        .map_err(|e| e.to_string())?;

    let fill_width = (PROGRESS_BAR_WIDTH as f32 * progress) as u32;
    if fill_width > 0 {
        canvas.set_draw_color(Color::RGB(0, 255, 0));
        canvas
            .fill_rect(Rect::new(x, y, fill_width, PROGRESS_BAR_HEIGHT))
            .map_err(|e| e.to_string())?;
    }

    canvas.set_draw_color(Color::RGB(255, 255, 255));
    canvas
        .draw_rect(Rect::new(
            x - 1,
            y - 1,
            PROGRESS_BAR_WIDTH + 2,
            PROGRESS_BAR_HEIGHT + 2,
        ))
        .map_err(|e| e.to_string())
}
