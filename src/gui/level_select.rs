//! Level select: a 10x10 grid of the 100 levels
//!
//! Arrow keys move the cursor, Return starts the level. Levels past the
//! player's unlocked progress are shown dimmed and refuse to start.

use crate::camera::VIEW_WIDTH;
use crate::level::MAX_LEVELS;
use crate::text::{draw_text_centered, text_height};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const COLUMNS: u32 = 10;
const ROWS: u32 = 10;
const CELL_SIZE: u32 = 35;
const CELL_SPACING: u32 = 40;
const GRID_TOP: i32 = 120;

pub struct LevelSelectGrid {
    cursor: u32,
    unlocked_level: u32,
}

impl LevelSelectGrid {
    pub fn new(unlocked_level: u32) -> Self {
        LevelSelectGrid {
            // Start the cursor on the furthest unlocked level
            cursor: unlocked_level.clamp(1, MAX_LEVELS) - 1,
            unlocked_level,
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor % COLUMNS > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor % COLUMNS < COLUMNS - 1 {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor >= COLUMNS {
            self.cursor -= COLUMNS;
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor + COLUMNS < COLUMNS * ROWS {
            self.cursor += COLUMNS;
        }
    }

    /// The level under the cursor, if it is unlocked.
    pub fn confirm(&self) -> Option<u32> {
        let level = self.cursor + 1;
        (level <= self.unlocked_level).then_some(level)
    }

    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        let center_x = VIEW_WIDTH as i32 / 2;

        canvas.set_draw_color(Color::RGB(26, 26, 46));
        canvas.clear();

        draw_text_centered(canvas, "SELECT LEVEL", center_x, 50, Color::RGB(255, 255, 255), 4)?;

        let grid_left = center_x - (COLUMNS * CELL_SPACING) as i32 / 2;

        for index in 0..COLUMNS * ROWS {
            let level = index + 1;
            let col = index % COLUMNS;
            let row = index / COLUMNS;
            let x = grid_left + (col * CELL_SPACING) as i32;
            let y = GRID_TOP + (row * CELL_SPACING) as i32;
            let cell = Rect::new(x, y, CELL_SIZE, CELL_SIZE);

            let unlocked = level <= self.unlocked_level;
            let fill = if index == self.cursor {
                Color::RGB(100, 149, 237)
            } else if unlocked {
                Color::RGB(65, 105, 225)
            } else {
                Color::RGB(45, 45, 60)
            };
            canvas.set_draw_color(fill);
            canvas.fill_rect(cell).map_err(|e| e.to_string())?;

            if index == self.cursor {
                canvas.set_draw_color(Color::RGB(255, 255, 255));
                canvas.draw_rect(cell).map_err(|e| e.to_string())?;
            }

            let text_color = if unlocked {
                Color::RGB(255, 255, 255)
            } else {
                Color::RGB(90, 90, 100)
            };
            let text_y = y + (CELL_SIZE as i32 - text_height(1) as i32) / 2;
            draw_text_centered(
                canvas,
                &level.to_string(),
                x + CELL_SIZE as i32 / 2,
                text_y,
                text_color,
                1,
            )?;
        }

        draw_text_centered(
            canvas,
            "RETURN - PLAY   ESC - BACK",
            center_x,
            GRID_TOP + (ROWS * CELL_SPACING) as i32 + 20,
            Color::RGB(204, 204, 204),
            1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_starts_on_furthest_unlocked() {
        let grid = LevelSelectGrid::new(7);
        assert_eq!(grid.confirm(), Some(7));
    }

    #[test]
    fn test_locked_levels_refuse_to_start() {
        let mut grid = LevelSelectGrid::new(5);
        grid.move_right(); // level 6, locked
        assert_eq!(grid.confirm(), None);
    }

    #[test]
    fn test_grid_navigation_stays_in_bounds() {
        let mut grid = LevelSelectGrid::new(1);
        // cursor at level 1 (top-left corner)
        grid.move_left();
        grid.move_up();
        assert_eq!(grid.confirm(), Some(1));

        for _ in 0..20 {
            grid.move_right();
            grid.move_down();
        }
        // Pinned to the bottom-right cell, level 100
        assert_eq!(grid.cursor, 99);
    }

    #[test]
    fn test_row_wrap_is_not_allowed() {
        let mut grid = LevelSelectGrid::new(100);
        // Put cursor on level 10 (end of first row)
        grid.cursor = 9;
        grid.move_right();
        assert_eq!(grid.cursor, 9);
    }
}
