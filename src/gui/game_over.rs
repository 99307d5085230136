//! Game over screen

use super::menu::{Menu, MenuStyle};
use crate::camera::VIEW_WIDTH;
use crate::text::draw_text_centered;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverChoice {
    RetryLevel,
    MainMenu,
}

pub struct GameOverScreen {
    pub level: u32,
    pub final_score: u32,
    menu: Menu,
}

impl GameOverScreen {
    pub fn new(level: u32, final_score: u32) -> Self {
        GameOverScreen {
            level,
            final_score,
            menu: Menu::new("GAME OVER", vec!["RETRY LEVEL".into(), "MAIN MENU".into()])
                .with_style(MenuStyle {
                    highlight_color: Color::RGB(139, 0, 0),
                    border_color: Color::RGB(140, 60, 60),
                    ..Default::default()
                }),
        }
    }

    pub fn navigate_up(&mut self) {
        self.menu.navigate_up();
    }

    pub fn navigate_down(&mut self) {
        self.menu.navigate_down();
    }

    pub fn confirm(&self) -> GameOverChoice {
        match self.menu.selected_index() {
            0 => GameOverChoice::RetryLevel,
            _ => GameOverChoice::MainMenu,
        }
    }

    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        let center_x = VIEW_WIDTH as i32 / 2;

        canvas.set_draw_color(Color::RGB(20, 8, 8));
        canvas.clear();

        draw_text_centered(canvas, "GAME OVER!", center_x, 150, Color::RGB(255, 0, 0), 5)?;
        draw_text_centered(
            canvas,
            &format!("LEVEL {}", self.level),
            center_x,
            220,
            Color::RGB(255, 255, 255),
            2,
        )?;
        draw_text_centered(
            canvas,
            &format!("FINAL SCORE: {}", self.final_score),
            center_x,
            250,
            Color::RGB(255, 255, 255),
            2,
        )?;

        self.menu.render(canvas, center_x, 310)
    }
}
