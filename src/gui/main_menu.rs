//! Title screen

use super::menu::Menu;
use crate::camera::VIEW_WIDTH;
use crate::text::draw_text_centered;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuChoice {
    Play,
    LevelSelect,
    Quit,
}

pub struct MainMenu {
    menu: Menu,
    current_level: u32,
}

impl MainMenu {
    pub fn new(current_level: u32) -> Self {
        MainMenu {
            menu: Menu::new(
                "MAIN MENU",
                vec!["PLAY".into(), "SELECT LEVEL".into(), "QUIT".into()],
            ),
            current_level,
        }
    }

    pub fn navigate_up(&mut self) {
        self.menu.navigate_up();
    }

    pub fn navigate_down(&mut self) {
        self.menu.navigate_down();
    }

    pub fn confirm(&self) -> MainMenuChoice {
        match self.menu.selected_index() {
            0 => MainMenuChoice::Play,
            1 => MainMenuChoice::LevelSelect,
            _ => MainMenuChoice::Quit,
        }
    }

    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        let center_x = VIEW_WIDTH as i32 / 2;

        canvas.set_draw_color(Color::RGB(26, 26, 46));
        canvas.clear();

        draw_text_centered(canvas, "SKYREACH", center_x, 90, Color::RGB(255, 255, 255), 6)?;
        draw_text_centered(
            canvas,
            "100 LEVELS OF ADVENTURE!",
            center_x,
            160,
            Color::RGB(255, 255, 0),
            2,
        )?;
        draw_text_centered(
            canvas,
            &format!("CURRENT LEVEL: {}", self.current_level),
            center_x,
            195,
            Color::RGB(0, 255, 0),
            2,
        )?;

        self.menu.render(canvas, center_x, 240)?;

        draw_text_centered(canvas, "CONTROLS:", center_x, 450, Color::RGB(255, 255, 255), 2)?;
        draw_text_centered(
            canvas,
            "ARROWS - MOVE   SPACE - JUMP   A - ATTACK",
            center_x,
            480,
            Color::RGB(204, 204, 204),
            1,
        )?;
        draw_text_centered(
            canvas,
            "DEFEAT ENEMIES. GRAB POWER-UPS. REACH THE GOLDEN GOAL!",
            center_x,
            520,
            Color::RGB(255, 255, 0),
            1,
        )?;

        // Thin frame line to keep the screen from feeling bare
        canvas.set_draw_color(Color::RGB(60, 60, 90));
        canvas
            .draw_rect(Rect::new(8, 8, VIEW_WIDTH - 16, crate::camera::VIEW_HEIGHT - 16))
            .map_err(|e| e.to_string())
    }
}
