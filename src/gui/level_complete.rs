//! Level complete summary screen

use super::menu::Menu;
use crate::camera::VIEW_WIDTH;
use crate::level::MAX_LEVELS;
use crate::session::LevelResult;
use crate::text::draw_text_centered;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelCompleteChoice {
    NextLevel,
    MainMenu,
}

pub struct LevelCompleteScreen {
    result: LevelResult,
    best_score: Option<u32>,
    menu: Menu,
    has_next_level: bool,
}

impl LevelCompleteScreen {
    pub fn new(result: LevelResult, best_score: Option<u32>) -> Self {
        let has_next_level = result.level < MAX_LEVELS;
        let items = if has_next_level {
            vec!["NEXT LEVEL".into(), "MAIN MENU".into()]
        } else {
            vec!["MAIN MENU".into()]
        };

        LevelCompleteScreen {
            result,
            best_score,
            menu: Menu::new("CONTINUE", items),
            has_next_level,
        }
    }

    pub fn navigate_up(&mut self) {
        self.menu.navigate_up();
    }

    pub fn navigate_down(&mut self) {
        self.menu.navigate_down();
    }

    pub fn confirm(&self) -> LevelCompleteChoice {
        if self.has_next_level && self.menu.selected_index() == 0 {
            LevelCompleteChoice::NextLevel
        } else {
            LevelCompleteChoice::MainMenu
        }
    }

    pub fn next_level(&self) -> u32 {
        (self.result.level + 1).min(MAX_LEVELS)
    }

    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        let center_x = VIEW_WIDTH as i32 / 2;

        canvas.set_draw_color(Color::RGB(10, 10, 18));
        canvas.clear();

        draw_text_centered(
            canvas,
            &format!("LEVEL {} COMPLETE!", self.result.level),
            center_x,
            120,
            Color::RGB(255, 255, 0),
            4,
        )?;

        draw_text_centered(
            canvas,
            &format!("SCORE: {}", self.result.score),
            center_x,
            190,
            Color::RGB(255, 255, 255),
            2,
        )?;
        draw_text_centered(
            canvas,
            &format!("TIME BONUS: {}", self.result.time_bonus),
            center_x,
            220,
            Color::RGB(0, 255, 0),
            2,
        )?;
        draw_text_centered(
            canvas,
            &format!("TOTAL SCORE: {}", self.result.total_score),
            center_x,
            250,
            Color::RGB(255, 255, 0),
            2,
        )?;

        if let Some(best) = self.best_score {
            draw_text_centered(
                canvas,
                &format!("BEST: {}", best),
                center_x,
                280,
                Color::RGB(160, 160, 170),
                2,
            )?;
        }

        if !self.has_next_level {
            draw_text_centered(
                canvas,
                "CONGRATULATIONS!",
                center_x,
                300,
                Color::RGB(255, 99, 71),
                3,
            )?;
            draw_text_centered(
                canvas,
                "YOU COMPLETED ALL 100 LEVELS!",
                center_x,
                335,
                Color::RGB(255, 255, 0),
                2,
            )?;
        }

        self.menu.render(canvas, center_x, 380)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_for(level: u32) -> LevelResult {
        LevelResult {
            level,
            score: 500,
            time_bonus: 120,
            total_score: 620,
        }
    }

    #[test]
    fn test_next_level_offered_before_the_end() {
        let screen = LevelCompleteScreen::new(result_for(42), Some(900));
        assert_eq!(screen.confirm(), LevelCompleteChoice::NextLevel);
        assert_eq!(screen.next_level(), 43);
    }

    #[test]
    fn test_final_level_only_offers_menu() {
        let screen = LevelCompleteScreen::new(result_for(100), None);
        assert_eq!(screen.confirm(), LevelCompleteChoice::MainMenu);
        assert_eq!(screen.next_level(), 100);
    }
}
