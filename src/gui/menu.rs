//! Reusable vertical menu component
//!
//! A titled list of items with one highlighted selection, drawn inside a
//! bordered box. The concrete screens (main menu, game over, level
//! complete) compose this and add their own chrome around it.

use crate::text::{draw_text_centered, text_height};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

#[derive(Debug, Clone)]
pub struct MenuStyle {
    pub width: u32,
    pub item_height: u32,
    pub background_color: Color,
    pub border_color: Color,
    pub title_color: Color,
    pub item_color: Color,
    pub selected_item_color: Color,
    pub highlight_color: Color,
}

impl Default for MenuStyle {
    fn default() -> Self {
        MenuStyle {
            width: 280,
            item_height: 40,
            background_color: Color::RGB(30, 30, 46),
            border_color: Color::RGB(100, 100, 120),
            title_color: Color::RGB(220, 220, 240),
            item_color: Color::RGB(160, 160, 170),
            selected_item_color: Color::RGB(255, 255, 255),
            highlight_color: Color::RGB(80, 100, 140),
        }
    }
}

pub struct Menu {
    title: String,
    items: Vec<String>,
    selected_index: usize,
    style: MenuStyle,
}

impl Menu {
    pub fn new(title: impl Into<String>, items: Vec<String>) -> Self {
        Menu {
            title: title.into(),
            items,
            selected_index: 0,
            style: MenuStyle::default(),
        }
    }

    pub fn with_style(mut self, style: MenuStyle) -> Self {
        self.style = style;
        self
    }

    pub fn navigate_up(&mut self) {
        if self.selected_index == 0 {
            self.selected_index = self.items.len().saturating_sub(1);
        } else {
            self.selected_index -= 1;
        }
    }

    pub fn navigate_down(&mut self) {
        if !self.items.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.items.len();
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Draws the menu box centered on (`center_x`, starting at `top_y`).
    pub fn render(&self, canvas: &mut Canvas<Window>, center_x: i32, top_y: i32) -> Result<(), String> {
        let style = &self.style;
        let title_band = 40;
        let height = title_band + self.items.len() as u32 * style.item_height + 16;
        let box_rect = Rect::new(
            center_x - style.width as i32 / 2,
            top_y,
            style.width,
            height,
        );

        canvas.set_draw_color(style.background_color);
        canvas.fill_rect(box_rect).map_err(|e| e.to_string())?;
        canvas.set_draw_color(style.border_color);
        canvas.draw_rect(box_rect).map_err(|e| e.to_string())?;

        draw_text_centered(canvas, &self.title, center_x, top_y + 12, style.title_color, 2)?;

        for (index, item) in self.items.iter().enumerate() {
            let item_y = top_y + title_band as i32 + index as i32 * style.item_height as i32;

            if index == self.selected_index {
                canvas.set_draw_color(style.highlight_color);
                canvas
                    .fill_rect(Rect::new(
                        box_rect.x() + 8,
                        item_y - 6,
                        style.width - 16,
                        style.item_height - 8,
                    ))
                    .map_err(|e| e.to_string())?;
            }

            let color = if index == self.selected_index {
                style.selected_item_color
            } else {
                style.item_color
            };
            let text_y = item_y + (style.item_height as i32 - 8 - text_height(2) as i32) / 2;
            draw_text_centered(canvas, item, center_x, text_y.max(item_y), color, 2)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_item_menu() -> Menu {
        Menu::new("TEST", vec!["A".into(), "B".into(), "C".into()])
    }

    #[test]
    fn test_navigation_wraps_both_ways() {
        let mut menu = three_item_menu();
        assert_eq!(menu.selected_index(), 0);

        menu.navigate_up();
        assert_eq!(menu.selected_index(), 2);

        menu.navigate_down();
        assert_eq!(menu.selected_index(), 0);
        menu.navigate_down();
        assert_eq!(menu.selected_index(), 1);
    }

    #[test]
    fn test_empty_menu_navigation_is_safe() {
        let mut menu = Menu::new("EMPTY", Vec::new());
        menu.navigate_up();
        menu.navigate_down();
        assert_eq!(menu.selected_index(), 0);
    }
}
