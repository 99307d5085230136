//! Screen-space menu screens
//!
//! All menus are keyboard-driven: Up/Down (or the grid arrows) to move,
//! Return or Space to confirm. Each screen owns its selection state and
//! renders itself; the main loop translates confirmations into scene
//! transitions.

mod game_over;
mod level_complete;
mod level_select;
mod main_menu;
mod menu;

pub use game_over::{GameOverChoice, GameOverScreen};
pub use level_complete::{LevelCompleteChoice, LevelCompleteScreen};
pub use level_select::LevelSelectGrid;
pub use main_menu::{MainMenu, MainMenuChoice};
pub use menu::{Menu, MenuStyle};
