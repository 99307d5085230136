use sdl2::event::Event;
use sdl2::image::LoadTexture;
use sdl2::keyboard::Keycode;

mod animation;
mod camera;
mod collision;
mod combat;
mod difficulty;
mod enemy;
mod gui;
mod level;
mod physics;
mod player;
mod powerup;
mod progress;
mod session;
mod sprite;
mod text;
mod ui;
mod world;

use animation::AnimationConfig;
use camera::{VIEW_HEIGHT, VIEW_WIDTH};
use gui::{
    GameOverChoice, GameOverScreen, LevelCompleteChoice, LevelCompleteScreen, LevelSelectGrid,
    MainMenu, MainMenuChoice,
};
use progress::{Profile, ProgressStore};
use rand::rngs::ThreadRng;
use world::{Assets, GameWorld, PlayOutcome};

/// Fixed timestep matching the frame cap.
const DELTA_TIME: f32 = 1.0 / 60.0;

/// Which screen owns input and rendering this frame.
enum Scene<'a> {
    MainMenu(MainMenu),
    LevelSelect(LevelSelectGrid),
    Playing(Box<GameWorld<'a>>),
    LevelComplete(LevelCompleteScreen),
    GameOver(GameOverScreen),
}

/// Generic texture loading helper with consistent error messages.
fn load_texture<'a>(
    texture_creator: &'a sdl2::render::TextureCreator<sdl2::video::WindowContext>,
    path: &str,
) -> Result<sdl2::render::Texture<'a>, String> {
    texture_creator
        .load_texture(path)
        .map_err(|e| format!("Failed to load {}: {}", path, e))
}

/// Calculate the best integer window scale for the current monitor.
fn calculate_window_scale(video_subsystem: &sdl2::VideoSubsystem) -> u32 {
    match video_subsystem.desktop_display_mode(0) {
        Ok(display_mode) => {
            // Leave 10% margin for taskbars/decorations
            let usable_w = (display_mode.w as f32 * 0.9) as i32;
            let usable_h = (display_mode.h as f32 * 0.9) as i32;

            let max_scale_w = usable_w / VIEW_WIDTH as i32;
            let max_scale_h = usable_h / VIEW_HEIGHT as i32;

            max_scale_w.min(max_scale_h).clamp(1, 2) as u32
        }
        Err(_) => {
            println!("Warning: Could not detect monitor size, using 1x scale");
            1
        }
    }
}

/// Builds a level run, falling back to the main menu when setup fails
/// (missing config state, broken sheet) instead of tearing the game down.
fn start_level<'a>(
    level: u32,
    assets: &Assets<'a>,
    rng: &mut ThreadRng,
    profile: &Profile,
) -> Scene<'a> {
    match GameWorld::build(level, assets, rng) {
        Ok(game_world) => Scene::Playing(Box::new(game_world)),
        Err(e) => {
            eprintln!("Error setting up level {}: {}", level, e);
            Scene::MainMenu(MainMenu::new(profile.unlocked_level))
        }
    }
}

fn main() -> Result<(), String> {
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;

    let window_scale = calculate_window_scale(&video_subsystem);
    println!(
        "Monitor scale: {}x (window: {}x{})",
        window_scale,
        VIEW_WIDTH * window_scale,
        VIEW_HEIGHT * window_scale
    );

    let window = video_subsystem
        .window(
            "Skyreach - 100 Level Platformer",
            VIEW_WIDTH * window_scale,
            VIEW_HEIGHT * window_scale,
        )
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    canvas
        .set_logical_size(VIEW_WIDTH, VIEW_HEIGHT)
        .map_err(|e| e.to_string())?;

    let texture_creator = canvas.texture_creator();
    let mut event_pump = sdl_context.event_pump()?;

    // Animation configs
    let player_config = AnimationConfig::load_from_file("assets/config/player_animations.json")
        .map_err(|e| format!("Failed to load player animation config: {}", e))?;
    let bat_config = AnimationConfig::load_from_file("assets/config/bat_animations.json")
        .map_err(|e| format!("Failed to load bat animation config: {}", e))?;
    let golem_config = AnimationConfig::load_from_file("assets/config/golem_animations.json")
        .map_err(|e| format!("Failed to load golem animation config: {}", e))?;
    let power_up_config = AnimationConfig::load_from_file("assets/config/power_up_animations.json")
        .map_err(|e| format!("Failed to load power-up animation config: {}", e))?;

    // Sprite textures
    let player_texture = load_texture(&texture_creator, "assets/sprites/player.png")?;
    let bat_texture = load_texture(&texture_creator, "assets/sprites/bat.png")?;
    let golem_texture = load_texture(&texture_creator, "assets/sprites/golem.png")?;
    let power_up_texture = load_texture(&texture_creator, "assets/sprites/power_ups.png")?;

    let assets = Assets {
        player_config,
        bat_config,
        golem_config,
        power_up_config,
        player_texture: &player_texture,
        bat_texture: &bat_texture,
        golem_texture: &golem_texture,
        power_up_texture: &power_up_texture,
    };

    // Progression: a broken store degrades to an unsaved session
    let store = match ProgressStore::new(ProgressStore::default_directory()) {
        Ok(store) => Some(store),
        Err(e) => {
            eprintln!("Progress disabled: {}", e);
            None
        }
    };
    let mut profile = match store.as_ref().map(|s| s.load()) {
        Some(Ok(profile)) => profile,
        Some(Err(e)) => {
            eprintln!("Could not read progress ({}), starting fresh", e);
            Profile::new()
        }
        None => Profile::new(),
    };
    println!(
        "Progress: level {} unlocked, {} best scores",
        profile.unlocked_level,
        profile.best_scores.len()
    );

    let mut rng = rand::thread_rng();
    let mut scene = Scene::MainMenu(MainMenu::new(profile.unlocked_level));

    println!("Controls:");
    println!("ARROW KEYS - Move");
    println!("SPACE / UP - Jump (press again midair to double jump)");
    println!("A - Attack");
    println!("ESC - Leave level / back");

    'running: loop {
        let mut next_scene: Option<Scene> = None;

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => match &mut scene {
                    Scene::MainMenu(menu) => match key {
                        Keycode::Up => menu.navigate_up(),
                        Keycode::Down => menu.navigate_down(),
                        Keycode::Return | Keycode::Space => match menu.confirm() {
                            MainMenuChoice::Play => {
                                next_scene = Some(start_level(
                                    profile.unlocked_level,
                                    &assets,
                                    &mut rng,
                                    &profile,
                                ));
                            }
                            MainMenuChoice::LevelSelect => {
                                next_scene = Some(Scene::LevelSelect(LevelSelectGrid::new(
                                    profile.unlocked_level,
                                )));
                            }
                            MainMenuChoice::Quit => break 'running,
                        },
                        _ => {}
                    },
                    Scene::LevelSelect(grid) => match key {
                        Keycode::Left => grid.move_left(),
                        Keycode::Right => grid.move_right(),
                        Keycode::Up => grid.move_up(),
                        Keycode::Down => grid.move_down(),
                        Keycode::Return => {
                            if let Some(level) = grid.confirm() {
                                next_scene =
                                    Some(start_level(level, &assets, &mut rng, &profile));
                            }
                        }
                        Keycode::Escape => {
                            next_scene =
                                Some(Scene::MainMenu(MainMenu::new(profile.unlocked_level)));
                        }
                        _ => {}
                    },
                    Scene::Playing(game_world) => match key {
                        Keycode::Space | Keycode::Up => game_world.handle_jump_pressed(),
                        Keycode::A => game_world.handle_attack_pressed(),
                        Keycode::Escape => {
                            println!("Level abandoned");
                            next_scene =
                                Some(Scene::MainMenu(MainMenu::new(profile.unlocked_level)));
                        }
                        _ => {}
                    },
                    Scene::LevelComplete(screen) => match key {
                        Keycode::Up => screen.navigate_up(),
                        Keycode::Down => screen.navigate_down(),
                        Keycode::Return | Keycode::Space => match screen.confirm() {
                            LevelCompleteChoice::NextLevel => {
                                next_scene = Some(start_level(
                                    screen.next_level(),
                                    &assets,
                                    &mut rng,
                                    &profile,
                                ));
                            }
                            LevelCompleteChoice::MainMenu => {
                                next_scene = Some(Scene::MainMenu(MainMenu::new(
                                    profile.unlocked_level,
                                )));
                            }
                        },
                        _ => {}
                    },
                    Scene::GameOver(screen) => match key {
                        Keycode::Up => screen.navigate_up(),
                        Keycode::Down => screen.navigate_down(),
                        Keycode::Return | Keycode::Space => match screen.confirm() {
                            GameOverChoice::RetryLevel => {
                                next_scene = Some(start_level(
                                    screen.level,
                                    &assets,
                                    &mut rng,
                                    &profile,
                                ));
                            }
                            GameOverChoice::MainMenu => {
                                next_scene = Some(Scene::MainMenu(MainMenu::new(
                                    profile.unlocked_level,
                                )));
                            }
                        },
                        _ => {}
                    },
                },
                _ => {}
            }
        }

        if let Some(new_scene) = next_scene.take() {
            scene = new_scene;
        }

        // Simulation step (only the play scene simulates)
        let mut run_ended: Option<(PlayOutcome, u32)> = None;
        if let Scene::Playing(game_world) = &mut scene {
            let keyboard_state = event_pump.keyboard_state();
            if let Some(outcome) = game_world.update(&keyboard_state, DELTA_TIME, &mut rng) {
                run_ended = Some((outcome, game_world.session.level));
            }
        }

        match run_ended {
            Some((PlayOutcome::Completed(result), _)) => {
                println!(
                    "Level {} complete: {} points ({} time bonus)",
                    result.level, result.total_score, result.time_bonus
                );
                if profile.record_completion(result.level, result.total_score, level::MAX_LEVELS) {
                    if let Some(store) = &store {
                        if let Err(e) = store.save(&profile) {
                            eprintln!("Failed to save progress: {}", e);
                        }
                    }
                }
                let best_score = profile.best_score(result.level);
                scene = Scene::LevelComplete(LevelCompleteScreen::new(result, best_score));
            }
            Some((PlayOutcome::GameOver { final_score }, level)) => {
                println!("Game over on level {} with {} points", level, final_score);
                scene = Scene::GameOver(GameOverScreen::new(level, final_score));
            }
            _ => {}
        }

        match &scene {
            Scene::MainMenu(menu) => menu.render(&mut canvas)?,
            Scene::LevelSelect(grid) => grid.render(&mut canvas)?,
            Scene::Playing(game_world) => game_world.render(&mut canvas)?,
            Scene::LevelComplete(screen) => screen.render(&mut canvas)?,
            Scene::GameOver(screen) => screen.render(&mut canvas)?,
        }

        canvas.present();

        // Cap framerate to ~60 FPS
        std::thread::sleep(std::time::Duration::new(0, 1_000_000_000u32 / 60));
    }

    Ok(())
}
