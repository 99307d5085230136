//! Level geometry and spawn placement
//!
//! A level is a flat strip of ground slabs, a dozen elevated platforms laid
//! out by closed-form formulas of the level number, a goal marker near the
//! end, and jittered spawn points for enemies and power-ups. Platform
//! placement is deterministic; only spawn jitter and power-up types roll
//! the RNG.

use crate::difficulty::{DifficultySettings, LevelTheme};
use crate::powerup::PowerUpKind;
use rand::Rng;
use sdl2::rect::Rect;

/// The campaign length.
pub const MAX_LEVELS: u32 = 100;

/// World dimensions in pixels. The camera view is a window onto this strip.
pub const WORLD_WIDTH: u32 = 3000;
pub const WORLD_HEIGHT: u32 = 600;

/// Top of the ground strip.
pub const GROUND_TOP: i32 = 534;

/// X position of the goal; doubles as the level length for progress display.
pub const LEVEL_LENGTH: f32 = 1850.0;

/// Bodies falling past this line are out of the world.
pub const KILL_PLANE_Y: f32 = (WORLD_HEIGHT + 100) as f32;

/// Where the player starts (and respawns after falling out).
pub const PLAYER_SPAWN: (f32, f32) = (100.0, 400.0);

const GROUND_SLABS: i32 = 25;
const GROUND_SLAB_WIDTH: u32 = 80;
const GROUND_SLAB_HEIGHT: u32 = 32;
const ELEVATED_COUNT: i32 = 12;
const PLATFORM_HEIGHT: u32 = 20;

/// Everything static about one generated level.
pub struct Level {
    pub number: u32,
    pub theme: LevelTheme,
    pub platforms: Vec<Rect>,
    pub goal: Rect,
    pub bat_spawns: Vec<(f32, f32)>,
    pub golem_spawns: Vec<(f32, f32)>,
    pub power_up_spawns: Vec<(f32, f32, PowerUpKind)>,
}

impl Level {
    pub fn generate(number: u32, difficulty: &DifficultySettings, rng: &mut impl Rng) -> Self {
        let mut platforms = ground_platforms();
        platforms.extend(elevated_platforms(number, difficulty.platform_gap));

        let bat_spawns = (0..difficulty.bat_count())
            .map(|i| {
                (
                    300.0 + i as f32 * 250.0 + rng.gen_range(0.0..100.0),
                    150.0 + rng.gen_range(0.0..200.0),
                )
            })
            .collect();

        // Golems drop onto the ground from just above it
        let golem_spawns = (0..difficulty.golem_count())
            .map(|i| {
                (
                    400.0 + i as f32 * 300.0 + rng.gen_range(0.0..50.0),
                    GROUND_TOP as f32 - 48.0,
                )
            })
            .collect();

        let power_up_spawns = (0..difficulty.power_up_count)
            .map(|i| {
                let kind = if rng.gen_bool(0.5) {
                    PowerUpKind::Speed
                } else {
                    PowerUpKind::Shield
                };
                (
                    350.0 + i as f32 * 400.0 + rng.gen_range(0.0..100.0),
                    200.0 + rng.gen_range(0.0..150.0),
                    kind,
                )
            })
            .collect();

        Level {
            number,
            theme: LevelTheme::for_level(number),
            platforms,
            goal: Rect::new(LEVEL_LENGTH as i32 - 30, 390, 60, 120),
            bat_spawns,
            golem_spawns,
            power_up_spawns,
        }
    }

    /// How far along the level a given x position is, in `[0, 1]`.
    pub fn progress(&self, x: f32) -> f32 {
        (x / LEVEL_LENGTH).clamp(0.0, 1.0)
    }
}

/// The continuous ground strip under the first 2000 px of the level.
pub fn ground_platforms() -> Vec<Rect> {
    (0..GROUND_SLABS)
        .map(|i| {
            Rect::new(
                i * GROUND_SLAB_WIDTH as i32,
                GROUND_TOP,
                GROUND_SLAB_WIDTH,
                GROUND_SLAB_HEIGHT,
            )
        })
        .collect()
}

/// The elevated platforms for a level.
///
/// Spacing widens with the difficulty gap. Heights alternate on a two-step
/// pattern early on and switch to a taller three-step pattern with a
/// sinusoidal wobble above level 10. Above level 20 platforms narrow with
/// the level (down to 60 px), and above level 30 every 4th platform is
/// dropped entirely.
pub fn elevated_platforms(level: u32, platform_gap: f32) -> Vec<Rect> {
    let base_y = 450.0_f32;
    let spacing = 150.0 + platform_gap;
    let mut platforms = Vec::new();

    for i in 1..=ELEVATED_COUNT {
        if level > 30 && i % 4 == 0 {
            continue;
        }

        let x = i as f32 * spacing;
        let y = if level > 10 {
            base_y - (i % 3) as f32 * 50.0 - (i as f32).sin() * 30.0
        } else {
            base_y - (i % 2) as f32 * 60.0
        };

        let width = if level > 20 {
            (120.0 - level as f32).max(60.0) as u32
        } else {
            100
        };

        platforms.push(Rect::new(
            (x - width as f32 / 2.0) as i32,
            (y - PLATFORM_HEIGHT as f32 / 2.0) as i32,
            width,
            PLATFORM_HEIGHT,
        ));
    }

    platforms
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ground_covers_start_of_level() {
        let ground = ground_platforms();

        assert_eq!(ground.len(), 25);
        assert_eq!(ground[0].x(), 0);
        // Slabs tile without gaps
        for pair in ground.windows(2) {
            assert_eq!(pair[0].right(), pair[1].x());
        }
    }

    #[test]
    fn test_early_levels_have_twelve_platforms() {
        for level in [1, 10, 20, 30] {
            let gap = DifficultySettings::for_level(level).platform_gap;
            assert_eq!(elevated_platforms(level, gap).len(), 12);
        }
    }

    #[test]
    fn test_late_levels_skip_every_fourth_platform() {
        let gap = DifficultySettings::for_level(31).platform_gap;
        let platforms = elevated_platforms(31, gap);

        // i = 4, 8, 12 are dropped
        assert_eq!(platforms.len(), 9);
    }

    #[test]
    fn test_spacing_widens_with_gap() {
        let tight = elevated_platforms(1, 0.0);
        let wide = elevated_platforms(1, 50.0);

        let tight_span = tight[1].x() - tight[0].x();
        let wide_span = wide[1].x() - wide[0].x();
        assert!(wide_span > tight_span);
    }

    #[test]
    fn test_platforms_narrow_at_high_levels() {
        let gap = 50.0;
        let normal = elevated_platforms(20, gap);
        let narrow = elevated_platforms(50, gap);

        assert_eq!(normal[0].width(), 100);
        assert_eq!(narrow[0].width(), 70);
        // Width floor holds even past level 60
        let floor = elevated_platforms(90, gap);
        assert_eq!(floor[0].width(), 60);
    }

    #[test]
    fn test_generate_matches_difficulty_counts() {
        let difficulty = DifficultySettings::for_level(40);
        let mut rng = StdRng::seed_from_u64(7);
        let level = Level::generate(40, &difficulty, &mut rng);

        assert_eq!(level.bat_spawns.len() as u32, difficulty.bat_count());
        assert_eq!(level.golem_spawns.len() as u32, difficulty.golem_count());
        assert_eq!(level.power_up_spawns.len() as u32, difficulty.power_up_count);
        assert_eq!(level.theme, LevelTheme::for_level(40));
    }

    #[test]
    fn test_spawns_are_inside_the_world() {
        for seed in 0..5 {
            let difficulty = DifficultySettings::for_level(100);
            let mut rng = StdRng::seed_from_u64(seed);
            let level = Level::generate(100, &difficulty, &mut rng);

            for &(x, y) in level.bat_spawns.iter().chain(&level.golem_spawns) {
                assert!(x >= 0.0 && x < WORLD_WIDTH as f32);
                assert!(y >= 0.0 && y < WORLD_HEIGHT as f32);
            }
        }
    }

    #[test]
    fn test_progress_clamps() {
        let difficulty = DifficultySettings::for_level(1);
        let mut rng = StdRng::seed_from_u64(0);
        let level = Level::generate(1, &difficulty, &mut rng);

        assert_eq!(level.progress(-50.0), 0.0);
        assert_eq!(level.progress(LEVEL_LENGTH / 2.0), 0.5);
        assert_eq!(level.progress(2600.0), 1.0);
    }
}
