//! Per-level difficulty scaling
//!
//! Everything here is a pure function of the level number, computed once
//! when a level starts. Formulas are linear with floor division and hard
//! caps, so each knob ramps for a few dozen levels and then plateaus.

use sdl2::pixels::Color;

/// The tuning knobs derived from a level number.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultySettings {
    /// Total enemies in the level (bats + golems)
    pub enemy_count: u32,
    /// Base enemy speed in px/s
    pub enemy_speed: f32,
    /// Extra horizontal spacing between elevated platforms, in px
    pub platform_gap: f32,
    /// Power-ups placed in the level
    pub power_up_count: u32,
    /// Hit points for ground enemies (bats always have 1)
    pub enemy_health: i32,
}

impl DifficultySettings {
    pub fn for_level(level: u32) -> Self {
        DifficultySettings {
            enemy_count: (3 + level / 5).min(15),
            enemy_speed: (50.0 + level as f32 * 2.0).min(150.0),
            platform_gap: (level as f32 * 2.0).min(50.0),
            power_up_count: 3u32.saturating_sub(level / 10).max(1),
            enemy_health: ((1 + level / 10) as i32).min(3),
        }
    }

    /// Bats get half the roster, capped at 8; golems take the rest.
    pub fn bat_count(&self) -> u32 {
        (self.enemy_count / 2).min(8)
    }

    pub fn golem_count(&self) -> u32 {
        self.enemy_count - self.bat_count()
    }
}

/// Seconds allowed to finish the given level. Shrinks by half a second per
/// level, never below 30.
pub fn time_limit_for_level(level: u32) -> f32 {
    (90.0 - level as f32 * 0.5).max(30.0)
}

/// Background/platform palette, one theme per block of 10 levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTheme {
    pub name: &'static str,
    pub background: Color,
    pub platform: Color,
}

impl LevelTheme {
    /// Levels 1-10 use the first theme, 11-20 the second, and so on;
    /// anything past the table clamps to the last entry.
    pub fn for_level(level: u32) -> Self {
        let (name, background, platform) = match (level.max(1) - 1) / 10 {
            0 => ("Sky", (0x87, 0xce, 0xeb), (0x22, 0x8b, 0x22)),
            1 => ("Desert", (0xf4, 0xa4, 0x60), (0xd2, 0x69, 0x1e)),
            2 => ("Ocean", (0x00, 0x69, 0x94), (0x46, 0x82, 0xb4)),
            3 => ("Forest", (0x22, 0x8b, 0x22), (0x8b, 0x45, 0x13)),
            4 => ("Cave", (0x2f, 0x4f, 0x4f), (0x69, 0x69, 0x69)),
            5 => ("Volcano", (0x8b, 0x00, 0x00), (0x00, 0x00, 0x00)),
            6 => ("Ice", (0xe0, 0xff, 0xff), (0x41, 0x69, 0xe1)),
            7 => ("Space", (0x19, 0x19, 0x70), (0x48, 0x3d, 0x8b)),
            8 => ("Hell", (0x66, 0x00, 0x00), (0x8b, 0x00, 0x00)),
            _ => ("Heaven", (0xf0, 0xf8, 0xff), (0xff, 0xd7, 0x00)),
        };

        LevelTheme {
            name,
            background: Color::RGB(background.0, background.1, background.2),
            platform: Color::RGB(platform.0, platform.1, platform.2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one_baseline() {
        let difficulty = DifficultySettings::for_level(1);

        assert_eq!(difficulty.enemy_count, 3);
        assert_eq!(difficulty.enemy_speed, 52.0);
        assert_eq!(difficulty.platform_gap, 2.0);
        assert_eq!(difficulty.power_up_count, 3);
        assert_eq!(difficulty.enemy_health, 1);
    }

    #[test]
    fn test_scaling_is_monotonic() {
        let mut previous = DifficultySettings::for_level(1);

        for level in 2..=100 {
            let current = DifficultySettings::for_level(level);

            assert!(current.enemy_count >= previous.enemy_count);
            assert!(current.enemy_speed >= previous.enemy_speed);
            assert!(current.platform_gap >= previous.platform_gap);
            assert!(current.power_up_count <= previous.power_up_count);
            assert!(current.enemy_health >= previous.enemy_health);

            previous = current;
        }
    }

    #[test]
    fn test_caps_hold_at_high_levels() {
        let difficulty = DifficultySettings::for_level(100);

        assert_eq!(difficulty.enemy_count, 15);
        assert_eq!(difficulty.enemy_speed, 150.0);
        assert_eq!(difficulty.platform_gap, 50.0);
        assert_eq!(difficulty.power_up_count, 1);
        assert_eq!(difficulty.enemy_health, 3);
    }

    #[test]
    fn test_power_up_count_never_below_one() {
        for level in 1..=100 {
            assert!(DifficultySettings::for_level(level).power_up_count >= 1);
        }
    }

    #[test]
    fn test_bat_golem_split_covers_roster() {
        for level in 1..=100 {
            let difficulty = DifficultySettings::for_level(level);
            assert_eq!(
                difficulty.bat_count() + difficulty.golem_count(),
                difficulty.enemy_count
            );
            assert!(difficulty.bat_count() <= 8);
        }
    }

    #[test]
    fn test_time_limit_shrinks_and_floors() {
        assert_eq!(time_limit_for_level(1), 89.5);
        assert_eq!(time_limit_for_level(60), 60.0);
        // From level 120 the floor would kick in; caps at 30 from there on
        assert_eq!(time_limit_for_level(120), 30.0);
        assert_eq!(time_limit_for_level(200), 30.0);

        let mut previous = time_limit_for_level(1);
        for level in 2..=100 {
            let current = time_limit_for_level(level);
            assert!(current <= previous);
            assert!(current >= 30.0);
            previous = current;
        }
    }

    #[test]
    fn test_theme_blocks_of_ten() {
        assert_eq!(LevelTheme::for_level(1).name, "Sky");
        assert_eq!(LevelTheme::for_level(10).name, "Sky");
        assert_eq!(LevelTheme::for_level(11).name, "Desert");
        assert_eq!(LevelTheme::for_level(95).name, "Heaven");
        // Past the table: clamp to the last theme
        assert_eq!(LevelTheme::for_level(250).name, "Heaven");
    }
}
