//! Per-level run state
//!
//! `LevelSession` owns the numbers a level run accumulates: score, the
//! countdown clock, the game-over flag and the level-complete latch. It
//! knows nothing about entities or rendering; the play loop feeds it
//! events and reads it for the HUD.
//!
//! Invariants:
//! - remaining time is never negative
//! - the level-complete latch fires at most once
//! - once completed, running out of time no longer ends the run

use crate::difficulty::{time_limit_for_level, DifficultySettings};
use std::time::Instant;

/// Summary handed to the level-complete screen. Produced exactly once per
/// session by `complete_level()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelResult {
    pub level: u32,
    pub score: u32,
    pub time_bonus: u32,
    pub total_score: u32,
}

pub struct LevelSession {
    pub level: u32,
    pub difficulty: DifficultySettings,
    score: u32,
    time_limit: f32,
    started: Instant,
    game_over: bool,
    completed: bool,
}

impl LevelSession {
    pub fn new(level: u32) -> Self {
        LevelSession {
            level,
            difficulty: DifficultySettings::for_level(level),
            score: 0,
            time_limit: time_limit_for_level(level),
            started: Instant::now(),
            game_over: false,
            completed: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    /// Seconds left on the clock, floored at zero.
    pub fn time_remaining(&self) -> f32 {
        (self.time_limit - self.started.elapsed().as_secs_f32()).max(0.0)
    }

    /// Call once per frame: expires the run when the clock hits zero.
    /// Completed runs are immune; the completion screen owns them.
    pub fn tick_clock(&mut self) {
        if !self.completed && self.time_remaining() <= 0.0 {
            self.game_over = true;
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Marks the run lost (health reached zero, time expired).
    pub fn set_game_over(&mut self) {
        if !self.completed {
            self.game_over = true;
        }
    }

    /// Latches level completion. The first call yields the result with the
    /// time bonus folded in; every later call returns `None`.
    pub fn complete_level(&mut self) -> Option<LevelResult> {
        if self.completed || self.game_over {
            return None;
        }
        self.completed = true;

        let time_bonus = (self.time_remaining() * 10.0).floor() as u32;
        self.score += time_bonus;

        Some(LevelResult {
            level: self.level,
            score: self.score - time_bonus,
            time_bonus,
            total_score: self.score,
        })
    }

    #[cfg(test)]
    fn with_time_limit(level: u32, time_limit: f32) -> Self {
        let mut session = LevelSession::new(level);
        session.time_limit = time_limit;
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_accumulates() {
        let mut session = LevelSession::new(1);
        session.add_score(50);
        session.add_score(100);
        assert_eq!(session.score(), 150);
    }

    #[test]
    fn test_time_remaining_never_negative() {
        let session = LevelSession::with_time_limit(1, 0.0);
        assert_eq!(session.time_remaining(), 0.0);
    }

    #[test]
    fn test_clock_expiry_sets_game_over() {
        let mut session = LevelSession::with_time_limit(1, 0.0);
        assert!(!session.is_game_over());

        session.tick_clock();
        assert!(session.is_game_over());
    }

    #[test]
    fn test_completion_latches_once() {
        let mut session = LevelSession::new(3);
        session.add_score(200);

        let first = session.complete_level();
        assert!(first.is_some());

        let result = first.unwrap();
        assert_eq!(result.level, 3);
        assert_eq!(result.score, 200);
        assert_eq!(result.total_score, 200 + result.time_bonus);

        // The latch: no second result, score untouched
        let total = session.score();
        assert!(session.complete_level().is_none());
        assert_eq!(session.score(), total);
    }

    #[test]
    fn test_completed_run_ignores_clock_expiry() {
        let mut session = LevelSession::with_time_limit(1, 0.05);
        session.complete_level().unwrap();

        std::thread::sleep(std::time::Duration::from_millis(80));
        session.tick_clock();

        assert!(!session.is_game_over());
    }

    #[test]
    fn test_no_completion_after_game_over() {
        let mut session = LevelSession::new(1);
        session.set_game_over();
        assert!(session.complete_level().is_none());
    }

    #[test]
    fn test_time_bonus_zero_when_clock_ran_out() {
        let mut session = LevelSession::with_time_limit(1, 0.0);
        // Completing exactly at expiry, before the clock tick lands
        let result = session.complete_level().unwrap();
        assert_eq!(result.time_bonus, 0);
        assert_eq!(result.total_score, result.score);
    }
}
