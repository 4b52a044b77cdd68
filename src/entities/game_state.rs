use crate::config::{BASE_ENEMY_SPEED, MAX_LEVEL, SCORE_PER_LEVEL};

/// Score and the difficulty derived from it. Score and level only ever go up.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    score: u32,
    level: u32,
    enemy_speed: f32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            enemy_speed: BASE_ENEMY_SPEED,
        }
    }

    /// Adds `points` and levels up when the new score crosses a threshold
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);

        let new_level = level_for_score(self.score);
        if new_level > self.level {
            self.level = new_level;
            self.enemy_speed = speed_for_level(new_level);
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn enemy_speed(&self) -> f32 {
        self.enemy_speed
    }
}

/// `min(score / SCORE_PER_LEVEL + 1, MAX_LEVEL)`
pub fn level_for_score(score: u32) -> u32 {
    (score / SCORE_PER_LEVEL + 1).min(MAX_LEVEL)
}

/// Enemy speed grows by half again with every level
pub fn speed_for_level(level: u32) -> f32 {
    BASE_ENEMY_SPEED * 1.5f32.powi(level.saturating_sub(1) as i32)
}
