//! Fixed game tunables. There is no runtime configuration.

/// Logical world size in world units
pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

pub const TICKS_PER_SECOND: u32 = 60;

// Scoring and leveling
pub const MAX_LEVEL: u32 = 10;
pub const SCORE_PER_LEVEL: u32 = 10_000;
pub const BASE_ENEMY_SPEED: f32 = 3.0;
pub const KILL_POINTS: u32 = 100;
pub const SURVIVAL_POINTS: u32 = 1;

/// Spawn threshold is `SPAWN_INTERVAL_BASE - SPAWN_INTERVAL_PER_LEVEL * level` ticks
pub const SPAWN_INTERVAL_BASE: u32 = 60;
pub const SPAWN_INTERVAL_PER_LEVEL: u32 = 2;
/// Enemies spawn this far from the top and bottom edges
pub const ENEMY_SPAWN_MARGIN: f32 = 50.0;

// Player
pub const PLAYER_START_X: f32 = 100.0;
pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_FIRE_COOLDOWN: u8 = 15;
pub const PLAYER_ANIM_RATE: f32 = 0.15;

// Other entities
pub const ENEMY_ANIM_RATE: f32 = 0.2;
pub const MISSILE_SPEED: f32 = 10.0;
pub const MISSILE_ANIM_RATE: f32 = 0.1;
pub const EXPLOSION_ANIM_RATE: f32 = 0.5;
/// Explosion lifetime in ticks per animation frame
pub const EXPLOSION_TICKS_PER_FRAME: u32 = 2;
pub const BACKGROUND_ANIM_RATE: f32 = 0.05;

/// Alpha of the black dimmer drawn over the game over screen
pub const GAME_OVER_DIM_ALPHA: u8 = 180;

/// Root directory for all art and sound assets
pub const ASSET_ROOT: &str = "assets";
pub const LOG_FILE: &str = "flight-shooter.log";
