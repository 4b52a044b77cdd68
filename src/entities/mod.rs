mod background;
mod enemy;
mod explosion;
mod game_state;
mod missile;
mod player;

use image::RgbaImage;

use crate::geometry::Bounds;

// Re-export all public types
pub use background::Background;
pub use enemy::Enemy;
pub use explosion::Explosion;
pub use game_state::{GameState, level_for_score, speed_for_level};
pub use missile::Missile;
pub use player::{Directions, Player};

/// What the session and renderer need from every moving thing on screen
pub trait Entity {
    /// Bounding rectangle in world units
    fn bounds(&self) -> Bounds;

    /// The animation frame to draw this tick
    fn frame(&self) -> &RgbaImage;

    fn is_alive(&self) -> bool;
}
