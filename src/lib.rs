// Library exports for testing
pub use animation::{Animation, Animator, load_animation};
pub use assets::{Assets, SoundCue};
pub use button::Button;
pub use entities::{
    Background, Directions, Enemy, Entity, Explosion, GameState, Missile, Player,
};
pub use geometry::{Bounds, Point};
pub use input::{InputEvent, PointerButton, TickInput};
pub use session::{Phase, Session, Transition};

pub mod animation;
pub mod app;
pub mod assets;
pub mod audio;
pub mod button;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod session;
pub mod viewport;
