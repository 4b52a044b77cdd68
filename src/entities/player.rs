use image::RgbaImage;
use std::rc::Rc;

use super::{Entity, Missile};
use crate::animation::{Animation, Animator};
use crate::config::{
    PLAYER_ANIM_RATE, PLAYER_FIRE_COOLDOWN, PLAYER_SPEED, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::geometry::{Bounds, Point};

/// Movement axes held down this tick. Each axis is independent, so opposite
/// directions may both be held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub bounds: Bounds,
    pub fire_cooldown: u8,
    animator: Animator,
}

impl Player {
    pub fn new(animation: Rc<Animation>, center: Point) -> Self {
        let animator = Animator::new(animation, PLAYER_ANIM_RATE);
        let (width, height) = animator.size();

        Self {
            bounds: Bounds::from_center(center, width, height),
            fire_cooldown: 0,
            animator,
        }
    }

    /// One tick: animate, move along every held axis, and cool the gun down
    pub fn update(&mut self, directions: Directions) {
        self.animator.advance();

        if directions.up {
            self.move_by(0.0, -PLAYER_SPEED);
        }
        if directions.down {
            self.move_by(0.0, PLAYER_SPEED);
        }
        if directions.left {
            self.move_by(-PLAYER_SPEED, 0.0);
        }
        if directions.right {
            self.move_by(PLAYER_SPEED, 0.0);
        }

        self.update_cooldown();
    }

    fn move_by(&mut self, dx: f32, dy: f32) {
        self.bounds.x += dx;
        self.bounds.y += dy;
        self.bounds.clamp_within(SCREEN_WIDTH, SCREEN_HEIGHT);
    }

    pub fn can_fire(&self) -> bool {
        self.fire_cooldown == 0
    }

    pub fn reset_cooldown(&mut self) {
        self.fire_cooldown = PLAYER_FIRE_COOLDOWN;
    }

    pub fn update_cooldown(&mut self) {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
    }

    /// Where missiles leave the ship: the middle of its leading edge
    pub fn muzzle(&self) -> Point {
        Point::new(self.bounds.right(), self.bounds.center().y)
    }

    /// Launches a missile if the gun is ready; otherwise the request is
    /// dropped, not queued
    pub fn fire(&mut self, missile_animation: &Rc<Animation>) -> Option<Missile> {
        if !self.can_fire() {
            return None;
        }

        self.reset_cooldown();
        Some(Missile::new(Rc::clone(missile_animation), self.muzzle()))
    }

    pub fn current_frame_index(&self) -> usize {
        self.animator.current_index()
    }
}

impl Entity for Player {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn frame(&self) -> &RgbaImage {
        self.animator.frame()
    }

    fn is_alive(&self) -> bool {
        true
    }
}
