use image::RgbaImage;
use std::rc::Rc;

use super::Entity;
use crate::animation::{Animation, Animator};
use crate::config::{MISSILE_ANIM_RATE, MISSILE_SPEED, SCREEN_WIDTH};
use crate::geometry::{Bounds, Point};

#[derive(Debug, Clone)]
pub struct Missile {
    pub bounds: Bounds,
    animator: Animator,
    alive: bool,
}

impl Missile {
    pub fn new(animation: Rc<Animation>, center: Point) -> Self {
        let animator = Animator::new(animation, MISSILE_ANIM_RATE);
        let (width, height) = animator.size();

        Self {
            bounds: Bounds::from_center(center, width, height),
            animator,
            alive: true,
        }
    }

    pub fn update(&mut self) {
        self.animator.advance();

        self.bounds.x += MISSILE_SPEED;
        if self.bounds.x > SCREEN_WIDTH {
            self.alive = false;
        }
    }

    /// Spent on a hit
    pub fn destroy(&mut self) {
        self.alive = false;
    }
}

impl Entity for Missile {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn frame(&self) -> &RgbaImage {
        self.animator.frame()
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
