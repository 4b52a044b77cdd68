use image::RgbaImage;
use std::rc::Rc;

use super::Entity;
use crate::animation::{Animation, Animator};
use crate::config::{EXPLOSION_ANIM_RATE, EXPLOSION_TICKS_PER_FRAME};
use crate::geometry::{Bounds, Point};

/// Cosmetic only: plays its frames once, then expires
#[derive(Debug, Clone)]
pub struct Explosion {
    pub bounds: Bounds,
    /// Ticks left before the explosion disappears
    pub lifetime: u32,
    animator: Animator,
}

impl Explosion {
    pub fn new(animation: Rc<Animation>, center: Point) -> Self {
        let animator = Animator::new(animation, EXPLOSION_ANIM_RATE);
        let (width, height) = animator.size();
        let lifetime = animator.frame_count() as u32 * EXPLOSION_TICKS_PER_FRAME;

        Self {
            bounds: Bounds::from_center(center, width, height),
            lifetime,
            animator,
        }
    }

    pub fn update(&mut self) {
        self.animator.advance();
        self.lifetime = self.lifetime.saturating_sub(1);
    }

    pub fn current_frame_index(&self) -> usize {
        self.animator.current_index()
    }
}

impl Entity for Explosion {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn frame(&self) -> &RgbaImage {
        self.animator.frame()
    }

    fn is_alive(&self) -> bool {
        self.lifetime > 0
    }
}
