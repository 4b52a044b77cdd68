use image::RgbaImage;
use std::rc::Rc;

use crate::animation::{Animation, Animator};
use crate::config::{BACKGROUND_ANIM_RATE, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Full-screen backdrop that loops through its frames forever
#[derive(Debug, Clone)]
pub struct Background {
    animator: Animator,
}

impl Background {
    /// Frames that don't already match the viewport are stretched to fill it
    pub fn new(animation: Rc<Animation>) -> Self {
        let (width, height) = (SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
        let animation = if animation.size() == (width, height) {
            animation
        } else {
            Rc::new(animation.stretched(width, height))
        };

        Self {
            animator: Animator::new(animation, BACKGROUND_ANIM_RATE),
        }
    }

    pub fn update(&mut self) {
        self.animator.advance();
    }

    pub fn current_index(&self) -> usize {
        self.animator.current_index()
    }

    pub fn frame(&self) -> &RgbaImage {
        self.animator.frame()
    }
}
