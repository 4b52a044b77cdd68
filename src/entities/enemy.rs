use image::RgbaImage;
use rand::Rng;
use std::rc::Rc;

use super::Entity;
use crate::animation::{Animation, Animator};
use crate::config::{ENEMY_ANIM_RATE, ENEMY_SPAWN_MARGIN, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::geometry::{Bounds, Point};

/// Flies right to left at a speed fixed when it spawns
#[derive(Debug, Clone)]
pub struct Enemy {
    pub bounds: Bounds,
    pub speed: f32,
    animator: Animator,
    alive: bool,
}

impl Enemy {
    pub fn new(animation: Rc<Animation>, center: Point, speed: f32) -> Self {
        let animator = Animator::new(animation, ENEMY_ANIM_RATE);
        let (width, height) = animator.size();

        Self {
            bounds: Bounds::from_center(center, width, height),
            speed,
            animator,
            alive: true,
        }
    }

    /// Spawns on the right edge at a random height inside the spawn margin
    pub fn spawn<R: Rng>(animation: Rc<Animation>, speed: f32, rng: &mut R) -> Self {
        let min_y = ENEMY_SPAWN_MARGIN as i32;
        let max_y = (SCREEN_HEIGHT - ENEMY_SPAWN_MARGIN) as i32;
        let y = rng.random_range(min_y..=max_y) as f32;

        Self::new(animation, Point::new(SCREEN_WIDTH, y), speed)
    }

    pub fn update(&mut self) {
        self.animator.advance();

        self.bounds.x -= self.speed;
        if self.bounds.right() < 0.0 {
            self.alive = false;
        }
    }

    /// Removes the enemy without waiting for it to leave the screen
    pub fn destroy(&mut self) {
        self.alive = false;
    }

    pub fn current_frame_index(&self) -> usize {
        self.animator.current_index()
    }
}

impl Entity for Enemy {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::placeholder_animation;
    use image::Rgb;
    use rand::{SeedableRng, rngs::StdRng};

    fn enemy_animation() -> Rc<Animation> {
        Rc::new(placeholder_animation((50, 30), Rgb([255, 0, 0]), 3))
    }

    #[test]
    fn test_enemy_spawns_on_right_edge() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let enemy = Enemy::spawn(enemy_animation(), 3.0, &mut rng);
            let center = enemy.bounds.center();
            assert_eq!(center.x, 800.0);
            assert!((50.0..=550.0).contains(&center.y));
            assert_eq!(enemy.speed, 3.0);
            assert!(enemy.is_alive());
        }
    }

    #[test]
    fn test_enemy_moves_left_at_its_speed() {
        let mut enemy = Enemy::new(enemy_animation(), Point::new(400.0, 300.0), 6.75);
        enemy.update();
        assert_eq!(enemy.bounds.center().x, 393.25);
    }

    #[test]
    fn test_enemy_dies_once_fully_off_screen() {
        // Right edge starts at 10, speed 3: 10 -> 7 -> 4 -> 1 -> -2
        let mut enemy = Enemy::new(enemy_animation(), Point::new(-15.0, 300.0), 3.0);
        for _ in 0..3 {
            enemy.update();
            assert!(enemy.is_alive());
        }
        enemy.update();
        assert!(!enemy.is_alive());
    }

    #[test]
    fn test_enemy_animation_independent_of_speed() {
        let mut slow = Enemy::new(enemy_animation(), Point::new(400.0, 300.0), 0.0);
        let mut fast = Enemy::new(enemy_animation(), Point::new(400.0, 300.0), 20.0);
        for _ in 0..5 {
            slow.update();
            fast.update();
        }
        assert_eq!(slow.current_frame_index(), 1);
        assert_eq!(fast.current_frame_index(), 1);
    }

    #[test]
    fn test_destroy() {
        let mut enemy = Enemy::new(enemy_animation(), Point::new(400.0, 300.0), 3.0);
        enemy.destroy();
        assert!(!enemy.is_alive());
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_enemy_despawns_at_first_tick_past_left_edge(
                speed in 1u8..30,
                y in 50u16..550,
            ) {
                // Whole-number speeds keep the arithmetic exact
                let (speed, y) = (speed as f32, y as f32);
                let mut enemy = Enemy::new(enemy_animation(), Point::new(SCREEN_WIDTH, y), speed);
                let mut right = enemy.bounds.right();
                let mut ticks = 0;
                while enemy.is_alive() {
                    enemy.update();
                    right -= speed;
                    ticks += 1;
                    prop_assert_eq!(enemy.is_alive(), right >= 0.0);
                    prop_assert!(ticks < 10_000);
                }
            }
        }
    }
}
