//! One play-through: the per-tick update, collision and scoring loop plus
//! the game over screen. Headless; the app feeds it input and draws it.

use image::Rgb;
use rand::{SeedableRng, rngs::StdRng};
use std::rc::Rc;

use crate::assets::{Assets, SoundCue};
use crate::button::Button;
use crate::config::{
    KILL_POINTS, PLAYER_START_X, SCREEN_HEIGHT, SCREEN_WIDTH, SPAWN_INTERVAL_BASE,
    SPAWN_INTERVAL_PER_LEVEL, SURVIVAL_POINTS,
};
use crate::entities::{Background, Enemy, Entity, Explosion, GameState, Missile, Player};
use crate::geometry::{Bounds, Point};
use crate::input::{InputEvent, PointerButton, TickInput};

const BUTTON_WIDTH: f32 = 300.0;
const BUTTON_HEIGHT: f32 = 50.0;
const RESTART_BUTTON_Y: f32 = 350.0;
const QUIT_BUTTON_Y: f32 = 420.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// What the app should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue,
    /// Throw this session away and start a fresh one
    Restart,
    Quit,
}

pub struct Session {
    assets: Rc<Assets>,
    phase: Phase,
    game_state: GameState,
    background: Background,
    player: Player,
    enemies: Vec<Enemy>,
    missiles: Vec<Missile>,
    explosions: Vec<Explosion>,
    restart_button: Button,
    quit_button: Button,
    /// Ticks since the last enemy spawn
    spawn_timer: u32,
    tick_count: u64,
    /// Sounds raised during the current tick
    sound_cues: Vec<SoundCue>,
    rng: StdRng,
}

impl Session {
    pub fn new(assets: Rc<Assets>) -> Self {
        Self::with_rng(assets, StdRng::from_os_rng())
    }

    /// A session whose enemy placement is driven by `rng`
    pub fn with_rng(assets: Rc<Assets>, rng: StdRng) -> Self {
        let player = Player::new(
            Rc::clone(&assets.player),
            Point::new(PLAYER_START_X, SCREEN_HEIGHT / 2.0),
        );
        let background = Background::new(Rc::clone(&assets.background));

        let button_x = SCREEN_WIDTH / 2.0 - BUTTON_WIDTH / 2.0;
        let restart_button = Button::new(
            Bounds::new(button_x, RESTART_BUTTON_Y, BUTTON_WIDTH, BUTTON_HEIGHT),
            "RESTART",
            Rgb([0, 255, 0]),
            Rgb([100, 255, 100]),
        );
        let quit_button = Button::new(
            Bounds::new(button_x, QUIT_BUTTON_Y, BUTTON_WIDTH, BUTTON_HEIGHT),
            "QUIT",
            Rgb([255, 0, 0]),
            Rgb([255, 100, 100]),
        );

        Self {
            assets,
            phase: Phase::Playing,
            game_state: GameState::new(),
            background,
            player,
            enemies: Vec::new(),
            missiles: Vec::new(),
            explosions: Vec::new(),
            restart_button,
            quit_button,
            spawn_timer: 0,
            tick_count: 0,
            sound_cues: Vec::new(),
            rng,
        }
    }

    /// Advances the session by one tick
    pub fn tick(&mut self, input: &TickInput) -> Transition {
        self.sound_cues.clear();

        match self.phase {
            Phase::Playing => self.tick_playing(input),
            Phase::GameOver => self.tick_game_over(input),
        }
    }

    fn tick_playing(&mut self, input: &TickInput) -> Transition {
        for event in &input.events {
            match event {
                InputEvent::Quit => return Transition::Quit,
                InputEvent::FirePressed
                | InputEvent::PointerPressed {
                    button: PointerButton::Primary,
                    ..
                } => self.fire(),
                _ => {}
            }
        }

        self.spawn_timer += 1;
        if self.spawn_timer > self.spawn_interval() {
            self.spawn_timer = 0;
            self.spawn_enemy();
        }

        self.update_entities(input);
        self.resolve_collisions();
        self.game_state.add_score(SURVIVAL_POINTS);
        self.tick_count += 1;

        Transition::Continue
    }

    fn tick_game_over(&mut self, input: &TickInput) -> Transition {
        self.restart_button.check_hover(input.cursor);
        self.quit_button.check_hover(input.cursor);

        for event in &input.events {
            if *event == InputEvent::Quit {
                return Transition::Quit;
            }

            // A press carries its own position, which beats the last known cursor
            let cursor = match event {
                InputEvent::PointerPressed { position, .. } => *position,
                _ => input.cursor,
            };
            if self.restart_button.is_clicked(cursor, event) {
                log::info!("Restart requested");
                return Transition::Restart;
            }
            if self.quit_button.is_clicked(cursor, event) {
                return Transition::Quit;
            }
        }

        Transition::Continue
    }

    /// Ticks between spawns shrink as the level rises
    pub fn spawn_interval(&self) -> u32 {
        SPAWN_INTERVAL_BASE.saturating_sub(SPAWN_INTERVAL_PER_LEVEL * self.game_state.level())
    }

    fn fire(&mut self) {
        if let Some(missile) = self.player.fire(&self.assets.missile) {
            self.missiles.push(missile);
            self.sound_cues.push(SoundCue::Fire);
        }
    }

    fn spawn_enemy(&mut self) {
        let enemy = Enemy::spawn(
            Rc::clone(&self.assets.enemy),
            self.game_state.enemy_speed(),
            &mut self.rng,
        );
        self.enemies.push(enemy);
    }

    fn update_entities(&mut self, input: &TickInput) {
        self.background.update();
        self.player.update(input.held);

        for enemy in &mut self.enemies {
            enemy.update();
        }
        for missile in &mut self.missiles {
            missile.update();
        }
        for explosion in &mut self.explosions {
            explosion.update();
        }

        self.enemies.retain(|e| e.is_alive());
        self.missiles.retain(|m| m.is_alive());
        self.explosions.retain(|e| e.is_alive());
    }

    fn resolve_collisions(&mut self) {
        // Missiles hitting enemies. A missile spent on one enemy is not
        // considered for the next one.
        for enemy in &mut self.enemies {
            let mut hit = false;
            for missile in self.missiles.iter_mut().filter(|m| m.is_alive()) {
                if enemy.bounds.intersects(&missile.bounds) {
                    missile.destroy();
                    hit = true;
                }
            }
            if hit {
                enemy.destroy();
                self.explosions.push(Explosion::new(
                    Rc::clone(&self.assets.explosion),
                    enemy.bounds.center(),
                ));
                self.sound_cues.push(SoundCue::Explosion);
                self.game_state.add_score(KILL_POINTS);
            }
        }
        self.enemies.retain(|e| e.is_alive());
        self.missiles.retain(|m| m.is_alive());

        // Enemies touching the player end the game; nothing is removed
        let player_bounds = self.player.bounds;
        if self
            .enemies
            .iter()
            .any(|enemy| enemy.bounds.intersects(&player_bounds))
        {
            log::info!(
                "Game over at tick {} with score {} (level {})",
                self.tick_count,
                self.game_state.score(),
                self.game_state.level()
            );
            self.phase = Phase::GameOver;
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn missiles(&self) -> &[Missile] {
        &self.missiles
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn buttons(&self) -> [&Button; 2] {
        [&self.restart_button, &self.quit_button]
    }

    /// Ticks played so far, not counting the game over screen
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Sounds raised by the last tick
    pub fn sound_cues(&self) -> &[SoundCue] {
        &self.sound_cues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Directions;

    fn new_session() -> Session {
        Session::with_rng(Rc::new(Assets::placeholder()), StdRng::seed_from_u64(42))
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn with_events(events: Vec<InputEvent>) -> TickInput {
        TickInput {
            events,
            ..TickInput::default()
        }
    }

    fn click(position: Point) -> InputEvent {
        InputEvent::PointerPressed {
            button: PointerButton::Primary,
            position,
        }
    }

    fn enemy_at(session: &Session, center: Point, speed: f32) -> Enemy {
        Enemy::new(Rc::clone(&session.assets.enemy), center, speed)
    }

    fn missile_at(session: &Session, center: Point) -> Missile {
        Missile::new(Rc::clone(&session.assets.missile), center)
    }

    /// Puts the session on the game over screen by parking an enemy on the player
    fn end_game(session: &mut Session) {
        let center = session.player.bounds.center();
        let enemy = enemy_at(session, center, 0.0);
        session.enemies.push(enemy);
        session.tick(&idle());
        assert_eq!(session.phase(), Phase::GameOver);
    }

    #[test]
    fn test_new_session() {
        let session = new_session();
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.game_state().score(), 0);
        assert_eq!(session.player().bounds.center(), Point::new(100.0, 300.0));
        assert!(session.enemies().is_empty());
        assert!(session.missiles().is_empty());
        assert!(session.explosions().is_empty());
    }

    #[test]
    fn test_passive_score_per_tick() {
        let mut session = new_session();
        for _ in 0..100 {
            assert_eq!(session.tick(&idle()), Transition::Continue);
        }
        assert_eq!(session.game_state().score(), 100);
        assert_eq!(session.game_state().level(), 1);
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn test_enemy_spawns_after_interval() {
        let mut session = new_session();
        // Level 1: timer must exceed 58
        for _ in 0..58 {
            session.tick(&idle());
        }
        assert!(session.enemies().is_empty());
        session.tick(&idle());
        assert_eq!(session.enemies().len(), 1);
        assert_eq!(session.spawn_timer, 0);

        // Spawned at the current speed and moved once this tick
        let enemy = &session.enemies()[0];
        assert_eq!(enemy.speed, 3.0);
        assert_eq!(enemy.bounds.center().x, 797.0);
    }

    #[test]
    fn test_spawn_interval_shrinks_with_level() {
        let mut session = new_session();
        assert_eq!(session.spawn_interval(), 58);
        session.game_state.add_score(20_000);
        assert_eq!(session.spawn_interval(), 54);
        session.game_state.add_score(1_000_000);
        assert_eq!(session.spawn_interval(), 40);
    }

    #[test]
    fn test_fire_spawns_missile_and_cue() {
        let mut session = new_session();
        session.tick(&with_events(vec![InputEvent::FirePressed]));
        assert_eq!(session.missiles().len(), 1);
        assert_eq!(session.sound_cues(), &[SoundCue::Fire]);
        // Missile moved once in the tick it was fired
        assert_eq!(session.missiles()[0].bounds.center(), Point::new(135.0, 300.0));

        // Cooling down: a second request is dropped
        session.tick(&with_events(vec![InputEvent::FirePressed]));
        assert_eq!(session.missiles().len(), 1);
        assert!(session.sound_cues().is_empty());
    }

    #[test]
    fn test_primary_click_fires() {
        let mut session = new_session();
        session.tick(&with_events(vec![click(Point::new(10.0, 10.0))]));
        assert_eq!(session.missiles().len(), 1);

        let mut session = new_session();
        session.tick(&with_events(vec![InputEvent::PointerPressed {
            button: PointerButton::Secondary,
            position: Point::new(10.0, 10.0),
        }]));
        assert!(session.missiles().is_empty());
    }

    #[test]
    fn test_quit_while_playing() {
        let mut session = new_session();
        assert_eq!(session.tick(&with_events(vec![InputEvent::Quit])), Transition::Quit);
        assert_eq!(session.game_state().score(), 0);
    }

    #[test]
    fn test_held_directions_move_player() {
        let mut session = new_session();
        let input = TickInput {
            held: Directions {
                down: true,
                ..Directions::default()
            },
            ..TickInput::default()
        };
        session.tick(&input);
        assert_eq!(session.player().bounds.center(), Point::new(100.0, 305.0));
    }

    #[test]
    fn test_kill_scores_and_explodes() {
        let mut session = new_session();
        for _ in 0..10 {
            session.tick(&idle());
        }
        let score_before = session.game_state().score();

        let enemy = enemy_at(&session, Point::new(400.0, 200.0), 3.0);
        let missile = missile_at(&session, Point::new(400.0, 200.0));
        session.enemies.push(enemy);
        session.missiles.push(missile);

        session.tick(&idle());

        assert!(session.enemies().is_empty());
        assert!(session.missiles().is_empty());
        assert_eq!(session.explosions().len(), 1);
        // Enemy moved 3 left before the collision was resolved
        assert_eq!(session.explosions()[0].bounds.center(), Point::new(397.0, 200.0));
        assert_eq!(session.game_state().score(), score_before + 101);
        assert_eq!(session.sound_cues(), &[SoundCue::Explosion]);
    }

    #[test]
    fn test_one_missile_destroys_one_enemy() {
        let mut session = new_session();
        // Two overlapping enemies, one missile touching both
        let first = enemy_at(&session, Point::new(400.0, 200.0), 0.0);
        let second = enemy_at(&session, Point::new(410.0, 200.0), 0.0);
        let missile = missile_at(&session, Point::new(395.0, 200.0));
        session.enemies.push(first);
        session.enemies.push(second);
        session.missiles.push(missile);

        session.tick(&idle());

        assert_eq!(session.enemies().len(), 1);
        assert_eq!(session.enemies()[0].bounds.center().x, 410.0);
        assert_eq!(session.explosions().len(), 1);
        assert_eq!(session.game_state().score(), 101);
    }

    #[test]
    fn test_one_enemy_takes_every_missile_touching_it() {
        let mut session = new_session();
        let enemy = enemy_at(&session, Point::new(400.0, 200.0), 0.0);
        session.enemies.push(enemy);
        for y in [195.0, 205.0] {
            let missile = missile_at(&session, Point::new(390.0, y));
            session.missiles.push(missile);
        }

        session.tick(&idle());

        assert!(session.enemies().is_empty());
        assert!(session.missiles().is_empty());
        assert_eq!(session.explosions().len(), 1);
        assert_eq!(session.game_state().score(), 101);
    }

    #[test]
    fn test_simultaneous_kills_all_resolve() {
        let mut session = new_session();
        for y in [100.0, 300.0, 500.0] {
            let enemy = enemy_at(&session, Point::new(600.0, y), 0.0);
            let missile = missile_at(&session, Point::new(595.0, y));
            session.enemies.push(enemy);
            session.missiles.push(missile);
        }

        session.tick(&idle());

        assert!(session.enemies().is_empty());
        assert!(session.missiles().is_empty());
        assert_eq!(session.explosions().len(), 3);
        assert_eq!(session.game_state().score(), 301);
        assert_eq!(session.sound_cues().len(), 3);
    }

    #[test]
    fn test_missile_that_misses_survives() {
        let mut session = new_session();
        let enemy = enemy_at(&session, Point::new(600.0, 100.0), 0.0);
        let missile = missile_at(&session, Point::new(300.0, 500.0));
        session.enemies.push(enemy);
        session.missiles.push(missile);

        session.tick(&idle());

        assert_eq!(session.enemies().len(), 1);
        assert_eq!(session.missiles().len(), 1);
        assert!(session.explosions().is_empty());
    }

    #[test]
    fn test_explosion_expires() {
        let mut session = new_session();
        let explosion = Explosion::new(Rc::clone(&session.assets.explosion), Point::new(400.0, 300.0));
        session.explosions.push(explosion);

        // 8 placeholder frames, 2 ticks each
        for _ in 0..15 {
            session.tick(&idle());
        }
        assert_eq!(session.explosions().len(), 1);
        session.tick(&idle());
        assert!(session.explosions().is_empty());
    }

    #[test]
    fn test_player_contact_ends_game() {
        let mut session = new_session();
        let center = session.player.bounds.center();
        let enemy = enemy_at(&session, Point::new(center.x + 20.0, center.y), 0.0);
        session.enemies.push(enemy);

        assert_eq!(session.tick(&idle()), Transition::Continue);
        assert_eq!(session.phase(), Phase::GameOver);
        // Neither side is removed and the passive point is still awarded
        assert_eq!(session.enemies().len(), 1);
        assert_eq!(session.game_state().score(), 1);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut session = new_session();
        end_game(&mut session);

        let score = session.game_state().score();
        let ticks = session.tick_count();
        let enemy_x = session.enemies()[0].bounds.x;

        for _ in 0..200 {
            let input = TickInput {
                events: vec![InputEvent::FirePressed],
                held: Directions {
                    up: true,
                    ..Directions::default()
                },
                ..TickInput::default()
            };
            assert_eq!(session.tick(&input), Transition::Continue);
        }

        assert_eq!(session.game_state().score(), score);
        assert_eq!(session.tick_count(), ticks);
        assert_eq!(session.enemies().len(), 1);
        assert_eq!(session.enemies()[0].bounds.x, enemy_x);
        assert!(session.missiles().is_empty());
    }

    #[test]
    fn test_game_over_restart_click() {
        let mut session = new_session();
        end_game(&mut session);

        let inside_restart = Point::new(400.0, 375.0);
        let input = TickInput {
            events: vec![click(inside_restart)],
            cursor: inside_restart,
            ..TickInput::default()
        };
        assert_eq!(session.tick(&input), Transition::Restart);
    }

    #[test]
    fn test_game_over_quit_click() {
        let mut session = new_session();
        end_game(&mut session);

        let inside_quit = Point::new(400.0, 445.0);
        assert_eq!(
            session.tick(&with_events(vec![click(inside_quit)])),
            Transition::Quit
        );
    }

    #[test]
    fn test_game_over_ignores_clicks_elsewhere() {
        let mut session = new_session();
        end_game(&mut session);

        assert_eq!(
            session.tick(&with_events(vec![click(Point::new(50.0, 50.0))])),
            Transition::Continue
        );
        assert_eq!(
            session.tick(&with_events(vec![InputEvent::Quit])),
            Transition::Quit
        );
    }

    #[test]
    fn test_game_over_hover() {
        let mut session = new_session();
        end_game(&mut session);

        let input = TickInput {
            cursor: Point::new(400.0, 445.0),
            ..TickInput::default()
        };
        session.tick(&input);
        let [restart, quit] = session.buttons();
        assert!(!restart.is_hovered());
        assert!(quit.is_hovered());
    }
}
