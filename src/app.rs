use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::assets::Assets;
use crate::audio::AudioManager;
use crate::config::TICKS_PER_SECOND;
use crate::input::{InputManager, TickInput};
use crate::renderer::GameRenderer;
use crate::session::{Session, Transition};
use crate::viewport::Viewport;

/// The main application: owns the current session and everything that
/// outlives it (assets, audio, input, renderer)
pub struct App {
    assets: Rc<Assets>,
    session: Session,
    sessions_played: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    /// `reports_release` tells input handling whether the terminal sends
    /// key release events
    pub fn new(assets: Rc<Assets>, reports_release: bool) -> Self {
        let audio_manager = AudioManager::new(assets.sounds.clone()).unwrap_or_else(|err| {
            log::warn!("Failed to initialize audio: {:#}", err);
            log::warn!("Continuing without audio...");
            AudioManager::muted(assets.sounds.clone())
        });

        Self::with_audio(assets, reports_release, audio_manager)
    }

    fn with_audio(assets: Rc<Assets>, reports_release: bool, audio_manager: AudioManager) -> Self {
        Self {
            session: Session::new(Rc::clone(&assets)),
            sessions_played: 1,
            assets,
            input_manager: InputManager::new(reports_release),
            renderer: GameRenderer::new(),
            audio_manager,
        }
    }

    /// Run the application's main loop at a fixed tick rate
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        let tick_length = Duration::from_secs(1) / TICKS_PER_SECOND;
        log::info!("Session {} started", self.sessions_played);

        loop {
            let tick_start = Instant::now();

            let size = terminal.size()?;
            let viewport = Viewport::new(Rect::new(0, 0, size.width, size.height));

            self.input_manager.poll_events(&viewport)?;
            let input = self.input_manager.tick_input();

            if !self.advance(&input) {
                return Ok(());
            }

            terminal.draw(|frame| self.renderer.render(frame, &self.session))?;

            // No catch-up: a slow tick just runs late
            if let Some(remaining) = tick_length.checked_sub(tick_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
    }

    /// One simulation tick plus its sounds. False once the player quits.
    fn advance(&mut self, input: &TickInput) -> bool {
        let transition = self.session.tick(input);
        self.audio_manager.play_all(self.session.sound_cues());

        match transition {
            Transition::Continue => true,
            Transition::Restart => {
                self.restart();
                true
            }
            Transition::Quit => {
                log::info!("Quit with score {}", self.session.game_state().score());
                false
            }
        }
    }

    fn restart(&mut self) {
        self.session = Session::new(Rc::clone(&self.assets));
        self.sessions_played += 1;
        log::info!("Session {} started", self.sessions_played);
    }
}
