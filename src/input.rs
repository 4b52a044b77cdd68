use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

use crate::entities::Directions;
use crate::geometry::Point;
use crate::viewport::Viewport;

/// Ticks a direction stays held after its last press when the terminal
/// does not report key releases. Key repeat refreshes it.
const HOLD_TIMEOUT_TICKS: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Discrete input received during one tick, positions in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The close signal (q, Esc, Ctrl-C)
    Quit,
    /// Fire key went down
    FirePressed,
    PointerPressed {
        button: PointerButton,
        position: Point,
    },
    PointerMoved(Point),
}

/// Everything the session reads from input for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
    pub held: Directions,
    pub cursor: Point,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Hold {
    #[default]
    Released,
    Held,
    /// Held for this many more ticks unless pressed again
    Fading(u8),
}

impl Hold {
    fn is_held(self) -> bool {
        !matches!(self, Hold::Released)
    }

    fn age(&mut self) {
        if let Hold::Fading(ticks) = *self {
            *self = match ticks {
                0 | 1 => Hold::Released,
                _ => Hold::Fading(ticks - 1),
            };
        }
    }
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    up: Hold,
    down: Hold,
    left: Hold,
    right: Hold,
}

impl KeyState {
    fn slot(&mut self, code: KeyCode) -> Option<&mut Hold> {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(&mut self.up),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(&mut self.down),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(&mut self.left),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(&mut self.right),
            _ => None,
        }
    }

    fn age(&mut self) {
        self.up.age();
        self.down.age();
        self.left.age();
        self.right.age();
    }

    fn directions(&self) -> Directions {
        Directions {
            up: self.up.is_held(),
            down: self.down.is_held(),
            left: self.left.is_held(),
            right: self.right.is_held(),
        }
    }
}

/// Manages input polling and translates raw terminal events into game input
pub struct InputManager {
    key_state: KeyState,
    events: Vec<InputEvent>,
    cursor: Point,
    /// Whether the terminal sends key release events
    reports_release: bool,
}

impl InputManager {
    pub fn new(reports_release: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            events: Vec::new(),
            cursor: Point::default(),
            reports_release,
        }
    }

    /// Drains every pending terminal event without blocking.
    /// Should be called once per tick before [`InputManager::tick_input`].
    pub fn poll_events(&mut self, viewport: &Viewport) -> color_eyre::Result<()> {
        self.events.clear();
        self.key_state.age();

        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            self.handle_event(event, viewport);
        }

        Ok(())
    }

    /// Applies one terminal event
    pub fn handle_event(&mut self, event: Event, viewport: &Viewport) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event),
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event, viewport),
            // Resize is picked up from the terminal size before drawing
            _ => {}
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.kind {
            KeyEventKind::Release => {
                if let Some(hold) = self.key_state.slot(key_event.code) {
                    *hold = Hold::Released;
                }
            }
            _ => self.handle_key_press(key_event),
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent) {
        // Check for quit keys first (works in any state)
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.events.push(InputEvent::Quit);
            return;
        }

        if key_event.code == KeyCode::Char(' ') {
            if key_event.kind == KeyEventKind::Press {
                self.events.push(InputEvent::FirePressed);
            }
            return;
        }

        let reports_release = self.reports_release;
        if let Some(hold) = self.key_state.slot(key_event.code) {
            *hold = if reports_release {
                Hold::Held
            } else {
                Hold::Fading(HOLD_TIMEOUT_TICKS)
            };
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent, viewport: &Viewport) {
        let position = viewport.cell_to_world(mouse_event.column, mouse_event.row);

        match mouse_event.kind {
            MouseEventKind::Down(button) => {
                self.cursor = position;
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    MouseButton::Middle => PointerButton::Middle,
                };
                self.events.push(InputEvent::PointerPressed { button, position });
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.cursor = position;
                self.events.push(InputEvent::PointerMoved(position));
            }
            _ => {}
        }
    }

    /// Input for this tick: events since the last poll plus held state
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            events: self.events.clone(),
            held: self.key_state.directions(),
            cursor: self.cursor,
        }
    }
}
