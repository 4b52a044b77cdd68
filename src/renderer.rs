use image::{Rgb, Rgba, RgbaImage, imageops};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::button::Button;
use crate::config::{GAME_OVER_DIM_ALPHA, MAX_LEVEL, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entities::Entity;
use crate::session::{Phase, Session};
use crate::viewport::Viewport;

const HALF_BLOCK: char = '▀';

/// World heights of the overlay text lines
const SCORE_TEXT_Y: f32 = 10.0;
const LEVEL_TEXT_Y: f32 = 50.0;
const GAME_OVER_TEXT_Y: f32 = 200.0;
const FINAL_SCORE_TEXT_Y: f32 = 250.0;

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    /// The composed scene at world resolution, reused every tick
    canvas: RgbaImage,
}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    pub fn new() -> Self {
        Self {
            canvas: RgbaImage::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32),
        }
    }

    /// Draws the session into the whole frame
    pub fn render(&mut self, frame: &mut Frame, session: &Session) {
        let viewport = Viewport::new(frame.area());

        self.compose_scene(session);
        draw_canvas(&self.canvas, frame.buffer_mut(), &viewport);
        render_hud(frame, session, &viewport);

        match session.phase() {
            Phase::Playing => render_controls(frame, &viewport),
            Phase::GameOver => render_game_over(frame, session, &viewport),
        }
    }

    /// The composed scene from the last [`GameRenderer::render`] call
    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Background, then every live entity, then the dimmer when the game is over
    pub fn compose_scene(&mut self, session: &Session) {
        let background = session.background().frame();
        if background.dimensions() == self.canvas.dimensions() {
            self.canvas.copy_from_slice(background.as_raw());
        } else {
            self.canvas = imageops::resize(
                background,
                SCREEN_WIDTH as u32,
                SCREEN_HEIGHT as u32,
                imageops::FilterType::Nearest,
            );
        }

        draw_entity(&mut self.canvas, session.player());
        for enemy in session.enemies() {
            draw_entity(&mut self.canvas, enemy);
        }
        for missile in session.missiles() {
            draw_entity(&mut self.canvas, missile);
        }
        for explosion in session.explosions() {
            draw_entity(&mut self.canvas, explosion);
        }

        if session.phase() == Phase::GameOver {
            dim(&mut self.canvas, GAME_OVER_DIM_ALPHA);
        }
    }
}

fn draw_entity<E: Entity>(canvas: &mut RgbaImage, entity: &E) {
    let bounds = entity.bounds();
    imageops::overlay(
        canvas,
        entity.frame(),
        bounds.x.round() as i64,
        bounds.y.round() as i64,
    );
}

/// Blends black over every pixel at `alpha`
fn dim(canvas: &mut RgbaImage, alpha: u8) {
    let keep = (u8::MAX - alpha) as u16;
    for pixel in canvas.pixels_mut() {
        for channel in pixel.0.iter_mut().take(3) {
            *channel = (*channel as u16 * keep / u8::MAX as u16) as u8;
        }
    }
}

/// Projects the canvas onto the terminal, two canvas rows per cell
fn draw_canvas(canvas: &RgbaImage, buffer: &mut Buffer, viewport: &Viewport) {
    let area = viewport.area;
    for row in 0..area.height {
        for column in 0..area.width {
            let top = sample(canvas, viewport, column as u32, row as u32 * 2);
            let bottom = sample(canvas, viewport, column as u32, row as u32 * 2 + 1);

            if let Some(cell) = buffer.cell_mut((area.x + column, area.y + row)) {
                cell.set_char(HALF_BLOCK)
                    .set_fg(to_color(top))
                    .set_bg(to_color(bottom));
            }
        }
    }
}

/// Nearest canvas pixel under viewport pixel (`px`, `py`)
fn sample(canvas: &RgbaImage, viewport: &Viewport, px: u32, py: u32) -> Rgba<u8> {
    let point = viewport.pixel_to_world(px, py);
    let (width, height) = canvas.dimensions();
    let x = (point.x.max(0.0) as u32).min(width - 1);
    let y = (point.y.max(0.0) as u32).min(height - 1);
    *canvas.get_pixel(x, y)
}

fn to_color(pixel: Rgba<u8>) -> Color {
    Color::Rgb(pixel[0], pixel[1], pixel[2])
}

fn rgb_color(rgb: Rgb<u8>) -> Color {
    Color::Rgb(rgb[0], rgb[1], rgb[2])
}

/// A one-line area starting at world height `y`
fn text_row(viewport: &Viewport, y: f32) -> Rect {
    let area = viewport.area;
    Rect {
        x: area.x + 1,
        y: viewport.row_at(y),
        width: area.width.saturating_sub(2),
        height: 1,
    }
}

/// Score and level in the top left corner
fn render_hud(frame: &mut Frame, session: &Session, viewport: &Viewport) {
    let state = session.game_state();
    let label = Style::default().fg(Color::White);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let score = Line::from(vec![
        Span::styled("Score: ", label),
        Span::styled(format!("{}", state.score()), value),
    ]);
    let level = Line::from(vec![
        Span::styled("Level: ", label),
        Span::styled(format!("{}/{}", state.level(), MAX_LEVEL), value),
    ]);

    let score_area = text_row(viewport, SCORE_TEXT_Y);
    let mut level_area = text_row(viewport, LEVEL_TEXT_Y);
    // Tiny terminals squash both lines onto one row
    if level_area.y == score_area.y {
        level_area.y = (score_area.y + 1).min(viewport.area.bottom().saturating_sub(1));
    }

    frame.render_widget(Paragraph::new(score), score_area);
    frame.render_widget(Paragraph::new(level), level_area);
}

/// Controls hint at bottom
fn render_controls(frame: &mut Frame, viewport: &Viewport) {
    let area = viewport.area;
    let controls = Line::from(vec![Span::styled(
        "[WASD/Arrows: Move] [Space/Click: Fire] [Q: Quit]",
        Style::default().fg(Color::DarkGray),
    )]);

    let controls_area = Rect {
        x: area.x + 1,
        y: area.y + area.height.saturating_sub(1),
        width: area.width.saturating_sub(2),
        height: 1,
    };

    frame.render_widget(Paragraph::new(controls).centered(), controls_area);
}

fn render_game_over(frame: &mut Frame, session: &Session, viewport: &Viewport) {
    frame.render_widget(
        Paragraph::new(Line::from("GAME OVER").centered().red().bold()),
        text_row(viewport, GAME_OVER_TEXT_Y),
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(format!("Final Score: {}", session.game_state().score()))
                .centered()
                .white()
                .bold(),
        ),
        text_row(viewport, FINAL_SCORE_TEXT_Y),
    );

    for button in session.buttons() {
        render_button(frame, button, viewport);
    }
}

fn render_button(frame: &mut Frame, button: &Button, viewport: &Viewport) {
    let area = viewport.world_to_cells(button.bounds);
    if area.is_empty() {
        return;
    }

    let style = Style::default()
        .bg(rgb_color(button.current_color()))
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);

    let bordered = area.height >= 3 && area.width >= 4;
    let inner_height = if bordered { area.height - 2 } else { area.height };

    // Pad so the label sits on the middle line
    let mut lines = vec![Line::from(""); (inner_height.saturating_sub(1) / 2) as usize];
    lines.push(Line::from(button.label.as_str()).centered());

    let mut paragraph = Paragraph::new(lines).style(style);
    if bordered {
        paragraph = paragraph.block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Black)),
        );
    }

    frame.render_widget(paragraph, area);
}
