use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{CollisionType, GameSession, Position};
use crate::metrics::GameMetrics;

/// What occupies a grid cell, as far as drawing is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Head,
    Body,
    Fruit,
    Empty,
}

/// Draws a session; never mutates it
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, session: &GameSession, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(session, metrics), chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if session.is_active() {
            frame.render_widget(self.render_grid(session), game_area);
        } else {
            frame.render_widget(self.render_game_over(session, metrics), game_area);
        }

        frame.render_widget(self.render_controls(session), chunks[2]);
    }

    /// Classify one cell; the head wins over a body segment on the same cell
    pub fn cell_kind(session: &GameSession, pos: Position) -> CellKind {
        let snake = session.snake();
        if pos == snake.head() {
            CellKind::Head
        } else if snake.occupies(pos) {
            CellKind::Body
        } else if pos == session.fruit() {
            CellKind::Fruit
        } else {
            CellKind::Empty
        }
    }

    /// One line per grid row, each cell `cell_width` columns wide
    pub fn grid_lines(session: &GameSession) -> Vec<Line<'static>> {
        let size = session.grid_size() as i32;
        let width = session.config().cell_width as usize;

        (0..size)
            .map(|y| {
                let spans: Vec<Span> = (0..size)
                    .map(|x| Self::cell_span(Self::cell_kind(session, Position::new(x, y)), width))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn cell_span(kind: CellKind, width: usize) -> Span<'static> {
        let (glyph, style) = match kind {
            CellKind::Head => (
                '■',
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            CellKind::Body => ('□', Style::default().fg(Color::Green)),
            CellKind::Fruit => (
                'O',
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            CellKind::Empty => ('.', Style::default().fg(Color::DarkGray)),
        };

        // Glyph in the first column, padding in the rest
        let mut text = String::with_capacity(width * 3);
        text.push(glyph);
        text.extend(std::iter::repeat_n(' ', width.saturating_sub(1)));
        Span::styled(text, style)
    }

    fn render_grid(&self, session: &GameSession) -> Paragraph<'static> {
        Paragraph::new(Self::grid_lines(session))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, session: &GameSession, metrics: &GameMetrics) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.best_score.max(session.score()).to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, session: &GameSession, metrics: &GameMetrics) -> Paragraph<'static> {
        let cause = match session.collision() {
            Some(CollisionType::Wall) => "You hit the wall",
            Some(CollisionType::SelfCollision) => "You ran into yourself",
            None => "",
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(Span::styled(cause, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("SCORE: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    session.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Games: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "PRESS ANY KEY TO RESTART",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, session: &GameSession) -> Paragraph<'static> {
        let line = if session.is_active() {
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        } else {
            Line::from(vec![
                Span::styled("Any key", Style::default().fg(Color::Green)),
                Span::raw(" to play again | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        };

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
