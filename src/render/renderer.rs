use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Direction, GameState, Phase, Position};
use crate::input::{ControlPad, PAD_HEIGHT};
use crate::metrics::GameMetrics;
use crate::session::GameSummary;

const BOARD_BG: Color = Color::Rgb(8, 8, 8);
const GRID_DOT: Color = Color::Rgb(40, 40, 40);

/// Everything besides the board that a frame shows
pub struct Hud<'a> {
    pub high_score: u32,
    pub metrics: &'a GameMetrics,
    pub last_game: Option<GameSummary>,
    /// Food brightness factor in `[0.4, 1.0]`
    pub pulse: f64,
}

/// Screen regions, shared between drawing and pointer hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub board: Rect,
    pub pad: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3),          // Header
                Constraint::Min(0),             // Board
                Constraint::Length(PAD_HEIGHT), // Direction pad
                Constraint::Length(3),          // Footer
            ])
            .split(area);

        Self {
            header: chunks[0],
            board: chunks[1],
            pad: chunks[2],
            footer: chunks[3],
        }
    }

    pub fn control_pad(&self) -> ControlPad {
        ControlPad::layout(self.pad)
    }

    /// Bordered board of `tile_count` cells, two columns per cell, centred
    pub fn board_rect(&self, tile_count: usize) -> Rect {
        let width = (tile_count as u16).saturating_mul(2).saturating_add(2);
        let height = (tile_count as u16).saturating_add(2);
        centered(self.board, width, height)
    }
}

/// Brightness of a body segment; the head is full white and the tail fades
/// down to a floor of 100.
pub fn body_brightness(index: usize) -> u8 {
    255usize.saturating_sub(index * 15).max(100) as u8
}

/// Food pulse for a point in time, in milliseconds
pub fn food_pulse(millis: u128) -> f64 {
    (millis as f64 * 0.01).sin() * 0.3 + 0.7
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, hud: &Hud) {
        let layout = ScreenLayout::new(frame.area());

        frame.render_widget(self.render_stats(state, hud), layout.header);

        let board = layout.board_rect(state.tile_count);
        frame.render_widget(self.render_grid(state, hud.pulse), board);

        match state.phase {
            Phase::Idle => self.render_banner(frame, board, "Press Enter to start", Color::Cyan),
            Phase::Paused => self.render_banner(frame, board, "PAUSED", Color::Yellow),
            Phase::GameOver => {
                if let Some(summary) = hud.last_game {
                    let modal = centered(board, 36, 9);
                    frame.render_widget(Clear, modal);
                    let best = hud.metrics.best_score;
                    frame.render_widget(self.render_game_over(&summary, best), modal);
                }
            }
            Phase::Running => {}
        }

        let pad = layout.control_pad();
        for (direction, rect) in pad.buttons() {
            frame.render_widget(self.render_button(direction), rect);
        }

        frame.render_widget(self.render_controls(), layout.footer);
    }

    fn render_grid(&self, state: &GameState, pulse: f64) -> Paragraph<'_> {
        let side = state.tile_count;

        // Segment index per cell, head first
        let mut occupancy = vec![None; side * side];
        for (index, segment) in state.snake.body.iter().enumerate() {
            if state.is_in_bounds(*segment) {
                occupancy[segment.y as usize * side + segment.x as usize] = Some(index);
            }
        }

        let food_level = (255.0 * pulse).clamp(0.0, 255.0) as u8;
        let mut lines = Vec::with_capacity(side);

        for y in 0..side {
            let mut spans = Vec::with_capacity(side);

            for x in 0..side {
                let pos = Position::new(x as i32, y as i32);

                let cell = match occupancy[y * side + x] {
                    Some(0) => Span::styled(
                        "██",
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Some(index) => {
                        let level = body_brightness(index);
                        Span::styled("██", Style::default().fg(Color::Rgb(level, level, level)))
                    }
                    None if state.food == Some(pos) => Span::styled(
                        "◆ ",
                        Style::default()
                            .fg(Color::Rgb(food_level, food_level, food_level))
                            .add_modifier(Modifier::BOLD),
                    ),
                    None => Span::styled("· ", Style::default().fg(GRID_DOT)),
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .style(Style::default().bg(BOARD_BG))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
    }

    fn render_stats(&self, state: &GameState, hud: &Hud) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(hud.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(hud.metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_banner(&self, frame: &mut Frame, board: Rect, message: &str, color: Color) {
        let width = message.chars().count() as u16 + 4;
        let area = centered(board, width, 3);

        let banner = Paragraph::new(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

        frame.render_widget(Clear, area);
        frame.render_widget(banner, area);
    }

    fn render_game_over(&self, summary: &GameSummary, session_best: u32) -> Paragraph<'_> {
        let title = if summary.cleared {
            Span::styled(
                "BOARD CLEARED",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        };

        let mut text = vec![
            Line::from(vec![title]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    summary.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if summary.new_high_score {
            text.push(Line::from(Span::styled(
                "New high score!",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )));
        } else {
            text.push(Line::from(vec![
                Span::styled("High Score: ", Style::default().fg(Color::Gray)),
                Span::raw(summary.high_score.to_string()),
            ]));
        }
        text.push(Line::from(vec![
            Span::styled("Session Best: ", Style::default().fg(Color::Gray)),
            Span::raw(session_best.to_string()),
        ]));

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::styled(" play again  ", Style::default().fg(Color::Gray)),
            Span::styled("R", Style::default().fg(Color::Cyan)),
            Span::styled(" reset  ", Style::default().fg(Color::Gray)),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::styled(" quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_button(&self, direction: Direction) -> Paragraph<'_> {
        let label = match direction {
            Direction::Up => "▲ up",
            Direction::Down => "▼ down",
            Direction::Left => "◀ left",
            Direction::Right => "right ▶",
        };

        Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White).bg(Color::DarkGray))
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" start | "),
            Span::styled("Space", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Cyan)),
            Span::raw(" reset | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
