//! Pointer input: on-screen direction pad and swipe gestures
//!
//! Mouse presses stand in for touches. A press on a pad button turns
//! immediately; a press elsewhere followed by a release far enough away is
//! read as a swipe along its dominant axis.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position as ScreenPosition, Rect};

use crate::game::Direction;

/// Terminal cells are roughly twice as tall as they are wide.
const ROW_ASPECT: i32 = 2;

const BUTTON_WIDTH: u16 = 7;

/// Rows a [`ControlPad`] needs
pub const PAD_HEIGHT: u16 = 5;

/// Four direction buttons arranged as a cross
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlPad {
    pub up: Rect,
    pub down: Rect,
    pub left: Rect,
    pub right: Rect,
}

impl ControlPad {
    /// Centre the cross inside `area`, clipping buttons that do not fit
    pub fn layout(area: Rect) -> Self {
        let center = area.x + area.width / 2;
        let half = BUTTON_WIDTH / 2;
        let middle_row = area.y + 2;

        let button = |x: u16, y: u16| Rect::new(x, y, BUTTON_WIDTH, 1).intersection(area);

        Self {
            up: button(center.saturating_sub(half), area.y),
            down: button(center.saturating_sub(half), area.y + 4),
            left: button(center.saturating_sub(half + BUTTON_WIDTH + 1), middle_row),
            right: button(center + half + 2, middle_row),
        }
    }

    pub fn buttons(&self) -> [(Direction, Rect); 4] {
        [
            (Direction::Up, self.up),
            (Direction::Down, self.down),
            (Direction::Left, self.left),
            (Direction::Right, self.right),
        ]
    }

    /// Button under the given cell, if any
    pub fn hit(&self, column: u16, row: u16) -> Option<Direction> {
        let point = ScreenPosition::new(column, row);
        self.buttons()
            .into_iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(direction, _)| direction)
    }
}

/// Turns press/release pairs into directional intents
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    start: Option<(u16, u16)>,
    min_distance: u16,
}

impl SwipeTracker {
    pub fn new(min_distance: u16) -> Self {
        Self {
            start: None,
            min_distance,
        }
    }

    pub fn handle_mouse_event(
        &mut self,
        event: MouseEvent,
        pad: &ControlPad,
    ) -> Option<Direction> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(direction) = pad.hit(event.column, event.row) {
                    self.start = None;
                    return Some(direction);
                }
                self.start = Some((event.column, event.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (start_col, start_row) = self.start.take()?;
                let dx = event.column as i32 - start_col as i32;
                let dy = (event.row as i32 - start_row as i32) * ROW_ASPECT;
                self.swipe_direction(dx, dy)
            }
            _ => None,
        }
    }

    fn swipe_direction(&self, dx: i32, dy: i32) -> Option<Direction> {
        let min = self.min_distance as i32;

        if dx.abs() > dy.abs() {
            if dx.abs() <= min {
                return None;
            }
            Some(if dx > 0 { Direction::Right } else { Direction::Left })
        } else {
            if dy.abs() <= min {
                return None;
            }
            Some(if dy > 0 { Direction::Down } else { Direction::Up })
        }
    }
}
