use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthStr;

use crate::tap_counter::ToggleLabel;

const MARGIN: u16 = 1;
const STATUS_HEIGHT: u16 = 5; // three lines plus borders
const TOGGLE_HEIGHT: u16 = 3;
const BUTTON_MIN_WIDTH: u16 = 12;

/// Clickable regions of the tap screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Touch,
    Toggle,
}

/// Where each visual region of the tap screen sits for a given terminal area
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TapLayout {
    pub status: Rect,
    pub touch: Rect,
    pub toggle: Rect,
    pub help: Rect,
}

/// Wide enough for either label so the button does not jump when toggled
pub fn toggle_button_width() -> u16 {
    let widest = [ToggleLabel::Go, ToggleLabel::Pause]
        .iter()
        .map(|label| label.to_string().width())
        .max()
        .unwrap_or(0) as u16;
    (widest + 4).max(BUTTON_MIN_WIDTH)
}

impl TapLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(MARGIN)
            .constraints([
                Constraint::Length(STATUS_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(TOGGLE_HEIGHT),
                Constraint::Length(1),
            ])
            .split(area);

        let row = chunks[2];
        let width = toggle_button_width().min(row.width);
        let toggle = Rect {
            x: row.x + (row.width - width) / 2,
            y: row.y,
            width,
            height: row.height,
        };

        Self {
            status: chunks[0],
            touch: chunks[1],
            toggle,
            help: chunks[3],
        }
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<Region> {
        if contains(self.touch, column, row) {
            Some(Region::Touch)
        } else if contains(self.toggle, column, row) {
            Some(Region::Toggle)
        } else {
            None
        }
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}
