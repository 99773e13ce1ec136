pub mod layout;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};

use crate::{
    clock::Clock,
    screen::TapScreen,
    tap_counter::{TapState, ToggleLabel},
    App,
};
use self::layout::TapLayout;

const HELP: &str = "space/click: tap   enter/p: go/pause   r: reset   q: quit";

/// Render the current screen and remember where its regions landed so
/// mouse clicks can be routed.
pub fn draw<C: Clock + Clone>(app: &mut App<C>, f: &mut Frame) {
    let area = f.area();
    app.screen_mut().remember_layout(TapLayout::new(area));
    f.render_widget(app.screen(), area);
}

fn touch_hint(state: TapState) -> &'static str {
    match state {
        TapState::Idle => "Tap here to start",
        TapState::Running => "Tap here",
        TapState::Paused => "Paused - tap here to resume",
    }
}

impl<C: Clock> Widget for &TapScreen<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = TapLayout::new(area);
        let state = self.counter().state();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let accent = match state {
            TapState::Idle => Color::DarkGray,
            TapState::Running => Color::Green,
            TapState::Paused => Color::Yellow,
        };

        let status_lines: Vec<Line> = self
            .status_text()
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect();
        Paragraph::new(status_lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", state)),
            )
            .render(layout.status, buf);

        let touch_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent));
        let inner = touch_block.inner(layout.touch);
        touch_block.render(layout.touch, buf);

        // vertically center the hint inside the tap area
        let hint_area = Rect {
            y: inner.y + inner.height / 2,
            height: inner.height.min(1),
            ..inner
        };
        Paragraph::new(Span::styled(touch_hint(state), bold_style.fg(accent)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(hint_area, buf);

        let label = self.toggle_label();
        let label_style = match label {
            ToggleLabel::Go => bold_style.fg(Color::Green),
            ToggleLabel::Pause => bold_style.fg(Color::Yellow),
        };
        Paragraph::new(Span::styled(label.to_string(), label_style))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
            .render(layout.toggle, buf);

        Paragraph::new(Span::styled(
            HELP,
            Style::default().add_modifier(Modifier::DIM),
        ))
        .alignment(Alignment::Center)
        .render(layout.help, buf);
    }
}
