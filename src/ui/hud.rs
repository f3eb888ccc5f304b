use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::PLAY_AREA_MARGIN_X;
use crate::game::Snapshot;

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(info_line(snapshot))
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        inset_horizontal(hud_area, PLAY_AREA_MARGIN_X),
    );

    play_area
}

fn info_line(snapshot: &Snapshot) -> Line<'static> {
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::raw("Score "),
        Span::styled(snapshot.score.to_string(), value),
        Span::raw("  Length "),
        Span::styled(snapshot.snake.len().to_string(), value),
        Span::raw("  Board "),
        Span::styled(
            format!("{}x{}", snapshot.size.width, snapshot.size.height),
            value,
        ),
    ])
}

pub(crate) fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}
