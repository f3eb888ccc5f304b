use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::GridSize;
use crate::driver::Screen;
use crate::game::Snapshot;
use crate::input::Direction;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

const SNAKE_COLOR: Color = Color::Green;
const FRUIT_COLOR: Color = Color::Red;
const BORDER_COLOR: Color = Color::White;

const GLYPH_SNAKE_BODY: &str = "█";
const GLYPH_FRUIT: &str = "●";

/// Renders the full frame from a read-only snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, screen: Screen) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot);

    let block = Block::bordered().border_style(Style::new().fg(BORDER_COLOR));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_fruit(frame, inner, snapshot);
    render_snake(frame, inner, snapshot);

    match screen {
        Screen::Start => render_start_menu(frame, play_area),
        Screen::Paused => render_pause_menu(frame, play_area),
        Screen::GameOver => {
            render_game_over_menu(frame, play_area, snapshot.score, snapshot.over_reason);
        }
        Screen::Playing => {}
    }
}

fn render_fruit(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot) {
    let Some((x, y)) = logical_to_terminal(inner, snapshot.size, snapshot.fruit) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_FRUIT, Style::new().fg(FRUIT_COLOR));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot) {
    let buffer = frame.buffer_mut();
    let Some((head, body)) = snapshot.snake.split_first() else {
        return;
    };

    for segment in body {
        if let Some((x, y)) = logical_to_terminal(inner, snapshot.size, *segment) {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(SNAKE_COLOR));
        }
    }

    // Head goes last so it stays visible when it overlaps the body.
    if let Some((x, y)) = logical_to_terminal(inner, snapshot.size, *head) {
        buffer.set_string(
            x,
            y,
            head_glyph(snapshot.direction),
            Style::new().fg(SNAKE_COLOR).add_modifier(Modifier::BOLD),
        );
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::None => "■",
        Direction::Up => "▲",
        Direction::Down => "▼",
        Direction::Left => "◀",
        Direction::Right => "▶",
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
