use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::GridSize;
use crate::game::{GameState, GameStatus};
use crate::input::Direction;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::render_game_over_menu;

/// Rows taken by the HUD line and the playfield border.
const CHROME_ROWS: u16 = 3;
/// Columns taken by the playfield border.
const CHROME_COLUMNS: u16 = 2;

const GLYPH_FOOD: &str = "●";
const GLYPH_SNAKE_BODY: &str = "■";
const GLYPH_SNAKE_HEAD_UP: &str = "▲";
const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState) {
    let area = frame.area();
    let available = render_hud(frame, area, state);
    let play_area = playfield_rect(available, state);

    let block = Block::bordered().border_style(Style::new().fg(Color::White));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, state);
    render_snake(frame, inner, state);

    if state.status() == GameStatus::Terminated {
        render_game_over_menu(frame, play_area, state.score(), state.death_reason());
    }
}

/// Terminal `(columns, rows)` needed to show the whole playfield.
#[must_use]
pub fn required_terminal_size(bounds: GridSize, segment_size: u16) -> (u16, u16) {
    (
        bounds.columns(segment_size).saturating_add(CHROME_COLUMNS),
        bounds.rows(segment_size).saturating_add(CHROME_ROWS),
    )
}

/// Largest playfield whose grid fits a terminal of `columns × rows`.
#[must_use]
pub fn playfield_for_terminal(columns: u16, rows: u16, segment_size: u16) -> GridSize {
    GridSize {
        width: columns
            .saturating_sub(CHROME_COLUMNS)
            .saturating_mul(segment_size),
        height: rows.saturating_sub(CHROME_ROWS).saturating_mul(segment_size),
    }
}

/// Bordered rectangle sized to the playfield grid, clipped to `available`.
fn playfield_rect(available: Rect, state: &GameState) -> Rect {
    let segment_size = state.config().segment_size;
    let bounds = state.bounds();
    let width = bounds.columns(segment_size).saturating_add(2);
    let height = bounds.rows(segment_size).saturating_add(2);

    Rect {
        x: available.x,
        y: available.y,
        width: width.min(available.width),
        height: height.min(available.height),
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let segment_size = state.config().segment_size;
    let buffer = frame.buffer_mut();

    for position in state.food_positions() {
        let Some((x, y)) = logical_to_terminal(inner, segment_size, position) else {
            continue;
        };
        buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(Color::Red));
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let snake = state.snake();
    let segment_size = snake.segment_size();
    let buffer = frame.buffer_mut();

    // Tail first so the head wins when cells overlap.
    for segment in snake.segments().skip(1).rev() {
        let Some((x, y)) = logical_to_terminal(inner, segment_size, *segment) else {
            continue;
        };
        buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(Color::Green));
    }

    if let Some((x, y)) = logical_to_terminal(inner, segment_size, snake.head()) {
        buffer.set_string(
            x,
            y,
            head_glyph(snake.direction()),
            Style::new()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        );
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

/// Maps a playfield position to a terminal cell inside `inner`.
fn logical_to_terminal(inner: Rect, segment_size: u16, position: Position) -> Option<(u16, u16)> {
    if position.x < 0 || position.y < 0 {
        return None;
    }

    let pitch = i32::from(segment_size.max(1));
    let column = u16::try_from(position.x / pitch).ok()?;
    let row = u16::try_from(position.y / pitch).ok()?;

    let x = inner.x.saturating_add(column);
    let y = inner.y.saturating_add(row);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
