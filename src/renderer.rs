use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::Rgb;
use crate::game::Snapshot;
use crate::grid::GridSize;
use crate::snake::Position;
use crate::state::GameStatus;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Terminal columns per grid cell, so cells look roughly square.
pub const CELL_WIDTH: u16 = 2;

const GLYPH_SEGMENT: &str = "██";
const GLYPH_FOOD: &str = "●";
const BORDER_COLOR: Color = Color::Rgb(255, 105, 180);
const PULSE_PERIOD_TICKS: u64 = 8;

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot);
    let board = board_rect(play_area, snapshot.grid);

    let block = Block::bordered().border_style(Style::new().fg(BORDER_COLOR));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_food(frame, inner, snapshot);
    render_snake(frame, inner, snapshot);

    match snapshot.status {
        GameStatus::Start => render_start_menu(frame, board),
        GameStatus::Paused => render_pause_menu(frame, board),
        GameStatus::GameOver => render_game_over_menu(frame, board, snapshot),
        GameStatus::Playing => {}
    }
}

/// Centres the bordered board inside `area`, clipping when the terminal is too small.
#[must_use]
pub fn board_rect(area: Rect, grid: GridSize) -> Rect {
    let width = grid
        .width
        .saturating_mul(CELL_WIDTH)
        .saturating_add(2)
        .min(area.width);
    let height = grid.height.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>) {
    let buffer = frame.buffer_mut();
    for food in snapshot.foods {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, food.position) else {
            continue;
        };

        let color = pulse_color(food.color, snapshot.tick_count, food.pulse_phase);
        buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(to_color(color)));
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>) {
    let style = Style::new().fg(to_color(snapshot.snake_color));
    let head_style = style.add_modifier(Modifier::BOLD);
    let head = snapshot.snake.head();

    let buffer = frame.buffer_mut();
    for segment in snapshot.body() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, segment) else {
            continue;
        };
        let style = if segment == head { head_style } else { style };
        buffer.set_string(x, y, GLYPH_SEGMENT, style);
    }
}

/// Food brightness oscillates between 60% and 100% over a short tick cycle.
fn pulse_color(base: Rgb, tick: u64, phase: u8) -> Rgb {
    let step = (tick + u64::from(phase)) % PULSE_PERIOD_TICKS;
    let half = PULSE_PERIOD_TICKS / 2;
    let distance = step.abs_diff(half) as f32 / half as f32;
    base.dimmed(0.6 + 0.4 * distance)
}

#[must_use]
pub fn to_color(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
