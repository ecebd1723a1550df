use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::game::Snapshot;
use crate::renderer::to_color;

const HUD_SEPARATOR: &str = " │ ";

/// Renders the single-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot<'_>) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(info_line(snapshot, usize::from(hud_area.width)))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        hud_area,
    );

    play_area
}

fn info_line(snapshot: &Snapshot<'_>, available_width: usize) -> Line<'static> {
    let values = [
        snapshot.score.to_string(),
        snapshot.multiplier.to_string(),
        snapshot.snake.len().to_string(),
        snapshot.speed_level.to_string(),
    ];
    let compact = line_width(&FULL_LABELS, &values) > available_width;
    let labels = if compact { &COMPACT_LABELS } else { &FULL_LABELS };
    let value_style = Style::default().fg(Color::White);
    let score_style = Style::default().fg(to_color(snapshot.snake_color));

    let mut spans = Vec::with_capacity(values.len() * 3);
    for (idx, (label, value)) in labels.iter().zip(values).enumerate() {
        if idx > 0 {
            spans.push(Span::raw(HUD_SEPARATOR));
        }
        spans.push(Span::raw(format!("{label}: ")));
        let style = if idx == 0 { score_style } else { value_style };
        spans.push(Span::styled(value, style));
    }

    Line::from(spans)
}

const FULL_LABELS: [&str; 4] = ["Score", "Multiplier", "Length", "Speed"];
const COMPACT_LABELS: [&str; 4] = ["S", "x", "L", "V"];

fn line_width(labels: &[&str; 4], values: &[String; 4]) -> usize {
    let separators = HUD_SEPARATOR.width() * (labels.len() - 1);
    labels
        .iter()
        .zip(values)
        .map(|(label, value)| label.width() + 2 + value.width())
        .sum::<usize>()
        + separators
}
