use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::collision::Collision;
use crate::game::Snapshot;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let [title_row, body_row] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(3)]).areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body = vec![
        Line::from("Press any key to start"),
        Line::from(""),
        Line::from("Arrows/WASD move"),
        Line::from("[P] Pause  [Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 60, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[P] Resume"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot<'_>) {
    let popup = centered_popup(area, 80, 70);
    frame.render_widget(Clear, popup);

    frame.render_widget(
        Paragraph::new(game_over_lines(snapshot))
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn game_over_lines(snapshot: &Snapshot<'_>) -> Vec<Line<'static>> {
    vec![
        Line::from("GAME OVER"),
        Line::from(""),
        Line::from(format!("Score: {}", snapshot.score)),
        Line::from(format!("Multiplier: {}", snapshot.multiplier)),
        Line::from(match snapshot.death_reason {
            Some(Collision::Wall) => "Cause: hit wall",
            Some(Collision::SelfCollision) => "Cause: hit yourself",
            None => "",
        }),
        Line::from(""),
        Line::from("[R] Restart  [Q] Quit"),
    ]
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
