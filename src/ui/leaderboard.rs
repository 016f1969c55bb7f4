use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Paragraph},
};

use crate::app::App;
use crate::store::NameScore;

// Top ten nicest and naughtiest names, straight from the store, no cached
// copy.
pub fn draw_leaderboard(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_list(
        f,
        chunks[0],
        " Top 10 nice names ",
        &app.nice_top,
        Color::Green,
        "No names on the nice list yet!",
    );
    render_list(
        f,
        chunks[1],
        " Top 10 naughty names ",
        &app.naughty_top,
        Color::Red,
        "No names on the naughty list yet!",
    );
}

fn render_list(
    f: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[NameScore],
    color: Color,
    empty_message: &str,
) {
    let lines: Vec<Line> = if rows.is_empty() {
        vec![Line::from(empty_message.to_string())]
    } else {
        rows.iter()
            .enumerate()
            .map(|(i, row)| Line::from(format!("{}) {} ({} points)", i + 1, row.name, row.nice_meter)))
            .collect()
    };

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(color))
        .block(Block::bordered().title(title.to_string()));
    f.render_widget(paragraph, area);
}
