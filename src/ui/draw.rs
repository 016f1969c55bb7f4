// ui/draw.rs

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use super::{chat, leaderboard, spinner::spinner_frame};
use crate::app::App;

pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 24;

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        let warning = Paragraph::new("Terminal too small. Please resize.")
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(warning, size);
        return;
    }

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(size);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(main_chunks[0]);

    chat::draw_chat(f, app, left_chunks[0]);
    chat::draw_input(f, app, left_chunks[1]);
    leaderboard::draw_leaderboard(f, app, main_chunks[1]);

    if app.spinner_active {
        let spinner_area = Rect::new(
            left_chunks[0].x + 1,
            left_chunks[0].bottom().saturating_sub(1),
            left_chunks[0].width.saturating_sub(2),
            1,
        );
        let spinner_widget = Paragraph::new(spinner_frame(&app.spinner))
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center);
        f.render_widget(spinner_widget, spinner_area);
    }
}
