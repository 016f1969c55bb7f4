use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::App;
use crate::message::MessageType;

pub fn draw_chat(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::bordered().title(" Chat with Julenissen ");
    let inner = block.inner(area);
    let width = inner.width.max(1) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for message in &app.chat_content {
        let (speaker, style) = match message.message_type {
            MessageType::User => ("You", Style::default().fg(Color::Cyan)),
            MessageType::Santa => ("Julenissen", Style::default().fg(Color::Green)),
            MessageType::System => ("System", Style::default().fg(Color::Yellow)),
        };
        lines.push(Line::from(Span::styled(
            format!("{}:", speaker),
            style.add_modifier(Modifier::BOLD),
        )));
        for wrapped in wrap_text(&message.content, width) {
            lines.push(Line::from(Span::styled(wrapped, style)));
        }
        lines.push(Line::default());
    }

    // scroll_offset counts lines up from the bottom; the transcript follows
    // the newest message unless the user scrolled away.
    let total = lines.len();
    let height = inner.height as usize;
    let max_scroll = total.saturating_sub(height);
    app.scroll_offset = app.scroll_offset.min(max_scroll);
    let position = max_scroll - app.scroll_offset;

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((position as u16, 0));
    f.render_widget(paragraph, area);
}

pub fn draw_input(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::bordered().title(" Write your message to Santa here ");
    let inner = block.inner(area);
    let width = inner.width.max(1) as usize;

    // Show the tail of the input when it outgrows the line.
    let chars: Vec<char> = app.input.chars().collect();
    let start = chars.len().saturating_sub(width.saturating_sub(1));
    let shown: String = chars[start..].iter().collect();

    let paragraph = Paragraph::new(shown.as_str()).block(block);
    f.render_widget(paragraph, area);
    f.set_cursor_position(Position::new(
        inner.x + shown.chars().count() as u16,
        inner.y,
    ));
}

// Plain word wrap; long words overflow their line and get clipped by the
// paragraph rather than split mid-word.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        if raw_line.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}
