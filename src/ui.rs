use crate::app::{App, MAIN_MENU_ITEMS};
use crate::app_state::AppState;
use crate::message::MessageType;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const ASCII_ART: &str = r#"
                                   /\
                                  /  \
                   /\            |    |
                  /  \           |    |
         o o o\  |    |   _/\_   |    |  /o o o
        -------\ |[][]|  |    |  |[][]| /-------
        |[]|[]| \|    |/\|[][]|/\|    |/|[]|[]|
 ____                  _   ____
/ __ \ _  _ ___  ___ _| |_|  __|__  _ _ __ _  ___
| |_| | || | -_)(_-<|_   _|  _/ _ \| '_/ _` |/ -_)
\___\_\\_,_|___|/__/  |_| |_| \___/|_| \__, |\___|
                                       |___/
"#;

pub fn draw(f: &mut Frame, app: &App) {
    match app.state {
        AppState::MainMenu => draw_main_menu(f, app),
        AppState::InGame => draw_in_game(f, app),
    }
}

fn draw_main_menu(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(16), // ASCII art
            Constraint::Min(6),     // Menu
            Constraint::Length(1),  // Status bar
        ])
        .split(f.area());

    let ascii_art = Paragraph::new(ASCII_ART)
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center);
    f.render_widget(ascii_art, chunks[0]);

    let menu_chunk = centered_rect(40, 60, chunks[1]);
    f.render_widget(Clear, menu_chunk);

    let text: Vec<Line> = MAIN_MENU_ITEMS
        .iter()
        .enumerate()
        .map(|(i, &item)| {
            if i == app.main_menu_index {
                Line::from(vec![
                    Span::styled(
                        "> ",
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        item,
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::raw(format!("  {}", item)))
            }
        })
        .collect();

    let menu = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Menu"));
    f.render_widget(menu, menu_chunk);

    let status = Paragraph::new("↑/↓ to navigate • Enter to select • q to quit")
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center);
    f.render_widget(status, chunks[2]);
}

fn draw_in_game(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Chat history
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_chat(f, app, chunks[0]);
    draw_input(f, app, chunks[1]);

    let status_text = if app.is_processing {
        "Waiting for the game master..."
    } else {
        "Enter to send • ↑/↓ to scroll • Esc to abandon the adventure"
    };
    let status = Paragraph::new(status_text)
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center);
    f.render_widget(status, chunks[2]);
}

fn draw_chat(f: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(2).max(1) as usize;
    let mut lines: Vec<Line> = Vec::new();

    for message in &app.game_content {
        let (text, style) = match message.message_type {
            MessageType::User => (
                format!("You: {}", message.content),
                Style::default().fg(Color::Cyan),
            ),
            MessageType::Assistant => (message.content.clone(), Style::default().fg(Color::Green)),
            MessageType::System => (
                message.content.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ),
        };
        // Wrap each source line separately so blank lines survive.
        for raw_line in text.lines() {
            if raw_line.is_empty() {
                lines.push(Line::raw(""));
                continue;
            }
            for wrapped in textwrap::wrap(raw_line, width) {
                lines.push(Line::styled(wrapped.into_owned(), style));
            }
        }
        lines.push(Line::raw(""));
    }

    // Stick to the bottom unless the player scrolled up.
    let visible = area.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(visible);
    let from_top = max_scroll.saturating_sub(app.scroll_offset.min(max_scroll));

    let title = format!("Adventure — {}", app.settings.model);
    let chat = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((from_top as u16, 0));
    f.render_widget(chat, area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL).title("Your action"));
    f.render_widget(input, area);

    let cursor_x = area.x + 1 + app.input.chars().count() as u16;
    f.set_cursor_position(Position::new(cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
