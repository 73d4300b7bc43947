//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row as TableRow, Table, TableState, Wrap},
    Frame,
};

use snipe_core::{BadgeClass, Row};

use super::app::{App, InputMode};

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_course_input(frame, app, chunks[0]);
    draw_task_table(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    if app.show_help {
        draw_help_overlay(frame);
    }

    // Confirmations outrank alerts; only the oldest of each is visible
    if let Some(pending) = app.confirms.front() {
        draw_modal(frame, " Confirm ", &pending.prompt, "y: yes   n/Esc: no");
    } else if let Some(message) = app.alerts.front() {
        draw_modal(frame, " Notice ", message, "Press any key to close");
    }
}

/// Draw the course-name input and the add control
fn draw_course_input(frame: &mut Frame, app: &App, area: Rect) {
    let label = app.add_button_label();
    let button_width = label.chars().count() as u16 + 4;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(button_width)])
        .split(area);

    let editing = app.input_mode == InputMode::Editing;
    let border_style = if editing {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let input = if app.course_input.is_empty() && !editing {
        Paragraph::new(Span::styled(
            "e.g. COMP SCI 577",
            Style::default().add_modifier(Modifier::DIM),
        ))
    } else {
        Paragraph::new(app.course_input.as_str())
    };

    let input = input.block(
        Block::default()
            .title(" Course ")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(input, chunks[0]);

    let button_style = if app.add_busy {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };
    let button = Paragraph::new(Span::styled(label, button_style))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, chunks[1]);

    if editing {
        let cursor_x = chunks[0].x + 1 + app.input_cursor as u16;
        frame.set_cursor_position((cursor_x, chunks[0].y + 1));
    }
}

/// Draw the task table
fn draw_task_table(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.total {
        Some(total) => format!(" Tasks ({}) ", total),
        None => " Tasks ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if app.input_mode == InputMode::Normal {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        });

    // Placeholder and error rows span the whole table
    if app.rows.iter().all(|row| row.as_task().is_none()) {
        let lines: Vec<Line> = app
            .rows
            .iter()
            .filter_map(|row| match row {
                Row::Placeholder { message } => Some(Line::from(Span::styled(
                    message.clone(),
                    Style::default().add_modifier(Modifier::DIM),
                ))),
                Row::Error { message } => Some(Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(Color::Red),
                ))),
                Row::Task(_) => None,
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let header = TableRow::new(["Course", "Section", "Status", "Enabled", "Delete"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<TableRow> = app
        .rows
        .iter()
        .filter_map(Row::as_task)
        .map(|task| {
            let enabled = if task.enabled { "[x]" } else { "[ ]" };
            TableRow::new(vec![
                Cell::from(Span::styled(
                    task.course_display_name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Cell::from(task.section_id.clone()),
                Cell::from(Span::styled(
                    task.status_label.clone(),
                    badge_style(task.badge),
                )),
                Cell::from(enabled),
                Cell::from(Span::styled("✗", Style::default().fg(Color::Red))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(35),
        Constraint::Percentage(15),
        Constraint::Percentage(20),
        Constraint::Percentage(15),
        Constraint::Percentage(15),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(table, area, &mut state);
}

fn badge_style(badge: BadgeClass) -> Style {
    let color = match badge {
        BadgeClass::Open => Color::Green,
        BadgeClass::Waitlist => Color::Yellow,
        BadgeClass::Closed => Color::Red,
        BadgeClass::Unknown => Color::DarkGray,
    };
    Style::default().fg(color)
}

/// Draw the status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = if let Some(msg) = &app.status_message {
        msg.clone()
    } else {
        match app.input_mode {
            InputMode::Normal => {
                "a:add  space:toggle  d:delete  r:refresh  ?:help  q:quit".to_string()
            }
            InputMode::Editing => "Enter:snipe  Esc:back".to_string(),
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Centered popup area of at most `width` x `height`
fn popup_area(frame: &Frame, width: u16, height: u16) -> Rect {
    let area = frame.area();
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

/// Draw an alert or confirmation
fn draw_modal(frame: &mut Frame, title: &str, message: &str, hint: &str) {
    let area = popup_area(frame, 60, 7);
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            hint.to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let area = popup_area(frame, 46, 18);
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  j/k, ↑/↓    Move up/down"),
        Line::from("  g/G         Jump to first/last"),
        Line::from(""),
        Line::from("Tasks:"),
        Line::from("  a, /        Type a course name"),
        Line::from("  Enter       Snipe the course"),
        Line::from("  Esc         Leave the input"),
        Line::from("  space, t    Toggle monitoring"),
        Line::from("  d           Delete course"),
        Line::from("  r           Refresh"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use snipe_core::render::{error_rows, render, EMPTY_PLACEHOLDER, LOAD_ERROR_MESSAGE};
    use snipe_core::{SectionStatus, Task};

    use crate::tui::surface::UiEvent;

    fn screen(app: &App) -> String {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_draws_tasks_with_total() {
        let mut app = App::new();
        app.apply(UiEvent::Tasks {
            rows: render(vec![
                Task::new(1, "COMP SCI 577", "60035").with_status(SectionStatus::Open)
            ]),
            total: 1,
        });

        let screen = screen(&app);
        assert!(screen.contains("Tasks (1)"));
        assert!(screen.contains("COMP SCI 577"));
        assert!(screen.contains("OPEN"));
        assert!(screen.contains("Snipe!"));
    }

    #[test]
    fn test_draws_placeholder_and_error() {
        let mut app = App::new();
        app.apply(UiEvent::Tasks {
            rows: render(Vec::new()),
            total: 0,
        });
        assert!(screen(&app).contains(EMPTY_PLACEHOLDER));

        app.apply(UiEvent::LoadFailed(error_rows()));
        assert!(screen(&app).contains(LOAD_ERROR_MESSAGE));
    }

    #[test]
    fn test_draws_busy_label_and_alert() {
        let mut app = App::new();
        app.apply(UiEvent::AddBusy(true));
        app.apply(UiEvent::Alert("Sniper deployed!".to_string()));

        let screen = screen(&app);
        assert!(screen.contains("Searching..."));
        assert!(screen.contains("Sniper deployed!"));
    }
}
