use crate::model::Task;
use crate::tui::state::{AppState, InputMode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

fn priority_style(priority: &str) -> Style {
    match priority.to_lowercase().as_str() {
        "high" | "urgent" => Style::default().fg(Color::Red),
        "medium" => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(Color::White),
    }
}

/// The lines of one task block: title, description (when present), and a
/// priority / Done-or-Pending meta line.
pub fn task_lines(task: &Task) -> Vec<Line<'static>> {
    let style = priority_style(&task.priority);
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    let due_str = match task.due_date {
        Some(d) => format!(" ({})", d.format("%d/%m")),
        None => "".to_string(),
    };

    let mut lines = vec![Line::from(vec![Span::styled(
        format!("{} {}{}", checkbox, task.title, due_str),
        style.add_modifier(Modifier::BOLD),
    )])];

    if !task.description.is_empty() {
        lines.push(Line::from(format!("    {}", task.description)));
    }

    let priority = if task.priority.is_empty() {
        "-".to_string()
    } else {
        task.priority.clone()
    };
    lines.push(Line::from(vec![Span::styled(
        format!("    {} | {}", priority, task.status_label()),
        Style::default().fg(Color::DarkGray),
    )]));

    lines
}

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(v_chunks[0]);

    // --- Task List ---
    let task_items: Vec<ListItem> = state
        .view_indices
        .iter()
        .map(|&idx| ListItem::new(task_lines(&state.tasks[idx])))
        .collect();

    let title = if state.loading {
        format!(" Tasks (Page {}, Loading...) ", state.page)
    } else {
        format!(
            " Tasks (Page {}, {} shown, {}) ",
            state.page,
            state.view_indices.len(),
            state.filter.label()
        )
    };
    let task_list = List::new(task_items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        );
    f.render_stateful_widget(task_list, main_chunks[0], &mut state.list_state);

    // --- Details Pane ---
    let details_text = if let Some(idx) = state.get_selected_master_index() {
        let task = &state.tasks[idx];
        let mut text = if task.description.is_empty() {
            "No description.".to_string()
        } else {
            task.description.clone()
        };
        let priority = if task.priority.is_empty() {
            "-"
        } else {
            task.priority.as_str()
        };
        text.push_str(&format!(
            "\n\nPriority: {}\nStatus: {}",
            priority,
            task.status_label()
        ));
        if let Some(due) = task.due_date {
            text.push_str(&format!("\nDue: {}", due.format("%Y-%m-%d %H:%M")));
        }
        if let Some(created) = task.created_at {
            text.push_str(&format!("\nCreated: {}", created.format("%Y-%m-%d %H:%M")));
        }
        if let Some(updated) = task.updated_at {
            text.push_str(&format!("\nUpdated: {}", updated.format("%Y-%m-%d %H:%M")));
        }
        text
    } else {
        "".to_string()
    };

    let details = Paragraph::new(details_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    f.render_widget(details, main_chunks[1]);

    // --- Footer / Input ---
    let footer_area = v_chunks[1];
    match state.mode {
        InputMode::Searching | InputMode::PriorityFilter => {
            let (title, prefix, color) = match state.mode {
                InputMode::PriorityFilter => (" Priority Filter ", "> ", Color::Magenta),
                _ => (" Search ", "/ ", Color::Green),
            };
            let input = Paragraph::new(format!("{}{}", prefix, state.input_buffer))
                .style(Style::default().fg(color))
                .block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(input, footer_area);
            let cursor_x =
                footer_area.x + 1 + prefix.chars().count() as u16 + state.cursor_position as u16;
            let cursor_y = footer_area.y + 1;
            f.set_cursor_position((cursor_x, cursor_y));
        }
        InputMode::Normal => {
            let f_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(footer_area);
            let status_color = if state.message.starts_with("Error") {
                Color::Red
            } else {
                Color::Cyan
            };
            let status = Paragraph::new(state.message.clone())
                .style(Style::default().fg(status_color))
                .block(
                    Block::default()
                        .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                        .title(" Status "),
                );
            let help_text = "n/p:Page | r:Reload | /:Find | c:Status | f:Prio | q:Quit";
            let help = Paragraph::new(help_text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Right)
                .block(
                    Block::default()
                        .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                        .title(" Actions "),
                );
            f.render_widget(status, f_chunks[0]);
            f.render_widget(help, f_chunks[1]);
        }
    }
}
