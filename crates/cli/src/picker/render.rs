use super::state::PickerState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

const PROMPT: &str = "> ";

/// Draw the whole picker into `frame`
pub fn render(frame: &mut Frame<'_>, state: &PickerState<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_query(frame, chunks[0], state);
    render_rows(frame, chunks[1], state);
    render_footer(frame, chunks[2], state);
}

fn render_query(frame: &mut Frame<'_>, area: Rect, state: &PickerState<'_>) {
    let title = if state.is_multi() {
        " Select tasks "
    } else {
        " Select a task "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);

    let line = Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(Color::Cyan)),
        Span::raw(state.query()),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);

    let width = (PROMPT.chars().count() + state.query().chars().count()) as u16;
    frame.set_cursor_position((inner.x + width.min(inner.width), inner.y));
}

fn render_rows(frame: &mut Frame<'_>, area: Rect, state: &PickerState<'_>) {
    let tasks = state.tasks();

    if state.matches().is_empty() {
        let empty = Paragraph::new("  No matching tasks").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let name_width = state
        .visible()
        .map(|(_, index)| tasks[index].qualified_name().chars().count())
        .max()
        .unwrap_or(0)
        .min(40) as u16;

    let rows: Vec<Row> = state
        .visible()
        .map(|(position, index)| {
            let task = &tasks[index];
            let is_cursor = position == state.cursor();

            let marker = match (state.is_multi(), state.selection_order(index)) {
                (true, Some(order)) => format!("[{order}]"),
                (true, None) => "[ ]".to_string(),
                (false, _) if is_cursor => ">".to_string(),
                (false, _) => String::new(),
            };

            let (name_style, command_style) = if is_cursor {
                (
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::REVERSED),
                    Style::default().fg(Color::Gray),
                )
            } else {
                (
                    Style::default().fg(Color::Cyan),
                    Style::default().fg(Color::DarkGray),
                )
            };

            Row::new(vec![
                Cell::from(marker).style(Style::default().fg(Color::Yellow)),
                Cell::from(task.qualified_name()).style(name_style),
                Cell::from(task.command.clone()).style(command_style),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(name_width),
            Constraint::Min(0),
        ],
    )
    .column_spacing(2);

    frame.render_widget(table, area);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, state: &PickerState<'_>) {
    let mut text = format!(" {}/{}", state.matches().len(), state.tasks().len());
    if state.is_multi() {
        text.push_str(&format!("  {} selected  tab toggle", state.selected().len()));
    }
    text.push_str("  enter run  esc quit");

    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
