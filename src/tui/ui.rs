//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::App;
use crate::games::tictactoe::{Board, Mark, Position};
use crate::session::SessionError;

/// Renders the board, status line, and any session error.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(9),    // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Keys
        ])
        .split(area);

    let session = app.session();
    let title = match session.game_id() {
        Some(id) => format!("Strictly Relay - Tic Tac Toe ({})", id),
        None => "Strictly Relay - Tic Tac Toe".to_string(),
    };
    let title = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], session.board(), app.cursor());

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let keys = Paragraph::new("s: start  1-9/Enter: move  r: reset  q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(keys, chunks[3]);

    if let Some(error) = session.error() {
        draw_error(frame, area, error);
    }
}

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, cursor: Position) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, chunk) in [rows[0], rows[2], rows[4]].into_iter().enumerate() {
        draw_row(frame, chunk, board, cursor, row);
    }
    draw_separator(frame, rows[1]);
    draw_separator(frame, rows[3]);
}

fn draw_row(frame: &mut Frame, area: Rect, board: &Board, cursor: Position, row: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for (col, chunk) in [cols[0], cols[2], cols[4]].into_iter().enumerate() {
        if let Some(pos) = Position::from_index(row * 3 + col) {
            draw_cell(frame, chunk, board, cursor, pos);
        }
    }
    draw_separator_vertical(frame, cols[1]);
    draw_separator_vertical(frame, cols[3]);
}

fn draw_cell(frame: &mut Frame, area: Rect, board: &Board, cursor: Position, pos: Position) {
    let index = pos.to_index();
    let mark = board.get(index).and_then(|cell| cell.mark());

    let (symbol, base_style) = match mark {
        None => (
            format!(" {} ", index + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Some(Mark::X) => (
            " X ".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Some(Mark::O) => (
            " O ".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if pos == cursor {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph =
        Paragraph::new(Line::from(Span::styled(symbol, style))).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_error(frame: &mut Frame, area: Rect, error: &SessionError) {
    let hint = if error.is_connection_lost() {
        "Press 'r' to reconnect."
    } else {
        "The relay rejected the last request."
    };
    let text = vec![
        Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(hint),
    ];

    let popup = center_rect(area, 50, 4);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Error").borders(Borders::ALL)),
        popup,
    );
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![Line::from("│"); area.height as usize])
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Action, Session, reduce};
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_renders_title_and_status() {
        let app = App::new();
        let screen = render(&app);
        assert!(screen.contains("Strictly Relay"));
        assert!(screen.contains("Connecting..."));
    }

    #[test]
    fn test_renders_error_overlay() {
        let mut app = App::new();
        app.update_session(reduce(
            &Session::new(),
            &Action::SignalError(SessionError::ConnectionLost),
        ));
        let screen = render(&app);
        assert!(screen.contains("Error"));
        assert!(screen.contains("reconnect"));
    }
}
