//! Terminal UI rendering with ratatui
//!
//! The presentation layer only reads core state (board, active piece,
//! score) and draws it; it never mutates the game.

use crate::game::Game;
use crate::settings::Settings;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const EMPTY: &str = "  ";

/// Width of the score/help panel to the right of the board
const PANEL_WIDTH: u16 = 18;

/// Render the whole game screen, with an optional game-over banner
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings, game_over: Option<u64>) {
    let area = frame.area();

    // Two terminal cells per grid cell, plus borders
    let board_width = game.board.width() as u16 * 2 + 2;
    let board_height = game.board.height() as u16 + 2;
    let game_area = center_rect(area, board_width + PANEL_WIDTH, board_height);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width),
            Constraint::Length(PANEL_WIDTH),
        ])
        .split(game_area);

    render_board(frame, layout[0], game, settings);
    render_panel(frame, layout[1], game);

    if let Some(final_score) = game_over {
        render_overlay(
            frame,
            area,
            "GAME OVER",
            &format!("Score: {}", final_score),
        );
    }
}

/// Render the board and the active piece overlay
fn render_board(frame: &mut Frame, area: Rect, game: &Game, settings: &Settings) {
    let block_char = settings.visual.block_chars();

    let block = Block::default()
        .title(" GRIDFALL ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    for (y, row) in game.board.rows().enumerate() {
        let mut spans = Vec::new();
        for (x, &cell) in row.iter().enumerate() {
            // The active piece draws over the settled grid
            let piece_cell = piece_cell_at(game, x as i32, y as i32);
            let id = piece_cell.unwrap_or(cell);

            match id.color() {
                Some(color) => spans.push(Span::styled(block_char, Style::default().fg(color))),
                None => spans.push(Span::raw(EMPTY)),
            }
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// The active piece's cell covering board coordinate (x, y), if any
fn piece_cell_at(game: &Game, x: i32, y: i32) -> Option<crate::tetromino::PieceId> {
    let piece = &game.piece;
    let sy = y - piece.y;
    let sx = x - piece.x;
    if sy < 0 || sx < 0 {
        return None;
    }
    let cell = *piece.shape.get(sy as usize)?.get(sx as usize)?;
    cell.is_filled().then_some(cell)
}

/// Render the score and controls panel
fn render_panel(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        "SCORE",
        Style::default().fg(Color::Gray),
    )));
    lines.push(Line::from(Span::styled(
        format!("{}", game.score.points),
        Style::default().fg(Color::Yellow).bold(),
    )));
    lines.push(Line::raw(""));
    if game.soft_drop_active() {
        lines.push(Line::from(Span::styled(
            "DROP",
            Style::default().fg(Color::Cyan),
        )));
        lines.push(Line::raw(""));
    }
    lines.push(Line::from(Span::styled(
        "←→ move",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "↑  rotate",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "↓  soft drop",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "q  quit",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render a centered overlay box with a title and subtitle
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let overlay = center_rect(area, 26, 5);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let lines = vec![
        Line::styled(title.to_string(), Style::default().fg(Color::Red).bold()),
        Line::raw(""),
        Line::styled(subtitle.to_string(), Style::default().fg(Color::White)),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
