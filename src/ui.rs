//! Terminal UI rendering with ratatui

use crate::board::{BOARD_WIDTH, Cell};
use crate::difficulty::Difficulty;
use crate::game::Game;
use crate::menu::Menu;
use crate::piece::Piece;
use crate::store::HighScoreStore;
use crate::tetromino::ColorIndex;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const BLOCK: &str = "██";
const EMPTY: &str = "  ";

/// Total width needed: board(22) + next/stats(18) = 40
const GAME_WIDTH: u16 = 40;
/// Total height needed: board(20) + 2 for borders = 22
const GAME_HEIGHT: u16 = 22;

/// Terminal color for a cell value, `None` for an empty cell
fn palette(value: u8) -> Option<Color> {
    let color = match value {
        0 => return None,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Blue,
        4 => Color::Yellow,
        5 => Color::Cyan,
        6 => Color::Magenta,
        _ => Color::Rgb(255, 165, 0), // Orange
    };
    Some(color)
}

fn cell_span(value: u8) -> Span<'static> {
    match palette(value) {
        Some(color) => Span::styled(BLOCK, Style::default().fg(color)),
        None => Span::raw(EMPTY),
    }
}

fn piece_value(color: ColorIndex) -> u8 {
    Cell::Filled(color).value()
}

/// Render the main menu
pub fn render_menu(frame: &mut Frame, menu: &Menu) {
    let area = frame.area();
    let menu_area = center_rect(area, 36, 20);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(menu_area);

    let title = Paragraph::new(vec![
        Line::raw(""),
        Line::styled("D R O P R I S", Style::default().fg(Color::Cyan).bold()),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, layout[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(layout[1]);
    frame.render_widget(block, layout[1]);

    let mut lines = vec![Line::raw("")];
    for (i, item) in menu.items.iter().enumerate() {
        let line = if i == menu.selected {
            Line::styled(format!("▶ {}", item.label), Style::default().fg(Color::Yellow).bold())
        } else {
            Line::styled(format!("  {}", item.label), Style::default().fg(Color::White))
        };
        lines.push(line);
    }

    lines.push(Line::styled(
        menu.selected_description().unwrap_or_default(),
        Style::default().fg(Color::DarkGray),
    ));

    lines.push(Line::raw(""));
    lines.push(Line::styled("BEST SCORES", Style::default().fg(Color::Gray)));
    for &difficulty in Difficulty::all() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<8}", difficulty.name()), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:>8}", menu.high_scores.get(difficulty)),
                Style::default().fg(Color::Yellow),
            ),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "↑↓ select  Enter start  q quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render a game in progress. `show_game_over` draws the final-score popup
pub fn render_game<S: HighScoreStore>(frame: &mut Frame, game: &Game<S>, show_game_over: bool) {
    let area = frame.area();
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22), // Board (10*2 + 2 for borders)
            Constraint::Length(18), // Next piece + stats
        ])
        .split(game_area);

    render_board(frame, main_layout[0], game);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Next piece
            Constraint::Min(8),    // Stats
        ])
        .split(main_layout[1]);

    render_next(frame, right_layout[0], game.next_piece());
    render_stats(frame, right_layout[1], game);

    if show_game_over {
        render_game_over(frame, area, game);
    }
}

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

/// Render the upcoming piece
fn render_next(frame: &mut Frame, area: Rect, piece: &Piece) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let value = piece_value(piece.color);
    let lines: Vec<Line> = (0..piece.shape.height())
        .map(|row| {
            let spans: Vec<Span> = (0..piece.shape.width())
                .map(|col| cell_span(if piece.shape.is_occupied(row, col) { value } else { 0 }))
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render the game board with the falling piece on top
fn render_board<S: HighScoreStore>(frame: &mut Frame, area: Rect, game: &Game<S>) {
    let title = format!(" {} ", game.difficulty().name());
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let piece = game.current_piece();
    let piece_blocks: Vec<(i32, i32)> = piece.block_positions().collect();
    let piece_color = piece_value(piece.color);

    let lines: Vec<Line> = game
        .board()
        .rows()
        .enumerate()
        .map(|(row, cells)| {
            let spans: Vec<Span> = (0..BOARD_WIDTH)
                .map(|col| {
                    if piece_blocks.contains(&(row as i32, col as i32)) {
                        cell_span(piece_color)
                    } else {
                        cell_span(cells[col].value())
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render stats panel
fn render_stats<S: HighScoreStore>(frame: &mut Frame, area: Rect, game: &Game<S>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", game.score().points),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("BEST", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", game.high_score().max(game.score().points)),
            Style::default().fg(Color::Cyan),
        )),
        Line::raw(""),
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", game.score().lines),
            Style::default().fg(Color::Green),
        )),
    ];

    // Show last clear if any
    if let Some(label) = game.last_clear() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(label, Style::default().fg(Color::Magenta).bold()));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the game over popup
fn render_game_over<S: HighScoreStore>(frame: &mut Frame, area: Rect, game: &Game<S>) {
    let popup_area = center_rect(area, 28, 9);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut text = vec![
        Line::styled("GAME OVER", Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(
            format!("Final score: {}", game.score().points),
            Style::default().fg(Color::White),
        ),
    ];
    if game.is_new_record() {
        text.push(Line::styled("NEW RECORD!", Style::default().fg(Color::Green).bold()));
    } else {
        text.push(Line::raw(""));
    }
    text.push(Line::raw(""));
    text.push(Line::styled(
        "Enter restart  Esc menu",
        Style::default().fg(Color::Gray),
    ));

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}
