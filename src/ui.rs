//! Terminal UI rendering with ratatui

use e60tris::game::{Phase, Snapshot};
use e60tris::grid::{GRID_HEIGHT, GRID_WIDTH};
use e60tris::settings::Settings;
use e60tris::{PieceKind, Rotation};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const EMPTY: &str = "· ";
const LEFT_WALL: &str = "<|";
const RIGHT_WALL: &str = "|>";
const BOTTOM: &str = "\\/";

const TITLE: &str = "TETRIS (ELEKTRONIKA-60 RECREATION)";

/// Walls on both sides of the ten two-column cells
const BOARD_WIDTH: u16 = GRID_WIDTH as u16 * 2 + 4;
/// Total width needed: hold(12) + board(24) + next/stats(16) = 52
const GAME_WIDTH: u16 = 12 + BOARD_WIDTH + 16;
/// Title, blank, board rows, floor, help
const GAME_HEIGHT: u16 = GRID_HEIGHT as u16 + 4;

/// Color for each kind
fn kind_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::Cyan,
        PieceKind::O => Color::Yellow,
        PieceKind::T => Color::Magenta,
        PieceKind::S => Color::Green,
        PieceKind::Z => Color::Red,
        PieceKind::J => Color::Blue,
        PieceKind::L => Color::Rgb(255, 165, 0), // Orange
    }
}

/// Render one frame of the game
pub fn render_game(frame: &mut Frame, snapshot: &Snapshot, settings: &Settings) {
    let area = frame.area();
    let (block_char, _) = settings.visual.block_chars();

    // Center the game area
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                      // Title
            Constraint::Length(GRID_HEIGHT as u16 + 1), // Board and floor
            Constraint::Length(1),                      // Controls
        ])
        .split(game_area);

    frame.render_widget(
        Paragraph::new(Line::styled(TITLE, Style::default().fg(Color::Green).bold()))
            .alignment(Alignment::Center),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Line::styled(help_line(settings), Style::default().fg(Color::Gray)))
            .alignment(Alignment::Center),
        rows[2],
    );

    // Hold | board | next + stats
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(BOARD_WIDTH),
            Constraint::Length(16),
        ])
        .split(rows[1]);

    render_piece_box(frame, main_layout[0], " HOLD ", snapshot.held, block_char);
    render_board(frame, main_layout[1], snapshot, settings);

    // Right side: next piece and stats
    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Next piece
            Constraint::Min(6),    // Stats
        ])
        .split(main_layout[2]);

    render_piece_box(frame, right_layout[0], " NEXT ", Some(snapshot.next), block_char);
    render_stats(frame, right_layout[1], snapshot);

    // Overlays
    let keys = &settings.keys;
    match snapshot.phase {
        Phase::Paused => render_overlay(
            frame,
            area,
            "PAUSED",
            &format!("Press {} to resume", key_label(&keys.pause)),
        ),
        Phase::GameOver => render_overlay(
            frame,
            area,
            "GAME OVER",
            &format!(
                "{} to restart, {} to quit",
                key_label(&keys.reset),
                key_label(&keys.quit)
            ),
        ),
        Phase::Falling => {}
    }
}

/// Display name for the first key bound to an intent
fn key_label(keys: &[String]) -> String {
    let Some(key) = keys.first() else {
        return "-".to_string();
    };
    match key.to_lowercase().as_str() {
        "left" => "←".to_string(),
        "right" => "→".to_string(),
        "up" => "↑".to_string(),
        "down" => "↓".to_string(),
        _ => key.to_uppercase(),
    }
}

/// Controls summary built from the active bindings
fn help_line(settings: &Settings) -> String {
    let keys = &settings.keys;
    format!(
        "{} {} move | {} soft | {} hard | {} / {} rotate | {} hold | {} quit",
        key_label(&keys.move_left),
        key_label(&keys.move_right),
        key_label(&keys.soft_drop),
        key_label(&keys.hard_drop),
        key_label(&keys.rotate_ccw),
        key_label(&keys.rotate_cw),
        key_label(&keys.hold),
        key_label(&keys.quit),
    )
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

/// Bordered box showing a single piece (hold and next panels)
fn render_piece_box(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    kind: Option<PieceKind>,
    block_char: &str,
) {
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(kind) = kind {
        render_mini_piece(frame, inner, kind, block_char);
    }
}

/// Render a small spawn-orientation preview
fn render_mini_piece(frame: &mut Frame, area: Rect, kind: PieceKind, block_char: &str) {
    if area.height < 1 || area.width < 4 {
        return;
    }

    let color = kind_color(kind);
    let cells = kind.cells(Rotation::North);

    // Normalize to the occupied bounding box
    let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let max_x = cells.iter().map(|&(x, _)| x).max().unwrap_or(0);
    let min_y = cells.iter().map(|&(_, y)| y).min().unwrap_or(0);
    let max_y = cells.iter().map(|&(_, y)| y).max().unwrap_or(0);

    let lines: Vec<Line> = (min_y..=max_y)
        .map(|y| {
            let spans: Vec<Span> = (min_x..=max_x)
                .map(|x| {
                    if cells.contains(&(x, y)) {
                        Span::styled(block_char, Style::default().fg(color))
                    } else {
                        Span::raw("  ")
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render the playing field between the walls with the active piece and
/// its ghost, closed by the floor line
fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot, settings: &Settings) {
    let (block_char, ghost_char) = settings.visual.block_chars();
    let show_ghost = settings.visual.show_ghost;
    let active = &snapshot.active;
    let color = kind_color(active.kind);
    let wall = Style::default().fg(Color::Green);

    let mut lines: Vec<Line> = Vec::with_capacity(GRID_HEIGHT + 1);
    for row in 0..GRID_HEIGHT {
        let mut spans = Vec::with_capacity(GRID_WIDTH + 2);
        spans.push(Span::styled(LEFT_WALL, wall));
        for col in 0..GRID_WIDTH {
            let pos = (col as i32, row as i32);

            let (text, style) = if active.cells.contains(&pos) {
                (block_char, Style::default().fg(color))
            } else if snapshot.grid[row][col] {
                (block_char, Style::default().fg(Color::Gray))
            } else if show_ghost && active.ghost_cells.contains(&pos) {
                (ghost_char, Style::default().fg(color).dim())
            } else {
                (EMPTY, Style::default().fg(Color::DarkGray))
            };

            spans.push(Span::styled(text, style));
        }
        spans.push(Span::styled(RIGHT_WALL, wall));
        lines.push(Line::from(spans));
    }
    lines.push(Line::styled(format!(" {}", BOTTOM.repeat(GRID_WIDTH)), wall));

    frame.render_widget(Paragraph::new(lines), area);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = |text: &'static str| Line::from(Span::styled(text, Style::default().fg(Color::Gray)));

    let lines = vec![
        label("SCORE"),
        Line::from(Span::styled(
            snapshot.score.to_string(),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        label("LEVEL"),
        Line::from(Span::styled(
            snapshot.level.to_string(),
            Style::default().fg(Color::Cyan),
        )),
        Line::raw(""),
        label("LINES"),
        Line::from(Span::styled(
            snapshot.lines.to_string(),
            Style::default().fg(Color::Green),
        )),
        Line::raw(""),
        Line::styled(
            snapshot.status.to_string(),
            Style::default().fg(Color::Magenta).bold(),
        ),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render an overlay (for pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_area = center_rect(area, 28, 5);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
