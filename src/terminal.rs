// src/terminal.rs
// Terminal output for bingo cards and key handling for the highlight loop.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    style::Stylize,
    terminal::{self, disable_raw_mode, enable_raw_mode, ClearType},
};

use crate::card::{Card, Square};

const COLUMN_LETTERS: [&str; 5] = ["B", "I", "N", "G", "O"];

fn format_square(square: &Square) -> String {
    let text = match square.number() {
        Some(number) => format!("{number:>3}"),
        None => "  *".to_string(),
    };
    if square.is_highlighted() {
        text.bold().green().to_string() // Bold green for the group being shown
    } else if square.is_marked() {
        text.bold().yellow().to_string() // Bold yellow for marked squares
    } else {
        text
    }
}

/// Card as text lines, one per row, with a B-I-N-G-O header on five-column cards.
pub fn card_lines(card: &Card) -> Vec<String> {
    let geometry = card.geometry();
    let cols = geometry.col_count();
    let mut lines = Vec::with_capacity(geometry.row_count() + 1);

    if cols == COLUMN_LETTERS.len() {
        lines.push(COLUMN_LETTERS.iter().map(|letter| format!("{letter:>3}")).collect::<Vec<_>>().join(" "));
    }
    for row in card.squares().chunks(cols) {
        lines.push(row.iter().map(format_square).collect::<Vec<_>>().join(" "));
    }
    lines
}

pub fn print_card(card: &Card) {
    for line in card_lines(card) {
        println!("{line}");
    }
}

/// Raw mode for the lifetime of the guard.
pub struct RawMode;

impl RawMode {
    pub fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        // Clear any pending events in the buffer
        while event::poll(Duration::from_millis(0))? {
            event::read()?;
        }
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Redraw the screen with a title line and the card. Expects raw mode.
pub fn draw_frame(title: &str, card: &Card) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    write!(stdout, "{}\r\n\r\n", title.bold())?;
    for line in card_lines(card) {
        write!(stdout, "{line}\r\n")?;
    }
    write!(stdout, "\r\nPress ESC to exit\r\n")?;
    stdout.flush()
}

/// Hold the current frame for `hold`; returns true if ESC was pressed meanwhile.
pub fn hold_or_escape(hold: Duration) -> io::Result<bool> {
    let deadline = Instant::now() + hold;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(false);
        }
        if event::poll(remaining)? {
            if let Event::Key(key_event) = event::read()? {
                // Only process key press events, not key release events
                if key_event.kind == KeyEventKind::Press && key_event.code == KeyCode::Esc {
                    return Ok(true);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::Coordinate;
    use crate::geometry::BoardGeometry;

    #[test]
    fn test_card_lines_layout() {
        let geometry = BoardGeometry::zero_based(5).unwrap();
        let numbers = (1..=25).map(|n| if n == 13 { None } else { Some(n) }).collect();
        let card = Card::from_numbers(geometry, numbers).unwrap();

        let lines = card_lines(&card);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "  B   I   N   G   O");
        assert_eq!(lines[1], "  1   2   3   4   5");
        assert!(lines[3].contains('*'));
    }

    #[test]
    fn test_no_header_on_other_widths() {
        let card = Card::new(BoardGeometry::zero_based(3).unwrap());
        let lines = card_lines(&card);
        assert_eq!(lines.len(), 3);
        assert!(!lines[0].contains('B'));
    }

    #[test]
    fn test_marked_and_highlighted_are_styled() {
        let geometry = BoardGeometry::zero_based(3).unwrap();
        let numbers = (1..=9).map(Some).collect();
        let mut card = Card::from_numbers(geometry, numbers).unwrap();
        let plain = card_lines(&card)[0].clone();
        assert_eq!(plain, "  1   2   3");

        card.mark(Coordinate::new(0, 0)).unwrap();
        card.set_highlighted(&[Coordinate::new(0, 1)], true).unwrap();
        let styled = card_lines(&card)[0].clone();
        assert_ne!(styled, plain);
        assert!(styled.contains('1') && styled.contains('2') && styled.contains('3'));
    }
}
