//! Text rendering of mine boards.
//!
//! Only reads the board through [`MineBoard::view`]. Tile boards render
//! through their `Display` impl.

use crate::mines::{CellView, MineBoard};

/// Output style for [`render_mines`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Style {
    /// Space separated glyphs, `0` for clear cells.
    #[default]
    Plain,
    /// Clear cells shaded, grid framed with box-drawing characters.
    Boxed,
}

const SHADE: &str = "▒";
const TOP_LEFT: char = '╔';
const TOP_RIGHT: char = '╗';
const BOTTOM_LEFT: char = '╚';
const BOTTOM_RIGHT: char = '╝';
const HORIZONTAL: char = '═';
const VERTICAL: char = '║';

fn glyph(view: CellView, style: Style) -> String {
    match (view, style) {
        (CellView::Clear, Style::Boxed) => SHADE.to_string(),
        (view, _) => view.to_string(),
    }
}

/// Render the visible state of `board`, one line per row.
pub fn render_mines(board: &MineBoard, style: Style) -> String {
    let (height, width) = board.shape();
    // Glyphs are single characters separated by one space
    let inner = (2 * width).saturating_sub(1);
    let border: String = std::iter::repeat_n(HORIZONTAL, inner).collect();

    let mut out = String::new();
    if style == Style::Boxed {
        out.push_str(&format!("{TOP_LEFT}{border}{TOP_RIGHT}\n"));
    }
    for row in 0..height {
        let line: Vec<String> = (0..width)
            .filter_map(|col| board.view(row, col))
            .map(|view| glyph(view, style))
            .collect();
        let line = line.join(" ");
        match style {
            Style::Plain => out.push_str(&format!("{line}\n")),
            Style::Boxed => out.push_str(&format!("{VERTICAL}{line}{VERTICAL}\n")),
        }
    }
    if style == Style::Boxed {
        out.push_str(&format!("{BOTTOM_LEFT}{border}{BOTTOM_RIGHT}\n"));
    }
    out
}
