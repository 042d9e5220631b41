//! The game renderer: a [`Canvas`] backed by a ratatui frame, where one terminal cell is one pixel.

use crate::app::App;
use minesweep::render::{Canvas, Glyph, PixelRect};
use ratatui::{
    layout::{Alignment, Rect},
    prelude::Frame,
    style::{Color, Modifier, Style, Stylize},
    widgets::{Block, BorderType, Borders, Paragraph},
};

const FLAG_SYMBOL: &str = "F";
const MINE_SYMBOL: &str = "*";
const CELL_BORDER_COLOR: Color = Color::Gray;
const OPEN_CELL_BG_COLOR: Color = Color::DarkGray;
const FLAG_COLOR: Color = Color::LightRed;
const MINE_COLOR: Color = Color::White;
const DETONATED_MINE_BG_COLOR: Color = Color::Red;
const VICTORY_COLOR: Color = Color::Green;
const LOSS_COLOR: Color = Color::Red;
const LEGEND_TEXT_COLOR: Color = Color::DarkGray;
const INFO_TEXT_COLOR: Color = Color::Yellow;

const LEGEND_TEXT: &str =
    "[left click]: open a cell   [right click]: toggle a flag   [r]: new game   [q] / [ESC]: quit";

pub fn render_game(app: &mut App, frame: &mut Frame) {
    let root_container = frame.size();

    // 1. The field itself, drawn through the render contract
    app.game.render(&mut TerminalCanvas::new(frame));

    // 2. The stats in the top-left corner
    let field = app.game.get_field();
    let info = format!(
        "mines: {}   flags: {}",
        field.get_mines_amount(),
        field.get_flagged_cells_amount()
    );
    frame.render_widget(
        Paragraph::new(info).fg(INFO_TEXT_COLOR),
        Rect::new(root_container.x, root_container.y, root_container.width, 1),
    );

    // 3. The legend on the last line
    if root_container.height > 1 {
        frame.render_widget(
            Paragraph::new(LEGEND_TEXT)
                .fg(LEGEND_TEXT_COLOR)
                .alignment(Alignment::Center),
            Rect::new(
                root_container.x,
                root_container.bottom() - 1,
                root_container.width,
                1,
            ),
        );
    }
}

/// Draws the game's requests into a frame. Anything outside of the frame is clipped.
pub struct TerminalCanvas<'a, 'b> {
    frame: &'a mut Frame<'b>,
}

impl<'a, 'b> TerminalCanvas<'a, 'b> {
    pub fn new(frame: &'a mut Frame<'b>) -> Self {
        TerminalCanvas { frame }
    }
}

impl Canvas for TerminalCanvas<'_, '_> {
    fn draw_outline(&mut self, rect: PixelRect) {
        // a border needs at least two rows and two columns
        if rect.width < 2 || rect.height < 2 {
            return;
        }

        if let Some(area) = clip(rect, self.frame.size()) {
            self.frame.render_widget(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Plain)
                    .border_style(Style::default().fg(CELL_BORDER_COLOR)),
                area,
            );
        }
    }

    fn draw_glyph(&mut self, rect: PixelRect, glyph: Glyph) {
        let inner = inner_rect(rect);
        let Some(area) = clip(inner, self.frame.size()) else {
            return;
        };

        let (symbol, style) = glyph_symbol(glyph);

        if let Some(background) = style.bg {
            self.frame
                .render_widget(Block::default().bg(background), area);
        }

        if let Some(line) = clip(middle_line(inner), self.frame.size()) {
            self.frame.render_widget(
                Paragraph::new(symbol)
                    .style(style)
                    .alignment(Alignment::Center),
                line,
            );
        }
    }

    fn draw_status(&mut self, text: &str, rect: PixelRect) {
        let color = if text == minesweep::VICTORY_TEXT {
            VICTORY_COLOR
        } else {
            LOSS_COLOR
        };

        if let Some(line) = clip(middle_line(rect), self.frame.size()) {
            self.frame.render_widget(
                Paragraph::new(text.to_string())
                    .fg(color)
                    .add_modifier(Modifier::BOLD)
                    .alignment(Alignment::Center),
                line,
            );
        }
    }
}

/// The symbol and the style a glyph is drawn with. Open cells get a background to tell them apart from closed ones,
/// since an open cell with no mines around has no symbol.
fn glyph_symbol(glyph: Glyph) -> (String, Style) {
    match glyph {
        Glyph::Flag => (FLAG_SYMBOL.to_string(), Style::default().fg(FLAG_COLOR)),
        Glyph::Mine { detonated: false } => {
            (MINE_SYMBOL.to_string(), Style::default().fg(MINE_COLOR))
        }
        Glyph::Mine { detonated: true } => (
            MINE_SYMBOL.to_string(),
            Style::default()
                .fg(MINE_COLOR)
                .bg(DETONATED_MINE_BG_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Glyph::Numeral(0) => (" ".to_string(), Style::default().bg(OPEN_CELL_BG_COLOR)),
        Glyph::Numeral(mines_around) => (
            mines_around.to_string(),
            Style::default()
                .fg(numeral_color(mines_around))
                .bg(OPEN_CELL_BG_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
    }
}

/// The classic colors of the numbers.
fn numeral_color(mines_around: u8) -> Color {
    match mines_around {
        1 => Color::LightBlue,
        2 => Color::LightGreen,
        3 => Color::LightRed,
        4 => Color::LightMagenta,
        5 => Color::Red,
        6 => Color::LightCyan,
        7 => Color::Black,
        _ => Color::Gray,
    }
}

/// The part of a cell inside its outline. Cells too small for an outline are used whole.
fn inner_rect(rect: PixelRect) -> PixelRect {
    if rect.width < 3 || rect.height < 3 {
        return rect;
    }

    PixelRect {
        x: rect.x + 1,
        y: rect.y + 1,
        width: rect.width - 2,
        height: rect.height - 2,
    }
}

/// The single row in the vertical middle of a rectangle.
fn middle_line(rect: PixelRect) -> PixelRect {
    PixelRect {
        y: rect.y + rect.height / 2,
        height: rect.height.min(1),
        ..rect
    }
}

/// Intersects the rectangle with the screen. Returns [`None`] if nothing of it is visible.
fn clip(rect: PixelRect, screen: Rect) -> Option<Rect> {
    let left = rect.x.max(screen.left() as i32);
    let top = rect.y.max(screen.top() as i32);
    let right = rect.x.saturating_add(rect.width).min(screen.right() as i32);
    let bottom = rect.y.saturating_add(rect.height).min(screen.bottom() as i32);

    if left >= right || top >= bottom {
        return None;
    }

    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

#[cfg(test)]
mod test {
    use super::{clip, glyph_symbol, inner_rect, middle_line, TerminalCanvas};
    use minesweep::board::View;
    use minesweep::render::{Glyph, PixelRect};
    use minesweep::{Minesweeper, MinesweeperAction};
    use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};

    fn pixel_rect(x: i32, y: i32, width: i32, height: i32) -> PixelRect {
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn clip_keeps_rectangles_inside_the_screen() {
        let screen = Rect::new(0, 0, 20, 10);

        assert_eq!(
            clip(pixel_rect(2, 3, 3, 3), screen),
            Some(Rect::new(2, 3, 3, 3))
        );
        assert_eq!(
            clip(pixel_rect(-1, -2, 3, 3), screen),
            Some(Rect::new(0, 0, 2, 1))
        );
        assert_eq!(
            clip(pixel_rect(18, 9, 3, 3), screen),
            Some(Rect::new(18, 9, 2, 1))
        );
        assert_eq!(clip(pixel_rect(-5, 0, 3, 3), screen), None);
        assert_eq!(clip(pixel_rect(20, 0, 3, 3), screen), None);
    }

    #[test]
    fn glyphs_go_inside_the_outline() {
        assert_eq!(inner_rect(pixel_rect(3, 6, 3, 3)), pixel_rect(4, 7, 1, 1));
        assert_eq!(inner_rect(pixel_rect(3, 6, 2, 2)), pixel_rect(3, 6, 2, 2));
        assert_eq!(middle_line(pixel_rect(0, 10, 8, 5)), pixel_rect(0, 12, 8, 1));
    }

    #[test]
    fn open_cells_without_mines_around_are_blank_but_shaded() {
        let (symbol, style) = glyph_symbol(Glyph::Numeral(0));

        assert_eq!(symbol, " ");
        assert!(style.bg.is_some());
        assert_eq!(glyph_symbol(Glyph::Numeral(3)).0, "3");
        assert_eq!(glyph_symbol(Glyph::Flag).0, "F");
        assert!(glyph_symbol(Glyph::Mine { detonated: true }).1.bg.is_some());
    }

    fn symbol_at(buffer: &Buffer, x: u16, y: u16) -> String {
        buffer.get(x, y).symbol().to_string()
    }

    #[test]
    fn the_game_is_drawn_into_the_terminal() {
        let mut terminal = Terminal::new(TestBackend::new(12, 8)).unwrap();
        let mut game = Minesweeper::with_mines(3, 1, &[(0, 0)]).unwrap();
        game.set_view(View::new(1, 4, 3)).unwrap();
        game.take_action(MinesweeperAction::OpenCell((2, 0)));
        game.take_action(MinesweeperAction::FlagCell((0, 0)));

        terminal
            .draw(|frame| game.render(&mut TerminalCanvas::new(frame)))
            .unwrap();
        let buffer = terminal.backend().buffer();

        // the outlines' corners
        assert_eq!(symbol_at(buffer, 1, 4), "┌");
        assert_eq!(symbol_at(buffer, 6, 6), "┘");
        // the flag and the numbers in the middle of their cells
        assert_eq!(symbol_at(buffer, 2, 5), "F");
        assert_eq!(symbol_at(buffer, 5, 5), "1");
        assert_eq!(symbol_at(buffer, 8, 5), " ");
        // the status line right above the field
        let status_line: String = (0..12).map(|x| symbol_at(buffer, x, 2)).collect();
        assert!(status_line.contains("You win"));
    }
}
