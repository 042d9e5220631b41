//! The render contract between the game and whatever draws it.
//!
//! The game never touches a display directly. Once per frame it walks the board and asks a [`Canvas`] to draw
//! outlines, glyphs and a status line in pixel rectangles; how those requests are fulfilled is up to the canvas.

/// An axis-aligned rectangle on the display surface, in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// What to draw inside a cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Glyph {
    /// A mine. `detonated` is set for the one the player stepped on.
    Mine { detonated: bool },
    Flag,
    /// The amount of mines around an open cell. Canvases may leave zero blank.
    Numeral(u8),
}

/// A display surface the game can draw on.
pub trait Canvas {
    /// Draws the border of a cell.
    fn draw_outline(&mut self, rect: PixelRect);

    /// Draws a glyph inside a cell.
    fn draw_glyph(&mut self, rect: PixelRect, glyph: Glyph);

    /// Draws a line of text centered within the rectangle.
    fn draw_status(&mut self, text: &str, rect: PixelRect);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn draw_outline(&mut self, rect: PixelRect) {
        (**self).draw_outline(rect);
    }

    fn draw_glyph(&mut self, rect: PixelRect, glyph: Glyph) {
        (**self).draw_glyph(rect, glyph);
    }

    fn draw_status(&mut self, text: &str, rect: PixelRect) {
        (**self).draw_status(text, rect);
    }
}

/// A single drawing request, as recorded by [`Recorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Outline(PixelRect),
    Glyph(PixelRect, Glyph),
    Status(String, PixelRect),
}

/// A canvas that draws nothing and just remembers what it was asked to draw.
///
/// Handy for headless runs and for checking what a frame consists of.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Recorder {
    pub calls: Vec<DrawCall>,
}

impl Recorder {
    /// The glyphs requested so far, in order.
    pub fn glyphs(&self) -> impl Iterator<Item = (PixelRect, Glyph)> + '_ {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Glyph(rect, glyph) => Some((*rect, *glyph)),
            _ => None,
        })
    }

    /// The status line, if one was requested.
    pub fn status(&self) -> Option<&str> {
        self.calls.iter().find_map(|call| match call {
            DrawCall::Status(text, _) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for Recorder {
    fn draw_outline(&mut self, rect: PixelRect) {
        self.calls.push(DrawCall::Outline(rect));
    }

    fn draw_glyph(&mut self, rect: PixelRect, glyph: Glyph) {
        self.calls.push(DrawCall::Glyph(rect, glyph));
    }

    fn draw_status(&mut self, text: &str, rect: PixelRect) {
        self.calls.push(DrawCall::Status(text.to_string(), rect));
    }
}
