//! The board geometry: the grid's dimensions and the view used to place it on a display surface.
//!
//! The board knows nothing about mines. It only answers questions like "which cell is under this pixel?" and "which
//! cells surround this one?", so that the field and the renderer can share the same notion of coordinates.

use crate::render::PixelRect;

/// A single coordinate axis (a column or a row index, or a dimension of the board).
pub type Coord = u8;

/// A cell position on the board as `(x, y)`: the column index followed by the row index.
pub type Position = (Coord, Coord);

/// A position on the display surface as `(x, y)`. Signed, since clicks may land above or to the left of the board.
pub type Pixel = (i32, i32);

/// The displacements of the Moore neighbourhood, clockwise starting from the lower-right neighbour.
///
/// The order is fixed so that everything built on top of it (mine counting, the flood-fill queue) is reproducible.
const NEIGHBOR_DISPLACEMENTS: [(i16, i16); 8] = [
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
];

/// Where the board is drawn: the pixel origin of its top-left corner and the side of a single (square) cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct View {
    pub left: i32,
    pub top: i32,
    pub cell_size: i32,
}

impl View {
    pub const fn new(left: i32, top: i32, cell_size: i32) -> Self {
        View {
            left,
            top,
            cell_size,
        }
    }

    /// A view that puts a `width`x`height` board with the given cell size in the middle of a screen of `screen_size`
    /// pixels.
    ///
    /// The origin may end up negative when the board is larger than the screen.
    pub fn centered(screen_size: (i32, i32), (width, height): (Coord, Coord), cell_size: i32) -> Self {
        let (screen_width, screen_height) = screen_size;

        // saturating, so that absurd cell sizes end up far off screen instead of overflowing
        let extent = |cells: Coord| (cells as i32).saturating_mul(cell_size);

        View {
            left: (screen_width / 2).saturating_sub(extent(width) / 2),
            top: (screen_height / 2).saturating_sub(extent(height) / 2),
            cell_size,
        }
    }
}

impl Default for View {
    fn default() -> Self {
        View::new(10, 10, 30)
    }
}

/// A rectangular `width`x`height` grid placed on a display surface according to its [`View`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Board {
    width: Coord,
    height: Coord,
    view: View,
}

impl Board {
    /// Creates a board with the given dimensions and the default view.
    pub fn new(width: Coord, height: Coord) -> Self {
        Board {
            width,
            height,
            view: View::default(),
        }
    }

    pub fn width(&self) -> Coord {
        self.width
    }

    pub fn height(&self) -> Coord {
        self.height
    }

    /// Returns the board's width, height and the total number of cells (the two multiplied).
    pub fn get_size(&self) -> (Coord, Coord, u16) {
        (self.width, self.height, self.width as u16 * self.height as u16)
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Moves and/or rescales the board on the display surface. This never affects the game itself.
    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    /// Checks that the board, together with the status strip above it, lies within the `i32` pixel space under the
    /// given view.
    pub fn fits(&self, view: View) -> bool {
        let View {
            left,
            top,
            cell_size,
        } = view;

        let right = (self.width as i32)
            .checked_mul(cell_size)
            .and_then(|extent| left.checked_add(extent));
        let bottom = (self.height as i32)
            .checked_mul(cell_size)
            .and_then(|extent| top.checked_add(extent));
        let status_top = top.checked_sub(cell_size);

        right.is_some() && bottom.is_some() && status_top.is_some()
    }

    /// Checks whether the position lies within the board.
    pub fn contains(&self, (x, y): Position) -> bool {
        x < self.width && y < self.height
    }

    /// The index of the position in a flat, row-major vector of cells, or [`None`] for positions beyond the board.
    pub fn index(&self, position: Position) -> Option<usize> {
        let (x, y) = position;

        if self.contains(position) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// All the positions of the board, row by row, left to right.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (width, height) = (self.width, self.height);

        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    /// Maps a pixel to the cell under it, or [`None`] if the pixel is outside the board.
    pub fn cell_at(&self, (pixel_x, pixel_y): Pixel) -> Option<Position> {
        let View {
            left,
            top,
            cell_size,
        } = self.view;

        if cell_size <= 0 {
            return None;
        }

        let offset_x = pixel_x.checked_sub(left)?;
        let offset_y = pixel_y.checked_sub(top)?;

        // above or to the left of the board
        if offset_x < 0 || offset_y < 0 {
            return None;
        }

        let x = offset_x / cell_size;
        let y = offset_y / cell_size;

        if x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }

        Some((x as Coord, y as Coord))
    }

    /// Returns the in-bounds positions of the cells surrounding the given one (up to 8 of them).
    pub fn neighbors_of(&self, (x, y): Position) -> Vec<Position> {
        let (x, y) = (x as i16, y as i16);

        NEIGHBOR_DISPLACEMENTS
            .iter()
            .map(|(dx, dy)| (x + dx, y + dy))
            .filter(|&(nx, ny)| {
                nx >= 0 && ny >= 0 && nx < self.width as i16 && ny < self.height as i16
            })
            .map(|(nx, ny)| (nx as Coord, ny as Coord))
            .collect()
    }

    /// The pixel rectangle occupied by the cell at the given position.
    pub fn cell_rect(&self, (x, y): Position) -> PixelRect {
        let View {
            left,
            top,
            cell_size,
        } = self.view;

        PixelRect {
            x: left.saturating_add((x as i32).saturating_mul(cell_size)),
            y: top.saturating_add((y as i32).saturating_mul(cell_size)),
            width: cell_size,
            height: cell_size,
        }
    }

    /// The strip right above the board, one cell high and as wide as the board. Used for the status line.
    pub fn status_rect(&self) -> PixelRect {
        let View {
            left,
            top,
            cell_size,
        } = self.view;

        PixelRect {
            x: left,
            y: top.saturating_sub(cell_size),
            width: (self.width as i32).saturating_mul(cell_size),
            height: cell_size,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Board, View};
    use crate::render::PixelRect;

    #[test]
    fn pixels_above_or_left_of_the_origin_map_to_nothing() {
        let board = Board::new(3, 3);

        assert_eq!(board.view(), View::new(10, 10, 30));
        assert_eq!(board.cell_at((5, 5)), None);
        assert_eq!(board.cell_at((5, 40)), None);
        assert_eq!(board.cell_at((40, 9)), None);
    }

    #[test]
    fn pixels_inside_the_board_map_to_cells() {
        let board = Board::new(3, 3);

        assert_eq!(board.cell_at((40, 40)), Some((1, 1)));
        assert_eq!(board.cell_at((10, 10)), Some((0, 0)));
        assert_eq!(board.cell_at((39, 10)), Some((0, 0)));
        assert_eq!(board.cell_at((99, 99)), Some((2, 2)));
    }

    #[test]
    fn pixels_right_of_or_below_the_board_map_to_nothing() {
        let board = Board::new(3, 2);

        assert_eq!(board.cell_at((100, 10)), None);
        assert_eq!(board.cell_at((10, 70)), None);
        assert_eq!(board.cell_at((10, 69)), Some((0, 1)));
    }

    #[test]
    fn a_degenerate_cell_size_maps_everything_to_nothing() {
        let mut board = Board::new(3, 3);
        board.set_view(View::new(0, 0, 0));

        assert_eq!(board.cell_at((0, 0)), None);
    }

    #[test]
    fn extreme_pixels_do_not_overflow() {
        let mut board = Board::new(3, 3);
        board.set_view(View::new(10, 10, 1));

        assert_eq!(board.cell_at((i32::MIN, i32::MIN)), None);
        assert_eq!(board.cell_at((i32::MAX, i32::MAX)), None);
    }

    #[test]
    fn neighbors_are_listed_clockwise_from_the_lower_right() {
        let board = Board::new(3, 3);

        assert_eq!(
            board.neighbors_of((1, 1)),
            vec![
                (2, 2),
                (1, 2),
                (0, 2),
                (0, 1),
                (0, 0),
                (1, 0),
                (2, 0),
                (2, 1)
            ]
        );
    }

    #[test]
    fn neighbors_are_clipped_to_the_board() {
        let board = Board::new(3, 3);

        assert_eq!(board.neighbors_of((0, 0)), vec![(1, 1), (0, 1), (1, 0)]);
        assert_eq!(board.neighbors_of((2, 2)), vec![(1, 2), (1, 1), (2, 1)]);
        assert!(Board::new(1, 1).neighbors_of((0, 0)).is_empty());
    }

    #[test]
    fn index_follows_the_positions() {
        let board = Board::new(4, 3);

        assert_eq!(board.index((3, 2)), Some(11));
        assert_eq!(board.index((4, 0)), None);
        assert!(board
            .positions()
            .enumerate()
            .all(|(i, position)| board.index(position) == Some(i)));
    }

    #[test]
    fn cell_and_status_rectangles_follow_the_view() {
        let mut board = Board::new(4, 2);
        board.set_view(View::new(5, 20, 10));

        assert_eq!(
            board.cell_rect((2, 1)),
            PixelRect {
                x: 25,
                y: 30,
                width: 10,
                height: 10
            }
        );
        assert_eq!(
            board.status_rect(),
            PixelRect {
                x: 5,
                y: 10,
                width: 40,
                height: 10
            }
        );
    }

    #[test]
    fn centered_view_puts_the_board_in_the_middle() {
        assert_eq!(
            View::centered((800, 600), (10, 10), 50),
            View::new(150, 50, 50)
        );
    }

    #[test]
    fn centered_view_saturates_on_huge_cells() {
        let view = View::centered((80, 24), (10, 10), 300_000_000);

        assert_eq!(view.cell_size, 300_000_000);
        assert_eq!(view.left, 40 - i32::MAX / 2);
        assert_eq!(view.top, 12 - i32::MAX / 2);
    }

    #[test]
    fn views_beyond_the_pixel_space_do_not_fit() {
        let board = Board::new(3, 1);

        assert!(board.fits(View::new(0, 10, 30)));
        assert!(board.fits(View::new(-100, -100, 1)));
        assert!(!board.fits(View::new(0, 0, i32::MAX)));
        assert!(!board.fits(View::new(i32::MAX - 10, 0, 4)));
        assert!(!board.fits(View::new(0, i32::MIN, 1)));
        assert!(!board.fits(View::new(0, i32::MAX, 1)));
    }

    #[test]
    fn rectangles_saturate_instead_of_overflowing() {
        let mut board = Board::new(3, 1);
        board.set_view(View::new(0, 0, i32::MAX));

        assert_eq!(board.cell_rect((2, 0)).x, i32::MAX);
        assert_eq!(board.status_rect().width, i32::MAX);
        assert_eq!(board.status_rect().y, -i32::MAX);
    }
}
