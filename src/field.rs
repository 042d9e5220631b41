pub mod cell;

use crate::board::{Board, Coord, Position, View};
use cell::Cell;
use rand::{seq::index, Rng};
use std::collections::VecDeque;
use std::fmt::{Debug, Display, Formatter};
use thiserror::Error;
use tracing::{debug, trace};

/// Count type used for mine amounts and total-cell amounts.
pub type MineCount = u16;

/// The enum represents all the variants of what can possibly go wrong when creating a field.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Used when the width or the height of the requested field is zero, so there's no room even for a mine-free game.
    #[error("the field must have at least one cell")]
    EmptyGrid,
    /// Used when the requested amount of mines doesn't leave a single cell free.
    ///
    /// `max` is the maximum allowed amount of mines for the field with the given dimensions.
    #[error("cannot place {requested} mines, at most {max} fit")]
    InvalidMinesAmount { requested: MineCount, max: MineCount },
    /// Used when an explicitly provided mine position lies beyond the field's bounds.
    #[error("mine position {0:?} is outside of the field")]
    InvalidMinePosition(Position),
}

/// The field representation.
///
/// The field is a row-major grid of cells laid out on a [`Board`], with a fixed set of mines.
#[derive(Clone, PartialEq, Eq)]
pub struct Field {
    /// The geometry of the field, including where it's drawn.
    board: Board,
    /// The cells, `y * width + x`.
    cells: Vec<Cell>,
    /// The total number of mined cells.
    mines_amount: MineCount,
}

impl Field {
    /// Creates a new [`Field`] with the provided dimensions and randomly distributed mines.
    ///
    /// The method might fail with [`FieldError::EmptyGrid`] in case either dimension is zero or with
    /// [`FieldError::InvalidMinesAmount`] in case there would be no mine-free cell left.
    pub fn new(width: Coord, height: Coord, mines_amount: MineCount) -> Result<Self, FieldError> {
        Field::with_rng(width, height, mines_amount, &mut rand::thread_rng())
    }

    /// Same as [`Field::new`], but draws the mine positions from the provided random number generator.
    ///
    /// The mines are a uniform sample without replacement of the flat cell indices, so the exact amount requested is
    /// always placed.
    pub fn with_rng<R: Rng + ?Sized>(
        width: Coord,
        height: Coord,
        mines_amount: MineCount,
        rng: &mut R,
    ) -> Result<Self, FieldError> {
        let cells_amount = validate_dimensions(width, height, mines_amount)?;
        let mut field = Field::empty(width, height);

        index::sample(rng, cells_amount as usize, mines_amount as usize)
            .into_iter()
            .for_each(|i| field.cells[i] = Cell::Mine { flagged: false });
        field.mines_amount = mines_amount;

        debug!(width, height, mines_amount, "populated the field with mines");

        Ok(field)
    }

    /// Creates a field with mines at exactly the given positions. Repeated positions hold a single mine.
    ///
    /// Fails with [`FieldError::InvalidMinePosition`] for positions beyond the field's bounds, and with the same
    /// errors as [`Field::new`] otherwise.
    pub fn with_mines(
        width: Coord,
        height: Coord,
        mine_positions: &[Position],
    ) -> Result<Self, FieldError> {
        let mut field = Field::empty(width, height);

        for &position in mine_positions {
            let i = field
                .board
                .index(position)
                .ok_or(FieldError::InvalidMinePosition(position))?;
            field.cells[i] = Cell::Mine { flagged: false };
        }

        let mines_amount = field.cells.iter().filter(|cell| cell.is_mined()).count() as MineCount;
        validate_dimensions(width, height, mines_amount)?;
        field.mines_amount = mines_amount;

        Ok(field)
    }

    /// A field of hidden mine-free cells. Not exposed: a field always carries its mines.
    fn empty(width: Coord, height: Coord) -> Self {
        let board = Board::new(width, height);

        Field {
            board,
            cells: vec![Cell::default(); board.get_size().2 as usize],
            mines_amount: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn set_view(&mut self, view: View) {
        self.board.set_view(view);
    }

    /// Returns the field's width, height and the two values multiplied, which is effectively the total number of cells.
    pub fn get_size(&self) -> (Coord, Coord, MineCount) {
        self.board.get_size()
    }

    pub fn get_mines_amount(&self) -> MineCount {
        self.mines_amount
    }

    /// Returns the cell at the given position or [`None`] if there's no cell there.
    pub fn get_cell(&self, position: Position) -> Option<Cell> {
        self.board.index(position).map(|i| self.cells[i])
    }

    fn get_cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.board.index(position).map(|i| &mut self.cells[i])
    }

    /// All the cells together with their positions, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.board.positions().zip(self.cells.iter().copied())
    }

    /// The amount of mines, flagged or not, among the cell's neighbours.
    pub fn count_mines_around(&self, position: Position) -> u8 {
        self.board
            .neighbors_of(position)
            .into_iter()
            .filter_map(|neighbor| self.get_cell(neighbor))
            .filter(Cell::is_mined)
            .count() as u8
    }

    /// Opens the cell at the given position, and, transitively, everything connected to it through cells with no mines
    /// around.
    ///
    /// The fill is breadth-first. A cell is marked as visited when it's queued, so no cell is queued twice, and a cell
    /// is only queued from a neighbour with no mines around, which means it can't be mined itself. Flags on the way are
    /// discarded since those cells are provably safe.
    ///
    /// Nothing happens if the starting cell is mined, flagged, already open or doesn't exist. Returns the amount of
    /// cells that got opened.
    pub fn reveal(&mut self, position: Position) -> usize {
        match self.get_cell(position) {
            Some(Cell::Hidden) => {}
            _ => return 0,
        }

        let mut visited = vec![false; self.cells.len()];
        let mut to_visit = VecDeque::from([position]);
        let mut revealed_amount = 0;

        if let Some(i) = self.board.index(position) {
            visited[i] = true;
        }

        while let Some(current) = to_visit.pop_front() {
            let mines_around = self.count_mines_around(current);

            let Some(cell) = self.get_cell_mut(current) else {
                continue;
            };

            if !cell.is_revealed() {
                revealed_amount += 1;
            }
            *cell = Cell::Revealed(mines_around);

            if mines_around != 0 {
                continue;
            }

            for neighbor in self.board.neighbors_of(current) {
                let Some(i) = self.board.index(neighbor) else {
                    continue;
                };

                if !visited[i] && !self.cells[i].is_mined() {
                    visited[i] = true;
                    to_visit.push_back(neighbor);
                }
            }
        }

        trace!(?position, revealed_amount, "flood-fill finished");

        revealed_amount
    }

    /// Toggles the flag of the cell at the given position and returns its new state, or [`None`] if there's no cell
    /// at the given position.
    pub fn toggle_cell_flag(&mut self, position: Position) -> Option<Cell> {
        let cell = self.get_cell_mut(position)?;
        *cell = cell.with_flag_toggled();

        Some(*cell)
    }

    /// The method returns the total number of all the currently flagged cells in the field.
    pub fn get_flagged_cells_amount(&self) -> MineCount {
        self.cells.iter().filter(|cell| cell.is_flagged()).count() as MineCount
    }

    /// Checks that no mine is left unflagged.
    ///
    /// This is effectively the win-condition for the game. It holds trivially for a field without mines.
    pub fn check_all_mines_flagged(&self) -> bool {
        !self.cells.iter().any(Cell::is_unflagged_mine)
    }
}

/// Fails unless the dimensions leave room for at least one mine-free cell. Returns the total amount of cells.
fn validate_dimensions(
    width: Coord,
    height: Coord,
    mines_amount: MineCount,
) -> Result<MineCount, FieldError> {
    let cells_amount = width as MineCount * height as MineCount;

    if cells_amount == 0 {
        Err(FieldError::EmptyGrid)
    } else if mines_amount >= cells_amount {
        Err(FieldError::InvalidMinesAmount {
            requested: mines_amount,
            max: cells_amount - 1,
        })
    } else {
        Ok(cells_amount)
    }
}

/// The `Debug` implementation discloses the mines: `*` for a hidden mine, `!` for a flagged one.
impl Debug for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.board.width().max(1) as usize) {
            for cell in row {
                match cell {
                    Cell::Mine { flagged: false } => write!(f, "*")?,
                    Cell::Mine { flagged: true } => write!(f, "!")?,
                    other => write!(f, "{other}")?,
                }
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "   ")?;
        for x in 0..self.board.width() {
            write!(f, "{:>3}", x)?;
        }
        writeln!(f)?;

        for y in 0..self.board.height() {
            write!(f, "{:>3}", y)?;

            for x in 0..self.board.width() {
                if let Some(cell) = self.get_cell((x, y)) {
                    write!(f, "{:>3}", cell.to_string())?;
                }
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
