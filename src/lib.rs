pub mod board;
pub mod field;
pub mod render;

use board::{Coord, Pixel, Position, View};
use field::{cell::Cell, Field, FieldError, MineCount};
use rand::Rng;
use render::{Canvas, Glyph};
use thiserror::Error;
use tracing::{debug, info, trace};

/// The text of the status line shown after a victory.
pub const VICTORY_TEXT: &str = "You win";
/// The text of the status line shown after a loss.
pub const LOSS_TEXT: &str = "You lose";

/// The enum represents the variants of everything that can go wrong when setting up a game.
///
/// Once a game has been created nothing can fail anymore: clicks that make no sense are ignored.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MinesweeperError {
    /// Something's wrong with the requested field.
    #[error(transparent)]
    Field(#[from] FieldError),
    /// The view's cell size must be a positive amount of pixels.
    #[error("invalid cell size {0}, must be positive")]
    InvalidCellSize(i32),
    /// The field would reach beyond the representable pixels under the view.
    #[error("the field does not fit on the display surface with {0:?}")]
    ViewOutOfBounds(View),
}

pub type Result<T> = std::result::Result<T, MinesweeperError>;

/// The status of a game. Moves from `InProgress` to either of the other two exactly once.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum MinesweeperStatus {
    /// An ongoing game.
    #[default]
    InProgress,
    /// Every mine has been flagged.
    Won,
    /// A mine has been stepped on.
    Lost,
}

impl MinesweeperStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, MinesweeperStatus::InProgress)
    }
}

/// A mouse button the game reacts to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Button {
    Left,
    Right,
}

/// A button press somewhere on the display surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ClickEvent {
    pub button: Button,
    pub position: Pixel,
}

impl ClickEvent {
    pub fn new(button: Button, position: Pixel) -> Self {
        ClickEvent { button, position }
    }
}

/// Describes all the possible actions a player can take.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MinesweeperAction {
    /// A request to open a cell by its position (the left click).
    OpenCell(Position),
    /// A request to flag or unflag a cell by its position (the right click).
    FlagCell(Position),
}

impl MinesweeperAction {
    fn from_button(button: Button, position: Position) -> Self {
        match button {
            Button::Left => MinesweeperAction::OpenCell(position),
            Button::Right => MinesweeperAction::FlagCell(position),
        }
    }
}

/// The struct representing a Minesweeper game itself.
#[derive(Debug, Clone)]
pub struct Minesweeper {
    /// The field used in the game.
    field: Field,
    /// The game status.
    status: MinesweeperStatus,
    /// The mine that has been stepped on, if any. Only used for highlighting.
    triggered_mine: Option<Position>,
}

impl Minesweeper {
    /// Creates a game on a `width`x`height` field with `mines_amount` randomly placed mines.
    pub fn new(width: Coord, height: Coord, mines_amount: MineCount) -> Result<Self> {
        Minesweeper::with_rng(width, height, mines_amount, &mut rand::thread_rng())
    }

    /// Same as [`Minesweeper::new`], but places the mines using the provided random number generator.
    pub fn with_rng<R: Rng + ?Sized>(
        width: Coord,
        height: Coord,
        mines_amount: MineCount,
        rng: &mut R,
    ) -> Result<Self> {
        Ok(Minesweeper::from_field(Field::with_rng(
            width,
            height,
            mines_amount,
            rng,
        )?))
    }

    /// Creates a game with mines at exactly the given positions.
    pub fn with_mines(width: Coord, height: Coord, mine_positions: &[Position]) -> Result<Self> {
        Ok(Minesweeper::from_field(Field::with_mines(
            width,
            height,
            mine_positions,
        )?))
    }

    fn from_field(field: Field) -> Self {
        let (width, height, _) = field.get_size();
        debug!(width, height, mines = field.get_mines_amount(), "new game");

        Minesweeper {
            field,
            status: MinesweeperStatus::InProgress,
            triggered_mine: None,
        }
    }

    /// Places the game on the display surface. Has no effect on the game itself.
    ///
    /// Fails with [`MinesweeperError::InvalidCellSize`] if the cell size isn't positive, and with
    /// [`MinesweeperError::ViewOutOfBounds`] if some pixel of the field or its status line isn't representable.
    pub fn set_view(&mut self, view: View) -> Result<()> {
        if view.cell_size <= 0 {
            return Err(MinesweeperError::InvalidCellSize(view.cell_size));
        }

        if !self.field.board().fits(view) {
            return Err(MinesweeperError::ViewOutOfBounds(view));
        }

        self.field.set_view(view);
        Ok(())
    }

    pub fn view(&self) -> View {
        self.field.board().view()
    }

    pub fn get_field(&self) -> &Field {
        &self.field
    }

    pub fn get_status(&self) -> MinesweeperStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// The mine that ended the game, if the game has been lost.
    pub fn triggered_mine(&self) -> Option<Position> {
        self.triggered_mine
    }

    /// Handles a click on the display surface.
    ///
    /// Clicks outside the field and clicks after the game has ended are ignored.
    pub fn click(&mut self, event: ClickEvent) -> MinesweeperStatus {
        if self.status.is_finished() {
            trace!(?event, "ignoring a click after the game has ended");
            return self.status;
        }

        match self.field.board().cell_at(event.position) {
            Some(position) => {
                self.take_action(MinesweeperAction::from_button(event.button, position))
            }
            None => {
                trace!(?event, "ignoring a click outside of the field");
                self.status
            }
        }
    }

    /// The method performs the requested action, updates the status of the game and returns it.
    ///
    /// Actions on positions beyond the field and actions taken after the game has ended have no effect.
    pub fn take_action(&mut self, action: MinesweeperAction) -> MinesweeperStatus {
        if self.status.is_finished() {
            return self.status;
        }

        trace!(?action, "taking action");

        match action {
            MinesweeperAction::OpenCell(position) => self.open_cell(position),
            MinesweeperAction::FlagCell(position) => self.flag_cell(position),
        }

        self.status
    }

    fn open_cell(&mut self, position: Position) {
        match self.field.get_cell(position) {
            Some(Cell::Mine { .. }) => {
                self.triggered_mine = Some(position);
                self.end(MinesweeperStatus::Lost);
            }
            Some(Cell::Hidden) => {
                let revealed_amount = self.field.reveal(position);
                debug!(?position, revealed_amount, "opened cells");
            }
            // flagged and already open cells stay as they are
            _ => {}
        }
    }

    fn flag_cell(&mut self, position: Position) {
        // The victory is only checked when a mine gets flagged. Hence a field without mines can never be won.
        if let Some(Cell::Mine { flagged: true }) = self.field.toggle_cell_flag(position) {
            if self.field.check_all_mines_flagged() {
                self.end(MinesweeperStatus::Won);
            }
        }
    }

    fn end(&mut self, status: MinesweeperStatus) {
        info!(?status, "game over");
        self.status = status;
    }

    /// Draws the game on the canvas.
    ///
    /// Every cell gets at most one glyph followed by its outline. When the game is over, the status line is drawn
    /// above the field.
    pub fn render(&self, canvas: &mut impl Canvas) {
        let board = self.field.board();
        let lost = self.status == MinesweeperStatus::Lost;

        for (position, cell) in self.field.cells() {
            let rect = board.cell_rect(position);

            let glyph = match cell {
                Cell::Hidden => None,
                Cell::Mine { .. } if lost => Some(Glyph::Mine {
                    detonated: self.triggered_mine == Some(position),
                }),
                Cell::Mine { flagged: false } => None,
                Cell::Flagged | Cell::Mine { flagged: true } => Some(Glyph::Flag),
                Cell::Revealed(mines_around) => Some(Glyph::Numeral(mines_around)),
            };

            if let Some(glyph) = glyph {
                canvas.draw_glyph(rect, glyph);
            }
            canvas.draw_outline(rect);
        }

        match self.status {
            MinesweeperStatus::Won => canvas.draw_status(VICTORY_TEXT, board.status_rect()),
            MinesweeperStatus::Lost => canvas.draw_status(LOSS_TEXT, board.status_rect()),
            MinesweeperStatus::InProgress => {}
        }
    }
}
