use std::fmt::{Display, Formatter};

/// The state of a single cell of the field.
///
/// Whether a cell holds a mine is a part of its state, so a mine can never be revealed and a revealed cell can never
/// hold a mine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    /// A closed cell without a mine.
    #[default]
    Hidden,
    /// A closed cell without a mine that the player has flagged.
    Flagged,
    /// A closed cell with a mine. The boolean value indicates whether the player has flagged it.
    Mine { flagged: bool },
    /// An open cell. The value is the amount of mines around it.
    Revealed(u8),
}

impl Cell {
    /// Checks whether the cell holds a mine, flagged or not.
    pub fn is_mined(&self) -> bool {
        matches!(self, Cell::Mine { .. })
    }

    /// Checks whether the cell holds a mine the player hasn't flagged yet.
    pub fn is_unflagged_mine(&self) -> bool {
        matches!(self, Cell::Mine { flagged: false })
    }

    /// Check whether the cell is flagged.
    pub fn is_flagged(&self) -> bool {
        matches!(self, Cell::Flagged | Cell::Mine { flagged: true })
    }

    /// Checks whether the cell is open.
    pub fn is_revealed(&self) -> bool {
        matches!(self, Cell::Revealed(_))
    }

    /// Returns the cell with the flag toggled.
    ///
    /// Revealed cells are returned as is.
    pub fn with_flag_toggled(self) -> Self {
        match self {
            Cell::Hidden => Cell::Flagged,
            Cell::Flagged => Cell::Hidden,
            Cell::Mine { flagged } => Cell::Mine { flagged: !flagged },
            revealed @ Cell::Revealed(_) => revealed,
        }
    }
}

/// The `Display` implementation shows what the player sees: the mines stay hidden.
impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Hidden | Cell::Mine { flagged: false } => write!(f, "#"),
            Cell::Flagged | Cell::Mine { flagged: true } => write!(f, "F"),
            Cell::Revealed(0) => write!(f, "."),
            Cell::Revealed(n) => write!(f, "{n}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Cell;

    #[test]
    fn a_new_cell_is_hidden() {
        assert_eq!(Cell::default(), Cell::Hidden);
    }

    #[test]
    fn toggling_the_flag_twice_restores_the_cell() {
        for cell in [Cell::Hidden, Cell::Mine { flagged: false }] {
            let flagged = cell.with_flag_toggled();

            assert!(flagged.is_flagged());
            assert_eq!(flagged.with_flag_toggled(), cell);
        }
    }

    #[test]
    fn toggling_the_flag_keeps_the_mine() {
        assert_eq!(
            Cell::Mine { flagged: false }.with_flag_toggled(),
            Cell::Mine { flagged: true }
        );
        assert_eq!(Cell::Hidden.with_flag_toggled(), Cell::Flagged);
    }

    #[test]
    fn toggling_the_flag_has_no_effect_on_revealed_cells() {
        assert_eq!(Cell::Revealed(3).with_flag_toggled(), Cell::Revealed(3));
    }

    #[test]
    fn predicates_match_the_states() {
        assert!(Cell::Mine { flagged: true }.is_mined());
        assert!(!Cell::Mine { flagged: true }.is_unflagged_mine());
        assert!(Cell::Mine { flagged: false }.is_unflagged_mine());
        assert!(!Cell::Flagged.is_mined());
        assert!(Cell::Revealed(0).is_revealed());
        assert!(!Cell::Flagged.is_revealed());
    }

    #[test]
    fn display_keeps_the_mines_hidden() {
        let rendered: String = [
            Cell::Hidden,
            Cell::Mine { flagged: false },
            Cell::Flagged,
            Cell::Mine { flagged: true },
            Cell::Revealed(0),
            Cell::Revealed(4),
        ]
        .iter()
        .map(|cell| cell.to_string())
        .collect();

        assert_eq!(rendered, "##FF.4");
    }
}
