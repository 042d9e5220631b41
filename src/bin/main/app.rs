//! The terminal application

use crate::game_ui::render_game;
use crate::tui::Render;
use crate::update::ControlsSupport;
use minesweep::board::{Coord, View};
use minesweep::field::MineCount;
use minesweep::{ClickEvent, Minesweeper, MinesweeperError};
use ratatui::Frame;
use tracing::info;

/// Everything needed to (re)create a game and place it on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub width: Coord,
    pub height: Coord,
    pub mines_amount: MineCount,
    /// The side of a cell, in terminal cells.
    pub cell_size: i32,
    /// The column of the field's left edge. Centered when absent.
    pub left: Option<i32>,
    /// The row of the field's top edge. Centered when absent.
    pub top: Option<i32>,
}

impl Settings {
    /// The view for a screen of the given size: explicit offsets win, missing ones center the field.
    pub fn view_for(&self, (screen_width, screen_height): (u16, u16)) -> View {
        let centered = View::centered(
            (screen_width as i32, screen_height as i32),
            (self.width, self.height),
            self.cell_size,
        );

        View::new(
            self.left.unwrap_or(centered.left),
            self.top.unwrap_or(centered.top),
            self.cell_size,
        )
    }
}

/// The terminal application
#[derive(Debug)]
pub struct App {
    /// The game instance.
    pub game: Minesweeper,
    /// The parameters the game was created with.
    pub settings: Settings,
    /// The last known terminal size, used to keep the field centered.
    screen_size: (u16, u16),
    /// Indicates that the main application loop should be broken on the next tick and thus the app should quit.
    pub should_quit: bool,
}

impl App {
    pub fn new(settings: Settings, screen_size: (u16, u16)) -> Result<App, MinesweeperError> {
        Ok(App {
            game: new_game(&settings, screen_size)?,
            settings,
            screen_size,
            should_quit: false,
        })
    }

    /// Re-centers the field after the terminal has been resized.
    pub fn resize(&mut self, screen_size: (u16, u16)) -> Result<(), MinesweeperError> {
        self.screen_size = screen_size;
        self.game.set_view(self.settings.view_for(screen_size))
    }
}

fn new_game(settings: &Settings, screen_size: (u16, u16)) -> Result<Minesweeper, MinesweeperError> {
    let mut game = Minesweeper::new(settings.width, settings.height, settings.mines_amount)?;
    game.set_view(settings.view_for(screen_size))?;

    Ok(game)
}

impl ControlsSupport for App {
    fn click(&mut self, event: ClickEvent) {
        self.game.click(event);
    }

    fn restart(&mut self) -> Result<(), MinesweeperError> {
        info!("starting a new game");
        self.game = new_game(&self.settings, self.screen_size)?;

        Ok(())
    }

    /// Quit the application altogether.
    fn leave(&mut self) {
        self.should_quit = true;
    }
}

impl Render for App {
    fn render(&mut self, frame: &mut Frame) {
        render_game(self, frame);
    }
}

#[cfg(test)]
mod test {
    use super::{App, Settings};
    use crate::update::ControlsSupport;
    use minesweep::board::View;
    use minesweep::{Button, ClickEvent, MinesweeperError, MinesweeperStatus};

    fn settings() -> Settings {
        Settings {
            width: 10,
            height: 10,
            mines_amount: 10,
            cell_size: 3,
            left: None,
            top: None,
        }
    }

    #[test]
    fn the_field_is_centered_unless_placed_explicitly() {
        let settings = settings();

        assert_eq!(settings.view_for((80, 40)), View::new(25, 5, 3));

        let settings = Settings {
            left: Some(2),
            ..settings
        };
        assert_eq!(settings.view_for((80, 40)), View::new(2, 5, 3));
    }

    #[test]
    fn resizing_keeps_the_field_centered() {
        let mut app = App::new(settings(), (80, 40)).unwrap();

        app.resize((100, 50)).unwrap();

        assert_eq!(app.game.view(), View::new(35, 10, 3));
    }

    #[test]
    fn invalid_settings_are_reported() {
        let settings = Settings {
            mines_amount: 100,
            ..settings()
        };

        assert!(App::new(settings, (80, 40)).is_err());
    }

    #[test]
    fn huge_cells_are_reported_instead_of_overflowing() {
        let settings = Settings {
            cell_size: 300_000_000,
            ..settings()
        };

        assert_eq!(
            App::new(settings, (80, 24)).unwrap_err(),
            MinesweeperError::ViewOutOfBounds(settings.view_for((80, 24)))
        );
    }

    #[test]
    fn restarting_starts_a_fresh_game() {
        let mut app = App::new(settings(), (80, 40)).unwrap();
        app.click(ClickEvent::new(Button::Right, (26, 6)));
        assert_eq!(app.game.get_field().get_flagged_cells_amount(), 1);

        app.restart().unwrap();

        assert_eq!(app.game.get_field().get_flagged_cells_amount(), 0);
        assert_eq!(app.game.get_status(), MinesweeperStatus::InProgress);
        assert_eq!(app.game.view(), View::new(25, 5, 3));
    }

    #[test]
    fn leaving_quits_the_app() {
        let mut app = App::new(settings(), (80, 40)).unwrap();

        app.leave();

        assert!(app.should_quit);
    }
}
