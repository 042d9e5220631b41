//! The terminal user interface: entering and leaving the alternate screen and drawing frames.

use crate::event::EventHandler;
use color_eyre::{config::HookBuilder, eyre, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use std::io::{self, Stderr};
use std::panic;

pub type CrosstermTerminal = Terminal<CrosstermBackend<Stderr>>;

/// Anything that knows how to draw itself into a frame.
pub trait Render {
    fn render(&mut self, frame: &mut Frame);
}

/// Representation of a terminal user interface.
///
/// It is responsible for setting up the terminal, initializing the interface and handling the draw events.
pub struct Tui {
    /// Interface to the terminal.
    terminal: CrosstermTerminal,
    /// Terminal event handler.
    pub events: EventHandler,
}

impl Tui {
    /// Constructs a new instance of [`Tui`].
    pub fn new(terminal: CrosstermTerminal, events: EventHandler) -> Self {
        Self { terminal, events }
    }

    /// Initializes the terminal interface.
    ///
    /// It enables the raw mode, the mouse capture and sets terminal properties.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stderr(), EnterAlternateScreen, EnableMouseCapture)?;

        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Resets the terminal interface.
    ///
    /// This function is also used for the panic and error hooks to revert the terminal properties if unexpected errors
    /// occur.
    fn reset() -> Result<()> {
        terminal::disable_raw_mode()?;
        crossterm::execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture)?;
        Ok(())
    }

    /// Exits the terminal interface.
    ///
    /// It disables the raw mode and reverts back the terminal properties.
    pub fn exit(&mut self) -> Result<()> {
        Self::reset()?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// [`Draw`] the terminal interface by [`rendering`] the widgets.
    ///
    /// [`Draw`]: ratatui::Terminal::draw
    /// [`rendering`]: Render::render
    pub fn draw(&mut self, app: &mut impl Render) -> Result<()> {
        self.terminal.draw(|frame| app.render(frame))?;
        Ok(())
    }

    /// The current size of the terminal.
    pub fn size(&self) -> Result<Rect> {
        Ok(self.terminal.size()?)
    }
}

/// Installs the color-eyre panic and error report hooks. Both restore the terminal first, so that the report is
/// readable.
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = HookBuilder::default().into_hooks();

    let panic_hook = panic_hook.into_panic_hook();
    panic::set_hook(Box::new(move |panic_info| {
        Tui::reset().ok();
        panic_hook(panic_info);
    }));

    let eyre_hook = eyre_hook.into_eyre_hook();
    eyre::set_hook(Box::new(move |error| {
        Tui::reset().ok();
        eyre_hook(error)
    }))?;

    Ok(())
}
