pub mod app;
pub mod event;
pub mod game_ui;
pub mod tui;
pub mod update;

use app::{App, Settings};
use clap::Parser;
use color_eyre::Result;
use event::EventHandler;
use minesweep::board::Coord;
use minesweep::field::MineCount;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tui::Tui;
use update::update;

#[derive(Parser, Debug)]
#[command(author, version, about = "Minesweeper in the terminal, played with the mouse", long_about = None)]
struct Args {
    /// The number of columns of the field.
    #[arg(short, long, default_value_t = 10)]
    width: Coord,
    /// The number of rows of the field.
    #[arg(short = 'H', long, default_value_t = 10)]
    height: Coord,
    /// The number of mines, less than the number of cells.
    #[arg(short, long, default_value_t = 10)]
    mines: MineCount,
    /// The side of a single cell, in terminal cells.
    #[arg(short, long, default_value_t = 3)]
    cell_size: i32,
    /// The column of the field's left edge. The field is centered horizontally when omitted.
    #[arg(long, allow_negative_numbers = true)]
    left: Option<i32>,
    /// The row of the field's top edge. The field is centered vertically when omitted.
    #[arg(long, allow_negative_numbers = true)]
    top: Option<i32>,
    /// Milliseconds between two redraws.
    #[arg(long, default_value_t = 8)]
    tick_rate: u64,
    /// Write logs to this file. Nothing is logged otherwise, the terminal is busy with the game.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            width: self.width,
            height: self.height,
            mines_amount: self.mines,
            cell_size: self.cell_size,
            left: self.left,
            top: self.top,
        }
    }
}

/// Sends the logs to the given file, filtered by `RUST_LOG` (`info` by default).
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    tui::install_hooks()?;
    init_logging(args.log_file.as_deref())?;

    // Initialize the terminal user interface.
    let backend = CrosstermBackend::new(std::io::stderr());
    let terminal = Terminal::new(backend)?;
    let events = EventHandler::new(args.tick_rate);
    let mut tui = Tui::new(terminal, events);

    // Create the game before entering the alternate screen, so that bad parameters are reported plainly.
    let size = tui.size()?;
    let mut app = App::new(args.settings(), (size.width, size.height))?;

    tui.enter()?;

    // Start the main loop.
    while !app.should_quit {
        // Render the user interface.
        tui.draw(&mut app)?;
        // Handle events.
        update(&mut app, tui.events.next()?)?;
    }

    // Exit the user interface.
    tui.exit()?;
    Ok(())
}
