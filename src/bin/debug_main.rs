use clap::Parser;
use color_eyre::Result;
use minesweep::board::{Coord, View};
use minesweep::field::{Field, MineCount};
use minesweep::{Button, ClickEvent, Minesweeper, MinesweeperStatus};
use std::io::{self, BufRead};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Plays a game from the standard input, one click per line.
#[derive(Parser, Debug)]
struct Args {
    #[arg(short, long, default_value_t = 9)]
    width: Coord,
    #[arg(short = 'H', long, default_value_t = 9)]
    height: Coord,
    #[arg(short, long, default_value_t = 10)]
    mines: MineCount,
    /// The field's left edge, in pixels.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    left: i32,
    /// The field's top edge, in pixels.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    top: i32,
    /// The side of a cell, in pixels.
    #[arg(short, long, default_value_t = 1)]
    cell_size: i32,
}

/// Parses `l X Y` (left click) and `r X Y` (right click), the coordinates being pixels.
fn parse_click(line: &str) -> Option<ClickEvent> {
    let [button, x, y]: [&str; 3] = line
        .split_whitespace()
        .collect::<Vec<&str>>()
        .as_slice()
        .try_into()
        .ok()?;

    let button = match button {
        "l" => Button::Left,
        "r" => Button::Right,
        _ => return None,
    };

    Some(ClickEvent::new(button, (x.parse().ok()?, y.parse().ok()?)))
}

fn print_field(field: &Field) {
    println!("{}", field);
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut game = Minesweeper::new(args.width, args.height, args.mines)?;
    game.set_view(View::new(args.left, args.top, args.cell_size))?;

    println!("Enter clicks as `l X Y` or `r X Y` (e.g. `r 3 5` to flag the cell under the pixel (3, 5)):");
    print_field(game.get_field());

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let Some(click) = parse_click(&line) else {
            warn!(%line, "not a click");
            println!("Incorrect input! Please, try again.");
            continue;
        };

        let status = game.click(click);
        print_field(game.get_field());

        if status != MinesweeperStatus::InProgress {
            println!("{:?}", status);
            println!("{:?}", game.get_field());
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::parse_click;
    use minesweep::{Button, ClickEvent};

    #[test]
    fn clicks_are_parsed() {
        assert_eq!(
            parse_click("l 3 5"),
            Some(ClickEvent::new(Button::Left, (3, 5)))
        );
        assert_eq!(
            parse_click("  r -1 0 "),
            Some(ClickEvent::new(Button::Right, (-1, 0)))
        );
    }

    #[test]
    fn garbage_is_rejected() {
        for line in ["", "l 3", "x 1 2", "l a 2", "l 1 2 3"] {
            assert_eq!(parse_click(line), None);
        }
    }
}
