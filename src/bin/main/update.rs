//! The terminal application updater.

use crate::app::App;
use crate::event::Event;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use minesweep::{Button, ClickEvent, MinesweeperError};

/// The controls the application must support.
pub trait ControlsSupport {
    fn click(&mut self, event: ClickEvent);
    fn restart(&mut self) -> Result<(), MinesweeperError>;
    fn leave(&mut self);
}

pub fn update(app: &mut App, event: Event) -> Result<(), MinesweeperError> {
    match event {
        Event::Tick => {}
        Event::Key(key_event) => update_on_key(app, key_event)?,
        Event::Mouse(mouse_event) => {
            if let Some(click) = to_click(mouse_event) {
                app.click(click);
            }
        }
        Event::Resize(width, height) => app.resize((width, height))?,
    };

    Ok(())
}

fn update_on_key(app: &mut App, key_event: KeyEvent) -> Result<(), MinesweeperError> {
    match key_event.code {
        KeyCode::Char('r') => app.restart()?,
        KeyCode::Esc | KeyCode::Char('q') => app.leave(),
        KeyCode::Char('c') => {
            if key_event.modifiers == KeyModifiers::CONTROL {
                app.leave();
            }
        }
        _ => {}
    };

    Ok(())
}

/// Translates a mouse event into a click. Only presses of the left and the right buttons count.
pub fn to_click(mouse_event: MouseEvent) -> Option<ClickEvent> {
    let button = match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => Button::Left,
        MouseEventKind::Down(MouseButton::Right) => Button::Right,
        _ => return None,
    };

    Some(ClickEvent::new(
        button,
        (mouse_event.column as i32, mouse_event.row as i32),
    ))
}
