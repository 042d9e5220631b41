//! The terminal events handler.
//!
//! A background thread polls crossterm for input and emits a tick whenever the tick rate elapses, so that the main
//! loop redraws at a steady pace even when nothing happens.

use color_eyre::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::error;

/// Terminal events.
#[derive(Clone, Copy, Debug)]
pub enum Event {
    /// Time to redraw.
    Tick,
    /// Key press.
    Key(KeyEvent),
    /// Mouse click/scroll/move.
    Mouse(MouseEvent),
    /// Terminal resize.
    Resize(u16, u16),
}

/// Terminal event handler.
#[derive(Debug)]
pub struct EventHandler {
    /// Event receiver channel.
    receiver: mpsc::Receiver<Event>,
    /// Event handler thread.
    #[allow(dead_code)]
    handler: thread::JoinHandle<()>,
}

impl EventHandler {
    /// Constructs a new instance of [`EventHandler`] ticking every `tick_rate` milliseconds.
    pub fn new(tick_rate: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate.max(1));
        let (sender, receiver) = mpsc::channel();

        let handler = thread::spawn(move || {
            let mut last_tick = Instant::now();

            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => {
                        let event = match event::read() {
                            Ok(CrosstermEvent::Key(e)) if e.kind == KeyEventKind::Press => {
                                Some(Event::Key(e))
                            }
                            Ok(CrosstermEvent::Mouse(e)) => Some(Event::Mouse(e)),
                            Ok(CrosstermEvent::Resize(w, h)) => Some(Event::Resize(w, h)),
                            Ok(_) => None,
                            Err(err) => {
                                error!(%err, "unable to read a terminal event");
                                break;
                            }
                        };

                        // the receiver is gone, the app is shutting down
                        if event.is_some_and(|event| sender.send(event).is_err()) {
                            break;
                        }
                    }
                    Ok(false) => {}
                    Err(err) => {
                        error!(%err, "unable to poll for terminal events");
                        break;
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if sender.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { receiver, handler }
    }

    /// Receive the next event from the handler thread.
    ///
    /// This function will always block the current thread if there is no data available and it's possible for more
    /// data to be sent.
    pub fn next(&self) -> Result<Event> {
        Ok(self.receiver.recv()?)
    }
}
