use std::io;
use std::time::Duration;
use std::time::Instant;

use crossterm::event;
use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::MouseEventKind;

use crate::events::Event;

/// Converts a crossterm event into a simulation event.
///
/// Any key press or mouse button press cancels the run. Everything else, like key releases,
/// mouse movement or resizes, is ignored.
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    match event {
        CrossTermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            Some(Event::Cancel)
        }
        CrossTermEvent::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(_) => Some(Event::Cancel),
            _ => None,
        },
        _ => None,
    }
}

/// Fires [`Event::Advance`] at a fixed interval, unless the user cancels first.
pub struct Ticker {
    interval: Duration,
    deadline: Instant,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: Instant::now() + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until the next tick, or until the user cancels.
    pub fn wait(&mut self) -> io::Result<Event> {
        loop {
            let time_left = self.deadline.saturating_duration_since(Instant::now());

            // Poll terminal events for as long as there is time left before the tick
            if !event::poll(time_left)? {
                self.deadline += self.interval;

                return Ok(Event::Advance);
            }

            if let Some(event) = convert_event(event::read()?) {
                return Ok(event);
            }
        }
    }
}
