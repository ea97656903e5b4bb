use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};

use crate::error::Result;

/// Events the explorer reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press event.
    Key(KeyEvent),
    /// Terminal resize event.
    Resize(u16, u16),
}

impl Event {
    /// Keep keys and resizes; mouse, focus and paste events are dropped.
    fn from_crossterm(event: CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Key(key) => Some(Event::Key(key)),
            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
            _ => None,
        }
    }
}

/// Blocking reader over the terminal's input stream.
#[derive(Debug, Default)]
pub struct EventSource;

impl EventSource {
    /// Block until the next relevant event arrives.
    pub fn next(&mut self) -> Result<Event> {
        loop {
            if let Some(event) = Event::from_crossterm(event::read()?) {
                return Ok(event);
            }
        }
    }
}
