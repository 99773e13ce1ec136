use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum TapEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    FocusGained,
    FocusLost,
    Resize(u16, u16),
    /// The pending refresh is due
    Tick,
    /// The input source went away
    Closed,
}

/// Source of terminal events (keyboard, mouse, focus, resize)
pub trait TapEventSource: Send + 'static {
    /// Wait for the next event. `None` waits indefinitely; `Some(timeout)`
    /// gives up with `Err(Timeout)` once it expires.
    fn recv_timeout(&self, timeout: Option<Duration>) -> Result<TapEvent, RecvTimeoutError>;
}

fn recv_from(rx: &Receiver<TapEvent>, timeout: Option<Duration>) -> Result<TapEvent, RecvTimeoutError> {
    match timeout {
        Some(timeout) => rx.recv_timeout(timeout),
        None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
    }
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<TapEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let ev = match event::read() {
                Ok(CtEvent::Key(key)) => TapEvent::Key(key),
                Ok(CtEvent::Mouse(mouse)) => TapEvent::Mouse(mouse),
                Ok(CtEvent::FocusGained) => TapEvent::FocusGained,
                Ok(CtEvent::FocusLost) => TapEvent::FocusLost,
                Ok(CtEvent::Resize(w, h)) => TapEvent::Resize(w, h),
                Ok(_) => continue,
                Err(e) => {
                    tracing::error!("terminal input failed: {}", e);
                    break;
                }
            };
            if tx.send(ev).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TapEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Option<Duration>) -> Result<TapEvent, RecvTimeoutError> {
        recv_from(&self.rx, timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<TapEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TapEvent>) -> Self {
        Self { rx }
    }
}

impl TapEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Option<Duration>) -> Result<TapEvent, RecvTimeoutError> {
        recv_from(&self.rx, timeout)
    }
}

/// Runner that advances the application one event at a time
pub struct Runner<E: TapEventSource> {
    event_source: E,
}

impl<E: TapEventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    /// Returns the next event, or `Tick` once `refresh_due_in` has passed
    /// without one. With no refresh pending this waits for input only.
    pub fn step(&self, refresh_due_in: Option<Duration>) -> TapEvent {
        match self.event_source.recv_timeout(refresh_due_in) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => TapEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => TapEvent::Closed,
        }
    }
}
