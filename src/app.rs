use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::Config;
use crate::runtime::TapEvent;
use crate::screen::{MenuAction, TapScreen};
use crate::snapshot::SessionSnapshot;
use crate::tap_counter::TapOutcome;

/// Settings in effect for this run: persisted config merged with CLI flags
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeSettings {
    pub refresh_interval: Duration,
    pub mouse: bool,
    pub pause_on_focus_lost: bool,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for RuntimeSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            refresh_interval: Duration::from_millis(cfg.refresh_interval_ms),
            mouse: cfg.mouse,
            pause_on_focus_lost: cfg.pause_on_focus_lost,
        }
    }
}

/// What the run loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Redraw,
    Idle,
    Quit,
}

#[derive(Debug)]
pub struct App<C: Clock + Clone> {
    clock: C,
    settings: RuntimeSettings,
    screen: TapScreen<C>,
    screens_created: u32,
}

impl<C: Clock + Clone> App<C> {
    pub fn new(clock: C, settings: RuntimeSettings) -> Self {
        let screen = TapScreen::create(clock.clone(), settings.refresh_interval, None);
        Self {
            clock,
            settings,
            screen,
            screens_created: 1,
        }
    }

    pub fn screen(&self) -> &TapScreen<C> {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut TapScreen<C> {
        &mut self.screen
    }

    pub fn settings(&self) -> &RuntimeSettings {
        &self.settings
    }

    pub fn screens_created(&self) -> u32 {
        self.screens_created
    }

    pub fn refresh_due_in(&self) -> Option<Duration> {
        self.screen.counter().refresh_due_in()
    }

    /// Tear the screen down and build a new one from its saved state, the
    /// same path a geometry change takes.
    /// Tear the screen down and build a new one from its saved state. The
    /// state crosses over as JSON, the same form a host bundle would carry.
    pub fn recreate_screen(&mut self) {
        self.screen.on_pause();
        let saved = self.screen.save_state();
        let saved = match saved.to_json().and_then(|json| SessionSnapshot::from_json(&json)) {
            Ok(decoded) => decoded,
            Err(err) => {
                warn!(%err, "snapshot transport failed, keeping in-memory state");
                saved
            }
        };
        self.screen = TapScreen::create(self.clock.clone(), self.settings.refresh_interval, Some(&saved));
        self.screens_created += 1;
        info!(screens = self.screens_created, "screen recreated");
    }

    pub fn handle(&mut self, event: TapEvent) -> AppControl {
        match event {
            TapEvent::Tick => match self.screen.on_tick() {
                Some(_) => AppControl::Redraw,
                None => AppControl::Idle,
            },
            TapEvent::Key(key) => self.on_key(key),
            TapEvent::Mouse(mouse) => self.on_mouse(mouse),
            TapEvent::FocusLost => {
                if self.settings.pause_on_focus_lost {
                    self.screen.on_pause();
                    AppControl::Redraw
                } else {
                    AppControl::Idle
                }
            }
            TapEvent::FocusGained => AppControl::Idle,
            TapEvent::Resize(width, height) => {
                debug!(width, height, "resize");
                self.recreate_screen();
                AppControl::Redraw
            }
            TapEvent::Closed => self.quit(),
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> AppControl {
        if key.kind != KeyEventKind::Press {
            return AppControl::Idle;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return self.quit();
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return self.quit(),
            KeyCode::Char(' ') => self.touch(),
            KeyCode::Enter | KeyCode::Char('p') => self.screen.on_toggle(),
            KeyCode::Char('r') => self.screen.on_menu(MenuAction::Reset),
            _ => return AppControl::Idle,
        }
        AppControl::Redraw
    }

    fn on_mouse(&mut self, mouse: MouseEvent) -> AppControl {
        if !self.settings.mouse {
            return AppControl::Idle;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match self.screen.click(mouse.column, mouse.row) {
                Some(_) => AppControl::Redraw,
                None => AppControl::Idle,
            },
            _ => AppControl::Idle,
        }
    }

    fn touch(&mut self) {
        if let TapOutcome::Started = self.screen.on_touch() {
            debug!("touch started session");
        }
    }

    fn quit(&mut self) -> AppControl {
        self.screen.on_stop();
        AppControl::Quit
    }
}
