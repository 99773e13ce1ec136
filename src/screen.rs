use std::time::Duration;

use tracing::{debug, info};

use crate::clock::Clock;
use crate::metrics::Metrics;
use crate::snapshot::SessionSnapshot;
use crate::tap_counter::{TapCounter, TapOutcome, ToggleLabel};
use crate::ui::layout::{Region, TapLayout};

/// Commands reachable from the screen's menu
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Reset,
}

/// The host screen around one `TapCounter`.
///
/// A screen is created fresh or from a saved snapshot, receives lifecycle
/// signals, and maps clicks on its regions to the counter. It is rebuilt
/// whenever the terminal geometry changes.
#[derive(Debug)]
pub struct TapScreen<C: Clock> {
    counter: TapCounter<C>,
    layout: Option<TapLayout>,
}

impl<C: Clock> TapScreen<C> {
    pub fn create(clock: C, refresh_interval: Duration, saved: Option<&SessionSnapshot>) -> Self {
        let mut counter = TapCounter::with_clock(clock, refresh_interval);
        match saved {
            Some(snapshot) => {
                counter.restore(snapshot);
                counter.pause();
            }
            None => counter.reset(),
        }
        debug!(restored = saved.is_some(), "screen created");
        Self {
            counter,
            layout: None,
        }
    }

    pub fn counter(&self) -> &TapCounter<C> {
        &self.counter
    }

    pub fn on_pause(&mut self) {
        self.counter.pause();
    }

    pub fn on_stop(&mut self) {
        self.counter.pause();
    }

    pub fn save_state(&self) -> SessionSnapshot {
        self.counter.serialize()
    }

    pub fn on_menu(&mut self, action: MenuAction) {
        match action {
            MenuAction::Reset => self.counter.reset(),
        }
    }

    pub fn on_touch(&mut self) -> TapOutcome {
        self.counter.record_tap_or_resume()
    }

    pub fn on_toggle(&mut self) {
        self.counter.toggle_pause();
    }

    pub fn on_tick(&mut self) -> Option<Metrics> {
        self.counter.on_tick()
    }

    pub fn remember_layout(&mut self, layout: TapLayout) {
        self.layout = Some(layout);
    }

    pub fn layout(&self) -> Option<&TapLayout> {
        self.layout.as_ref()
    }

    /// Route a click to the region under it. Before the first render there
    /// is nothing to hit.
    pub fn click(&mut self, column: u16, row: u16) -> Option<Region> {
        let region = self.layout.as_ref()?.hit(column, row)?;
        match region {
            Region::Touch => {
                self.on_touch();
            }
            Region::Toggle => self.on_toggle(),
        }
        Some(region)
    }

    pub fn status_text(&self) -> String {
        self.counter.status_text()
    }

    pub fn toggle_label(&self) -> ToggleLabel {
        self.counter.toggle_label()
    }
}

impl<C: Clock> Drop for TapScreen<C> {
    fn drop(&mut self) {
        // a torn down screen must not leave a refresh behind
        self.counter.pause();
        info!(count = self.counter.tap_count(), "screen destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::tap_counter::TapState;
    use ratatui::layout::Rect;

    const INTERVAL: Duration = Duration::from_millis(10);

    #[test]
    fn fresh_screen_is_reset() {
        let screen = TapScreen::create(ManualClock::new(0), INTERVAL, None);

        assert_eq!(screen.counter().state(), TapState::Idle);
        assert_eq!(screen.counter().tap_count(), 0);
        assert_eq!(screen.toggle_label(), ToggleLabel::Go);
        assert_eq!(
            screen.status_text(),
            "Time elapsed: 0.00 seconds\nTap count: 0 taps\nFrequency: N/A"
        );
    }

    #[test]
    fn recreated_screen_is_restored_and_not_running() {
        let clock = ManualClock::new(0);
        let mut screen = TapScreen::create(clock.clone(), INTERVAL, None);
        screen.on_touch();
        screen.on_touch();
        screen.on_touch();
        clock.advance(1_500);
        screen.on_pause();
        let saved = screen.save_state();
        drop(screen);

        clock.advance(5_000);
        let screen = TapScreen::create(clock.clone(), INTERVAL, Some(&saved));

        assert_eq!(screen.counter().state(), TapState::Paused);
        assert!(!screen.counter().is_refresh_armed());
        assert_eq!(screen.counter().tap_count(), 2);
        assert_eq!(screen.counter().elapsed_secs(), 1.5);
        assert_eq!(screen.toggle_label(), ToggleLabel::Go);
    }

    #[test]
    fn state_saved_while_running_resumes_forward() {
        let clock = ManualClock::new(0);
        let mut screen = TapScreen::create(clock.clone(), INTERVAL, None);
        for _ in 0..5 {
            screen.on_touch();
        }
        clock.advance(2_000);
        screen.on_tick();
        let before = screen.counter().elapsed_secs();
        let saved = screen.save_state();
        drop(screen);

        let mut screen = TapScreen::create(clock.clone(), INTERVAL, Some(&saved));
        assert_eq!(screen.counter().state(), TapState::Paused);
        assert_eq!(screen.counter().elapsed_secs(), before);

        screen.on_touch();
        clock.advance(10);
        screen.on_tick();
        assert!(screen.counter().elapsed_secs() >= before);
        assert_eq!(screen.counter().tap_count(), 4);
    }

    #[test]
    fn lifecycle_stop_pauses() {
        let mut screen = TapScreen::create(ManualClock::new(0), INTERVAL, None);
        screen.on_toggle();
        assert!(screen.counter().is_running());

        screen.on_stop();
        assert_eq!(screen.counter().state(), TapState::Paused);
        assert_eq!(screen.toggle_label(), ToggleLabel::Go);
    }

    #[test]
    fn menu_reset() {
        let mut screen = TapScreen::create(ManualClock::new(0), INTERVAL, None);
        screen.on_touch();
        screen.on_touch();

        screen.on_menu(MenuAction::Reset);
        assert_eq!(screen.counter().state(), TapState::Idle);
        assert_eq!(screen.counter().tap_count(), 0);
    }

    #[test]
    fn clicks_route_by_region() {
        let mut screen = TapScreen::create(ManualClock::new(0), INTERVAL, None);
        assert_eq!(screen.click(10, 10), None);

        let layout = TapLayout::new(Rect::new(0, 0, 80, 24));
        screen.remember_layout(layout);

        let touch = (layout.touch.x + 1, layout.touch.y + 1);
        let toggle = (layout.toggle.x + 1, layout.toggle.y + 1);

        assert_eq!(screen.click(touch.0, touch.1), Some(Region::Touch));
        assert!(screen.counter().is_running());
        assert_eq!(screen.click(touch.0, touch.1), Some(Region::Touch));
        assert_eq!(screen.counter().tap_count(), 1);

        assert_eq!(screen.click(toggle.0, toggle.1), Some(Region::Toggle));
        assert_eq!(screen.counter().state(), TapState::Paused);

        assert_eq!(screen.click(layout.status.x + 1, layout.status.y + 1), None);
        assert_eq!(screen.counter().tap_count(), 1);
    }
}
