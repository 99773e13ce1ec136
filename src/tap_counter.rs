use std::time::Duration;

use tracing::{debug, info, trace};

use crate::clock::{Clock, SystemClock};
use crate::metrics::Metrics;
use crate::refresh::RefreshTimer;
use crate::snapshot::{SessionSnapshot, SNAPSHOT_VERSION};

/// How often the displayed metrics are recomputed while running
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum TapState {
    Idle,
    Running,
    Paused,
}

/// What a touch did to the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// The touch started or resumed the session and was not counted
    Started,
    /// The touch was counted; holds the new tap count
    Counted(u32),
}

/// Two-state label of the pause/resume control
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum ToggleLabel {
    Go,
    Pause,
}

/// Tap-frequency state machine: idle, running, paused.
///
/// Owns the session counters and the refresh timer. The host forwards
/// touches, toggle clicks and ticks; every exit from `Running` cancels the
/// pending refresh before touching the counters.
#[derive(Debug)]
pub struct TapCounter<C: Clock = SystemClock> {
    clock: C,
    state: TapState,
    tap_count: u32,
    session_start_ms: i64,
    accumulated_ms: i64,
    elapsed_secs: f64,
    refresh: RefreshTimer,
}

impl TapCounter<SystemClock> {
    pub fn new(refresh_interval: Duration) -> Self {
        Self::with_clock(SystemClock, refresh_interval)
    }
}

impl<C: Clock> TapCounter<C> {
    pub fn with_clock(clock: C, refresh_interval: Duration) -> Self {
        let now = clock.now_millis();
        Self {
            clock,
            state: TapState::Idle,
            tap_count: 0,
            session_start_ms: now,
            accumulated_ms: 0,
            elapsed_secs: 0.0,
            refresh: RefreshTimer::new(refresh_interval),
        }
    }

    pub fn state(&self) -> TapState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TapState::Running
    }

    pub fn tap_count(&self) -> u32 {
        self.tap_count
    }

    pub fn session_start_ms(&self) -> i64 {
        self.session_start_ms
    }

    pub fn accumulated_ms(&self) -> i64 {
        self.accumulated_ms
    }

    /// Elapsed seconds as of the last refresh; frozen while not running
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn metrics(&self) -> Metrics {
        Metrics::new(self.elapsed_secs, self.tap_count)
    }

    pub fn status_text(&self) -> String {
        self.metrics().to_string()
    }

    pub fn toggle_label(&self) -> ToggleLabel {
        if self.is_running() {
            ToggleLabel::Pause
        } else {
            ToggleLabel::Go
        }
    }

    pub fn is_refresh_armed(&self) -> bool {
        self.refresh.is_armed()
    }

    /// Time until the next refresh is due, `None` while disarmed
    pub fn refresh_due_in(&self) -> Option<Duration> {
        self.refresh.due_in(self.clock.now_millis())
    }

    /// A touch on the tap area. Starts or resumes a stopped session without
    /// counting; counts one tap while running.
    pub fn record_tap_or_resume(&mut self) -> TapOutcome {
        match self.state {
            TapState::Idle | TapState::Paused => {
                self.resume();
                TapOutcome::Started
            }
            TapState::Running => {
                self.tap_count = self.tap_count.saturating_add(1);
                debug!(count = self.tap_count, "tap");
                TapOutcome::Counted(self.tap_count)
            }
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.resume();
        }
    }

    pub fn pause(&mut self) {
        self.refresh.cancel();
        if self.state != TapState::Running {
            return;
        }

        let now = self.clock.now_millis();
        self.accumulated_ms = self.accumulated_ms.saturating_add(self.interval_since_start(now));
        self.elapsed_secs = millis_to_secs(self.accumulated_ms);
        self.state = TapState::Paused;
        info!(
            count = self.tap_count,
            accumulated_ms = self.accumulated_ms,
            "session paused"
        );
    }

    pub fn resume(&mut self) {
        let now = self.clock.now_millis();
        if self.state == TapState::Running {
            // restarting a live interval must not drop the time already run
            self.accumulated_ms = self.accumulated_ms.saturating_add(self.interval_since_start(now));
        }

        let from = self.state;
        self.session_start_ms = now;
        self.state = TapState::Running;
        self.refresh.arm(now);
        info!(%from, accumulated_ms = self.accumulated_ms, "session running");
    }

    pub fn reset(&mut self) {
        self.refresh.cancel();
        self.tap_count = 0;
        self.session_start_ms = self.clock.now_millis();
        self.accumulated_ms = 0;
        self.elapsed_secs = 0.0;
        self.state = TapState::Idle;
        info!("session reset");
    }

    /// Refresh loop body. Recomputes the elapsed time and re-arms when the
    /// pending refresh is due; otherwise does nothing.
    pub fn on_tick(&mut self) -> Option<Metrics> {
        let now = self.clock.now_millis();
        let handle = self.refresh.take_due(now)?;

        self.elapsed_secs = self.compute_elapsed_secs(now);
        self.refresh.arm(now);
        trace!(
            refresh = handle.id(),
            elapsed_secs = self.elapsed_secs,
            "refresh"
        );
        Some(self.metrics())
    }

    /// Capture the counters. While running, the in-flight interval is folded
    /// into `offset` and `initTime` is rebased to now, so the snapshot holds
    /// all the time counted so far.
    pub fn serialize(&self) -> SessionSnapshot {
        let (init_time, offset) = match self.state {
            TapState::Running => {
                let now = self.clock.now_millis();
                let in_flight = self.interval_since_start(now);
                (now, self.accumulated_ms.saturating_add(in_flight))
            }
            TapState::Idle | TapState::Paused => (self.session_start_ms, self.accumulated_ms),
        };
        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            count: Some(self.tap_count),
            init_time: Some(init_time),
            curr_time: Some(self.elapsed_secs),
            offset: Some(offset),
        }
    }

    /// Repopulate the counters from a snapshot. A running counter keeps
    /// running; an idle one that receives any progress becomes Paused, since
    /// Idle only ever holds zeroed counters. The refresh is left alone and
    /// callers pause afterwards so the session does not resume on its own.
    pub fn restore(&mut self, snapshot: &SessionSnapshot) {
        let now = self.clock.now_millis();
        self.tap_count = snapshot.count_or_default();
        self.session_start_ms = snapshot.init_time_or(now);
        self.elapsed_secs = non_negative(snapshot.curr_time_or_default());
        self.accumulated_ms = snapshot.offset_or_default().max(0);
        if self.state == TapState::Idle && self.has_progress() {
            self.state = TapState::Paused;
        }
        info!(
            state = %self.state,
            count = self.tap_count,
            elapsed_secs = self.elapsed_secs,
            "session restored"
        );
    }

    fn has_progress(&self) -> bool {
        self.tap_count > 0 || self.accumulated_ms > 0 || self.elapsed_secs > 0.0
    }

    fn interval_since_start(&self, now: i64) -> i64 {
        now.saturating_sub(self.session_start_ms).max(0)
    }

    fn compute_elapsed_secs(&self, now: i64) -> f64 {
        let total = now
            .saturating_sub(self.session_start_ms)
            .saturating_add(self.accumulated_ms);
        non_negative(millis_to_secs(total))
    }
}

fn millis_to_secs(ms: i64) -> f64 {
    ms as f64 / 1000.0
}

fn non_negative(secs: f64) -> f64 {
    if secs > 0.0 {
        secs
    } else {
        0.0
    }
}
