use std::time::Duration;

/// Identifies one armed refresh. A handle that is no longer pending is stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshHandle(u64);

impl RefreshHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    handle: RefreshHandle,
    due_ms: i64,
}

/// Single-shot, delay-based refresh scheduler.
///
/// At most one firing is pending at a time. The owner re-arms after each
/// firing to get a repeating refresh, and cancels on every exit from the
/// running state.
#[derive(Debug)]
pub struct RefreshTimer {
    interval_ms: i64,
    pending: Option<Pending>,
    next_id: u64,
}

impl RefreshTimer {
    pub fn new(interval: Duration) -> Self {
        let interval_ms = i64::try_from(interval.as_millis()).unwrap_or(i64::MAX);
        Self {
            interval_ms: interval_ms.max(1),
            pending: None,
            next_id: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms as u64)
    }

    /// Schedule a firing one interval from `now_ms`, replacing any pending one.
    pub fn arm(&mut self, now_ms: i64) -> RefreshHandle {
        self.next_id += 1;
        let handle = RefreshHandle(self.next_id);
        self.pending = Some(Pending {
            handle,
            due_ms: now_ms.saturating_add(self.interval_ms),
        });
        handle
    }

    pub fn cancel(&mut self) -> Option<RefreshHandle> {
        self.pending.take().map(|p| p.handle)
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<RefreshHandle> {
        self.pending.map(|p| p.handle)
    }

    /// Time left until the pending firing; zero when overdue.
    pub fn due_in(&self, now_ms: i64) -> Option<Duration> {
        self.pending.map(|p| {
            let left = p.due_ms.saturating_sub(now_ms).max(0);
            Duration::from_millis(left as u64)
        })
    }

    /// Consume the pending firing if it is due at `now_ms`.
    pub fn take_due(&mut self, now_ms: i64) -> Option<RefreshHandle> {
        match self.pending {
            Some(p) if now_ms >= p.due_ms => {
                self.pending = None;
                Some(p.handle)
            }
            _ => None,
        }
    }
}
