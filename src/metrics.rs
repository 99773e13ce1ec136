use std::fmt;

/// Placeholder shown while no time has elapsed
pub const NOT_AVAILABLE: &str = "N/A";

/// The three values shown in the status region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub elapsed_secs: f64,
    pub tap_count: u32,
}

impl Metrics {
    pub fn new(elapsed_secs: f64, tap_count: u32) -> Self {
        Self {
            elapsed_secs,
            tap_count,
        }
    }

    /// Taps per second, `None` until some time has elapsed
    pub fn frequency(&self) -> Option<f64> {
        if self.elapsed_secs > 0.0 {
            Some(self.tap_count as f64 / self.elapsed_secs)
        } else {
            None
        }
    }

    pub fn frequency_text(&self) -> String {
        format_frequency(self.frequency())
    }
}

pub fn format_frequency(frequency: Option<f64>) -> String {
    match frequency {
        Some(f) => format!("{:.2} taps/sec", f),
        None => NOT_AVAILABLE.to_string(),
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time elapsed: {:.2} seconds\nTap count: {} taps\nFrequency: {}",
            self.elapsed_secs,
            self.tap_count,
            self.frequency_text()
        )
    }
}
