// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod refresh;
pub mod runtime;
pub mod screen;
pub mod snapshot;
pub mod tap_counter;
pub mod ui;

pub use app::{App, AppControl, RuntimeSettings};
pub use error::TaprError;
pub use tap_counter::{TapCounter, TapOutcome, TapState, ToggleLabel};
