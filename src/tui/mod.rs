//! Terminal integration (crossterm + ratatui).
//!
//! Kept separate from the view/model layers so the dashboard core never
//! depends on raw-mode or signal plumbing.

pub mod screen;

#[cfg(unix)]
pub use screen::watch_shutdown_signals;
pub use screen::{ScreenGuard, ScreenHandle, ShutdownSignal};
