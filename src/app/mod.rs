//! Application layer: screen routing, input dispatch, fetch plumbing.

pub mod theme;
pub mod workbench;

pub use theme::{ThemeMode, UiTheme};
pub use workbench::Workbench;
