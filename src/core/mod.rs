//! Core framework primitives shared by every view.
//!
//! - InputEvent: unified terminal input
//! - View: render + input dispatch trait
//! - EventResult: what a view asks the workbench to do next

pub mod event;
pub mod view;

pub use event::InputEvent;
pub use view::{EventResult, View};
