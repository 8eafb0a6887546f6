//! View layer.
//!
//! - HomeView: search entry point
//! - ProfileView: user card, stats, repository list
//! - RepositoryView: repo header, languages, commits, explorer + preview
//! - ExplorerView: the content tree (see `explorer`)
//! - PreviewView: selected file content

pub mod explorer;
pub mod home;
pub mod preview;
pub mod profile;
pub mod repository;
pub mod widgets;

pub use explorer::{ExplorerRow, ExplorerView};
pub use home::HomeView;
pub use preview::PreviewView;
pub use profile::ProfileView;
pub use repository::RepositoryView;
