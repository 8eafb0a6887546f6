//! hubdash - GitHub dashboard for the terminal
//!
//! Module structure:
//! - core: framework primitives (InputEvent, View, EventResult)
//! - models: data models (GitHub API contracts, content TreeNode)
//! - services: remote API layer (GithubClient)
//! - views: view layer (HomeView, ProfileView, RepositoryView, ExplorerView)
//! - app: application layer (Workbench, UiTheme)
//! - tui: terminal integration (guard, signals)

pub mod app;
pub mod core;
pub mod logging;
pub mod models;
pub mod services;
pub mod tui;
pub mod views;
