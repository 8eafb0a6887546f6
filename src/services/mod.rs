//! Service layer: everything that talks to the outside world.

pub mod github;

pub use github::{FetchOutcome, FetchPayload, GithubClient, GithubError};
