//! Data models.
//!
//! - github: serde contracts for the GitHub REST API
//! - file_tree: content TreeNode + pure tree construction

pub mod file_tree;
pub mod github;

pub use file_tree::{build_tree, graft_children, name_order, NodeKind, TreeNode};
pub use github::{
    Commit, CommitActor, CommitAuthor, CommitDetail, ContentEntry, License, Repository, RepoOwner,
    UserProfile,
};
