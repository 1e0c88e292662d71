//! Editing state and record plumbing for the reaction editor.
//!
//! Everything here except [`api`] and the exports in [`harness`] is plain Rust
//! and runs under the host test harness. The Yew views live in the binary.

pub mod api;
pub mod codec;
pub mod config;
pub mod editor;
pub mod enums;
pub mod error;
pub mod form;
pub mod harness;
pub mod logger;
pub mod reaction;
pub mod record;
pub mod sections;
pub mod session;
pub mod sidebar;
pub mod tracking;
pub mod validation;

pub use editor::{EditorAction, EditorState, Job};
pub use error::EditorError;
pub use reaction::ReactionForm;
