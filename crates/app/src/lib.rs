//! Lumina application core
//!
//! The session controller that drives the redesign workflow, plus image
//! file import and export. The binary in `main.rs` is a thin CLI over
//! this crate.

pub mod ingest;
pub mod session;

pub use session::{Session, SessionError, SessionState};
