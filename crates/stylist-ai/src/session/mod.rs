//! Conversation session management.
//!
//! A session holds the message history and the learned profile. Every
//! inbound message runs a two-stage pipeline: generate a reply from the
//! full history, then extract profile updates from the last few messages
//! and merge them in.

mod pipeline;
mod prompt;
mod store;
mod types;

pub use store::SessionStore;
pub use types::{PipelineSettings, SessionSnapshot, TurnError, TurnOutcome};
