//! Navigation session
//!
//! Wires geocoding, routing, the map and progress tracking together behind
//! a single event queue.

#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod session;

pub use config::{SessionConfig, ConfigError};
pub use context::SessionContext;
pub use session::{NavigationSession, Flow, PROMPT_TEXT};
