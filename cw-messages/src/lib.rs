//! cw-messages
//!
//! Centralized messaging for the cw bridge.
//! Provides standardized templates, a message builder, and semantic categories
//! for user-facing output.

pub mod builder;
pub mod categories;
pub mod macros;
pub mod messages;

pub use messages::MESSAGES;
