//! Typed wrappers over each cwctl sub-command family.
//!
//! Every operation is a method on [`crate::CwctlClient`]: it picks the
//! sub-command, options and wait class, then parses the payload.

mod auth;
mod connections;
mod projects;
mod registries;
mod runtime;
mod templates;

pub use projects::BindRequest;

pub(crate) const CONID: &str = "--conid";
