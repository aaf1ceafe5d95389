//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one path
//! (`blockfall::{core,input,term,types}`) and hosts the runner's
//! configuration and event log.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod config;
pub mod event_log;
