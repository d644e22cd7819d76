//! Shared plumbing for the address book workspace: logging bootstrap and
//! small response types.

pub mod types;
pub mod utils;
