//! Service layer for the address book.
//! - `address`: domain types, the repository capability and its stores,
//!   and the lifecycle service.
//! - `errors`: storage failure taxonomy shared by every store.
//! - `runtime`: builds the configured repository at startup.

pub mod address;
pub mod errors;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
