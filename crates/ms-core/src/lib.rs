//! ms-core: stable foundation for multisplit.
//!
//! Contains:
//! - ids (original node and edge-key identifiers)
//! - numeric (Real + finite checks)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
