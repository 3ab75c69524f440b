// Library root for the scheduling and standings engine.
//
// Everything here is storage-agnostic: persistence is reached through the
// collaborator traits in `store`, and randomness is always handed in by the
// caller.

pub mod domain;
pub mod error;
pub mod power;
pub mod schedule;
pub mod standings;
pub mod store;

pub use error::{EngineError, Result};
