//! Persistent snapshot storage.
//!
//! # Responsibility
//! - Define the key-value contract the planner persists through.
//! - Encode/decode the two-blob snapshot wire format.
//!
//! # Invariants
//! - Both snapshot halves are written in one visible step.
//! - A corrupt half degrades to empty instead of failing the load.

pub mod kv;
pub mod snapshot;
