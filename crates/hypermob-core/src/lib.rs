//! hypermob-core
//!
//! Pure domain types for hypermobility intake: the field catalog, wizard
//! steps, the canonical record schema, and the raw and derived observation
//! types. No I/O — this is the shared vocabulary of the intake system.

pub mod error;
pub mod models;
pub mod schema;
