//! hypermob-intake
//!
//! The intake wizard and the record table it writes to. A presenter owns one
//! [`store::RecordStore`], opens at most one [`session::WizardSession`] against
//! it at a time, and hands the store to the session on each forward step.

pub mod commit;
pub mod config;
pub mod edit;
pub mod error;
pub mod session;
pub mod store;
