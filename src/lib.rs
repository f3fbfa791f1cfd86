//! Shared library for `academic-navigator`
//! Contains the record model, derivations, mutations and the persistence adapter
//! used by the `navigator` binary and by any other front end.

pub mod logger;

pub mod core;

pub use crate::core::{config, get_version};
