//! Core types and trait definitions for the Fifty states API.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! It holds the static state table, the fun-fact edit rules, the merge of
//! the two, and the [`store::FunFactStore`] abstraction that backends
//! implement.

pub mod error;
pub mod funfact;
pub mod merge;
pub mod state;
pub mod store;

pub use error::{Error, Result};
