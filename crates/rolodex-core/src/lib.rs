//! Core types and trait definitions for the Rolodex contact manager.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod contact;
pub mod error;
pub mod export;
pub mod query;
pub mod store;

pub use error::{Error, Result};
