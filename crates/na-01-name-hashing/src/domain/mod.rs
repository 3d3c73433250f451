//! # Domain Module
//!
//! Core domain types for name hashing.

pub mod errors;
pub mod name;

pub use errors::*;
pub use name::Name;
