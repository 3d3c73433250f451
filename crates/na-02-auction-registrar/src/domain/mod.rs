//! # Domain Module
//!
//! Core domain types for the auction registrar.

pub mod config;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod secure_salt;
pub mod value_objects;

pub use config::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use secure_salt::BidSalt;
pub use value_objects::*;
