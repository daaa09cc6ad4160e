//! Core types for the Meridian Diagnostics portal.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod access;
pub mod email;
pub mod id;
pub mod identity;
pub mod price;
pub mod role;
pub mod status;

pub use access::{Access, MANAGERS, STAFF};
pub use email::{Email, EmailError};
pub use id::*;
pub use identity::Identity;
pub use price::Price;
pub use role::Role;
pub use status::*;
