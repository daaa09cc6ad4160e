//! Meridian Core - Shared types library.
//!
//! This crate provides common types used across all Meridian portal
//! components:
//! - `portal` - Server-rendered administrative front end
//! - `cli` - Command-line tools for configuration and API checks
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Everything
//! here describes data that crosses the boundary to the remote Meridian Lab
//! API or gates access inside the portal.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, prices, roles, and access sets

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
