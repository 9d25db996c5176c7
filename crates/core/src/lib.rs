//! Sucre Store Core - Shared types library.
//!
//! This crate provides common types used across the Sucre Store client
//! components:
//! - `client` - Session, cart, and route-access state engine
//! - `integration-tests` - End-to-end scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
