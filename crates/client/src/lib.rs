//! Sucre Store Client - session and cart state engine.
//!
//! This crate is the stateful core of the Sucre Store frontend: the pieces
//! with actual invariants and lifecycle rules. Page rendering, forms, and
//! the wider HTTP API live elsewhere and consume these stores directly.
//!
//! # Architecture
//!
//! - [`session::SessionStore`] - who is logged in and with what credential,
//!   persisted to a tab-scoped record
//! - [`cart::CartStore`] - selected catalog items and quantities with
//!   derived totals, persisted durably across restarts
//! - [`guard`] - role-based render-or-redirect decision for protected routes
//! - [`storage`] - injectable persistence backends the stores snapshot into
//! - [`api`] - the authentication endpoint client (login, best-effort logout)
//!
//! Stores are explicitly constructed and passed by reference from the
//! composition root; there are no module-level globals, so tests can build
//! isolated instances per case.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod guard;
pub mod session;
pub mod storage;

pub use api::{ApiError, AuthClient, AuthResponse};
pub use cart::{CartItem, CartStore, ProductDetails};
pub use config::ClientConfig;
pub use guard::{AccessDecision, evaluate_route};
pub use session::{CurrentUser, SessionStore};
pub use storage::{FileStorage, MemoryStorage, StorageBackend, StorageError};
