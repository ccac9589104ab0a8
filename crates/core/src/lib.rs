//! Domain logic for the Pustaka library-management backend.
//!
//! Pure, I/O-free building blocks shared by the `pustaka-db` and
//! `pustaka-api` crates:
//!
//! - [`error`] -- the domain error taxonomy ([`error::CoreError`]).
//! - [`types`] -- shared type aliases (`DbId`, `Timestamp`).
//! - [`roles`] -- well-known role codes.
//! - [`lending`] -- borrow/return rules: loan-window validation, penalty
//!   computation, and transaction-code generation.
//! - [`assets`] -- uploaded-asset path and URL conventions.

pub mod assets;
pub mod error;
pub mod lending;
pub mod roles;
pub mod types;
