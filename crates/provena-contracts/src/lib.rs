//! # provena-contracts
//!
//! Shared types and error contracts for the PROVENA audit subsystem.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions, the permission table, and error types.

pub mod access;
pub mod error;
pub mod event;
