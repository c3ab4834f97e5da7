//! Clove Core - Shared types library.
//!
//! This crate provides common types used across all Clove Market components:
//! - `identity` - Identity & profile resolution core (recovery flow, resolver)
//! - the UI surfaces that consume the core (avatar menu, profile viewer, settings)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Roles, newtype wrappers for IDs and emails, the canonical
//!   profile, and the persisted session identity

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
