//! Shelf use-case services.
//!
//! # Responsibility
//! - Orchestrate store, storage and view into user-facing operations.
//! - Own the create/edit form state machine.
//!
//! # Invariants
//! - Every successful mutation re-renders and then saves the full shelf.
//! - Lookup misses never surface as errors.

pub mod form;
pub mod shelf_service;
