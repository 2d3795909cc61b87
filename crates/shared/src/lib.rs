//! Shared utilities and common types for the Splitledger backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT access-token issuing and validation
//! - Common validation logic

pub mod jwt;
pub mod validation;
