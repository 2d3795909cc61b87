//! Domain layer for the Splitledger backend.
//!
//! This crate contains:
//! - Domain models (Group, GroupMember, GroupInvite)
//! - Request/response payloads with validation

pub mod models;
