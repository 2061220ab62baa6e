//! Networking modules for the backend session API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues the HTTP calls and `types` defines the JSON schema shared
//! with the backend.

pub mod api;
pub mod types;
