//! Shared components.

pub mod auth_provider;
