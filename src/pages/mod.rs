//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and reaches the session only
//! through the context provided by `components::auth_provider`.

pub mod dashboard;
pub mod login;
