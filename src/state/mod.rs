//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! Session state is the only shared model; components read it from context
//! and never mutate it outside `AuthController`.

pub mod auth;
