//! Browser-facing helpers shared across the auth flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (cookies, cross-tab
//! messaging, navigation) from the session state machine so each seam can be
//! swapped for an in-process double in tests.

pub mod auth;
pub mod broadcast;
pub mod cookies;
