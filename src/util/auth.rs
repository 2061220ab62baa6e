//! Shared auth routing helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controller navigates through the [`Navigator`] seam so it does not
//! depend on the router; route components apply identical unauthenticated
//! redirect behavior through [`install_unauth_redirect`].

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// Route navigation used by the session controller.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate(&self, path: &str) {
        self(path);
    }
}

/// True once restore has settled and no user is present.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.is_loading() && !state.is_authenticated()
}

/// Redirect to `target` whenever auth has settled and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, target: String, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(&target, NavigateOptions::default());
        }
    });
}
