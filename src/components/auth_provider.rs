//! Context provider wiring `AuthController` into the Leptos tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted inside `<Router>` so the controller can navigate. Children read
//! `RwSignal<AuthState>` for rendering and [`AuthHandle`] to call
//! `sign_in`/`sign_out`.
//!
//! LIFECYCLE
//! =========
//! The cross-tab channel is owned by the app shell and only borrowed here.
//! The logout subscription is released when this provider's owner is cleaned
//! up.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::config::AuthConfig;
use crate::net::api::HttpAuthApi;
use crate::state::auth::{AuthController, AuthState};
use crate::util::auth::Navigator;
use crate::util::broadcast::AuthChannel;
use crate::util::cookies::DocumentCookieJar;

/// Context handle to the session controller.
pub type AuthHandle = StoredValue<AuthController, LocalStorage>;

/// Provide auth state and the session controller to `children`, and start
/// restoring any persisted session.
#[component]
pub fn AuthProvider(
    /// Channel opened once by the app shell.
    channel: StoredValue<Rc<dyn AuthChannel>, LocalStorage>,
    config: AuthConfig,
    children: Children,
) -> impl IntoView {
    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);

    let navigate = use_navigate();
    let navigator: Rc<dyn Navigator> = Rc::new(move |path: &str| navigate(path, NavigateOptions::default()));
    let api = Rc::new(HttpAuthApi::from_config(&config));
    let controller = AuthController::new(config, api, Rc::new(DocumentCookieJar), channel.get_value(), navigator);
    controller.on_change(move |state| auth.set(state.clone()));

    let logout_listener = StoredValue::new_local(Some(controller.listen_for_logout()));
    on_cleanup(move || {
        logout_listener.update_value(|listener| {
            listener.take();
        });
    });

    #[cfg(feature = "hydrate")]
    {
        let restore = controller.restore();
        leptos::task::spawn_local(async move {
            let _ = restore.await;
        });
    }

    let handle: AuthHandle = StoredValue::new_local(controller);
    provide_context(handle);

    children()
}
