//! Dashboard page: the authenticated landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders what the backend returned for the signed-in user and offers
//! sign-out. Visitors without a session are sent to the landing route once
//! restore has settled.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::auth_provider::AuthHandle;
use crate::net::types::User;
use crate::state::auth::{AuthController, AuthState};
use crate::util::auth::install_unauth_redirect;

pub(crate) fn describe_list(items: &[String]) -> String {
    if items.is_empty() { "none".to_owned() } else { items.join(", ") }
}

pub(crate) fn greeting(user: Option<&User>) -> String {
    user.map_or_else(|| "Welcome".to_owned(), |u| format!("Welcome, {}", u.email))
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let controller = expect_context::<AuthHandle>();

    let landing = controller.with_value(|c| c.config().landing_route.clone());
    install_unauth_redirect(auth, landing, use_navigate());

    let on_sign_out = move |_| controller.with_value(AuthController::sign_out);

    view! {
        <Show
            when=move || auth.get().is_authenticated()
            fallback=|| view! { <p class="dashboard__loading">"Loading..."</p> }
        >
            <div class="dashboard">
                <h1>{move || greeting(auth.get().user.as_ref())}</h1>
                <p class="dashboard__field">
                    "Permissions: "
                    {move || auth.get().user.map(|u| describe_list(&u.permissions)).unwrap_or_default()}
                </p>
                <p class="dashboard__field">
                    "Roles: " {move || auth.get().user.map(|u| describe_list(&u.roles)).unwrap_or_default()}
                </p>
                <button class="dashboard__sign-out" on:click=on_sign_out>
                    "Sign out"
                </button>
            </div>
        </Show>
    }
}
