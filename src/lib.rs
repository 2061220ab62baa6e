//! # auth-client
//!
//! Leptos + WASM front-end authentication flow: a login form posts
//! credentials to a backend session endpoint, the returned tokens are kept in
//! cookies, the signed-in user is shared through context, and logout is
//! propagated to every open tab of the same origin.
//!
//! ARCHITECTURE
//! ============
//! `state::auth` owns the session state machine and is plain Rust so it can
//! be tested without a browser. `util` holds the browser seams (cookies,
//! cross-tab channel), `net` the HTTP surface, and `components`/`pages` the
//! Leptos wiring on top.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs browser logging and hydrates the app shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
