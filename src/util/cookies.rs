//! Cookie-backed storage for the session token pair.
//!
//! SYSTEM CONTEXT
//! ==============
//! Cookies are the only persisted auth state. They are visible to the backend
//! on the next request and to every tab of the origin, which is what lets a
//! reload restore the session. Values are opaque; nothing here inspects them.
//!
//! `DocumentCookieJar` talks to `document.cookie` and is hydrate-only.
//! `MemoryCookieJar` backs SSR and tests.

#[cfg(test)]
#[path = "cookies_test.rs"]
mod cookies_test;

use std::cell::RefCell;
use std::collections::BTreeMap;

use cookie::Cookie;
use cookie::time::Duration;

use crate::config::AuthConfig;

/// Attributes applied when writing a cookie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieOptions {
    pub path: String,
    /// `None` writes a session cookie; `Some(0)` expires it immediately.
    pub max_age_secs: Option<i64>,
}

impl CookieOptions {
    /// Site-wide cookie living for the configured max-age.
    pub fn persistent(config: &AuthConfig) -> Self {
        Self { path: config.cookie_path.clone(), max_age_secs: Some(config.cookie_max_age_secs) }
    }

    /// Options that remove a cookie previously written under `path`.
    pub fn expired(path: &str) -> Self {
        Self { path: path.to_owned(), max_age_secs: Some(0) }
    }

    fn deletes(&self) -> bool {
        self.max_age_secs.is_some_and(|secs| secs <= 0)
    }
}

/// Read/write/delete access to named cookies.
pub trait SessionStore {
    fn set(&self, name: &str, value: &str, options: &CookieOptions);

    fn get_all(&self) -> BTreeMap<String, String>;

    fn get(&self, name: &str) -> Option<String> {
        self.get_all().remove(name)
    }

    fn destroy(&self, name: &str, path: &str) {
        self.set(name, "", &CookieOptions::expired(path));
    }
}

/// Render a `document.cookie` assignment with percent-encoded name and value.
pub fn set_cookie_string(name: &str, value: &str, options: &CookieOptions) -> String {
    let mut builder = Cookie::build((name.to_owned(), value.to_owned())).path(options.path.clone());
    if let Some(secs) = options.max_age_secs {
        builder = builder.max_age(Duration::seconds(secs.max(0)));
    }
    builder.build().encoded().to_string()
}

/// Decode a `name=value; name2=value2` cookie header. Malformed segments are skipped.
pub fn parse_cookie_header(raw: &str) -> BTreeMap<String, String> {
    Cookie::split_parse_encoded(raw)
        .filter_map(Result::ok)
        .map(|c| (c.name().to_owned(), c.value().to_owned()))
        .collect()
}

/// In-process jar. Share one behind an `Rc` to model tabs of the same origin.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: RefCell<BTreeMap<String, String>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cookies.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.borrow().is_empty()
    }
}

impl SessionStore for MemoryCookieJar {
    fn set(&self, name: &str, value: &str, options: &CookieOptions) {
        let mut cookies = self.cookies.borrow_mut();
        if options.deletes() {
            cookies.remove(name);
        } else {
            cookies.insert(name.to_owned(), value.to_owned());
        }
    }

    fn get_all(&self) -> BTreeMap<String, String> {
        self.cookies.borrow().clone()
    }
}

/// Jar over the page's `document.cookie`. Outside the browser it reads empty
/// and ignores writes.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentCookieJar;

#[cfg(feature = "hydrate")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use wasm_bindgen::JsCast;

    web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
}

impl SessionStore for DocumentCookieJar {
    fn set(&self, name: &str, value: &str, options: &CookieOptions) {
        let assignment = set_cookie_string(name, value, options);
        #[cfg(feature = "hydrate")]
        {
            if let Some(doc) = html_document() {
                let _ = doc.set_cookie(&assignment);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = assignment;
        }
    }

    fn get_all(&self) -> BTreeMap<String, String> {
        #[cfg(feature = "hydrate")]
        {
            html_document()
                .and_then(|doc| doc.cookie().ok())
                .map(|raw| parse_cookie_header(&raw))
                .unwrap_or_default()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            BTreeMap::new()
        }
    }
}
