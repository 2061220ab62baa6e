use super::*;

// =============================================================
// Cookie string formatting
// =============================================================

#[test]
fn set_cookie_string_includes_path_and_max_age() {
    let options = CookieOptions::persistent(&AuthConfig::default());
    let rendered = set_cookie_string("nextauth.token", "abc", &options);
    assert!(rendered.starts_with("nextauth.token=abc"));
    assert!(rendered.contains("Path=/"));
    assert!(rendered.contains("Max-Age=2592000"));
}

#[test]
fn set_cookie_string_expired_uses_zero_max_age() {
    let rendered = set_cookie_string("nextauth.token", "", &CookieOptions::expired("/"));
    assert!(rendered.contains("Max-Age=0"));
}

#[test]
fn set_cookie_string_percent_encodes_value() {
    let options = CookieOptions { path: "/".to_owned(), max_age_secs: None };
    let rendered = set_cookie_string("k", "a b;c", &options);
    assert!(!rendered.contains("a b;c"));
    assert!(!rendered.contains("Max-Age"));
}

// =============================================================
// Cookie header parsing
// =============================================================

#[test]
fn parse_cookie_header_splits_pairs() {
    let parsed = parse_cookie_header("nextauth.token=abc; nextauth.refreshToken=def");
    assert_eq!(parsed.get("nextauth.token").map(String::as_str), Some("abc"));
    assert_eq!(parsed.get("nextauth.refreshToken").map(String::as_str), Some("def"));
}

#[test]
fn parse_cookie_header_decodes_percent_encoding() {
    let parsed = parse_cookie_header("k=a%20b");
    assert_eq!(parsed.get("k").map(String::as_str), Some("a b"));
}

#[test]
fn parse_cookie_header_empty_is_empty() {
    assert!(parse_cookie_header("").is_empty());
}

#[test]
fn parse_cookie_header_skips_malformed_segments() {
    let parsed = parse_cookie_header("novalue; good=1");
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed.get("good").map(String::as_str), Some("1"));
}

// =============================================================
// MemoryCookieJar
// =============================================================

#[test]
fn memory_jar_set_then_get() {
    let jar = MemoryCookieJar::new();
    jar.set("nextauth.token", "abc", &CookieOptions::persistent(&AuthConfig::default()));
    assert_eq!(jar.get("nextauth.token"), Some("abc".to_owned()));
    assert_eq!(jar.len(), 1);
}

#[test]
fn memory_jar_destroy_removes_cookie() {
    let jar = MemoryCookieJar::new();
    jar.set("nextauth.token", "abc", &CookieOptions::persistent(&AuthConfig::default()));
    jar.destroy("nextauth.token", "/");
    assert_eq!(jar.get("nextauth.token"), None);
    assert!(jar.is_empty());
}

#[test]
fn memory_jar_destroy_missing_is_noop() {
    let jar = MemoryCookieJar::new();
    jar.destroy("nextauth.token", "/");
    assert!(jar.is_empty());
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn document_jar_is_empty_outside_browser() {
    let jar = DocumentCookieJar;
    jar.set("k", "v", &CookieOptions::expired("/"));
    assert!(jar.get_all().is_empty());
}
