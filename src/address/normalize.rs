// src/address/normalize.rs
// =============================================================================
// This module turns raw address strings into canonical addresses.
//
// A canonical address is what we compare when deciding "have we already
// mirrored this page?", and it also decides where on disk the page ends up.
//
// Steps (in this order):
// 1. Cut off the #fragment, then the ?query
// 2. Add a trailing slash unless the address ends in ".html" or "/"
// 3. Percent-decode (%20 -> space, etc.)
// 4. Split out the scheme and the domain
//
// Why not url::Url for everything?
// - Url::parse refuses addresses without a scheme ("example.org/foo")
// - Url lowercases hosts and re-encodes paths, so it would not give us back
//   the same string we compare against
// - We still use url::Url later when joining relative links
// =============================================================================

use std::fmt;

// Escapes that must survive decoding. Decoding them would let a second
// normalization pass cut the address again (%23 -> '#', %3F -> '?') or decode
// a second time (%25 -> '%').
const KEPT_ESCAPES: [&str; 3] = ["23", "3F", "25"];

/// A canonical, comparable address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedAddress {
    scheme: String,
    domain: String,
    path: String,
    raw: String,
}

impl NormalizedAddress {
    /// Normalizes `address`. Never fails: anything that is not a valid URI
    /// simply ends up with an empty scheme and/or domain.
    pub fn parse(address: &str) -> Self {
        let raw = percent_decode(&cut_address(address));
        let parts = split_uri(&raw);

        Self {
            scheme: parts.scheme.to_string(),
            domain: parts.authority.to_string(),
            path: parts.path.to_string(),
            raw,
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The authority component, e.g. `www.example.org` or `127.0.0.1:8080`.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The canonical address string. This is the dedup key.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    // Where this page lives inside the mirror root
    //
    // Examples:
    //   http://example.org/          -> example.org/index.html
    //   http://example.org/foo/      -> example.org/foo/index.html
    //   http://example.org/qux.html  -> example.org/qux.html
    pub fn local_path(&self) -> String {
        let mut path = format!("{}{}", self.domain, self.path);
        if !path.ends_with(".html") {
            if !path.is_empty() && !path.ends_with('/') {
                path.push('/');
            }
            path.push_str("index.html");
        }
        path
    }
}

impl fmt::Display for NormalizedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Shorthand for [`NormalizedAddress::parse`].
pub fn normalize(address: &str) -> NormalizedAddress {
    NormalizedAddress::parse(address)
}

/// True if the address carries a scheme (`http:`, `mailto:`, ...).
///
/// A domain alone does not make an address absolute: `//example.org/foo`
/// is scheme-relative and still has to be joined onto a base.
pub fn is_absolute(address: &str) -> bool {
    !split_uri(address).scheme.is_empty()
}

// Strips the fragment and query and makes sure non-file addresses end in '/'
fn cut_address(address: &str) -> String {
    let address = address.find('#').map_or(address, |i| &address[..i]);
    let address = address.find('?').map_or(address, |i| &address[..i]);

    let mut cut = address.to_string();
    if !(cut.ends_with(".html") || cut.ends_with('/')) {
        cut.push('/');
    }
    cut
}

// Percent-decodes everything except KEPT_ESCAPES
fn percent_decode(input: &str) -> String {
    let mut decoded = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(at) = find_kept_escape(rest) {
        decoded.push_str(&decode_lossy(&rest[..at]));
        decoded.push_str(&rest[at..at + 3]);
        rest = &rest[at + 3..];
    }
    decoded.push_str(&decode_lossy(rest));

    decoded
}

fn find_kept_escape(input: &str) -> Option<usize> {
    input.match_indices('%').map(|(i, _)| i).find(|&i| {
        input
            .get(i + 1..i + 3)
            .is_some_and(|hex| KEPT_ESCAPES.iter().any(|kept| kept.eq_ignore_ascii_case(hex)))
    })
}

fn decode_lossy(input: &str) -> String {
    let bytes = urlencoding::decode_binary(input.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

// The pieces of an address we care about
struct UriParts<'a> {
    scheme: &'a str,
    authority: &'a str,
    path: &'a str,
}

// Generic URI split from RFC 3986, appendix B:
//   ^(([^:/?#]+):)?(//([^/?#]*))?([^?#]*)
// with the scheme additionally required to look like a scheme
// (ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )).
fn split_uri(address: &str) -> UriParts<'_> {
    let (scheme, rest) = match address.find(|c: char| matches!(c, ':' | '/' | '?' | '#')) {
        Some(colon) if address[colon..].starts_with(':') && is_scheme(&address[..colon]) => {
            (&address[..colon], &address[colon + 1..])
        }
        _ => ("", address),
    };

    let (authority, rest) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find(|c: char| matches!(c, '/' | '?' | '#')).unwrap_or(after.len());
            (&after[..end], &after[end..])
        }
        None => ("", rest),
    };

    let path_end = rest.find(|c: char| matches!(c, '?' | '#')).unwrap_or(rest.len());

    UriParts {
        scheme,
        authority,
        path: &rest[..path_end],
    }
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why do the fields have no 'pub'?
//    - A NormalizedAddress must stay normalized
//    - The only way to build one is parse(), and accessors hand out &str,
//      so nobody can edit it into a non-canonical state afterwards
//
// 2. What is UriParts<'a>?
//    - A struct holding borrowed slices of the input string
//    - The 'a says "these slices live as long as the string they came from"
//    - No copying happens until we call .to_string()
//
// 3. What is map_or?
//    - option.map_or(default, f) = f(value) if Some, default if None
//    - address.find('#').map_or(address, |i| &address[..i]) means
//      "cut at '#' if there is one"
// -----------------------------------------------------------------------------
