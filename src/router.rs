//! Fragment routing
//!
//! The URL fragment is the only routing state. Two forms are recognized:
//!
//! | Fragment         | Route        |
//! |------------------|--------------|
//! | `` / `#`         | `List`       |
//! | `#product-<id>`  | `Detail(id)` |
//!
//! Anything else falls back to `List`. The id is percent-encoded in the
//! fragment, since browsers report `location.hash` in encoded form.

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Prefix of the detail fragment, without the leading `#`
pub const DETAIL_PREFIX: &str = "product-";

/// Everything but RFC 3986 unreserved characters is escaped in an id
const ID_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    List,
    Detail(String),
}

impl Route {
    /// Parse a fragment, with or without its leading `#`.
    ///
    /// The id is percent-decoded; invalid UTF-8 sequences become U+FFFD.
    /// `#product-` yields `Detail("")`, which resolves to the not-found path
    /// like any other unknown id.
    pub fn from_fragment(fragment: &str) -> Self {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        match fragment.strip_prefix(DETAIL_PREFIX) {
            Some(id) => Route::Detail(percent_decode_str(id).decode_utf8_lossy().into_owned()),
            None => Route::List,
        }
    }

    /// Fragment to publish for this route; empty for `List`.
    pub fn fragment(&self) -> String {
        match self {
            Route::List => String::new(),
            Route::Detail(id) => {
                format!("#{}{}", DETAIL_PREFIX, utf8_percent_encode(id, ID_ESCAPE))
            }
        }
    }

    pub fn detail(id: impl Into<String>) -> Self {
        Route::Detail(id.into())
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Route::List)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => write!(f, "list"),
            Route::Detail(id) => write!(f, "detail({})", id),
        }
    }
}
