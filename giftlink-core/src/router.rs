// File: giftlink-core/src/router.rs
//
// Navigation as data: a closed set of views and a pure mapping from an
// opaque location string. No global route state lives here or anywhere.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Orders,
    Duplicates,
    Builder,
    Claim { slug: String },
    NotFound,
}

/// Map a location string to a view. Accepts hash-style (`#/orders`) and
/// plain (`/orders`) forms, with or without a trailing slash; anything
/// unrecognized is `NotFound` rather than an error.
pub fn parse_location(location: &str) -> View {
    let path = location.trim();
    let path = path.strip_prefix('#').unwrap_or(path);
    let path = path.trim_start_matches('/').trim_end_matches('/');

    match path {
        "" => View::Dashboard,
        "orders" => View::Orders,
        "duplicates" => View::Duplicates,
        "new" => View::Builder,
        other => match other.strip_prefix("c/") {
            Some(slug) if !slug.is_empty() && !slug.contains('/') => View::Claim {
                slug: slug.to_string(),
            },
            _ => View::NotFound,
        },
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Dashboard => write!(f, "/"),
            View::Orders => write!(f, "/orders"),
            View::Duplicates => write!(f, "/duplicates"),
            View::Builder => write!(f, "/new"),
            View::Claim { slug } => write!(f, "/c/{}", slug),
            View::NotFound => write!(f, "/404"),
        }
    }
}
