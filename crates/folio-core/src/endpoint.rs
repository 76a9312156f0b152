//! Endpoint label normalization.
//!
//! Maps a request path (plus an optional route-supplied label) to a small,
//! closed vocabulary of endpoint names. Every metric attribute named
//! `endpoint` goes through here, so this table is what keeps label
//! cardinality bounded regardless of how many distinct paths are seen.

use std::borrow::Cow;

/// Label for anything outside the known vocabulary.
pub const OTHER: &str = "other";

/// Label for everything served under `/static/`.
pub const STATIC: &str = "static";

/// Canonical paths and their fixed labels. `/api/`-prefixed mirrors share
/// the label of the page they mirror.
const CANONICAL: &[(&str, &str)] = &[
    ("", "home"),
    ("/", "home"),
    ("/home", "home"),
    ("/api/home", "home"),
    ("/work-history", "work_history"),
    ("/api/work-history", "work_history"),
    ("/contact-me", "contact_me"),
    ("/api/contact-me", "contact_me"),
    ("/contact", "contact_submit"),
    ("/api/contact", "contact_submit"),
];

/// Longest path segment that may be echoed into a label.
const MAX_ECHO_LEN: usize = 32;

/// What to do with a path that matches nothing in the vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownPathPolicy {
    /// Always emit `other`.
    #[default]
    Collapse,
    /// Emit the first path segment (or `api_<segment>` below `/api/`) when
    /// it is short and made of `[a-z0-9_-]`; otherwise `other`.
    ///
    /// The character and length limits only keep labels well-formed. The
    /// label set is no longer bounded by the vocabulary: every distinct
    /// first segment a client sends becomes a new series.
    Echo,
}

/// Path -> endpoint label mapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointNormalizer {
    unknown: UnknownPathPolicy,
}

impl EndpointNormalizer {
    pub fn new(unknown: UnknownPathPolicy) -> Self {
        Self { unknown }
    }

    pub fn unknown_policy(&self) -> UnknownPathPolicy {
        self.unknown
    }

    /// Resolve the endpoint label for `path`.
    ///
    /// A non-empty `provided` label comes from route-level knowledge and is
    /// trusted verbatim.
    pub fn normalize<'a>(&self, path: &str, provided: &'a str) -> Cow<'a, str> {
        if !provided.is_empty() {
            return Cow::Borrowed(provided);
        }

        let path = path.strip_suffix('/').unwrap_or(path);

        if let Some((_, label)) = CANONICAL.iter().find(|(p, _)| *p == path) {
            return Cow::Borrowed(label);
        }
        if path.starts_with("/static/") {
            return Cow::Borrowed(STATIC);
        }

        match self.unknown {
            UnknownPathPolicy::Collapse => Cow::Borrowed(OTHER),
            UnknownPathPolicy::Echo => echo_label(path),
        }
    }
}

/// Normalize with the default (collapsing) policy.
pub fn normalize<'a>(path: &str, provided: &'a str) -> Cow<'a, str> {
    EndpointNormalizer::default().normalize(path, provided)
}

fn echo_label(path: &str) -> Cow<'static, str> {
    if let Some(rest) = path.strip_prefix("/api/") {
        let segment = rest.split('/').next().unwrap_or_default();
        return if is_echo_safe(segment) {
            Cow::Owned(format!("api_{segment}"))
        } else {
            Cow::Borrowed(OTHER)
        };
    }

    let segment = path
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default();
    if is_echo_safe(segment) {
        Cow::Owned(segment.to_string())
    } else {
        Cow::Borrowed(OTHER)
    }
}

fn is_echo_safe(segment: &str) -> bool {
    !segment.is_empty()
        && segment.len() <= MAX_ECHO_LEN
        && segment
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
}
