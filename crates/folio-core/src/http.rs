//! Request classification helpers used as metric attributes.

/// Standard verbs kept as-is; everything else collapses to `OTHER`.
const KNOWN_METHODS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"];

/// Normalize a request method into a fixed set.
pub fn normalize_method(method: &str) -> &'static str {
    KNOWN_METHODS
        .iter()
        .copied()
        .find(|m| *m == method)
        .unwrap_or("OTHER")
}

/// Coarse outcome bucket for a status code.
///
/// `[200,300)` is `2xx`, `[300,400)` is `3xx`, `[400,500)` is `4xx`,
/// anything from 500 up is `5xx` and everything below 200 is `1xx`.
pub fn status_class(code: u16) -> &'static str {
    match code {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=u16::MAX => "5xx",
        _ => "1xx",
    }
}
