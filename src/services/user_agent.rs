//! Coarse browser / operating-system detection for the email tracking pixel.
//!
//! This is an ordered list of case-sensitive substring checks, not a parser. The
//! first matching rule wins. Any input is accepted.

/// Placeholder recorded when a request carries no `User-Agent` header.
pub const UNKNOWN_USER_AGENT: &str = "unknown";

/// Browser and operating system guessed from a `User-Agent` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub browser: Option<String>,
    pub operating_system: Option<String>,
}

/// Classifies a raw `User-Agent` value.
pub fn classify(user_agent: &str) -> ClientInfo {
    if user_agent == UNKNOWN_USER_AGENT {
        return ClientInfo::default();
    }

    ClientInfo {
        browser: detect_browser(user_agent).map(str::to_string),
        operating_system: detect_operating_system(user_agent).map(str::to_string),
    }
}

fn detect_browser(ua: &str) -> Option<&'static str> {
    if ua.contains("Chrome") && !ua.contains("Edg") {
        Some("Chrome")
    } else if ua.contains("Firefox") {
        Some("Firefox")
    } else if ua.contains("Safari") && !ua.contains("Chrome") {
        Some("Safari")
    } else if ua.contains("Edg") {
        Some("Edge")
    } else if ua.contains("Opera") || ua.contains("OPR") {
        Some("Opera")
    } else {
        None
    }
}

fn detect_operating_system(ua: &str) -> Option<&'static str> {
    if ua.contains("Windows") {
        Some("Windows")
    } else if ua.contains("Mac OS X") || ua.contains("Macintosh") {
        Some("macOS")
    } else if ua.contains("Linux") {
        Some("Linux")
    } else if ua.contains("Android") {
        Some("Android")
    } else if ua.contains("iOS") || ua.contains("iPhone") || ua.contains("iPad") {
        Some("iOS")
    } else {
        None
    }
}
