// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    /// Upstream API answered with a non-success HTTP status.
    Api { status: u16, status_text: String },
    /// Transport-level failure before any HTTP status was received.
    Network(String),
    Playback(String),
}

impl Error {
    /// Returns the i18n message key for the user-facing description of this
    /// error. Classification is substring-based over the display text so that
    /// errors arriving as opaque strings (reqwest, ffmpeg) land in the same
    /// buckets as our own variants.
    pub fn message_key(&self) -> &'static str {
        classify_message(&self.to_string())
    }
}

/// Maps raw error text to one of a fixed set of i18n message keys.
/// The first matching category wins; anything unrecognized falls back to the
/// generic message.
pub fn classify_message(msg: &str) -> &'static str {
    let msg_lower = msg.to_lowercase();

    if msg_lower.contains("api key") || msg_lower.contains("config") {
        return "error-config";
    }

    if msg_lower.contains("timeout") || msg_lower.contains("timed out") {
        return "error-timeout";
    }

    if msg_lower.contains("401") || msg_lower.contains("unauthorized") {
        return "error-unauthorized";
    }

    if msg_lower.contains("403") || msg_lower.contains("forbidden") {
        return "error-forbidden";
    }

    if msg_lower.contains("404") || msg_lower.contains("not found") {
        return "error-not-found";
    }

    if msg_lower.contains("500") || msg_lower.contains("502") || msg_lower.contains("503") {
        return "error-server";
    }

    if msg_lower.contains("failed to fetch")
        || msg_lower.contains("network")
        || msg_lower.contains("connect")
        || msg_lower.contains("dns")
    {
        return "error-network";
    }

    "error-generic"
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Api {
                status,
                status_text,
            } => write!(f, "API error: {} {}", status, status_text),
            Error::Network(e) => write!(f, "Network error: {}", e),
            Error::Playback(e) => write!(f, "Playback error: {}", e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Error::Network(format!("request timed out: {err}"));
        }
        match err.status() {
            Some(status) => Error::Api {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or("Unknown Status")
                    .to_string(),
            },
            None => Error::Network(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_api_error() {
        let err = Error::Api {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        };
        assert_eq!(format!("{}", err), "API error: 503 Service Unavailable");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn missing_api_key_classifies_as_config() {
        let err = Error::Config("API key not found. Please add one to settings.toml.".to_string());
        assert_eq!(err.message_key(), "error-config");
    }

    #[test]
    fn unauthorized_status_classifies_as_unauthorized() {
        let err = Error::Api {
            status: 401,
            status_text: "Unauthorized".to_string(),
        };
        assert_eq!(err.message_key(), "error-unauthorized");
    }

    #[test]
    fn forbidden_status_classifies_as_forbidden() {
        assert_eq!(classify_message("API error: 403 Forbidden"), "error-forbidden");
    }

    #[test]
    fn missing_resource_classifies_as_not_found() {
        assert_eq!(classify_message("API error: 404 Not Found"), "error-not-found");
    }

    #[test]
    fn server_errors_classify_as_server() {
        assert_eq!(
            classify_message("API error: 500 Internal Server Error"),
            "error-server"
        );
        assert_eq!(classify_message("API error: 502 Bad Gateway"), "error-server");
        assert_eq!(
            classify_message("API error: 503 Service Unavailable"),
            "error-server"
        );
    }

    #[test]
    fn timeout_wins_over_connectivity() {
        assert_eq!(
            classify_message("Network error: operation timed out while connecting"),
            "error-timeout"
        );
    }

    #[test]
    fn transport_failure_classifies_as_network() {
        let err = Error::Network("error trying to connect: dns error".to_string());
        assert_eq!(err.message_key(), "error-network");
    }

    #[test]
    fn unknown_text_falls_back_to_generic() {
        assert_eq!(classify_message("some inexplicable condition"), "error-generic");
    }
}
