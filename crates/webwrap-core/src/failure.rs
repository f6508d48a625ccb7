// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Load-failure classification.
//
// The embedding surface reports raw failures (Chromium `net::ERR_*` strings,
// NSURLError descriptions, HTTP-ish text). Each is mapped to exactly one
// category by first-matching keyword set, and each category carries the
// plain English text shown on the recovery page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a content load failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureCategory {
    Network,
    Ssl,
    Timeout,
    /// Server or page not available (DNS failure, refused, 404).
    PageNotAvailable,
    Redirect,
    File,
    NetworkChanged,
    ConnectionClosed,
    General,
}

/// Keyword sets in evaluation order. `General` has no entry; it is the
/// fallback when nothing matches.
const RULES: &[(FailureCategory, &[&str])] = &[
    (
        FailureCategory::Network,
        &[
            "net::err_internet_disconnected",
            "net::err_address_unreachable",
            "net::err_connection_timed_out",
            "net::err_network_access_denied",
            "network error",
            "failed to connect",
            "no internet",
            "connection failed",
            "network unreachable",
        ],
    ),
    (
        FailureCategory::Ssl,
        &[
            "ssl",
            "certificate",
            "net::err_cert_",
            "net::err_ssl_",
            "security error",
            "handshake failed",
        ],
    ),
    (
        FailureCategory::Timeout,
        &[
            "net::err_timed_out",
            "timeout",
            "timed out",
            "request timeout",
            "connection timeout",
        ],
    ),
    (
        FailureCategory::PageNotAvailable,
        &[
            "web page not available",
            "net::err_name_not_resolved",
            "net::err_connection_refused",
            "net::err_aborted",
            "404",
            "not found",
            "server not found",
            "host not found",
        ],
    ),
    (
        FailureCategory::Redirect,
        &[
            "net::err_too_many_redirects",
            "redirect",
            "too many redirects",
            "redirect loop",
        ],
    ),
    (
        FailureCategory::File,
        &["net::err_file_", "file error", "file not found", "access denied"],
    ),
    (
        FailureCategory::NetworkChanged,
        &[
            "net::err_network_change",
            "net::err_network_changed",
            "network_change",
            "network changed",
        ],
    ),
    (
        FailureCategory::ConnectionClosed,
        &[
            "net::err_connection_closed",
            "net::err_connection_reset",
            "connection closed",
            "connection reset",
            "connection aborted",
        ],
    ),
];

/// Classify a failure description. Total: every input yields one category,
/// `General` when no keyword set matches.
pub fn classify(description: &str) -> FailureCategory {
    let lower = description.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(FailureCategory::General)
}

/// A raw load failure from the embedding surface's error callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadFailure {
    pub code: Option<i64>,
    pub description: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

impl LoadFailure {
    pub fn new(code: Option<i64>, description: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            url: url.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn category(&self) -> FailureCategory {
        classify(&self.description)
    }
}

/// What the recovery page tells the user about a failure category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNotice {
    /// Heading.
    pub title: &'static str,
    /// Body text under the heading.
    pub description: &'static str,
    pub icon: &'static str,
    /// Things the user can try, shown as a bullet list.
    pub suggestions: &'static [&'static str],
}

const NETWORK_SUGGESTIONS: &[&str] = &[
    "Check your internet connection.",
    "Try switching between Wi-Fi and mobile data.",
    "Restart your router if you are on Wi-Fi.",
    "Make sure mobile data is turned on.",
];

const GENERAL_SUGGESTIONS: &[&str] = &[
    "Restart the app.",
    "Check your internet connection.",
    "Try again later.",
    "Contact support if the problem continues.",
];

impl FailureCategory {
    pub fn notice(self) -> FailureNotice {
        match self {
            FailureCategory::Network => FailureNotice {
                title: "No internet connection",
                description: "Please check your internet connection and try again.",
                icon: "🌐",
                suggestions: NETWORK_SUGGESTIONS,
            },
            FailureCategory::Ssl => FailureNotice {
                title: "Secure connection failed",
                description: "There is a problem with the site's security certificate.",
                icon: "🔒",
                suggestions: &[
                    "Check that the date and time on your device are correct.",
                    "Try a different network.",
                    "Restart the app.",
                    "Check your device's security settings.",
                ],
            },
            FailureCategory::Timeout => FailureNotice {
                title: "Connection timed out",
                description: "The connection took too long. Please check your internet speed and try again.",
                icon: "⏰",
                suggestions: &[
                    "Check your internet speed.",
                    "Try a faster network.",
                    "Close other apps that are using the internet.",
                    "Wait a moment, then try again.",
                ],
            },
            FailureCategory::PageNotAvailable => FailureNotice {
                title: "Page not available",
                description: "The page could not be reached. It may not exist, or the server may be unavailable right now.",
                icon: "🖥️",
                suggestions: &[
                    "The server may be busy, try again later.",
                    "Check the service status on our website.",
                    "Restart the app.",
                    "Contact support if the problem continues.",
                ],
            },
            FailureCategory::Redirect => FailureNotice {
                title: "Too many redirects",
                description: "The site could not be reached because it redirected too many times.",
                icon: "🔄",
                suggestions: &[
                    "Clear the app's cache.",
                    "Restart the app.",
                    "Check your network settings.",
                    "Try a different network.",
                ],
            },
            FailureCategory::File => FailureNotice {
                title: "File error",
                description: "The requested file could not be loaded.",
                icon: "📄",
                suggestions: &[
                    "Check your available storage.",
                    "Restart the app.",
                    "Clear the cache.",
                    "Make sure the file exists.",
                ],
            },
            FailureCategory::NetworkChanged => FailureNotice {
                title: "Network changed",
                description: "Your network connection changed. Reconnecting...",
                icon: "📶",
                suggestions: NETWORK_SUGGESTIONS,
            },
            FailureCategory::ConnectionClosed => FailureNotice {
                title: "Connection closed",
                description: "The connection was closed unexpectedly. Please try again.",
                icon: "🔌",
                suggestions: NETWORK_SUGGESTIONS,
            },
            FailureCategory::General => FailureNotice {
                title: "Something went wrong",
                description: "An unexpected error occurred. Please try again.",
                icon: "⚠️",
                suggestions: GENERAL_SUGGESTIONS,
            },
        }
    }
}

impl std::fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FailureCategory::Network => "network",
            FailureCategory::Ssl => "ssl",
            FailureCategory::Timeout => "timeout",
            FailureCategory::PageNotAvailable => "page-not-available",
            FailureCategory::Redirect => "redirect",
            FailureCategory::File => "file",
            FailureCategory::NetworkChanged => "network-changed",
            FailureCategory::ConnectionClosed => "connection-closed",
            FailureCategory::General => "general",
        };
        f.write_str(name)
    }
}
