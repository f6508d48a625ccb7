// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShellError};
use crate::types::{Capability, Platform};

/// Persistent shell settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Display name, used as the default share title and in the error page footer.
    pub app_name: String,
    /// Version string exposed to content as `app_version`.
    pub app_version: String,
    /// Root of the embedded website. Navigation under this prefix stays in-view.
    pub base_url: String,
    pub play_store_link: String,
    pub app_store_link: String,
    /// App id handed to the push-notification provider.
    pub push_app_id: String,
    /// Content-side object exposing `postMessage(string)` towards the shell.
    pub bridge_channel: String,
    /// Heading placed before the store link in shared text.
    pub share_footer: String,
    pub connectivity: ConnectivityConfig,
    pub identity: IdentityConfig,
    pub error_page: ErrorPageConfig,
    pub features: FeatureFlags,
    pub permission_messages: PermissionMessages,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            app_name: "Ayaz Printing".into(),
            app_version: "v1.0.0".into(),
            base_url: "https://ayaz-printing.com/".into(),
            play_store_link: "https://play.google.com/store/apps/details?id=com.ayaz.printing"
                .into(),
            app_store_link: "https://apps.apple.com/app/ayaz-printing/id123456789".into(),
            push_app_id: String::new(),
            bridge_channel: "window.ipc".into(),
            share_footer: "Download the app:".into(),
            connectivity: ConnectivityConfig::default(),
            identity: IdentityConfig::default(),
            error_page: ErrorPageConfig::default(),
            features: FeatureFlags::default(),
            permission_messages: PermissionMessages::default(),
        }
    }
}

impl ShellConfig {
    /// Store link matching the running platform.
    pub fn store_link(&self, platform: Platform) -> &str {
        match platform {
            Platform::Android => &self.play_store_link,
            Platform::Ios => &self.app_store_link,
        }
    }

    /// Reject settings the shell cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ShellError::Config(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.bridge_channel.trim().is_empty() {
            return Err(ShellError::Config("bridge_channel must not be empty".into()));
        }
        if self.identity.max_attempts == 0 {
            return Err(ShellError::Config(
                "identity.max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Offline detection and automatic reconnect tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    /// Cap on automatic reachability re-checks after a failed manual retry.
    pub max_retries: u32,
    /// Fixed delay between automatic re-checks.
    pub retry_delay_ms: u64,
    /// Wait after coming back online before reloading content.
    pub reconnect_debounce_ms: u64,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay_ms: 2_000,
            reconnect_debounce_ms: 1_000,
        }
    }
}

impl ConnectivityConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn reconnect_debounce(&self) -> Duration {
        Duration::from_millis(self.reconnect_debounce_ms)
    }
}

/// Push identity acquisition and caching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub max_attempts: u32,
    pub attempt_delay_ms: u64,
    /// A cached identity older than this is fetched again.
    pub cache_ttl_secs: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            attempt_delay_ms: 2_000,
            cache_ttl_secs: 24 * 60 * 60,
        }
    }
}

impl IdentityConfig {
    pub fn attempt_delay(&self) -> Duration {
        Duration::from_millis(self.attempt_delay_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Behaviour of the rendered load-failure page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorPageConfig {
    /// Seconds before the page retries on its own.
    pub auto_retry_secs: u64,
    /// Delay between pressing retry and sending the reload sentinel.
    pub retry_click_delay_ms: u64,
}

impl Default for ErrorPageConfig {
    fn default() -> Self {
        Self {
            auto_retry_secs: 30,
            retry_click_delay_ms: 1_000,
        }
    }
}

/// Optional capabilities switched by configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub audio_recording: bool,
    /// Ask for media-library access during launch instead of on first use.
    pub request_media_on_launch: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            audio_recording: true,
            request_media_on_launch: true,
        }
    }
}

/// Title and body of a permission-denied explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionText {
    pub title: String,
    pub message: String,
}

impl PermissionText {
    fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Texts shown when the user refuses a permission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionMessages {
    pub media: PermissionText,
    pub camera: PermissionText,
    pub microphone: PermissionText,
    pub notifications: PermissionText,
    pub open_settings: String,
    pub cancel: String,
    /// Shown when audio recording is switched off.
    pub recording_unavailable: PermissionText,
}

impl Default for PermissionMessages {
    fn default() -> Self {
        Self {
            media: PermissionText::new(
                "Media permission",
                "Please allow access to your photos in the app settings.",
            ),
            camera: PermissionText::new(
                "Camera permission",
                "Please allow camera access in the app settings.",
            ),
            microphone: PermissionText::new(
                "Microphone permission",
                "Please allow microphone access in the app settings.",
            ),
            notifications: PermissionText::new(
                "Notifications",
                "Please enable notifications in the settings.",
            ),
            open_settings: "Open settings".into(),
            cancel: "Cancel".into(),
            recording_unavailable: PermissionText::new(
                "Notice",
                "Audio recording is not available at the moment.",
            ),
        }
    }
}

impl PermissionMessages {
    pub fn for_capability(&self, capability: Capability) -> &PermissionText {
        match capability {
            Capability::MediaLibrary => &self.media,
            Capability::Camera => &self.camera,
            Capability::Microphone => &self.microphone,
            Capability::Notifications => &self.notifications,
        }
    }
}
