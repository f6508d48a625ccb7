// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types shared by the bridge, the shell engine, and the app.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mobile platform the shell is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    /// Value exposed to content as `device_type`.
    pub fn device_type(self) -> &'static str {
        match self {
            Platform::Ios => "iphone",
            Platform::Android => "android",
        }
    }

    /// Value exposed to content as `platform` (the OS identifier).
    pub fn os(self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.os())
    }
}

/// A platform permission the shell may need before invoking a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Photo library / gallery access.
    MediaLibrary,
    Camera,
    Microphone,
    Notifications,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Capability::MediaLibrary => "media library",
            Capability::Camera => "camera",
            Capability::Microphone => "microphone",
            Capability::Notifications => "notifications",
        };
        f.write_str(name)
    }
}

/// Answer from a platform permission query or prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user has not been asked yet.
    Undetermined,
}

/// Kind of media carried by a [`MediaAsset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
}

/// A captured or picked media item, ready to hand to the embedded content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAsset {
    /// Local resource handle; never empty.
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Timestamped file name, e.g. `image_1718000000000.jpg`.
    pub name: String,
}

/// A picked document with its bytes inlined as base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAsset {
    pub uri: String,
    pub name: String,
    pub size: Option<u64>,
    /// MIME type; `application/octet-stream` when the picker reports none.
    #[serde(rename = "type")]
    pub mime_type: String,
    pub base64: String,
}

/// Normalised outcome of a native action, serialised as the `data` of a
/// response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NativeActionResult {
    Media(MediaAsset),
    Document(DocumentAsset),
}

impl NativeActionResult {
    pub fn uri(&self) -> &str {
        match self {
            NativeActionResult::Media(m) => &m.uri,
            NativeActionResult::Document(d) => &d.uri,
        }
    }
}

/// Identifier the shell assigns to an in-progress audio capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordingId(pub Uuid);

impl RecordingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordingId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of the connectivity monitor: reachability plus the automatic
/// retry counter (`0..=max_retries`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectivityState {
    pub online: bool,
    pub retries: u32,
}

/// Build a timestamped file name such as `photo_1718000000000.jpg`.
pub fn timestamped_name(prefix: &str, extension: &str) -> String {
    format!(
        "{prefix}_{}.{extension}",
        chrono::Utc::now().timestamp_millis()
    )
}
