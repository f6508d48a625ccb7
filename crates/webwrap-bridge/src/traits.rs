// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.
//
// Everything the shell needs from the device is expressed here as a small
// async contract. Cancellation by the user is `Ok(None)`, never an error.

use async_trait::async_trait;
use webwrap_core::error::Result;
use webwrap_core::types::{Capability, PermissionStatus, Platform, RecordingId};

/// Unified bridge that groups all native capabilities.
pub trait PlatformBridge:
    NativePermissions
    + NativeImagePicker
    + NativeDocumentPicker
    + NativeAudioRecorder
    + NativeFiles
    + NativeShare
    + NativeLinks
    + NativeDialogs
    + NativeConnectivity
    + PushProvider
    + Send
    + Sync
{
    /// Which platform this bridge runs on.
    fn platform(&self) -> Platform;

    /// Human-readable platform name (e.g. "iOS 17", "Android 14").
    fn platform_name(&self) -> &str;
}

/// The embedded browser surface, driven by the shell.
///
/// Calls are fire-and-forget dispatches onto the UI thread; none of them
/// wait for the content to react.
pub trait ContentView: Send + Sync {
    /// Reload the current page.
    fn reload(&self) -> Result<()>;

    /// Execute a script in the content context.
    fn inject_script(&self, script: &str) -> Result<()>;

    /// Deliver a message to the content's message listener.
    fn post_message(&self, message: &str) -> Result<()>;

    /// Navigate back in the content history.
    fn go_back(&self) -> Result<()>;

    /// Swap the content for the offline placeholder (`true`) or restore it.
    fn set_offline_placeholder(&self, visible: bool) -> Result<()>;
}

/// Platform permission prompts.
#[async_trait]
pub trait NativePermissions {
    /// Current status without prompting.
    async fn permission_status(&self, capability: Capability) -> Result<PermissionStatus>;

    /// Prompt the user (or return the remembered answer).
    async fn request_permission(&self, capability: Capability) -> Result<PermissionStatus>;
}

/// Fixed picker/capture parameters for images.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageOptions {
    /// JPEG quality in `0.0..=1.0`.
    pub quality: f32,
    pub allows_editing: bool,
    /// Crop aspect ratio as (width, height).
    pub aspect: (u32, u32),
    /// Return the encoded bytes together with the URI.
    pub include_bytes: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            quality: 0.8,
            allows_editing: true,
            aspect: (4, 3),
            include_bytes: true,
        }
    }
}

/// An image chosen from the gallery or taken with the camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedImage {
    pub uri: String,
    pub bytes: Option<Vec<u8>>,
}

/// Gallery and camera access.
#[async_trait]
pub trait NativeImagePicker {
    /// Show the gallery picker. Returns Ok(None) if the user cancelled.
    async fn pick_image(&self, options: &ImageOptions) -> Result<Option<PickedImage>>;

    /// Launch the camera. Returns Ok(None) if the user cancelled.
    async fn capture_photo(&self, options: &ImageOptions) -> Result<Option<PickedImage>>;
}

/// Metadata of a file chosen in the document picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedDocument {
    /// Cache-local URI of the copied file.
    pub uri: String,
    pub name: String,
    pub size: Option<u64>,
    pub mime_type: Option<String>,
}

/// Pick files from the device storage.
#[async_trait]
pub trait NativeDocumentPicker {
    /// Show a single-file picker filtered to the given MIME types, copying
    /// the choice into the app cache. Returns Ok(None) if cancelled.
    async fn pick_document(&self, mime_types: &[&str]) -> Result<Option<PickedDocument>>;
}

/// Reference to an in-progress audio capture.
///
/// Not `Clone`: whoever holds it owns the recording until it is handed back
/// to [`NativeAudioRecorder::stop_recording`].
#[derive(Debug, PartialEq, Eq)]
pub struct RecordingHandle {
    pub id: RecordingId,
    /// Platform-side recorder reference.
    pub native: String,
}

/// Microphone capture.
#[async_trait]
pub trait NativeAudioRecorder {
    /// Configure the audio session and start a high-quality recording.
    async fn start_recording(&self) -> Result<RecordingHandle>;

    /// Stop and unload the recording, returning the URI of the written file
    /// (None if the platform produced no file).
    async fn stop_recording(&self, handle: RecordingHandle) -> Result<Option<String>>;
}

/// Pass-through file access.
#[async_trait]
pub trait NativeFiles {
    /// Read the bytes behind a local resource URI.
    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>>;
}

/// Share content via the OS share sheet.
#[async_trait]
pub trait NativeShare {
    /// Present the share sheet with a text message and a title.
    async fn share_text(&self, message: &str, title: &str) -> Result<()>;
}

/// Hand-offs to other apps.
#[async_trait]
pub trait NativeLinks {
    /// Open this app's page in the system settings.
    async fn open_settings(&self) -> Result<()>;

    /// Open a URL in the system browser.
    async fn open_url(&self, url: &str) -> Result<()>;
}

/// What the user chose in a permission-denied explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialChoice {
    OpenSettings,
    Dismiss,
}

/// Native alerts.
#[async_trait]
pub trait NativeDialogs {
    /// Explain a refused permission, offering a settings deep link.
    async fn explain_denial(
        &self,
        title: &str,
        message: &str,
        open_settings_label: &str,
        cancel_label: &str,
    ) -> Result<DenialChoice>;

    /// Show an informational alert with a single dismiss button.
    async fn notify(&self, title: &str, message: &str) -> Result<()>;

    /// Ask whether to leave the app. `true` means confirmed.
    async fn confirm_exit(&self) -> Result<bool>;

    /// Terminate the app.
    fn exit_app(&self);
}

/// Network reachability.
///
/// Change events are pushed into the shell by the host; this trait only
/// answers on-demand checks.
#[async_trait]
pub trait NativeConnectivity {
    async fn is_reachable(&self) -> Result<bool>;
}

/// Push-notification provider.
#[async_trait]
pub trait PushProvider {
    /// Initialise the SDK with the app id and install its listeners.
    async fn initialize(&self, app_id: &str) -> Result<()>;

    /// Current push subscription id, None while the provider has not
    /// issued one yet.
    async fn subscription_id(&self) -> Result<Option<String>>;
}

/// Local string key-value persistence.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}
