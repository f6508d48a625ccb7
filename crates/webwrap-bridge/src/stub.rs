// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where native mobile APIs are unavailable.
//
// Capability calls return `PlatformUnavailable`. Reachability is the one
// thing the stub can answer: it reports whatever the host last set.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use webwrap_core::error::{Result, ShellError};
use webwrap_core::types::{Capability, PermissionStatus, Platform};

use crate::traits::*;

/// No-op bridge returned on non-mobile platforms.
pub struct StubBridge {
    platform: Platform,
    reachable: AtomicBool,
}

impl Default for StubBridge {
    fn default() -> Self {
        Self::new(Platform::Android)
    }
}

impl StubBridge {
    /// Stub posing as `platform` for device values and store links.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            reachable: AtomicBool::new(true),
        }
    }

    /// Set the answer of [`NativeConnectivity::is_reachable`].
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }
}

impl PlatformBridge for StubBridge {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

#[async_trait]
impl NativePermissions for StubBridge {
    async fn permission_status(&self, _capability: Capability) -> Result<PermissionStatus> {
        Err(ShellError::PlatformUnavailable)
    }

    async fn request_permission(&self, capability: Capability) -> Result<PermissionStatus> {
        tracing::warn!(%capability, "NativePermissions::request_permission called on stub bridge");
        Err(ShellError::PlatformUnavailable)
    }
}

#[async_trait]
impl NativeImagePicker for StubBridge {
    async fn pick_image(&self, _options: &ImageOptions) -> Result<Option<PickedImage>> {
        tracing::warn!("NativeImagePicker::pick_image called on stub bridge");
        Err(ShellError::PlatformUnavailable)
    }

    async fn capture_photo(&self, _options: &ImageOptions) -> Result<Option<PickedImage>> {
        tracing::warn!("NativeImagePicker::capture_photo called on stub bridge");
        Err(ShellError::PlatformUnavailable)
    }
}

#[async_trait]
impl NativeDocumentPicker for StubBridge {
    async fn pick_document(&self, _mime_types: &[&str]) -> Result<Option<PickedDocument>> {
        tracing::warn!("NativeDocumentPicker::pick_document called on stub bridge");
        Err(ShellError::PlatformUnavailable)
    }
}

#[async_trait]
impl NativeAudioRecorder for StubBridge {
    async fn start_recording(&self) -> Result<RecordingHandle> {
        tracing::warn!("NativeAudioRecorder::start_recording called on stub bridge");
        Err(ShellError::PlatformUnavailable)
    }

    async fn stop_recording(&self, _handle: RecordingHandle) -> Result<Option<String>> {
        Err(ShellError::PlatformUnavailable)
    }
}

#[async_trait]
impl NativeFiles for StubBridge {
    async fn read_bytes(&self, _uri: &str) -> Result<Vec<u8>> {
        Err(ShellError::PlatformUnavailable)
    }
}

#[async_trait]
impl NativeShare for StubBridge {
    async fn share_text(&self, _message: &str, _title: &str) -> Result<()> {
        tracing::warn!("NativeShare::share_text called on stub bridge");
        Err(ShellError::PlatformUnavailable)
    }
}

#[async_trait]
impl NativeLinks for StubBridge {
    async fn open_settings(&self) -> Result<()> {
        Err(ShellError::PlatformUnavailable)
    }

    async fn open_url(&self, url: &str) -> Result<()> {
        tracing::warn!(url, "NativeLinks::open_url called on stub bridge");
        Err(ShellError::PlatformUnavailable)
    }
}

#[async_trait]
impl NativeDialogs for StubBridge {
    async fn explain_denial(
        &self,
        title: &str,
        _message: &str,
        _open_settings_label: &str,
        _cancel_label: &str,
    ) -> Result<DenialChoice> {
        tracing::warn!(title, "NativeDialogs::explain_denial called on stub bridge");
        Err(ShellError::PlatformUnavailable)
    }

    async fn notify(&self, title: &str, message: &str) -> Result<()> {
        tracing::info!(title, message, "stub notice");
        Ok(())
    }

    async fn confirm_exit(&self) -> Result<bool> {
        Err(ShellError::PlatformUnavailable)
    }

    fn exit_app(&self) {
        tracing::warn!("NativeDialogs::exit_app called on stub bridge");
    }
}

#[async_trait]
impl NativeConnectivity for StubBridge {
    async fn is_reachable(&self) -> Result<bool> {
        Ok(self.reachable.load(Ordering::SeqCst))
    }
}

#[async_trait]
impl PushProvider for StubBridge {
    async fn initialize(&self, _app_id: &str) -> Result<()> {
        tracing::warn!("PushProvider::initialize called on stub bridge");
        Err(ShellError::PlatformUnavailable)
    }

    async fn subscription_id(&self) -> Result<Option<String>> {
        Err(ShellError::PlatformUnavailable)
    }
}
