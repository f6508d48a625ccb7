// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native action handlers.
//
// Each handler gates on its permission, calls the platform with fixed
// parameters, and normalises the outcome. Cancellation, refusal, and
// platform errors all come back as `None`; nothing here returns an error
// across the bridge.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{error, info, warn};
use webwrap_bridge::traits::{
    ImageOptions, PickedDocument, PickedImage, PlatformBridge, RecordingHandle,
};
use webwrap_core::config::ShellConfig;
use webwrap_core::error::Result;
use webwrap_core::types::{
    Capability, DocumentAsset, MediaAsset, MediaKind, NativeActionResult, timestamped_name,
};

use crate::permissions::PermissionGate;
use crate::recording::{RecordingSlot, SlotBusy};

/// MIME filter for the document picker.
pub const DOCUMENT_TYPES: &[&str] = &["application/pdf", "image/*", "application/*"];

const FALLBACK_MIME: &str = "application/octet-stream";

/// Largest document inlined as base64.
pub const MAX_DOCUMENT_BYTES: u64 = 50 * 1024 * 1024;

/// Outcome of a start-recording request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingStart {
    Started,
    /// A recording is already open or starting; nothing was changed.
    Busy,
    /// Refused, disabled, or failed on the platform.
    NotStarted,
}

/// The set of device actions reachable from the embedded content.
#[derive(Clone)]
pub struct NativeActions {
    bridge: Arc<dyn PlatformBridge>,
    permissions: PermissionGate,
    config: Arc<ShellConfig>,
}

impl NativeActions {
    pub fn new(bridge: Arc<dyn PlatformBridge>, config: Arc<ShellConfig>) -> Self {
        let permissions = PermissionGate::new(bridge.clone(), config.permission_messages.clone());
        Self {
            bridge,
            permissions,
            config,
        }
    }

    pub fn permissions(&self) -> &PermissionGate {
        &self.permissions
    }

    /// Present the share sheet with `message`.
    pub async fn share(&self, message: &str, title: Option<&str>) {
        let title = title.unwrap_or(&self.config.app_name);
        match self.bridge.share_text(message, title).await {
            Ok(()) => info!("share sheet presented"),
            Err(e) => error!(error = %e, "sharing failed"),
        }
    }

    /// Pick an image from the gallery.
    pub async fn pick_image(&self) -> Option<NativeActionResult> {
        if !self.permissions.ensure(Capability::MediaLibrary).await {
            return None;
        }
        let picked = self.bridge.pick_image(&ImageOptions::default()).await;
        image_result(picked, "image", "pickImage")
    }

    /// Take a photo with the camera.
    pub async fn take_photo(&self) -> Option<NativeActionResult> {
        if !self.permissions.ensure(Capability::Camera).await {
            return None;
        }
        let captured = self.bridge.capture_photo(&ImageOptions::default()).await;
        image_result(captured, "photo", "takePhoto")
    }

    /// Pick a document and inline its bytes.
    pub async fn pick_document(&self) -> Option<NativeActionResult> {
        match self.read_document().await {
            Ok(Some(doc)) => {
                info!(name = %doc.name, size = ?doc.size, "document picked");
                Some(NativeActionResult::Document(doc))
            }
            Ok(None) => {
                info!("document pick cancelled");
                None
            }
            Err(e) => {
                error!(error = %e, "document pick failed");
                None
            }
        }
    }

    async fn read_document(&self) -> Result<Option<DocumentAsset>> {
        let Some(PickedDocument {
            uri,
            name,
            size,
            mime_type,
        }) = self.bridge.pick_document(DOCUMENT_TYPES).await?
        else {
            return Ok(None);
        };
        if uri.is_empty() {
            warn!("document picker returned an empty uri");
            return Ok(None);
        }
        if let Some(size) = size.filter(|&size| size > MAX_DOCUMENT_BYTES) {
            warn!(size, limit = MAX_DOCUMENT_BYTES, "picked document too large, not read");
            return Ok(None);
        }
        let bytes = self.bridge.read_bytes(&uri).await?;
        if bytes.len() as u64 > MAX_DOCUMENT_BYTES {
            warn!(
                bytes = bytes.len(),
                limit = MAX_DOCUMENT_BYTES,
                "picked document too large, dropped"
            );
            return Ok(None);
        }
        Ok(Some(DocumentAsset {
            uri,
            name,
            size,
            mime_type: mime_type.unwrap_or_else(|| FALLBACK_MIME.to_string()),
            base64: BASE64.encode(bytes),
        }))
    }

    /// Start recording into `slot`.
    pub async fn start_recording(&self, slot: &RecordingSlot) -> RecordingStart {
        if !self.config.features.audio_recording {
            let text = &self.config.permission_messages.recording_unavailable;
            if let Err(e) = self.bridge.notify(&text.title, &text.message).await {
                warn!(error = %e, "could not show recording notice");
            }
            return RecordingStart::NotStarted;
        }

        if let Err(SlotBusy) = slot.begin() {
            warn!("recording already in progress, start request ignored");
            return RecordingStart::Busy;
        }

        if !self.permissions.ensure(Capability::Microphone).await {
            slot.abandon();
            return RecordingStart::NotStarted;
        }

        match self.bridge.start_recording().await {
            Ok(handle) => {
                info!(recording = %handle.id, "recording started");
                slot.activate(handle);
                RecordingStart::Started
            }
            Err(e) => {
                error!(error = %e, "could not start recording");
                slot.abandon();
                RecordingStart::NotStarted
            }
        }
    }

    /// Stop the recording held in `slot`. A no-op returning None when
    /// nothing is recording.
    pub async fn stop_recording(&self, slot: &RecordingSlot) -> Option<NativeActionResult> {
        let Some(handle) = slot.take() else {
            info!("stop requested with no recording open");
            return None;
        };
        match self.finish_recording(handle).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "could not stop recording");
                None
            }
        }
    }

    async fn finish_recording(&self, handle: RecordingHandle) -> Result<Option<NativeActionResult>> {
        let id = handle.id;
        let Some(uri) = self.bridge.stop_recording(handle).await? else {
            warn!(recording = %id, "recorder produced no file");
            return Ok(None);
        };
        let bytes = self.bridge.read_bytes(&uri).await?;
        info!(recording = %id, bytes = bytes.len(), "recording stopped");
        Ok(Some(NativeActionResult::Media(MediaAsset {
            uri,
            base64: Some(BASE64.encode(bytes)),
            kind: MediaKind::Audio,
            name: timestamped_name("recording", "m4a"),
        })))
    }
}

fn image_result(
    picked: Result<Option<PickedImage>>,
    prefix: &str,
    action: &'static str,
) -> Option<NativeActionResult> {
    match picked {
        Ok(Some(image)) if !image.uri.is_empty() => {
            info!(action, uri = %image.uri, "image ready");
            Some(NativeActionResult::Media(MediaAsset {
                uri: image.uri,
                base64: image.bytes.map(|b| BASE64.encode(b)),
                kind: MediaKind::Image,
                name: timestamped_name(prefix, "jpg"),
            }))
        }
        Ok(Some(_)) => {
            warn!(action, "picker returned an empty uri");
            None
        }
        Ok(None) => {
            info!(action, "cancelled by user");
            None
        }
        Err(e) => {
            error!(action, error = %e, "image action failed");
            None
        }
    }
}
