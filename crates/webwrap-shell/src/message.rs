// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wire format of the content <-> shell channel.
//
// Inbound: the literal `reload`, or `{ "type": ..., "data"?: ..., "requestId"?: ... }`.
// Outbound: `{ "type": ..., "data"?: ..., "requestId"?: ... }`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use webwrap_core::types::NativeActionResult;

/// Message that reloads the content without any parsing.
pub const RELOAD_SENTINEL: &str = "reload";

/// Payload of a `share` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ShareData {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// A native action requested by the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeAction {
    Share(ShareData),
    PickImage,
    TakePhoto,
    PickDocument,
    StartRecording,
    StopRecording,
}

impl BridgeAction {
    /// Wire name of the request.
    pub fn name(&self) -> &'static str {
        match self {
            BridgeAction::Share(_) => "share",
            BridgeAction::PickImage => "pickImage",
            BridgeAction::TakePhoto => "takePhoto",
            BridgeAction::PickDocument => "pickDocument",
            BridgeAction::StartRecording => "startRecording",
            BridgeAction::StopRecording => "stopRecording",
        }
    }
}

/// A parsed action request plus its optional correlation id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeRequest {
    pub action: BridgeAction,
    pub request_id: Option<String>,
}

/// Why an inbound message was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ignored {
    /// Not JSON, or JSON without a string `type`.
    Malformed(String),
    /// Well-formed envelope with a `type` the shell does not handle.
    UnknownType(String),
}

/// One inbound message, classified once at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeMessage {
    Reload,
    Request(BridgeRequest),
    Ignored(Ignored),
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default, rename = "requestId")]
    request_id: Option<Value>,
}

impl BridgeMessage {
    /// Classify a raw message. Never fails: anything unusable becomes
    /// [`BridgeMessage::Ignored`].
    pub fn parse(raw: &str) -> Self {
        if raw == RELOAD_SENTINEL {
            return BridgeMessage::Reload;
        }

        let envelope: RawEnvelope = match serde_json::from_str(raw) {
            Ok(envelope) => envelope,
            Err(e) => return BridgeMessage::Ignored(Ignored::Malformed(e.to_string())),
        };

        let action = match envelope.kind.as_str() {
            "share" => match share_data(envelope.data) {
                Ok(data) => BridgeAction::Share(data),
                Err(reason) => return BridgeMessage::Ignored(Ignored::Malformed(reason)),
            },
            "pickImage" => BridgeAction::PickImage,
            "takePhoto" => BridgeAction::TakePhoto,
            "pickDocument" => BridgeAction::PickDocument,
            "startRecording" => BridgeAction::StartRecording,
            "stopRecording" => BridgeAction::StopRecording,
            _ => return BridgeMessage::Ignored(Ignored::UnknownType(envelope.kind)),
        };

        BridgeMessage::Request(BridgeRequest {
            action,
            request_id: envelope.request_id.and_then(correlation_id),
        })
    }
}

/// Request ids may arrive as strings or numbers; anything else is dropped.
fn correlation_id(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn share_data(data: Option<Value>) -> Result<ShareData, String> {
    match data {
        None | Some(Value::Null) => Err("share without data".to_string()),
        Some(value) => serde_json::from_value(value).map_err(|e| e.to_string()),
    }
}

/// Response types posted back to the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseType {
    #[serde(rename = "imageSelected")]
    ImageSelected,
    #[serde(rename = "photoTaken")]
    PhotoTaken,
    #[serde(rename = "documentSelected")]
    DocumentSelected,
    #[serde(rename = "recordingStarted")]
    RecordingStarted,
    #[serde(rename = "recordingStopped")]
    RecordingStopped,
    #[serde(rename = "recordingBusy")]
    RecordingBusy,
}

/// Envelope posted to the content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    #[serde(rename = "type")]
    pub kind: ResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<NativeActionResult>,
    #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl Response {
    pub fn new(kind: ResponseType, data: Option<NativeActionResult>, request_id: Option<String>) -> Self {
        Self {
            kind,
            data,
            request_id,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Text handed to the share sheet: the content's text and URL separated by
/// a blank line, then the store footer.
pub fn compose_share_text(data: &ShareData, footer: &str, store_link: &str) -> String {
    let mut text = data.text.clone().unwrap_or_default();
    if let Some(url) = data.url.as_deref().filter(|u| !u.is_empty()) {
        if !text.is_empty() {
            text.push_str("\n\n");
        }
        text.push_str(url);
    }
    text.push_str("\n\n");
    text.push_str(footer);
    text.push('\n');
    text.push_str(store_link);
    text
}
