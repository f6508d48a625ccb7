// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Recording test doubles for the platform bridge, the content view, and the
// key-value store.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use webwrap_bridge::traits::*;
use webwrap_core::error::{Result, ShellError};
use webwrap_core::types::{Capability, PermissionStatus, Platform, RecordingId};

/// Everything the shell asked the content view to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Reload,
    Script(String),
    Message(String),
    GoBack,
    Offline(bool),
}

#[derive(Default)]
pub struct MockView {
    calls: Mutex<Vec<ViewCall>>,
}

impl MockView {
    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn reloads(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ViewCall::Reload))
            .count()
    }

    pub fn scripts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ViewCall::Script(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    /// Posted messages parsed back into JSON.
    pub fn messages(&self) -> Vec<serde_json::Value> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ViewCall::Message(m) => serde_json::from_str(&m).ok(),
                _ => None,
            })
            .collect()
    }

    fn push(&self, call: ViewCall) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl ContentView for MockView {
    fn reload(&self) -> Result<()> {
        self.push(ViewCall::Reload)
    }

    fn inject_script(&self, script: &str) -> Result<()> {
        self.push(ViewCall::Script(script.to_string()))
    }

    fn post_message(&self, message: &str) -> Result<()> {
        self.push(ViewCall::Message(message.to_string()))
    }

    fn go_back(&self) -> Result<()> {
        self.push(ViewCall::GoBack)
    }

    fn set_offline_placeholder(&self, visible: bool) -> Result<()> {
        self.push(ViewCall::Offline(visible))
    }
}

/// Scriptable bridge. Defaults: every permission granted, every picker
/// cancelled, network reachable, no push id.
pub struct MockBridge {
    pub platform: Platform,
    pub permission_status: Mutex<HashMap<Capability, PermissionStatus>>,
    pub permission_answer: Mutex<HashMap<Capability, PermissionStatus>>,
    pub permission_requests: Mutex<Vec<Capability>>,
    pub denial_choice: Mutex<DenialChoice>,
    pub denials: Mutex<Vec<String>>,
    pub notices: Mutex<Vec<String>>,
    pub settings_opened: AtomicUsize,
    pub image: Mutex<Option<PickedImage>>,
    pub photo: Mutex<Option<PickedImage>>,
    pub document: Mutex<Option<PickedDocument>>,
    pub picker_fails: AtomicBool,
    pub files: Mutex<HashMap<String, Vec<u8>>>,
    pub file_reads: AtomicUsize,
    pub recordings_started: AtomicUsize,
    pub recordings_stopped: AtomicUsize,
    /// When false the recorder stops without producing a file.
    pub recorder_yields_file: AtomicBool,
    pub shares: Mutex<Vec<(String, String)>>,
    pub opened_urls: Mutex<Vec<String>>,
    pub confirm_exit: AtomicBool,
    pub exited: AtomicBool,
    pub reachable: AtomicBool,
    pub reachability_checks: AtomicUsize,
    pub push_initialized: AtomicUsize,
    pub push_ids: Mutex<VecDeque<Result<Option<String>>>>,
    pub push_id_queries: AtomicUsize,
}

impl Default for MockBridge {
    fn default() -> Self {
        Self::new(Platform::Android)
    }
}

impl MockBridge {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            permission_status: Mutex::new(HashMap::new()),
            permission_answer: Mutex::new(HashMap::new()),
            permission_requests: Mutex::new(Vec::new()),
            denial_choice: Mutex::new(DenialChoice::Dismiss),
            denials: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
            settings_opened: AtomicUsize::new(0),
            image: Mutex::new(None),
            photo: Mutex::new(None),
            document: Mutex::new(None),
            picker_fails: AtomicBool::new(false),
            files: Mutex::new(HashMap::new()),
            file_reads: AtomicUsize::new(0),
            recordings_started: AtomicUsize::new(0),
            recordings_stopped: AtomicUsize::new(0),
            recorder_yields_file: AtomicBool::new(true),
            shares: Mutex::new(Vec::new()),
            opened_urls: Mutex::new(Vec::new()),
            confirm_exit: AtomicBool::new(false),
            exited: AtomicBool::new(false),
            reachable: AtomicBool::new(true),
            reachability_checks: AtomicUsize::new(0),
            push_initialized: AtomicUsize::new(0),
            push_ids: Mutex::new(VecDeque::new()),
            push_id_queries: AtomicUsize::new(0),
        }
    }

    /// Make the next prompt for `capability` come back denied.
    pub fn deny(&self, capability: Capability) {
        self.permission_answer
            .lock()
            .unwrap()
            .insert(capability, PermissionStatus::Denied);
    }

    pub fn grant_up_front(&self, capability: Capability) {
        self.permission_status
            .lock()
            .unwrap()
            .insert(capability, PermissionStatus::Granted);
    }

    pub fn set_image(&self, uri: &str, bytes: &[u8]) {
        *self.image.lock().unwrap() = Some(PickedImage {
            uri: uri.into(),
            bytes: Some(bytes.to_vec()),
        });
    }

    pub fn set_photo(&self, uri: &str, bytes: &[u8]) {
        *self.photo.lock().unwrap() = Some(PickedImage {
            uri: uri.into(),
            bytes: Some(bytes.to_vec()),
        });
    }

    pub fn set_document(&self, doc: PickedDocument, bytes: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .insert(doc.uri.clone(), bytes.to_vec());
        *self.document.lock().unwrap() = Some(doc);
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    pub fn queue_push_id(&self, answer: Result<Option<String>>) {
        self.push_ids.lock().unwrap().push_back(answer);
    }

    fn picker_result(&self, slot: &Mutex<Option<PickedImage>>) -> Result<Option<PickedImage>> {
        if self.picker_fails.load(Ordering::SeqCst) {
            return Err(ShellError::Bridge("picker crashed".into()));
        }
        Ok(slot.lock().unwrap().clone())
    }
}

impl PlatformBridge for MockBridge {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn platform_name(&self) -> &str {
        "Mock"
    }
}

#[async_trait]
impl NativePermissions for MockBridge {
    async fn permission_status(&self, capability: Capability) -> Result<PermissionStatus> {
        Ok(self
            .permission_status
            .lock()
            .unwrap()
            .get(&capability)
            .copied()
            .unwrap_or(PermissionStatus::Undetermined))
    }

    async fn request_permission(&self, capability: Capability) -> Result<PermissionStatus> {
        self.permission_requests.lock().unwrap().push(capability);
        Ok(self
            .permission_answer
            .lock()
            .unwrap()
            .get(&capability)
            .copied()
            .unwrap_or(PermissionStatus::Granted))
    }
}

#[async_trait]
impl NativeImagePicker for MockBridge {
    async fn pick_image(&self, _options: &ImageOptions) -> Result<Option<PickedImage>> {
        self.picker_result(&self.image)
    }

    async fn capture_photo(&self, _options: &ImageOptions) -> Result<Option<PickedImage>> {
        self.picker_result(&self.photo)
    }
}

#[async_trait]
impl NativeDocumentPicker for MockBridge {
    async fn pick_document(&self, _mime_types: &[&str]) -> Result<Option<PickedDocument>> {
        if self.picker_fails.load(Ordering::SeqCst) {
            return Err(ShellError::Bridge("picker crashed".into()));
        }
        Ok(self.document.lock().unwrap().clone())
    }
}

#[async_trait]
impl NativeAudioRecorder for MockBridge {
    async fn start_recording(&self) -> Result<RecordingHandle> {
        let n = self.recordings_started.fetch_add(1, Ordering::SeqCst);
        // Yield so concurrent callers can observe the in-flight start.
        tokio::task::yield_now().await;
        Ok(RecordingHandle {
            id: RecordingId::new(),
            native: format!("rec-{n}"),
        })
    }

    async fn stop_recording(&self, handle: RecordingHandle) -> Result<Option<String>> {
        self.recordings_stopped.fetch_add(1, Ordering::SeqCst);
        if !self.recorder_yields_file.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let uri = format!("file:///cache/{}.m4a", handle.native);
        self.files
            .lock()
            .unwrap()
            .insert(uri.clone(), b"m4a-bytes".to_vec());
        Ok(Some(uri))
    }
}

#[async_trait]
impl NativeFiles for MockBridge {
    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        self.file_reads.fetch_add(1, Ordering::SeqCst);
        self.files.lock().unwrap().get(uri).cloned().ok_or_else(|| {
            ShellError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, uri.to_string()))
        })
    }
}

#[async_trait]
impl NativeShare for MockBridge {
    async fn share_text(&self, message: &str, title: &str) -> Result<()> {
        self.shares
            .lock()
            .unwrap()
            .push((message.to_string(), title.to_string()));
        Ok(())
    }
}

#[async_trait]
impl NativeLinks for MockBridge {
    async fn open_settings(&self) -> Result<()> {
        self.settings_opened.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn open_url(&self, url: &str) -> Result<()> {
        self.opened_urls.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[async_trait]
impl NativeDialogs for MockBridge {
    async fn explain_denial(
        &self,
        title: &str,
        _message: &str,
        _open_settings_label: &str,
        _cancel_label: &str,
    ) -> Result<DenialChoice> {
        self.denials.lock().unwrap().push(title.to_string());
        Ok(*self.denial_choice.lock().unwrap())
    }

    async fn notify(&self, title: &str, _message: &str) -> Result<()> {
        self.notices.lock().unwrap().push(title.to_string());
        Ok(())
    }

    async fn confirm_exit(&self) -> Result<bool> {
        Ok(self.confirm_exit.load(Ordering::SeqCst))
    }

    fn exit_app(&self) {
        self.exited.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl NativeConnectivity for MockBridge {
    async fn is_reachable(&self) -> Result<bool> {
        self.reachability_checks.fetch_add(1, Ordering::SeqCst);
        Ok(self.reachable.load(Ordering::SeqCst))
    }
}

#[async_trait]
impl PushProvider for MockBridge {
    async fn initialize(&self, _app_id: &str) -> Result<()> {
        self.push_initialized.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn subscription_id(&self) -> Result<Option<String>> {
        self.push_id_queries.fetch_add(1, Ordering::SeqCst);
        self.push_ids.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
