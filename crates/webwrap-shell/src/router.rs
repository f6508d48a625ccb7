// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Message router: classifies each inbound string once and dispatches it to
// a native action, posting the result back only when there is one.
//
// Handlers are fire-and-forget. Two requests of different types run
// concurrently; same-type requests can only be told apart by the optional
// `requestId`, which is echoed on the response.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use webwrap_bridge::traits::{ContentView, PlatformBridge};
use webwrap_core::config::ShellConfig;
use webwrap_core::types::{NativeActionResult, Platform};

use crate::actions::{NativeActions, RecordingStart};
use crate::message::{
    BridgeAction, BridgeMessage, BridgeRequest, Ignored, Response, ResponseType,
    compose_share_text,
};
use crate::session::SessionContext;

/// What the router did with one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Reloaded,
    Ignored,
    Handled {
        action: &'static str,
        /// Whether a response envelope was posted to the content.
        responded: bool,
    },
}

pub struct MessageRouter {
    actions: NativeActions,
    view: Arc<dyn ContentView>,
    session: Arc<SessionContext>,
    config: Arc<ShellConfig>,
    platform: Platform,
}

impl MessageRouter {
    pub fn new(
        bridge: Arc<dyn PlatformBridge>,
        view: Arc<dyn ContentView>,
        session: Arc<SessionContext>,
        config: Arc<ShellConfig>,
    ) -> Self {
        let platform = bridge.platform();
        Self {
            actions: NativeActions::new(bridge, config.clone()),
            view,
            session,
            config,
            platform,
        }
    }

    pub fn actions(&self) -> &NativeActions {
        &self.actions
    }

    /// Entry point for the content's message callback.
    ///
    /// The reload sentinel and ignored messages are settled before this
    /// returns; action requests run on a spawned task whose handle is
    /// returned.
    pub fn dispatch(self: &Arc<Self>, raw: &str) -> Option<JoinHandle<RouteOutcome>> {
        match self.classify(raw) {
            Some(request) => {
                let router = Arc::clone(self);
                Some(tokio::spawn(async move { router.handle(request).await }))
            }
            None => None,
        }
    }

    /// Classify and handle one message in the current task.
    pub async fn route(&self, raw: &str) -> RouteOutcome {
        match self.classify(raw) {
            Some(request) => self.handle(request).await,
            None if raw == crate::message::RELOAD_SENTINEL => RouteOutcome::Reloaded,
            None => RouteOutcome::Ignored,
        }
    }

    /// Settle sentinel and unusable messages; hand back action requests.
    fn classify(&self, raw: &str) -> Option<BridgeRequest> {
        match BridgeMessage::parse(raw) {
            BridgeMessage::Reload => {
                info!("reload requested by content");
                if let Err(e) = self.view.reload() {
                    warn!(error = %e, "reload failed");
                }
                None
            }
            BridgeMessage::Ignored(Ignored::Malformed(reason)) => {
                debug!(%reason, len = raw.len(), "non-JSON bridge message ignored");
                None
            }
            BridgeMessage::Ignored(Ignored::UnknownType(kind)) => {
                debug!(%kind, "unknown bridge message type ignored");
                None
            }
            BridgeMessage::Request(request) => Some(request),
        }
    }

    async fn handle(&self, request: BridgeRequest) -> RouteOutcome {
        let BridgeRequest { action, request_id } = request;
        let name = action.name();
        debug!(action = name, ?request_id, "dispatching bridge request");

        let responded = match action {
            BridgeAction::Share(data) => {
                let text = compose_share_text(
                    &data,
                    &self.config.share_footer,
                    self.config.store_link(self.platform),
                );
                self.actions.share(&text, data.title.as_deref()).await;
                false
            }
            BridgeAction::PickImage => {
                let result = self.actions.pick_image().await;
                self.respond(ResponseType::ImageSelected, result, request_id)
            }
            BridgeAction::TakePhoto => {
                let result = self.actions.take_photo().await;
                self.respond(ResponseType::PhotoTaken, result, request_id)
            }
            BridgeAction::PickDocument => {
                let result = self.actions.pick_document().await;
                self.respond(ResponseType::DocumentSelected, result, request_id)
            }
            BridgeAction::StartRecording => {
                match self.actions.start_recording(&self.session.recording).await {
                    RecordingStart::Started => {
                        self.post(Response::new(ResponseType::RecordingStarted, None, request_id))
                    }
                    RecordingStart::Busy => {
                        self.post(Response::new(ResponseType::RecordingBusy, None, request_id))
                    }
                    RecordingStart::NotStarted => false,
                }
            }
            BridgeAction::StopRecording => {
                let result = self.actions.stop_recording(&self.session.recording).await;
                self.respond(ResponseType::RecordingStopped, result, request_id)
            }
        };

        RouteOutcome::Handled {
            action: name,
            responded,
        }
    }

    /// Post `result` if there is one. Cancellations stay silent.
    fn respond(
        &self,
        kind: ResponseType,
        result: Option<NativeActionResult>,
        request_id: Option<String>,
    ) -> bool {
        match result {
            Some(data) => {
                debug!(?kind, uri = data.uri(), "action produced a result");
                self.post(Response::new(kind, Some(data), request_id))
            }
            None => false,
        }
    }

    fn post(&self, response: Response) -> bool {
        let json = match response.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "could not encode bridge response");
                return false;
            }
        };
        match self.view.post_message(&json) {
            Ok(()) => {
                debug!(kind = ?response.kind, "response posted to content");
                true
            }
            Err(e) => {
                warn!(error = %e, "could not post bridge response");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use webwrap_bridge::traits::PickedDocument;
    use webwrap_core::types::Capability;

    use super::*;
    use crate::testing::{MockBridge, MockView, ViewCall};

    struct Fixture {
        bridge: Arc<MockBridge>,
        view: Arc<MockView>,
        router: Arc<MessageRouter>,
    }

    fn fixture(platform: Platform) -> Fixture {
        let bridge = Arc::new(MockBridge::new(platform));
        let view = Arc::new(MockView::default());
        let router = Arc::new(MessageRouter::new(
            bridge.clone(),
            view.clone(),
            Arc::new(SessionContext::new()),
            Arc::new(ShellConfig::default()),
        ));
        Fixture {
            bridge,
            view,
            router,
        }
    }

    #[tokio::test]
    async fn reload_sentinel_reloads_without_task() {
        let f = fixture(Platform::Android);
        assert!(f.router.dispatch("reload").is_none());
        assert_eq!(f.view.calls(), vec![ViewCall::Reload]);
    }

    #[tokio::test]
    async fn garbage_and_unknown_types_do_nothing() {
        let f = fixture(Platform::Android);
        assert!(f.router.dispatch("{not json").is_none());
        assert!(f.router.dispatch(r#"{"type":"doSomethingElse"}"#).is_none());
        assert_eq!(f.router.route("").await, RouteOutcome::Ignored);
        assert!(f.view.calls().is_empty());
    }

    #[tokio::test]
    async fn picked_image_is_posted_back() {
        let f = fixture(Platform::Android);
        f.bridge.set_image("file:///cache/a.jpg", b"a");

        let outcome = f
            .router
            .dispatch(r#"{"type":"pickImage"}"#)
            .unwrap()
            .await
            .unwrap();
        assert_eq!(
            outcome,
            RouteOutcome::Handled {
                action: "pickImage",
                responded: true
            }
        );

        let messages = f.view.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["type"], "imageSelected");
        assert_eq!(messages[0]["data"]["uri"], "file:///cache/a.jpg");
        assert_eq!(messages[0]["data"]["type"], "image");
        assert!(messages[0].get("requestId").is_none());
    }

    #[tokio::test]
    async fn cancelled_actions_post_nothing() {
        let f = fixture(Platform::Android);
        for raw in [
            r#"{"type":"pickImage"}"#,
            r#"{"type":"takePhoto"}"#,
            r#"{"type":"pickDocument"}"#,
        ] {
            let outcome = f.router.route(raw).await;
            assert!(matches!(outcome, RouteOutcome::Handled { responded: false, .. }));
        }
        assert!(f.view.calls().is_empty());
    }

    #[tokio::test]
    async fn denied_recording_posts_nothing() {
        let f = fixture(Platform::Android);
        f.bridge.deny(Capability::Microphone);

        let outcome = f
            .router
            .dispatch(r#"{"type":"startRecording","requestId":"r1"}"#)
            .unwrap()
            .await
            .unwrap();
        assert_eq!(
            outcome,
            RouteOutcome::Handled {
                action: "startRecording",
                responded: false
            }
        );
        assert_eq!(f.bridge.recordings_started.load(Ordering::SeqCst), 0);
        assert_eq!(f.bridge.denials.lock().unwrap().len(), 1);
        assert!(f.view.calls().is_empty());

        f.router.route(r#"{"type":"stopRecording"}"#).await;
        assert_eq!(f.bridge.recordings_stopped.load(Ordering::SeqCst), 0);
        assert!(f.view.calls().is_empty());
    }

    #[tokio::test]
    async fn recording_without_file_posts_only_start() {
        let f = fixture(Platform::Ios);
        f.bridge.recorder_yields_file.store(false, Ordering::SeqCst);

        f.router.route(r#"{"type":"startRecording"}"#).await;
        let outcome = f.router.route(r#"{"type":"stopRecording"}"#).await;
        assert_eq!(
            outcome,
            RouteOutcome::Handled {
                action: "stopRecording",
                responded: false
            }
        );
        assert_eq!(f.bridge.recordings_stopped.load(Ordering::SeqCst), 1);
        assert_eq!(
            f.view.messages(),
            vec![serde_json::json!({ "type": "recordingStarted" })]
        );
    }

    #[tokio::test]
    async fn share_without_data_is_not_shared() {
        let f = fixture(Platform::Android);
        assert_eq!(f.router.route(r#"{"type":"share"}"#).await, RouteOutcome::Ignored);
        assert_eq!(
            f.router.route(r#"{"type":"share","data":null}"#).await,
            RouteOutcome::Ignored
        );
        assert!(f.bridge.shares.lock().unwrap().is_empty());
        assert!(f.view.calls().is_empty());
    }

    #[tokio::test]
    async fn document_response_carries_request_id() {
        let f = fixture(Platform::Ios);
        f.bridge.set_document(
            PickedDocument {
                uri: "file:///cache/a.pdf".into(),
                name: "a.pdf".into(),
                size: Some(1),
                mime_type: Some("application/pdf".into()),
            },
            b"%",
        );
        f.router
            .route(r#"{"type":"pickDocument","requestId":"doc-1"}"#)
            .await;

        let messages = f.view.messages();
        assert_eq!(messages[0]["type"], "documentSelected");
        assert_eq!(messages[0]["data"]["type"], "application/pdf");
        assert_eq!(messages[0]["requestId"], "doc-1");
    }

    #[tokio::test]
    async fn recording_round_trip() {
        let f = fixture(Platform::Android);

        f.router.route(r#"{"type":"startRecording"}"#).await;
        f.router.route(r#"{"type":"stopRecording"}"#).await;

        let messages = f.view.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], serde_json::json!({ "type": "recordingStarted" }));
        assert_eq!(messages[1]["type"], "recordingStopped");
        assert_eq!(messages[1]["data"]["type"], "audio");
    }

    #[tokio::test]
    async fn stop_without_start_posts_nothing() {
        let f = fixture(Platform::Android);
        let outcome = f.router.route(r#"{"type":"stopRecording"}"#).await;
        assert_eq!(
            outcome,
            RouteOutcome::Handled {
                action: "stopRecording",
                responded: false
            }
        );
        assert!(f.view.calls().is_empty());
    }

    #[tokio::test]
    async fn concurrent_starts_yield_one_recording_and_one_busy() {
        let f = fixture(Platform::Android);
        let a = f.router.dispatch(r#"{"type":"startRecording"}"#).unwrap();
        let b = f.router.dispatch(r#"{"type":"startRecording"}"#).unwrap();
        a.await.unwrap();
        b.await.unwrap();

        assert_eq!(f.bridge.recordings_started.load(Ordering::SeqCst), 1);
        let mut kinds: Vec<String> = f
            .view
            .messages()
            .iter()
            .map(|m| m["type"].as_str().unwrap().to_string())
            .collect();
        kinds.sort();
        assert_eq!(kinds, vec!["recordingBusy", "recordingStarted"]);
    }

    #[tokio::test]
    async fn share_appends_platform_store_link() {
        let f = fixture(Platform::Ios);
        f.router
            .route(r#"{"type":"share","data":{"text":"Hello","url":"https://x.test/1"}}"#)
            .await;

        let shares = f.bridge.shares.lock().unwrap().clone();
        assert_eq!(shares.len(), 1);
        let (message, title) = &shares[0];
        assert!(message.starts_with("Hello\n\nhttps://x.test/1\n\n"));
        assert!(message.ends_with(&ShellConfig::default().app_store_link));
        assert_eq!(title, &ShellConfig::default().app_name);
        assert!(f.view.calls().is_empty());
    }

    #[tokio::test]
    async fn share_uses_play_store_on_android() {
        let f = fixture(Platform::Android);
        f.router
            .route(r#"{"type":"share","data":{"text":"Hi","title":"T"}}"#)
            .await;
        let shares = f.bridge.shares.lock().unwrap().clone();
        assert!(shares[0].0.starts_with("Hi\n\n"));
        assert!(shares[0].0.ends_with(&ShellConfig::default().play_store_link));
        assert_eq!(shares[0].1, "T");
    }
}
