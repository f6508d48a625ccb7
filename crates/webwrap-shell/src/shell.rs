// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The shell session: one content view and every event the host feeds it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use webwrap_bridge::traits::{ContentView, KeyValueStore, PlatformBridge};
use webwrap_core::config::ShellConfig;
use webwrap_core::failure::{FailureCategory, LoadFailure};
use webwrap_core::types::{Capability, ConnectivityState};

use crate::connectivity::{ConnectivityMonitor, RetryOutcome};
use crate::error_page;
use crate::identity::IdentityService;
use crate::injector::{BridgeInitializer, navigate_script};
use crate::navigation::{self, BackAction, NavigationDecision};
use crate::router::{MessageRouter, RouteOutcome};
use crate::session::SessionContext;

pub struct Shell {
    config: Arc<ShellConfig>,
    bridge: Arc<dyn PlatformBridge>,
    view: Arc<dyn ContentView>,
    session: Arc<SessionContext>,
    router: Arc<MessageRouter>,
    connectivity: Arc<ConnectivityMonitor>,
    initializer: BridgeInitializer,
    identity: IdentityService,
    can_go_back: AtomicBool,
}

impl Shell {
    pub fn new(
        config: ShellConfig,
        bridge: Arc<dyn PlatformBridge>,
        view: Arc<dyn ContentView>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let config = Arc::new(config);
        let session = Arc::new(SessionContext::new());
        let platform = bridge.platform();

        let router = Arc::new(MessageRouter::new(
            bridge.clone(),
            view.clone(),
            session.clone(),
            config.clone(),
        ));
        let connectivity = Arc::new(ConnectivityMonitor::new(
            bridge.clone(),
            view.clone(),
            config.connectivity.clone(),
        ));
        let initializer =
            BridgeInitializer::new(view.clone(), session.clone(), config.clone(), platform);
        let identity = IdentityService::new(
            bridge.clone(),
            store,
            router.actions().permissions().clone(),
            config.push_app_id.clone(),
            config.identity.clone(),
        );

        info!(
            platform = bridge.platform_name(),
            base_url = %config.base_url,
            "shell session created"
        );

        Self {
            config,
            bridge,
            view,
            session,
            router,
            connectivity,
            initializer,
            identity,
            can_go_back: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Startup work after the view exists: media permission, push identity,
    /// identity injection. Returns the identity if one was obtained.
    pub async fn launch(&self) -> Option<String> {
        if self.config.features.request_media_on_launch {
            let granted = self
                .router
                .actions()
                .permissions()
                .ensure(Capability::MediaLibrary)
                .await;
            debug!(granted, "media permission at launch");
        }

        let id = self.identity.acquire().await?;
        self.initializer.on_identity(id.clone());
        Some(id)
    }

    /// A string posted by the content.
    pub fn on_message(&self, raw: &str) -> Option<JoinHandle<RouteOutcome>> {
        self.router.dispatch(raw)
    }

    pub fn on_load_start(&self) {
        self.initializer.on_load_start();
    }

    pub fn on_load_finished(&self) {
        self.initializer.on_load_finished();
    }

    /// The view failed to load. Reports the failure and replaces the content
    /// with the recovery page for its category.
    pub fn on_load_failed(&self, failure: &LoadFailure) -> FailureCategory {
        let category = failure.category();
        warn!(
            code = ?failure.code,
            description = %failure.description,
            url = %failure.url,
            timestamp = %failure.timestamp.to_rfc3339(),
            %category,
            app_version = %self.config.app_version,
            "content failed to load"
        );

        let html = error_page::render(&category.notice(), &self.config);
        if let Err(e) = self
            .view
            .inject_script(&error_page::replace_document_script(&html))
        {
            warn!(error = %e, "could not show error page");
        }
        category
    }

    pub fn on_reachability_changed(&self, reachable: bool) {
        self.connectivity.on_reachability_changed(reachable);
    }

    /// Manual retry from the offline placeholder.
    pub async fn retry(&self) -> RetryOutcome {
        self.connectivity.retry().await
    }

    pub fn connectivity(&self) -> ConnectivityState {
        self.connectivity.state()
    }

    /// The view reported whether it has history to go back to.
    pub fn on_navigation_state(&self, can_go_back: bool) {
        self.can_go_back.store(can_go_back, Ordering::SeqCst);
    }

    /// Whether the view should load `url` itself. Links leaving the site
    /// are handed to the system browser.
    pub async fn should_load(&self, url: &str) -> bool {
        match navigation::decide(&self.config.base_url, url) {
            NavigationDecision::Load => true,
            NavigationDecision::OpenExternally => {
                info!(%url, "opening external link");
                if let Err(e) = self.bridge.open_url(url).await {
                    warn!(%url, error = %e, "could not open external link");
                }
                false
            }
        }
    }

    pub async fn on_back(&self) -> BackAction {
        navigation::handle_back(
            self.bridge.as_ref(),
            self.view.as_ref(),
            self.can_go_back.load(Ordering::SeqCst),
        )
        .await
    }

    /// The user tapped a notification. Navigates to its `url`, if any.
    pub fn on_notification_opened(&self, url: Option<&str>) {
        let Some(url) = url.filter(|u| !u.is_empty()) else {
            debug!("notification opened without a link");
            return;
        };
        info!(%url, "opening link from notification");
        if let Err(e) = self.view.inject_script(&navigate_script(url)) {
            warn!(error = %e, "could not open notification link");
        }
    }

    /// A notification arrived while the app was in the foreground.
    pub fn on_notification_received(&self, title: &str) {
        info!(%title, "notification received in foreground");
    }
}
