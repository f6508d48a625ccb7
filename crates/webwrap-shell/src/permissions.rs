// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One permission flow for every capability kind: check, prompt, and on
// refusal explain with a settings deep link.

use std::sync::Arc;

use tracing::{debug, info, warn};
use webwrap_bridge::traits::{DenialChoice, PlatformBridge};
use webwrap_core::config::PermissionMessages;
use webwrap_core::types::{Capability, PermissionStatus};

/// Requests platform permissions on behalf of the action handlers.
#[derive(Clone)]
pub struct PermissionGate {
    bridge: Arc<dyn PlatformBridge>,
    messages: PermissionMessages,
}

impl PermissionGate {
    pub fn new(bridge: Arc<dyn PlatformBridge>, messages: PermissionMessages) -> Self {
        Self { bridge, messages }
    }

    /// Make sure `capability` is granted, prompting if needed.
    ///
    /// Returns `false` on refusal or platform failure; the user has then
    /// already seen the denial explanation (when the platform could show it).
    pub async fn ensure(&self, capability: Capability) -> bool {
        match self.bridge.permission_status(capability).await {
            Ok(PermissionStatus::Granted) => {
                debug!(%capability, "permission already granted");
                return true;
            }
            Ok(_) => {}
            Err(e) => debug!(%capability, error = %e, "permission status unavailable, prompting"),
        }

        match self.bridge.request_permission(capability).await {
            Ok(PermissionStatus::Granted) => {
                info!(%capability, "permission granted");
                true
            }
            Ok(status) => {
                warn!(%capability, ?status, "permission refused");
                self.explain_denial(capability).await;
                false
            }
            Err(e) => {
                warn!(%capability, error = %e, "permission request failed");
                false
            }
        }
    }

    async fn explain_denial(&self, capability: Capability) {
        let text = self.messages.for_capability(capability);
        let choice = self
            .bridge
            .explain_denial(
                &text.title,
                &text.message,
                &self.messages.open_settings,
                &self.messages.cancel,
            )
            .await;

        match choice {
            Ok(DenialChoice::OpenSettings) => {
                if let Err(e) = self.bridge.open_settings().await {
                    warn!(error = %e, "could not open app settings");
                }
            }
            Ok(DenialChoice::Dismiss) => debug!(%capability, "settings link dismissed"),
            Err(e) => warn!(%capability, error = %e, "could not show denial explanation"),
        }
    }
}
