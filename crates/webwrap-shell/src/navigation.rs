// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Which URLs stay inside the view, and what the back button does.

use tracing::{debug, info, warn};
use webwrap_bridge::traits::{ContentView, PlatformBridge};

/// Decision for a navigation request raised by the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Load it in the view.
    Load,
    /// Block it in the view and hand it to the system browser.
    OpenExternally,
}

/// Site pages load in place; other web links leave the app; everything
/// else (about:, data:, file:, blob:) loads.
pub fn decide(base_url: &str, url: &str) -> NavigationDecision {
    if url.starts_with(base_url) {
        return NavigationDecision::Load;
    }
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        NavigationDecision::OpenExternally
    } else {
        NavigationDecision::Load
    }
}

/// What a hardware back press ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    WentBack,
    Exited,
    /// The user declined to leave.
    Stayed,
}

/// Go back in content history when possible; otherwise confirm and exit.
pub async fn handle_back(
    bridge: &dyn PlatformBridge,
    view: &dyn ContentView,
    can_go_back: bool,
) -> BackAction {
    if can_go_back {
        match view.go_back() {
            Ok(()) => {
                debug!("navigated back");
                return BackAction::WentBack;
            }
            Err(e) => warn!(error = %e, "go back failed, offering exit"),
        }
    }

    match bridge.confirm_exit().await {
        Ok(true) => {
            info!("exit confirmed");
            bridge.exit_app();
            BackAction::Exited
        }
        Ok(false) => BackAction::Stayed,
        Err(e) => {
            warn!(error = %e, "exit confirmation unavailable");
            BackAction::Stayed
        }
    }
}
