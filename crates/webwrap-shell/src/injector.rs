// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge initializer: the scripts the shell injects into the content.
//
// The bridge script is re-executed on every load start. Device values are
// written each time; the share polyfill and the trigger functions are
// installed once per document behind the `window.__webwrapBridge` flag, so
// re-running it never stacks listeners or replaces state the page set up.

use std::sync::Arc;

use tracing::{debug, warn};
use webwrap_bridge::traits::ContentView;
use webwrap_core::config::ShellConfig;
use webwrap_core::types::Platform;

use crate::session::SessionContext;

const BRIDGE_TEMPLATE: &str = r#"(function() {
  try {
    __STORE_VALUES__
    window.deviceInfo = { type: __DEVICE_TYPE__, platform: __PLATFORM__, version: __APP_VERSION__ };
    if (window.__webwrapBridge) {
      return;
    }
    var post = function(message) {
      try {
        var channel = __CHANNEL__;
        if (channel && typeof channel.postMessage === "function") {
          channel.postMessage(JSON.stringify(message));
        }
      } catch (e) {
        console.error("webwrap bridge unavailable", e);
      }
    };
    if (document.body) {
      document.body.style.webkitUserSelect = "none";
      document.body.style.webkitTouchCallout = "none";
    }
    if (!window.navigator.share) {
      window.navigator.share = function(data) {
        post({ type: "share", data: data || {} });
        return Promise.resolve();
      };
    }
    window.pickImageFromGallery = function() { post({ type: "pickImage" }); };
    window.takePhoto = function() { post({ type: "takePhoto" }); };
    window.pickDocument = function() { post({ type: "pickDocument" }); };
    window.startRecording = function() { post({ type: "startRecording" }); };
    window.stopRecording = function() { post({ type: "stopRecording" }); };
    window.__webwrapBridge = true;
  } catch (e) {
    console.error("webwrap bridge setup failed", e);
  }
})();
true;"#;

/// Encode `value` as a JavaScript string literal.
pub fn js_string(value: &str) -> String {
    // A JSON string is a valid JS string literal.
    serde_json::Value::from(value).to_string()
}

fn store_values(config: &ShellConfig, platform: Platform, identity: Option<&str>) -> String {
    let mut pairs = vec![
        ("app_version", config.app_version.as_str()),
        ("device_type", platform.device_type()),
        ("platform", platform.os()),
    ];
    if let Some(id) = identity {
        pairs.push(("player_id", id));
    }
    pairs
        .into_iter()
        .map(|(key, value)| format!("localStorage.setItem({}, {});", js_string(key), js_string(value)))
        .collect::<Vec<_>>()
        .join("\n    ")
}

/// Full bridge script for a load start.
pub fn bridge_script(config: &ShellConfig, platform: Platform, identity: Option<&str>) -> String {
    let store = store_values(config, platform, identity);
    let device_type = js_string(platform.device_type());
    let os = js_string(platform.os());
    let version = js_string(&config.app_version);
    fill(
        BRIDGE_TEMPLATE,
        &[
            ("__STORE_VALUES__", store.as_str()),
            ("__DEVICE_TYPE__", device_type.as_str()),
            ("__PLATFORM__", os.as_str()),
            ("__APP_VERSION__", version.as_str()),
            ("__CHANNEL__", config.bridge_channel.as_str()),
        ],
    )
}

/// Substitute placeholders in one pass over `template`. Inserted values are
/// never scanned, so they may contain placeholder names.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 512);
    let mut rest = template;
    while let Some((at, key, value)) = values
        .iter()
        .filter_map(|&(key, value)| rest.find(key).map(|at| (at, key, value)))
        .min_by_key(|&(at, _, _)| at)
    {
        out.push_str(&rest[..at]);
        out.push_str(value);
        rest = &rest[at + key.len()..];
    }
    out.push_str(rest);
    out
}

/// Script that stores the push identity alongside the device values.
pub fn identity_script(config: &ShellConfig, platform: Platform, identity: &str) -> String {
    format!(
        "try {{\n  {}\n}} catch (e) {{\n  console.error(\"webwrap identity injection failed\", e);\n}}\ntrue;",
        store_values(config, platform, Some(identity)).replace("\n    ", "\n  ")
    )
}

/// Script that navigates the content to `url`.
pub fn navigate_script(url: &str) -> String {
    format!(
        "try {{\n  window.location.href = {};\n}} catch (e) {{\n  console.error(\"webwrap navigation failed\", e);\n}}\ntrue;",
        js_string(url)
    )
}

/// Injects the bridge and identity scripts at the right moments.
pub struct BridgeInitializer {
    view: Arc<dyn ContentView>,
    session: Arc<SessionContext>,
    config: Arc<ShellConfig>,
    platform: Platform,
}

impl BridgeInitializer {
    pub fn new(
        view: Arc<dyn ContentView>,
        session: Arc<SessionContext>,
        config: Arc<ShellConfig>,
        platform: Platform,
    ) -> Self {
        Self {
            view,
            session,
            config,
            platform,
        }
    }

    /// Content started loading.
    pub fn on_load_start(&self) {
        let identity = self.session.identity();
        let script = bridge_script(&self.config, self.platform, identity.as_deref());
        debug!(identity = identity.is_some(), "injecting bridge script");
        self.inject(&script);
    }

    /// Content finished loading. Re-applies the identity if one is known.
    pub fn on_load_finished(&self) {
        if let Some(id) = self.session.identity() {
            self.inject(&identity_script(&self.config, self.platform, &id));
        }
    }

    /// A push identity became available. Injects only when it is new.
    pub fn on_identity(&self, id: String) {
        if id.is_empty() {
            return;
        }
        if self.session.set_identity(id.clone()) {
            debug!("push identity available, injecting");
            self.inject(&identity_script(&self.config, self.platform, &id));
        }
    }

    fn inject(&self, script: &str) {
        if let Err(e) = self.view.inject_script(script) {
            warn!(error = %e, "script injection failed");
        }
    }
}
