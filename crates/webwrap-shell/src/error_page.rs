// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Recovery page shown in place of content that failed to load.

use std::borrow::Cow;
use std::fmt::Write as _;

use webwrap_core::config::ShellConfig;
use webwrap_core::failure::FailureNotice;

use crate::injector::js_string;
use crate::message::RELOAD_SENTINEL;

const STYLE: &str = "\
body{margin:0;font-family:-apple-system,Roboto,sans-serif;background:#f5f6fa;color:#2d3436}\
.error-container{max-width:420px;margin:0 auto;padding:48px 24px;text-align:center}\
.error-icon{font-size:64px}\
.error-title{font-size:22px;margin:16px 0 8px}\
.error-message{font-size:15px;line-height:1.5}\
.suggestions{text-align:start;background:#fff;border-radius:12px;padding:12px 20px;margin:24px 0}\
.retry-button{font-size:16px;padding:12px 32px;border:0;border-radius:24px;background:#0984e3;color:#fff}\
.retry-button:disabled{opacity:.6}\
.app-info{margin-top:32px;font-size:12px;color:#636e72}";

fn html_escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Render the recovery page for `notice`.
///
/// The retry button disables itself and posts the reload sentinel after
/// `retry_click_delay_ms`; the page presses it on its own after
/// `auto_retry_secs` unless the user already did.
pub fn render(notice: &FailureNotice, config: &ShellConfig) -> String {
    let mut suggestions = String::new();
    for suggestion in notice.suggestions {
        // Writing to a String cannot fail.
        let _ = write!(suggestions, "<li>{}</li>", html_escape(suggestion));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<div class="error-container">
<div class="error-icon">{icon}</div>
<h1 class="error-title">{title}</h1>
<p class="error-message">{description}</p>
<div class="suggestions"><ul>{suggestions}</ul></div>
<button class="retry-button" onclick="retryConnection()">Try again</button>
<div class="app-info">{app_name} - {app_version}</div>
</div>
<script>
function retryConnection() {{
  var button = document.querySelector(".retry-button");
  button.innerHTML = "Retrying...";
  button.disabled = true;
  setTimeout(function() {{
    try {{
      {channel}.postMessage({sentinel});
    }} catch (e) {{
      window.location.reload();
    }}
  }}, {click_delay});
}}
setTimeout(function() {{
  var button = document.querySelector(".retry-button");
  if (button && !button.disabled) {{
    button.click();
  }}
}}, {auto_retry_ms});
</script>
</body>
</html>"#,
        title = html_escape(notice.title),
        icon = html_escape(notice.icon),
        description = html_escape(notice.description),
        app_name = html_escape(&config.app_name),
        app_version = html_escape(&config.app_version),
        channel = config.bridge_channel,
        sentinel = js_string(RELOAD_SENTINEL),
        click_delay = config.error_page.retry_click_delay_ms,
        auto_retry_ms = config.error_page.auto_retry_secs.saturating_mul(1_000),
    )
}

/// Script replacing the current document with `html`.
pub fn replace_document_script(html: &str) -> String {
    format!(
        "document.open();\ndocument.write({});\ndocument.close();\ntrue;",
        js_string(html)
    )
}
