// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Webwrap shell: routes messages from the embedded content to native actions,
// watches connectivity, and injects the bridge script. The host drives it
// through the event methods on `Shell`.

pub mod actions;
pub mod connectivity;
pub mod error_page;
pub mod identity;
pub mod injector;
pub mod message;
pub mod navigation;
pub mod permissions;
pub mod recording;
pub mod router;
pub mod session;
pub mod shell;

#[cfg(test)]
mod testing;

pub use actions::{NativeActions, RecordingStart};
pub use connectivity::{ConnectivityMonitor, RetryOutcome};
pub use message::{BridgeAction, BridgeMessage, Response, ResponseType};
pub use navigation::{BackAction, NavigationDecision};
pub use router::{MessageRouter, RouteOutcome};
pub use session::SessionContext;
pub use shell::Shell;
