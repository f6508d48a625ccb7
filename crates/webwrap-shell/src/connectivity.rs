// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Connectivity monitor.
//
// Two states, online and offline, plus a retry counter bounded by
// `max_retries`. Coming back online resets the counter and reloads the
// content after a short debounce. Going offline shows the placeholder.
// While offline, each failed check (manual or automatic) schedules at most
// one further automatic check until the counter reaches its cap; after that
// only a manual retry probes the network again.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};
use webwrap_bridge::traits::{ContentView, PlatformBridge};
use webwrap_core::config::ConnectivityConfig;
use webwrap_core::types::ConnectivityState;

/// Result of a manual retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    /// The network is reachable again; a reload has been scheduled.
    Online,
    /// Still unreachable.
    StillOffline {
        retries: u32,
        /// Whether an automatic re-check is pending.
        scheduled: bool,
    },
}

#[derive(Debug)]
struct Inner {
    state: ConnectivityState,
    /// Bumped on every transition; a pending reload only fires if the
    /// generation it was scheduled under is still current.
    generation: u64,
    auto_retry_active: bool,
}

pub struct ConnectivityMonitor {
    bridge: Arc<dyn PlatformBridge>,
    view: Arc<dyn ContentView>,
    config: ConnectivityConfig,
    inner: Mutex<Inner>,
}

impl ConnectivityMonitor {
    /// A monitor that starts online.
    pub fn new(
        bridge: Arc<dyn PlatformBridge>,
        view: Arc<dyn ContentView>,
        config: ConnectivityConfig,
    ) -> Self {
        Self {
            bridge,
            view,
            config,
            inner: Mutex::new(Inner {
                state: ConnectivityState {
                    online: true,
                    retries: 0,
                },
                generation: 0,
                auto_retry_active: false,
            }),
        }
    }

    pub fn state(&self) -> ConnectivityState {
        self.lock().state
    }

    pub fn is_online(&self) -> bool {
        self.lock().state.online
    }

    /// Platform connectivity callback.
    pub fn on_reachability_changed(self: &Arc<Self>, reachable: bool) {
        if reachable {
            self.go_online();
        } else {
            self.go_offline();
        }
    }

    /// User-initiated retry while offline. A no-op when already online.
    pub async fn retry(self: &Arc<Self>) -> RetryOutcome {
        if self.is_online() {
            debug!("retry while online ignored");
            return RetryOutcome::Online;
        }
        if self.probe().await {
            self.go_online();
            return RetryOutcome::Online;
        }

        let (retries, spawn, scheduled) = {
            let mut inner = self.lock();
            let counted = inner.state.retries < self.config.max_retries;
            if counted {
                inner.state.retries += 1;
            }
            let spawn = counted && !inner.auto_retry_active;
            if spawn {
                inner.auto_retry_active = true;
            }
            (inner.state.retries, spawn, inner.auto_retry_active)
        };

        if spawn {
            spawn_auto_retry(Arc::clone(self));
        } else if !scheduled {
            info!(retries, "retry limit reached, waiting for manual retry");
        }
        RetryOutcome::StillOffline { retries, scheduled }
    }

    fn go_online(self: &Arc<Self>) {
        let generation = {
            let mut inner = self.lock();
            if inner.state.online {
                debug!("already online");
                return;
            }
            inner.state = ConnectivityState {
                online: true,
                retries: 0,
            };
            inner.generation += 1;
            inner.generation
        };

        info!("network connectivity restored");
        if let Err(e) = self.view.set_offline_placeholder(false) {
            warn!(error = %e, "could not hide offline placeholder");
        }

        let monitor = Arc::clone(self);
        let debounce = self.config.reconnect_debounce();
        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let current = {
                let inner = monitor.lock();
                inner.state.online && inner.generation == generation
            };
            if !current {
                debug!("connectivity changed during debounce, reload skipped");
                return;
            }
            info!("reloading content after reconnect");
            if let Err(e) = monitor.view.reload() {
                warn!(error = %e, "reload after reconnect failed");
            }
        });
    }

    fn go_offline(&self) {
        {
            let mut inner = self.lock();
            if !inner.state.online {
                return;
            }
            inner.state.online = false;
            inner.generation += 1;
        }
        warn!("network connectivity lost");
        if let Err(e) = self.view.set_offline_placeholder(true) {
            warn!(error = %e, "could not show offline placeholder");
        }
    }

    async fn probe(&self) -> bool {
        match self.bridge.is_reachable().await {
            Ok(reachable) => reachable,
            Err(e) => {
                warn!(error = %e, "reachability check failed");
                false
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Background re-check loop. Runs until the network comes back, the monitor
/// goes online by other means, or the retry cap is hit.
fn spawn_auto_retry(monitor: Arc<ConnectivityMonitor>) {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(monitor.config.retry_delay()).await;

            if monitor.is_online() {
                break;
            }

            if monitor.probe().await {
                monitor.lock().auto_retry_active = false;
                monitor.go_online();
                return;
            }

            let mut inner = monitor.lock();
            if inner.state.online {
                break;
            }
            if inner.state.retries >= monitor.config.max_retries {
                info!(
                    retries = inner.state.retries,
                    "retry limit reached, waiting for manual retry"
                );
                break;
            }
            inner.state.retries += 1;
            debug!(retries = inner.state.retries, "still offline, checking again");
        }
        monitor.lock().auto_retry_active = false;
    });
}
