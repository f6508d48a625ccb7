// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Push identity acquisition with a persisted, time-bounded cache.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use webwrap_bridge::traits::{KeyValueStore, PlatformBridge};
use webwrap_core::config::IdentityConfig;
use webwrap_core::error::Result;
use webwrap_core::types::Capability;

use crate::permissions::PermissionGate;

pub const PLAYER_ID_KEY: &str = "@player_id";
pub const PLAYER_ID_TIMESTAMP_KEY: &str = "@player_id_timestamp";

/// Obtains the subscriber id from the push provider.
pub struct IdentityService {
    bridge: Arc<dyn PlatformBridge>,
    store: Arc<dyn KeyValueStore>,
    permissions: PermissionGate,
    app_id: String,
    config: IdentityConfig,
}

impl IdentityService {
    pub fn new(
        bridge: Arc<dyn PlatformBridge>,
        store: Arc<dyn KeyValueStore>,
        permissions: PermissionGate,
        app_id: impl Into<String>,
        config: IdentityConfig,
    ) -> Self {
        Self {
            bridge,
            store,
            permissions,
            app_id: app_id.into(),
            config,
        }
    }

    /// The cached id, if it is younger than the configured TTL.
    pub async fn cached(&self) -> Option<String> {
        match self.read_cache().await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "could not read cached push identity");
                None
            }
        }
    }

    async fn read_cache(&self) -> Result<Option<String>> {
        let Some(id) = self.store.get(PLAYER_ID_KEY).await? else {
            return Ok(None);
        };
        let Some(stamp) = self.store.get(PLAYER_ID_TIMESTAMP_KEY).await? else {
            debug!("cached push identity has no timestamp");
            self.discard_cache().await?;
            return Ok(None);
        };
        let Ok(stored_at) = stamp.trim().parse::<i64>() else {
            debug!(%stamp, "unparseable identity timestamp, treating cache as stale");
            self.discard_cache().await?;
            return Ok(None);
        };
        let age_ms = Utc::now().timestamp_millis().saturating_sub(stored_at);
        let ttl_ms = i64::try_from(self.config.cache_ttl().as_millis()).unwrap_or(i64::MAX);
        if id.is_empty() || age_ms < 0 || age_ms >= ttl_ms {
            debug!(age_ms, "cached push identity is stale");
            self.discard_cache().await?;
            return Ok(None);
        }
        Ok(Some(id))
    }

    async fn discard_cache(&self) -> Result<()> {
        self.store.remove(PLAYER_ID_KEY).await?;
        self.store.remove(PLAYER_ID_TIMESTAMP_KEY).await
    }

    /// Return a usable identity: the fresh cached one, or a new one from the
    /// provider. Gives up after `max_attempts` polls.
    pub async fn acquire(&self) -> Option<String> {
        if let Some(id) = self.cached().await {
            info!("using cached push identity");
            return Some(id);
        }

        if let Err(e) = self.bridge.initialize(&self.app_id).await {
            warn!(error = %e, "push provider unavailable");
            return None;
        }

        if !self.permissions.ensure(Capability::Notifications).await {
            info!("notifications not permitted, polling for identity anyway");
        }

        let attempts = self.config.max_attempts;
        for attempt in 1..=attempts {
            match self.bridge.subscription_id().await {
                Ok(Some(id)) if !id.is_empty() => {
                    info!(attempt, "push identity acquired");
                    self.persist(&id).await;
                    return Some(id);
                }
                Ok(_) => debug!(attempt, attempts, "push identity not ready"),
                Err(e) => warn!(attempt, attempts, error = %e, "push identity query failed"),
            }
            if attempt < attempts {
                tokio::time::sleep(self.config.attempt_delay()).await;
            }
        }

        warn!(attempts, "giving up on push identity");
        None
    }

    async fn persist(&self, id: &str) {
        let stamp = Utc::now().timestamp_millis().to_string();
        let stored = async {
            self.store.set(PLAYER_ID_KEY, id).await?;
            self.store.set(PLAYER_ID_TIMESTAMP_KEY, &stamp).await
        };
        if let Err(e) = stored.await {
            warn!(error = %e, "could not cache push identity");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use webwrap_core::config::PermissionMessages;
    use webwrap_core::error::ShellError;

    use super::*;
    use crate::testing::{MemoryStore, MockBridge};

    fn service(bridge: &Arc<MockBridge>, store: &Arc<MemoryStore>) -> IdentityService {
        IdentityService::new(
            bridge.clone(),
            store.clone(),
            PermissionGate::new(bridge.clone(), PermissionMessages::default()),
            "app-id",
            IdentityConfig::default(),
        )
    }

    fn seed(store: &MemoryStore, id: &str, age: Duration) {
        let stamp = Utc::now().timestamp_millis() - age.as_millis() as i64;
        let mut entries = store.entries.lock().unwrap();
        entries.insert(PLAYER_ID_KEY.into(), id.into());
        entries.insert(PLAYER_ID_TIMESTAMP_KEY.into(), stamp.to_string());
    }

    #[tokio::test]
    async fn fresh_cache_skips_provider() {
        let bridge = Arc::new(MockBridge::default());
        let store = Arc::new(MemoryStore::default());
        seed(&store, "cached-id", Duration::from_secs(60));

        assert_eq!(service(&bridge, &store).acquire().await.as_deref(), Some("cached-id"));
        assert_eq!(bridge.push_initialized.load(Ordering::SeqCst), 0);
        assert_eq!(bridge.push_id_queries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn stale_cache_is_refetched_and_rewritten() {
        let bridge = Arc::new(MockBridge::default());
        let store = Arc::new(MemoryStore::default());
        seed(&store, "old-id", Duration::from_secs(25 * 60 * 60));
        bridge.queue_push_id(Ok(Some("new-id".into())));

        assert_eq!(service(&bridge, &store).acquire().await.as_deref(), Some("new-id"));
        assert_eq!(bridge.push_initialized.load(Ordering::SeqCst), 1);
        let entries = store.entries.lock().unwrap();
        assert_eq!(entries.get(PLAYER_ID_KEY).map(String::as_str), Some("new-id"));
        assert!(entries.contains_key(PLAYER_ID_TIMESTAMP_KEY));
    }

    #[tokio::test(start_paused = true)]
    async fn polls_until_ready() {
        let bridge = Arc::new(MockBridge::default());
        let store = Arc::new(MemoryStore::default());
        bridge.queue_push_id(Ok(None));
        bridge.queue_push_id(Err(ShellError::Bridge("not yet".into())));
        bridge.queue_push_id(Ok(Some("abc".into())));

        let started = tokio::time::Instant::now();
        assert_eq!(service(&bridge, &store).acquire().await.as_deref(), Some("abc"));
        assert_eq!(bridge.push_id_queries.load(Ordering::SeqCst), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_five_attempts() {
        let bridge = Arc::new(MockBridge::default());
        let store = Arc::new(MemoryStore::default());

        let started = tokio::time::Instant::now();
        assert!(service(&bridge, &store).acquire().await.is_none());
        assert_eq!(bridge.push_id_queries.load(Ordering::SeqCst), 5);
        assert_eq!(started.elapsed(), Duration::from_secs(8));
        assert!(store.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn garbage_timestamp_counts_as_stale() {
        let bridge = Arc::new(MockBridge::default());
        let store = Arc::new(MemoryStore::default());
        store
            .entries
            .lock()
            .unwrap()
            .extend([
                (PLAYER_ID_KEY.to_string(), "x".to_string()),
                (PLAYER_ID_TIMESTAMP_KEY.to_string(), "yesterday".to_string()),
            ]);
        assert!(service(&bridge, &store).cached().await.is_none());
        assert!(store.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn stale_cache_is_cleared_on_read() {
        let bridge = Arc::new(MockBridge::default());
        let store = Arc::new(MemoryStore::default());
        seed(&store, "old-id", IdentityConfig::default().cache_ttl() + Duration::from_secs(1));

        assert!(service(&bridge, &store).cached().await.is_none());
        assert!(store.entries.lock().unwrap().is_empty());
        assert_eq!(bridge.push_initialized.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fresh_cache_is_kept_on_read() {
        let bridge = Arc::new(MockBridge::default());
        let store = Arc::new(MemoryStore::default());
        seed(&store, "cached-id", Duration::from_secs(60));

        assert_eq!(service(&bridge, &store).cached().await.as_deref(), Some("cached-id"));
        assert_eq!(store.entries.lock().unwrap().len(), 2);
    }
}
