// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Mutable state of one shell session.

use std::sync::Mutex;

use crate::recording::RecordingSlot;

/// State shared by the router and the bridge initializer for the lifetime
/// of one content view.
#[derive(Debug, Default)]
pub struct SessionContext {
    /// The single outstanding audio recording.
    pub recording: RecordingSlot,
    identity: Mutex<Option<String>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push identity, once known.
    pub fn identity(&self) -> Option<String> {
        self.identity
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Record the push identity. Returns `true` if it was previously unknown
    /// or different.
    pub fn set_identity(&self, id: String) -> bool {
        let mut slot = self
            .identity
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if slot.as_deref() == Some(id.as_str()) {
            return false;
        }
        *slot = Some(id);
        true
    }
}
