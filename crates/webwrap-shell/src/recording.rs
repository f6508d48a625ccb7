// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-slot ownership of the audio recording handle.
//
// At most one recording exists at a time. A start request claims the slot
// before the platform call so that a second start arriving while the first
// is still being set up is refused instead of racing it.

use std::sync::Mutex;

use webwrap_bridge::traits::RecordingHandle;

#[derive(Debug, Default)]
enum SlotState {
    #[default]
    Idle,
    /// A start request is awaiting the platform.
    Starting,
    Active(RecordingHandle),
}

/// Why a start request could not claim the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBusy;

/// Holds the one outstanding [`RecordingHandle`].
#[derive(Debug, Default)]
pub struct RecordingSlot {
    state: Mutex<SlotState>,
}

impl RecordingSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for a new recording. Fails if one is starting or open.
    pub fn begin(&self) -> Result<(), SlotBusy> {
        let mut state = self.lock();
        match *state {
            SlotState::Idle => {
                *state = SlotState::Starting;
                Ok(())
            }
            SlotState::Starting | SlotState::Active(_) => Err(SlotBusy),
        }
    }

    /// Store the handle of a recording claimed with [`begin`](Self::begin).
    pub fn activate(&self, handle: RecordingHandle) {
        *self.lock() = SlotState::Active(handle);
    }

    /// Release a claim whose platform start failed.
    pub fn abandon(&self) {
        let mut state = self.lock();
        if matches!(*state, SlotState::Starting) {
            *state = SlotState::Idle;
        }
    }

    /// Take the open handle, leaving the slot idle. None when nothing is
    /// recording (including while a start is still in flight).
    pub fn take(&self) -> Option<RecordingHandle> {
        let mut state = self.lock();
        match std::mem::take(&mut *state) {
            SlotState::Active(handle) => Some(handle),
            other => {
                *state = other;
                None
            }
        }
    }

    pub fn is_recording(&self) -> bool {
        matches!(*self.lock(), SlotState::Active(_))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SlotState> {
        // The state is a plain enum; a panic mid-update cannot leave it torn.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
