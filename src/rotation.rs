use chrono::{DateTime, Duration, Utc};

use crate::playlist::{Playlist, SlideEntry};

/// The single authoritative record of which slide is current and when it
/// became current. Ephemeral: a process restart goes back to slide 0.
///
/// Invariant: `current_index` is in bounds whenever the playlist is
/// non-empty. When the playlist is empty the state is parked and both
/// fields are meaningless until a slide is added again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationState {
    pub current_index: usize,
    pub activated_at: DateTime<Utc>,
}

impl RotationState {
    /// Fresh rotation pointing at slide 0, activated now.
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            current_index: 0,
            activated_at: now,
        }
    }

    /// Manual override: jump straight to `index` and restart its timer.
    pub fn jump_to(&mut self, index: usize, now: DateTime<Utc>) {
        self.current_index = index;
        self.activated_at = now;
    }

    /// Advances to the next slide if the current one's duration has elapsed.
    ///
    /// The new `activated_at` is the previous slide's deadline, not the call
    /// time, so repeated short polls keep a fixed cadence instead of
    /// accumulating drift. Advances at most one step per call: after a long
    /// suspension the rotation catches up across successive polls rather
    /// than jumping several slides at once. No-op on an empty playlist.
    pub fn advance(&mut self, playlist: &Playlist, now: DateTime<Utc>) {
        let Some(entry) = playlist.get(self.current_index) else {
            return;
        };
        // durations are capped at the config layer (MAX_DURATION_SECS), so
        // the cast and the addition stay in range
        let deadline = self.activated_at + Duration::seconds(entry.duration_secs as i64);
        if now >= deadline {
            self.current_index = (self.current_index + 1) % playlist.len();
            self.activated_at = deadline;
        }
    }

    /// Pure projection of the current slide; `None` when the playlist is
    /// empty.
    pub fn query<'a>(&self, playlist: &'a Playlist) -> Option<&'a SlideEntry> {
        playlist.get(self.current_index)
    }

    /// Re-validates the index after an insert at `index`: entries at or
    /// before the current one shifted right, so the pointer follows its
    /// slide.
    pub fn slide_inserted(&mut self, index: usize) {
        if index <= self.current_index {
            self.current_index += 1;
        }
    }

    /// Re-validates the index after a removal at `index`, with `remaining`
    /// entries left.
    ///
    /// Removing an earlier entry shifts the current slide left, so the
    /// pointer follows it and its timer keeps running. Removing the current
    /// entry leaves the pointer at the next entry post-shift (wrapping to 0
    /// past the end) and restarts its timer, since the predecessor's elapsed
    /// time means nothing for it. Removing a later entry changes nothing.
    pub fn slide_removed(&mut self, index: usize, remaining: usize, now: DateTime<Utc>) {
        if remaining == 0 {
            // Parked; reset so the next added slide starts a fresh rotation.
            self.current_index = 0;
            self.activated_at = now;
            return;
        }
        if index < self.current_index {
            self.current_index -= 1;
        } else if index == self.current_index {
            if self.current_index >= remaining {
                self.current_index = 0;
            }
            self.activated_at = now;
        }
    }
}
