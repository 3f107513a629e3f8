use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::Error;
use crate::playlist::{Playlist, SlideEntry};
use crate::rotation::RotationState;
use crate::store::PlaylistStore;

/// Owned application state handle, created once at startup and cloned into
/// every request handler. The playlist and rotation state live behind a
/// single mutex: no poll or mutation may observe a half-updated pair, and
/// the store write on the mutation path happens inside the critical section.
#[derive(Clone)]
pub struct DisplayContext {
    inner: Arc<Mutex<Shared>>,
    store: PlaylistStore,
    default_duration_secs: u64,
}

struct Shared {
    playlist: Playlist,
    rotation: RotationState,
}

/// Read-only view of the configuration, shaped for the config client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOverview {
    pub duration_secs: u64,
    pub image_urls: Vec<String>,
    pub current_url: Option<String>,
}

/// Partial patch applied by [`DisplayContext::update`].
#[derive(Debug, Clone, Default)]
pub struct UpdatePatch {
    /// Jump-to target: the slide with this URL becomes current immediately.
    pub image_url: Option<String>,
    /// New duration, applied to every entry uniformly.
    pub duration_secs: Option<u64>,
}

impl DisplayContext {
    pub fn new(
        store: PlaylistStore,
        playlist: Playlist,
        default_duration_secs: u64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Shared {
                playlist,
                rotation: RotationState::start(now),
            })),
            store,
            default_duration_secs,
        }
    }

    /// Poll tick: advance the rotation if its deadline has passed, then
    /// project the current slide. Returns `None` while the playlist is
    /// empty.
    pub async fn poll(&self, now: DateTime<Utc>) -> Option<String> {
        let mut shared = self.inner.lock().await;
        let Shared { playlist, rotation } = &mut *shared;
        rotation.advance(playlist, now);
        rotation.query(playlist).map(|e| e.image_url.clone())
    }

    pub async fn overview(&self) -> ConfigOverview {
        let shared = self.inner.lock().await;
        ConfigOverview {
            duration_secs: shared
                .playlist
                .shared_duration_secs()
                .unwrap_or(self.default_duration_secs),
            image_urls: shared
                .playlist
                .iter()
                .map(|e| e.image_url.clone())
                .collect(),
            current_url: shared
                .rotation
                .query(&shared.playlist)
                .map(|e| e.image_url.clone()),
        }
    }

    /// Appends a slide. Without an explicit duration the list's shared
    /// duration is used, falling back to the configured default when the
    /// list is empty. Appending never disturbs the current index, but
    /// appending to an empty list un-parks the rotation.
    pub async fn create(
        &self,
        image_url: String,
        duration_secs: Option<u64>,
        now: DateTime<Utc>,
    ) -> Result<(), Error> {
        let mut shared = self.inner.lock().await;
        let duration = duration_secs
            .or_else(|| shared.playlist.shared_duration_secs())
            .unwrap_or(self.default_duration_secs);
        let entry = SlideEntry::new(image_url, duration);
        entry.validate()?;

        let was_empty = shared.playlist.is_empty();
        let mut playlist = shared.playlist.clone();
        playlist.push(entry);
        self.store.save(&playlist)?;

        shared.playlist = playlist;
        if was_empty {
            shared.rotation = RotationState::start(now);
        }
        info!(count = shared.playlist.len(), "slide added");
        Ok(())
    }

    /// Removes the first slide matching `image_url`. `NotFound` if absent;
    /// state is untouched on any failure.
    pub async fn delete(&self, image_url: &str, now: DateTime<Utc>) -> Result<(), Error> {
        let mut shared = self.inner.lock().await;
        let index = shared
            .playlist
            .position_of(image_url)
            .ok_or_else(|| Error::NotFound(image_url.to_string()))?;
        self.remove_locked(&mut shared, index, now)
    }

    /// Applies a partial patch: `duration_secs` uniformly to every entry,
    /// `image_url` as an immediate jump-to that restarts the slide timer.
    pub async fn update(&self, patch: UpdatePatch, now: DateTime<Utc>) -> Result<(), Error> {
        if patch.image_url.is_none() && patch.duration_secs.is_none() {
            return Err(Error::validation(
                "body",
                "at least one of imageUrl, durationSecs is required",
            ));
        }
        let mut shared = self.inner.lock().await;

        let mut jump_to = None;
        if let Some(url) = &patch.image_url {
            jump_to = Some(
                shared
                    .playlist
                    .position_of(url)
                    .ok_or_else(|| Error::NotFound(url.clone()))?,
            );
        }
        if let Some(secs) = patch.duration_secs {
            crate::playlist::validate_duration_secs(secs)?;
        }

        let mut playlist = shared.playlist.clone();
        if let Some(secs) = patch.duration_secs {
            playlist.set_duration(secs);
        }
        self.store.save(&playlist)?;

        shared.playlist = playlist;
        if let Some(index) = jump_to {
            shared.rotation.jump_to(index, now);
            debug!(index, "manual slide override");
        }
        Ok(())
    }

    /// Index-targeted insert used by the editable-list client. Out-of-range
    /// indices are rejected, not clamped.
    pub async fn insert_at(
        &self,
        index: usize,
        image_url: String,
        duration_secs: Option<u64>,
        now: DateTime<Utc>,
    ) -> Result<(), Error> {
        let mut shared = self.inner.lock().await;
        let duration = duration_secs
            .or_else(|| shared.playlist.shared_duration_secs())
            .unwrap_or(self.default_duration_secs);
        let entry = SlideEntry::new(image_url, duration);
        entry.validate()?;

        let was_empty = shared.playlist.is_empty();
        let mut playlist = shared.playlist.clone();
        playlist.insert(index, entry)?;
        self.store.save(&playlist)?;

        shared.playlist = playlist;
        if was_empty {
            shared.rotation = RotationState::start(now);
        } else {
            shared.rotation.slide_inserted(index);
        }
        Ok(())
    }

    /// Index-targeted removal. Out-of-range indices are rejected, not
    /// clamped.
    pub async fn remove_at(&self, index: usize, now: DateTime<Utc>) -> Result<(), Error> {
        let mut shared = self.inner.lock().await;
        self.remove_locked(&mut shared, index, now)
    }

    fn remove_locked(
        &self,
        shared: &mut Shared,
        index: usize,
        now: DateTime<Utc>,
    ) -> Result<(), Error> {
        let mut playlist = shared.playlist.clone();
        playlist.remove(index)?;
        self.store.save(&playlist)?;

        let remaining = playlist.len();
        shared.playlist = playlist;
        shared.rotation.slide_removed(index, remaining, now);
        info!(count = remaining, "slide removed");
        Ok(())
    }
}
