use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Longest accepted slide duration (one year). Keeps deadline arithmetic
/// inside chrono's `TimeDelta` range.
pub const MAX_DURATION_SECS: u64 = 366 * 86_400;

/// Shared duration check for entry validation and the PATCH path.
pub fn validate_duration_secs(duration_secs: u64) -> Result<(), Error> {
    if duration_secs == 0 {
        return Err(Error::validation("durationSecs", "must be greater than zero"));
    }
    if duration_secs > MAX_DURATION_SECS {
        return Err(Error::validation(
            "durationSecs",
            format!("must be at most {MAX_DURATION_SECS}"),
        ));
    }
    Ok(())
}

/// One rotation entry: an image URL and how long it stays on screen.
///
/// Immutable value; edits replace the entry wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SlideEntry {
    pub image_url: String,
    pub duration_secs: u64,
}

impl SlideEntry {
    pub fn new(image_url: impl Into<String>, duration_secs: u64) -> Self {
        Self {
            image_url: image_url.into(),
            duration_secs,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.image_url.trim().is_empty() {
            return Err(Error::validation("imageUrl", "must not be empty"));
        }
        validate_duration_secs(self.duration_secs)
    }
}

/// Ordered slide list; insertion order is display order. May be empty, in
/// which case the display has nothing to show. This is also the shape of the
/// persisted JSON document (`{ "entries": [...] }`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    entries: Vec<SlideEntry>,
}

impl Playlist {
    pub fn new(entries: Vec<SlideEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SlideEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlideEntry> {
        self.entries.iter()
    }

    /// First entry matching `url`, by value equality.
    pub fn position_of(&self, url: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.image_url == url)
    }

    pub fn push(&mut self, entry: SlideEntry) {
        self.entries.push(entry);
    }

    /// Inserts at `index`, shifting entries at `>= index` right.
    /// Out-of-range indices are rejected, not clamped.
    pub fn insert(&mut self, index: usize, entry: SlideEntry) -> Result<(), Error> {
        if index > self.entries.len() {
            return Err(Error::validation(
                "index",
                format!("{index} out of range for playlist of {}", self.entries.len()),
            ));
        }
        self.entries.insert(index, entry);
        Ok(())
    }

    /// Removes the entry at `index`. Out-of-range indices are rejected,
    /// not clamped.
    pub fn remove(&mut self, index: usize) -> Result<SlideEntry, Error> {
        if index >= self.entries.len() {
            return Err(Error::validation(
                "index",
                format!("{index} out of range for playlist of {}", self.entries.len()),
            ));
        }
        Ok(self.entries.remove(index))
    }

    /// The duration shared by the whole list. Entries are kept uniform by
    /// [`set_duration`], so this is the first entry's duration; `None` when
    /// the list is empty.
    pub fn shared_duration_secs(&self) -> Option<u64> {
        self.entries.first().map(|e| e.duration_secs)
    }

    /// Applies `duration_secs` to every entry uniformly.
    pub fn set_duration(&mut self, duration_secs: u64) {
        for entry in &mut self.entries {
            entry.duration_secs = duration_secs;
        }
    }

    /// Schema check used when loading a persisted document: every entry must
    /// be valid on its own.
    pub fn validate(&self) -> Result<(), Error> {
        for entry in &self.entries {
            entry.validate()?;
        }
        Ok(())
    }
}
