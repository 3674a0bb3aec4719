//! Favorite flags, persisted under a single key-value entry.
//!
//! The stored value is a JSON object mapping card id to boolean. Toggling a
//! card off keeps it in the mapping as `false` rather than removing it.

use crate::error::Result;
use crate::store::kv::KeyValueStore;
use std::collections::BTreeMap;

pub const FAVORITES_KEY: &str = "prompt-favorites";

pub struct Favorites<K: KeyValueStore> {
    kv: K,
    flags: BTreeMap<String, bool>,
}

impl<K: KeyValueStore> Favorites<K> {
    /// Reads the mapping from `kv`. An absent or unreadable entry is an
    /// empty mapping; the next toggle overwrites it.
    pub fn load(kv: K) -> Self {
        let flags = match kv.get(FAVORITES_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring unreadable favorites entry");
                BTreeMap::new()
            }),
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read favorites");
                BTreeMap::new()
            }
        };
        Self { kv, flags }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    /// Flips the flag for `id`, persists the whole mapping and returns the
    /// new value.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let value = !self.is_favorite(id);
        self.flags.insert(id.to_string(), value);
        let raw = serde_json::to_string(&self.flags)?;
        self.kv.set(FAVORITES_KEY, &raw)?;
        tracing::debug!(id, favorite = value, "favorite toggled");
        Ok(value)
    }

    /// Ids currently flagged as favorite, sorted.
    pub fn ids(&self) -> Vec<String> {
        self.flags
            .iter()
            .filter(|(_, on)| **on)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }
}
