//! Saved-color palette with key-value persistence.
//!
//! Entries live newest-first, capped at [`MAX_SAVED`], deduplicated by
//! (hex, alpha) before insert, and are written back as one JSON document
//! under a fixed key — a full overwrite on every mutation, never a
//! partial merge. The backing store is abstracted as [`PaletteStore`] so
//! the engine stays independent of the host's storage (browser local
//! storage in a web host, a `HashMap` in tests).

use crate::color::Rgba;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fixed store key for the serialized palette.
pub const STORAGE_KEY: &str = "savedColors";

/// Maximum number of retained entries; the oldest fall off the end.
pub const MAX_SAVED: usize = 20;

// ============================================================================
// Store seam
// ============================================================================

/// String key-value store, the shape of browser local storage.
pub trait PaletteStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PaletteStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_owned(), value.to_owned());
    }
}

// ============================================================================
// SavedColor and Palette
// ============================================================================

/// One saved palette entry. `id` doubles as the creation timestamp in
/// string form, matching the persisted layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedColor {
    pub id: String,
    pub hex: String,
    pub rgb: Rgba,
    pub timestamp: i64,
}

/// The ordered saved-color list, newest first.
#[derive(Debug, Default)]
pub struct Palette {
    entries: Vec<SavedColor>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the palette from the store. A missing key or a document that
    /// no longer parses yields an empty palette rather than an error.
    pub fn load(store: &impl PaletteStore) -> Self {
        let entries = store
            .get(STORAGE_KEY)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self { entries }
    }

    pub fn entries(&self) -> &[SavedColor] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Save a color. A no-op when an entry with the same (hex, alpha)
    /// already exists; otherwise prepends, truncates to [`MAX_SAVED`],
    /// and rewrites the whole document. Returns whether an entry was
    /// added. `timestamp_ms` becomes both the id and the timestamp.
    pub fn save(
        &mut self,
        store: &mut impl PaletteStore,
        hex: &str,
        rgb: Rgba,
        timestamp_ms: i64,
    ) -> bool {
        let duplicate = self
            .entries
            .iter()
            .any(|entry| entry.hex == hex && entry.rgb.a == rgb.a);
        if duplicate {
            return false;
        }
        self.entries.insert(
            0,
            SavedColor {
                id: timestamp_ms.to_string(),
                hex: hex.to_owned(),
                rgb,
                timestamp: timestamp_ms,
            },
        );
        self.entries.truncate(MAX_SAVED);
        self.persist(store);
        true
    }

    /// Remove the entry with the given id, if present, and rewrite the
    /// document.
    pub fn remove(&mut self, store: &mut impl PaletteStore, id: &str) {
        self.entries.retain(|entry| entry.id != id);
        self.persist(store);
    }

    fn persist(&self, store: &mut impl PaletteStore) {
        // Serialization of these plain fields cannot fail.
        let json = serde_json::to_string(&self.entries).unwrap_or_default();
        store.set(STORAGE_KEY, &json);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn blue() -> Rgba {
        Rgba::opaque(30, 136, 229)
    }

    #[test]
    fn test_save_and_reload() {
        let mut store = MemoryStore::new();
        let mut palette = Palette::new();
        assert!(palette.save(&mut store, "#1e88e5", blue(), 1_000));

        let reloaded = Palette::load(&store);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.entries()[0].hex, "#1e88e5");
        assert_eq!(reloaded.entries()[0].id, "1000");
        assert_eq!(reloaded.entries()[0].rgb, blue());
    }

    #[test]
    fn test_dedup_by_hex_and_alpha() {
        let mut store = MemoryStore::new();
        let mut palette = Palette::new();
        assert!(palette.save(&mut store, "#1e88e5", blue(), 1));
        assert!(!palette.save(&mut store, "#1e88e5", blue(), 2));
        assert_eq!(palette.len(), 1);

        // Same hex, different alpha: not a duplicate.
        let translucent = Rgba::new(30, 136, 229, 0.5);
        assert!(palette.save(&mut store, "#1e88e5", translucent, 3));
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn test_newest_first_and_cap() {
        let mut store = MemoryStore::new();
        let mut palette = Palette::new();
        for i in 0..21 {
            let rgb = Rgba::opaque(i as u8, 0, 0);
            assert!(palette.save(&mut store, &format!("#{i:02x}0000"), rgb, i));
        }
        assert_eq!(palette.len(), MAX_SAVED);
        // Newest first; the first-saved entry (i = 0) was evicted.
        assert_eq!(palette.entries()[0].timestamp, 20);
        assert_eq!(palette.entries()[MAX_SAVED - 1].timestamp, 1);
    }

    #[test]
    fn test_remove_by_id() {
        let mut store = MemoryStore::new();
        let mut palette = Palette::new();
        palette.save(&mut store, "#ff0000", Rgba::opaque(255, 0, 0), 1);
        palette.save(&mut store, "#00ff00", Rgba::opaque(0, 255, 0), 2);
        palette.remove(&mut store, "1");
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.entries()[0].hex, "#00ff00");

        // The store was rewritten in full.
        let reloaded = Palette::load(&store);
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut store = MemoryStore::new();
        let mut palette = Palette::new();
        palette.save(&mut store, "#ff0000", Rgba::opaque(255, 0, 0), 1);
        palette.remove(&mut store, "does-not-exist");
        assert_eq!(palette.len(), 1);
    }

    #[test]
    fn test_load_malformed_json_yields_empty() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "not json");
        assert!(Palette::load(&store).is_empty());
    }

    #[test]
    fn test_persisted_layout() {
        let mut store = MemoryStore::new();
        let mut palette = Palette::new();
        palette.save(&mut store, "#1e88e580", Rgba::new(30, 136, 229, 0.5), 42);
        let json = store.get(STORAGE_KEY).unwrap();
        assert_eq!(
            json,
            r##"[{"id":"42","hex":"#1e88e580","rgb":{"r":30,"g":136,"b":229,"a":0.5},"timestamp":42}]"##
        );
    }
}
