//! Per-frame cache of rasterized labels.
//!
//! Labels are keyed by (text, color, font size). A label used during a frame survives into the
//! next one; labels not used during a frame are evicted by [`LabelCache::end_frame`]. Static
//! button labels therefore stay shaped for the whole run, while the score label keeps exactly
//! one live entry as its text changes.

use std::collections::HashMap;
use std::hash::Hash;

/// Identity of a rasterized label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelKey {
    /// Label text.
    pub text: String,
    /// sRGB text color.
    pub color: [u8; 3],
    /// Font size as raw `f32` bits, so the key is hashable.
    pub size_bits: u32,
}

impl LabelKey {
    /// Builds a key for `text` drawn in `color` at `font_size`.
    pub fn new(text: &str, color: [u8; 3], font_size: f32) -> Self {
        Self {
            text: text.to_string(),
            color,
            size_bits: font_size.to_bits(),
        }
    }
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    used: bool,
}

/// Map from key to cached value with use-based eviction.
#[derive(Debug)]
pub struct LabelCache<K, V> {
    entries: HashMap<K, Entry<V>>,
}

impl<K: Eq + Hash, V> Default for LabelCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> LabelCache<K, V> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, creating it with `create` on a miss.
    ///
    /// A failed `create` leaves the cache unchanged, so the next frame retries.
    pub fn get_or_try_insert_with<E, F>(&mut self, key: K, create: F) -> Result<&V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let entry = match self.entries.entry(key) {
            std::collections::hash_map::Entry::Occupied(occupied) => occupied.into_mut(),
            std::collections::hash_map::Entry::Vacant(vacant) => vacant.insert(Entry {
                value: create()?,
                used: false,
            }),
        };
        entry.used = true;
        Ok(&entry.value)
    }

    /// Looks up a value without marking it used.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Drops every entry not used since the previous call and returns how many were dropped.
    pub fn end_frame(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.used);
        for entry in self.entries.values_mut() {
            entry.used = false;
        }
        before - self.entries.len()
    }

    /// Number of cached entries.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds nothing.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
