use std::collections::BTreeSet;
use std::sync::Arc;

use crate::models::{BoatType, PreferenceSet};
use crate::services::kv::{KeyValueStore, KvError};

/// Namespace used when none is configured
pub const DEFAULT_NAMESPACE: &str = "yachtmob";

/// Key builder for persisted preference fields
pub struct PreferenceKey;

impl PreferenceKey {
    pub fn location(namespace: &str) -> String {
        format!("{}_userLocation", namespace)
    }

    pub fn boat_types(namespace: &str) -> String {
        format!("{}_boatPreferences", namespace)
    }

    pub fn min_length(namespace: &str) -> String {
        format!("{}_minLengthFt", namespace)
    }

    pub fn max_length(namespace: &str) -> String {
        format!("{}_maxLengthFt", namespace)
    }
}

/// Reads and writes one browser's preference set over a key-value store
///
/// Each field lives under its own key. Loading never fails: absent or
/// malformed values fall back to the field's default.
#[derive(Clone)]
pub struct PreferenceStore {
    store: Arc<dyn KeyValueStore>,
    namespace: String,
}

impl PreferenceStore {
    pub fn new(store: Arc<dyn KeyValueStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    pub fn with_default_namespace(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, DEFAULT_NAMESPACE)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn load(&self) -> PreferenceSet {
        let location = self
            .read(&PreferenceKey::location(&self.namespace))
            .map(|loc| loc.trim().to_string())
            .filter(|loc| !loc.is_empty());

        let boat_types = self
            .read(&PreferenceKey::boat_types(&self.namespace))
            .map(|raw| parse_boat_types(&raw))
            .unwrap_or_default();

        let min_length_ft = self
            .read(&PreferenceKey::min_length(&self.namespace))
            .and_then(|raw| parse_length(&raw, "minimum"));

        let max_length_ft = self
            .read(&PreferenceKey::max_length(&self.namespace))
            .and_then(|raw| parse_length(&raw, "maximum"));

        PreferenceSet {
            location,
            boat_types,
            min_length_ft,
            max_length_ft,
        }
    }

    /// Overwrite the stored set wholesale
    ///
    /// A blank location and absent bounds remove their keys rather than
    /// storing empty values.
    pub fn save(&self, preferences: &PreferenceSet) -> Result<(), KvError> {
        let location_key = PreferenceKey::location(&self.namespace);
        match preferences.normalized_location() {
            Some(location) => self.store.set(&location_key, location)?,
            None => self.store.remove(&location_key)?,
        }

        let names: Vec<&str> = preferences.boat_types.iter().map(BoatType::as_str).collect();
        self.store.set(
            &PreferenceKey::boat_types(&self.namespace),
            &serde_json::to_string(&names)?,
        )?;

        self.write_length(&PreferenceKey::min_length(&self.namespace), preferences.min_length_ft)?;
        self.write_length(&PreferenceKey::max_length(&self.namespace), preferences.max_length_ft)?;

        tracing::debug!("Saved preferences for namespace {}", self.namespace);
        Ok(())
    }

    /// Remove every key in this namespace
    pub fn clear(&self) -> Result<(), KvError> {
        self.store.remove(&PreferenceKey::location(&self.namespace))?;
        self.store.remove(&PreferenceKey::boat_types(&self.namespace))?;
        self.store.remove(&PreferenceKey::min_length(&self.namespace))?;
        self.store.remove(&PreferenceKey::max_length(&self.namespace))
    }

    fn write_length(&self, key: &str, value: Option<f64>) -> Result<(), KvError> {
        match value {
            Some(length) => self.store.set(key, &length.to_string()),
            None => self.store.remove(key),
        }
    }

    /// Absent values and backend failures both read as "not set"
    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read preference key {}: {}", key, e);
                None
            }
        }
    }
}

/// Decode the JSON array of boat type names
///
/// Not an array of strings at all: the whole field defaults. Unknown names
/// are dropped one by one.
fn parse_boat_types(raw: &str) -> BTreeSet<BoatType> {
    let names: Vec<String> = match serde_json::from_str(raw) {
        Ok(names) => names,
        Err(e) => {
            tracing::warn!("Failed to parse boat preferences {:?}: {}", raw, e);
            return BTreeSet::new();
        }
    };

    names
        .iter()
        .filter_map(|name| match name.parse::<BoatType>() {
            Ok(boat_type) => Some(boat_type),
            Err(e) => {
                tracing::warn!("Dropping stored boat preference: {}", e);
                None
            }
        })
        .collect()
}

fn parse_length(raw: &str, bound: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(length) if length.is_finite() && length >= 0.0 => Some(length),
        Ok(length) => {
            tracing::warn!("Ignoring out-of-range {} length {}", bound, length);
            None
        }
        Err(e) => {
            tracing::warn!("Failed to parse {} length {:?}: {}", bound, raw, e);
            None
        }
    }
}
