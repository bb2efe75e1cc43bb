//! Flat key-value preference file
//!
//! Theme properties persist as a single TOML table of primitive values.
//! A batch of writes lands atomically: the whole table is rewritten to a
//! temporary file in the same directory and renamed over the target.

use crate::error::Result;
use crate::keys::ThemeKey;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default preference file name
pub const PREFS_FILE_NAME: &str = "tinct-prefs.toml";

/// A primitive preference value
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
}

/// The persisted preference table
pub struct PrefFile {
    path: PathBuf,
    values: FxHashMap<ThemeKey, PrefValue>,
}

impl PrefFile {
    /// Load the preference file at `path`; a missing file is an empty store.
    ///
    /// Entries with unrecognized key names are ignored so newer files stay
    /// readable by older builds.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut values = FxHashMap::default();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let raw: BTreeMap<String, PrefValue> = toml::from_str(&content)?;
            for (name, value) in raw {
                match ThemeKey::from_name(&name) {
                    Some(key) => {
                        values.insert(key, value);
                    }
                    None => {
                        tracing::debug!(key = %name, "ignoring unknown preference key");
                    }
                }
            }
        }
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: ThemeKey) -> Option<PrefValue> {
        self.values.get(&key).copied()
    }

    /// Apply a batch of writes and persist.
    ///
    /// Returns the keys whose stored value actually changed; unchanged
    /// writes neither dirty the file nor count as changes.
    pub fn commit(&mut self, writes: &[(ThemeKey, PrefValue)]) -> Result<SmallVec<[ThemeKey; 4]>> {
        let mut changed: SmallVec<[ThemeKey; 4]> = SmallVec::new();
        for (key, value) in writes {
            if self.values.get(key) != Some(value) {
                self.values.insert(*key, *value);
                changed.push(*key);
            }
        }
        if !changed.is_empty() {
            self.save()?;
            tracing::debug!(?changed, path = %self.path.display(), "preferences committed");
        }
        Ok(changed)
    }

    fn save(&self) -> Result<()> {
        // BTreeMap keeps the file diff-stable across saves
        let table: BTreeMap<&'static str, PrefValue> = self
            .values
            .iter()
            .map(|(key, value)| (key.name(), *value))
            .collect();
        let content = toml::to_string_pretty(&table)?;

        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
