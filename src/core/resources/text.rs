//=========================================================================
// Localized Text
//=========================================================================
//
// Key → display string table loaded from a language file:
//
// ```json
// { "TextMap": { "PauseTitle": "PAUSED", "ResumeButton": "Resume" } }
// ```
//
// Non-string values inside "TextMap" are skipped. Missing keys resolve to
// `KEY_NOT_FOUND` rather than failing.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::path::Path;

use log::warn;
use serde_json::Value;

//=== Internal Dependencies ===============================================

use super::json::load_json;
use super::ResourceLoader;
use crate::error::LoadError;

//=== Constants ===========================================================

/// Returned for keys absent from the active text table.
pub const KEY_NOT_FOUND: &str = "**KEY NOT FOUND**";

const TEXT_MAP_FIELD: &str = "TextMap";

//=== TextResource ========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextResource {
    entries: HashMap<String, String>,
}

impl TextResource {
    /// Builds a table from an already-parsed language document.
    pub fn from_document(path: &Path, document: &Value) -> Result<Self, LoadError> {
        let map = document
            .get(TEXT_MAP_FIELD)
            .and_then(Value::as_object)
            .ok_or_else(|| LoadError::malformed(path, "missing \"TextMap\" object"))?;

        let mut entries = HashMap::with_capacity(map.len());
        for (key, value) in map {
            match value.as_str() {
                Some(text) => {
                    entries.insert(key.clone(), text.to_owned());
                }
                None => warn!("{}: skipping non-string text entry {:?}", path.display(), key),
            }
        }

        Ok(Self { entries })
    }

    /// Returns the display string for `key`, or [`KEY_NOT_FOUND`].
    pub fn get(&self, key: &str) -> &str {
        self.entries.get(key).map(String::as_str).unwrap_or(KEY_NOT_FOUND)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//=== TextLoader ==========================================================

/// Loads language files into [`TextResource`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextLoader;

impl ResourceLoader<TextResource> for TextLoader {
    fn load(&mut self, path: &Path) -> Result<TextResource, LoadError> {
        let document = load_json(path)?;
        TextResource::from_document(path, &document)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
