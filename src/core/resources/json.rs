//=========================================================================
// JSON Loading
//=========================================================================
//
// File → serde_json document helpers shared by the stock loaders.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

//=== Internal Dependencies ===============================================

use crate::error::LoadError;

//=== Functions ===========================================================

/// Loads `path` as a JSON document whose top level must be an object.
pub fn load_json(path: impl AsRef<Path>) -> Result<Value, LoadError> {
    let path = path.as_ref();
    let document: Value = load_json_as(path)?;

    if !document.is_object() {
        return Err(LoadError::malformed(path, "top-level value is not an object"));
    }

    Ok(document)
}

/// Loads `path` and deserializes it straight into `T`.
pub fn load_json_as<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, LoadError> {
    let path = path.as_ref();

    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

//=========================================================================
// Unit Tests
//=========================================================================
