//=========================================================================
// Resource Cache
//=========================================================================
//
// Keyed load-or-fetch store.
//
//   get_or_load(key)
//     ├─ hit  → Arc<T> from the map (loader untouched)
//     └─ miss → loader.load(key)
//                 ├─ Ok  → insert, return Arc<T>
//                 └─ Err → log, return Err (nothing inserted)
//
// Entries live until `clear()`; there is no eviction during a session.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::error::LoadError;

//=== ResourceLoader ======================================================

/// Produces a resource from its source path.
///
/// Implemented for any `FnMut(&Path) -> Result<T, LoadError>` closure, so
/// a cache can be pointed at an ad-hoc loader without a new type.
pub trait ResourceLoader<T>: Send {
    fn load(&mut self, path: &Path) -> Result<T, LoadError>;
}

impl<T, F> ResourceLoader<T> for F
where
    F: FnMut(&Path) -> Result<T, LoadError> + Send,
{
    fn load(&mut self, path: &Path) -> Result<T, LoadError> {
        self(path)
    }
}

//=== ResourceCache =======================================================

/// Lazily populated cache of shared resources keyed by source path.
pub struct ResourceCache<T> {
    kind: &'static str,
    entries: HashMap<PathBuf, Arc<T>>,
    loader: Box<dyn ResourceLoader<T>>,
}

impl<T: 'static> ResourceCache<T> {
    /// Creates an empty cache. `kind` names the resource type in logs.
    pub fn new<L>(kind: &'static str, loader: L) -> Self
    where
        L: ResourceLoader<T> + 'static,
    {
        Self {
            kind,
            entries: HashMap::new(),
            loader: Box::new(loader),
        }
    }

    /// Returns the cached resource for `key`, loading it on first request.
    ///
    /// A failed load is not remembered: the next call with the same key
    /// invokes the loader again.
    pub fn get_or_load(&mut self, key: impl AsRef<Path>) -> Result<Arc<T>, LoadError> {
        let key = key.as_ref();

        if let Some(entry) = self.entries.get(key) {
            return Ok(Arc::clone(entry));
        }

        match self.loader.load(key) {
            Ok(resource) => {
                debug!("Loaded {} {}", self.kind, key.display());
                let resource = Arc::new(resource);
                self.entries.insert(key.to_path_buf(), Arc::clone(&resource));
                Ok(resource)
            }
            Err(err) => {
                warn!("Failed to load {} {}: {}", self.kind, key.display(), err);
                Err(err)
            }
        }
    }

    /// Returns the cached resource without loading.
    pub fn get(&self, key: impl AsRef<Path>) -> Option<Arc<T>> {
        self.entries.get(key.as_ref()).cloned()
    }

    pub fn contains(&self, key: impl AsRef<Path>) -> bool {
        self.entries.contains_key(key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces the loader. Already cached entries are kept.
    pub fn set_loader<L>(&mut self, loader: L)
    where
        L: ResourceLoader<T> + 'static,
    {
        self.loader = Box::new(loader);
    }

    /// Drops every entry. Handles still held elsewhere stay valid.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            debug!("Releasing {} cached {} resource(s)", self.entries.len(), self.kind);
        }
        self.entries.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
