//=========================================================================
// Resources
//=========================================================================
//
// Session-lifetime asset caches and the active localisation.
//
// Components:
// - `cache`: generic `ResourceCache<T>` + `ResourceLoader<T>`
// - `json`: file → JSON document helpers
// - `text`: localized text tables
// - `assets`: font/skeleton/animation types and their loaders
//
// All caches are filled lazily and emptied together by `Resources::clear`
// during shutdown.
//
//=========================================================================

//=== Module Declarations =================================================

mod assets;
mod cache;
mod json;
mod text;

//=== Public API ==========================================================

pub use assets::{
    Animation, AnimationTrack, Bone, BoneTransform, Font, FontLoader, JsonLoader, Skeleton,
};
pub use cache::{ResourceCache, ResourceLoader};
pub use json::{load_json, load_json_as};
pub use text::{TextLoader, TextResource, KEY_NOT_FOUND};

//=== External Dependencies ===============================================

use std::path::Path;
use std::sync::Arc;

use log::info;

//=== Internal Dependencies ===============================================

use crate::error::LoadError;

//=== Resources ===========================================================

/// Every resource cache owned by the scheduler.
pub struct Resources {
    pub fonts: ResourceCache<Font>,
    pub skeletons: ResourceCache<Skeleton>,
    pub animations: ResourceCache<Animation>,
    pub texts: ResourceCache<TextResource>,
    active_text: Option<Arc<TextResource>>,
}

impl Resources {
    /// Creates empty caches wired to the stock loaders.
    pub fn new() -> Self {
        Self {
            fonts: ResourceCache::new("font", FontLoader),
            skeletons: ResourceCache::new(
                "skeleton",
                JsonLoader::<Skeleton>::new().with_validator(Skeleton::validate),
            ),
            animations: ResourceCache::new(
                "animation",
                JsonLoader::<Animation>::new().with_validator(Animation::validate),
            ),
            texts: ResourceCache::new("text", TextLoader),
            active_text: None,
        }
    }

    //--- Typed accessors -------------------------------------------------
    // Failures are already logged by the cache; callers only see absence.

    pub fn font(&mut self, path: impl AsRef<Path>) -> Option<Arc<Font>> {
        self.fonts.get_or_load(path).ok()
    }

    pub fn skeleton(&mut self, path: impl AsRef<Path>) -> Option<Arc<Skeleton>> {
        self.skeletons.get_or_load(path).ok()
    }

    pub fn animation(&mut self, path: impl AsRef<Path>) -> Option<Arc<Animation>> {
        self.animations.get_or_load(path).ok()
    }

    //--- Localisation ----------------------------------------------------

    /// Switches the active language to the table at `path`.
    ///
    /// The previous table is dropped first; on failure no language is
    /// active and every lookup yields [`KEY_NOT_FOUND`].
    pub fn load_text(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        self.active_text = None;

        let table = self.texts.get_or_load(path)?;
        info!("Loaded {} text entries from {}", table.len(), path.display());
        self.active_text = Some(table);
        Ok(())
    }

    /// Looks `key` up in the active language.
    pub fn text(&self, key: &str) -> &str {
        match &self.active_text {
            Some(table) => table.get(key),
            None => KEY_NOT_FOUND,
        }
    }

    pub fn has_active_text(&self) -> bool {
        self.active_text.is_some()
    }

    //--- Teardown --------------------------------------------------------

    /// Empties every cache and forgets the active language.
    pub fn clear(&mut self) {
        self.active_text = None;
        self.fonts.clear();
        self.skeletons.clear();
        self.animations.clear();
        self.texts.clear();
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn language(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn text_lookup_follows_active_language() {
        let dir = tempfile::tempdir().unwrap();
        let english = language(&dir, "English.gptext", r#"{ "TextMap": { "PauseTitle": "PAUSED" } }"#);
        let russian = language(&dir, "Russian.gptext", r#"{ "TextMap": { "PauseTitle": "ПАУЗА" } }"#);

        let mut resources = Resources::new();
        assert_eq!(resources.text("PauseTitle"), KEY_NOT_FOUND);

        resources.load_text(&english).unwrap();
        assert_eq!(resources.text("PauseTitle"), "PAUSED");

        resources.load_text(&russian).unwrap();
        assert_eq!(resources.text("PauseTitle"), "ПАУЗА");
        assert_eq!(resources.texts.len(), 2);
    }

    #[test]
    fn failed_language_switch_leaves_no_active_table() {
        let dir = tempfile::tempdir().unwrap();
        let english = language(&dir, "English.gptext", r#"{ "TextMap": { "OKButton": "OK" } }"#);
        let broken = language(&dir, "Broken.gptext", r#"{ "Other": 1 }"#);

        let mut resources = Resources::new();
        resources.load_text(&english).unwrap();
        assert!(resources.load_text(&broken).is_err());

        assert!(!resources.has_active_text());
        assert_eq!(resources.text("OKButton"), KEY_NOT_FOUND);
        assert!(!resources.texts.contains(&broken));
    }

    #[test]
    fn missing_asset_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut resources = Resources::new();

        assert!(resources.skeleton(dir.path().join("Nope.gpskel")).is_none());
        assert!(resources.font(dir.path().join("Nope.ttf")).is_none());
        assert!(resources.skeletons.is_empty());
    }

    #[test]
    fn clear_empties_everything() {
        let dir = tempfile::tempdir().unwrap();
        let english = language(&dir, "English.gptext", r#"{ "TextMap": {} }"#);

        let mut resources = Resources::new();
        resources.load_text(&english).unwrap();
        resources.clear();

        assert!(resources.texts.is_empty());
        assert!(!resources.has_active_text());
    }
}
