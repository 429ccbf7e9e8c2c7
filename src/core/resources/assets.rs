//=========================================================================
// Asset Types
//=========================================================================
//
// Data-only asset types held by the resource caches, plus their loaders.
//
//   Font       raw font file bytes (rasterisation is the renderer's job)
//   Skeleton   bone hierarchy + bind pose          (*.gpskel)
//   Animation  per-bone keyframe tracks            (*.gpanim)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use super::json::load_json_as;
use super::ResourceLoader;
use crate::error::LoadError;

//=========================================================================
// Font
//=========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub path: PathBuf,
    pub data: Vec<u8>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FontLoader;

impl ResourceLoader<Font> for FontLoader {
    fn load(&mut self, path: &Path) -> Result<Font, LoadError> {
        let data = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if data.is_empty() {
            return Err(LoadError::malformed(path, "font file is empty"));
        }

        Ok(Font {
            path: path.to_path_buf(),
            data,
        })
    }
}

//=========================================================================
// Skeleton
//=========================================================================

/// Rotation (x, y, z, w) and translation of a bone.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoneTransform {
    pub rot: [f32; 4],
    pub trans: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bone {
    pub name: String,
    /// Index of the parent bone, `-1` for the root.
    pub parent: i32,
    pub bindpose: BoneTransform,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Skeleton {
    pub bones: Vec<Bone>,
}

impl Skeleton {
    /// Parents must precede their children.
    pub fn validate(&self, path: &Path) -> Result<(), LoadError> {
        if self.bones.is_empty() {
            return Err(LoadError::malformed(path, "skeleton has no bones"));
        }

        for (index, bone) in self.bones.iter().enumerate() {
            if bone.parent >= index as i32 || bone.parent < -1 {
                return Err(LoadError::malformed(
                    path,
                    format!("bone {} ({}) has invalid parent {}", index, bone.name, bone.parent),
                ));
            }
        }
        Ok(())
    }
}

//=========================================================================
// Animation
//=========================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnimationTrack {
    pub bone: usize,
    pub transforms: Vec<BoneTransform>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "AnimationDocument")]
pub struct Animation {
    pub frame_count: u32,
    /// Seconds.
    pub duration: f32,
    pub bone_count: u32,
    pub tracks: Vec<AnimationTrack>,
}

impl Animation {
    /// Every track must address a bone and carry one transform per frame.
    pub fn validate(&self, path: &Path) -> Result<(), LoadError> {
        if self.frame_count == 0 || self.duration <= 0.0 {
            return Err(LoadError::malformed(path, "animation has no frames"));
        }

        for track in &self.tracks {
            if track.bone >= self.bone_count as usize {
                return Err(LoadError::malformed(
                    path,
                    format!("track addresses bone {} of {}", track.bone, self.bone_count),
                ));
            }
            if track.transforms.len() != self.frame_count as usize {
                return Err(LoadError::malformed(
                    path,
                    format!(
                        "track for bone {} has {} transforms, expected {}",
                        track.bone,
                        track.transforms.len(),
                        self.frame_count
                    ),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct AnimationDocument {
    sequence: SequenceDocument,
}

#[derive(Deserialize)]
struct SequenceDocument {
    frames: u32,
    length: f32,
    bonecount: u32,
    #[serde(default)]
    tracks: Vec<AnimationTrack>,
}

impl From<AnimationDocument> for Animation {
    fn from(doc: AnimationDocument) -> Self {
        Self {
            frame_count: doc.sequence.frames,
            duration: doc.sequence.length,
            bone_count: doc.sequence.bonecount,
            tracks: doc.sequence.tracks,
        }
    }
}

//=========================================================================
// JsonLoader
//=========================================================================

type Validator<T> = fn(&T, &Path) -> Result<(), LoadError>;

/// Deserializes `T` from a JSON file, then runs an optional validator.
pub struct JsonLoader<T> {
    validator: Option<Validator<T>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonLoader<T> {
    pub fn new() -> Self {
        Self {
            validator: None,
            _marker: PhantomData,
        }
    }

    pub fn with_validator(mut self, validator: Validator<T>) -> Self {
        self.validator = Some(validator);
        self
    }
}

impl<T> Default for JsonLoader<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> ResourceLoader<T> for JsonLoader<T> {
    fn load(&mut self, path: &Path) -> Result<T, LoadError> {
        let value: T = load_json_as(path)?;
        if let Some(validate) = self.validator {
            validate(&value, path)?;
        }
        Ok(value)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
