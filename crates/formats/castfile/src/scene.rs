use serde::{Deserialize, Serialize};

use crate::animation::{AnimationDictionaryEntry, AnimationFrameRecord, SceneAnimationRecord};
use crate::cast::CastGroupRecord;
use crate::types::{OpaqueBlock, Vec2};

/// A deduplicated rectangular region of a texture, in normalized 0..1
/// coordinates. The on-disk unit sprites compile down to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubImage {
    /// Index into the container's texture list.
    pub texture_index: u32,
    pub top_left: Vec2,
    pub bottom_right: Vec2,
}

/// Name dictionary entry for a cast, keyed by (group, cast) storage indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastDictionaryEntry {
    pub name: String,
    pub group_index: u32,
    pub cast_index: u32,
}

/// Name dictionary entry for a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneDictionaryEntry {
    pub name: String,
    /// Storage index into the node's scene list.
    pub index: u32,
}

/// A scene record: scalar parameters plus every per-scene table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneRecord {
    pub unk00: u32,
    pub z_index: u32,
    pub unk0c: u32,
    pub unk10: u32,
    pub aspect_ratio: f32,
    pub frame_rate: f32,
    /// Per-texture normalized size table, parallel to the texture list.
    pub texture_sizes: Vec<Vec2>,
    /// Shared sub-image table. By format convention only the first scene's
    /// table is consulted for sprite extraction; every scene stores a copy.
    pub sub_images: Vec<SubImage>,
    pub groups: Vec<CastGroupRecord>,
    /// Stored pre-sorted by name (ordinal).
    pub cast_dictionary: Vec<CastDictionaryEntry>,
    /// Stored pre-sorted by name (ordinal); `index` keys the lists below.
    pub animation_dictionary: Vec<AnimationDictionaryEntry>,
    /// Parallel to `animations` in storage order.
    pub animation_frames: Vec<AnimationFrameRecord>,
    pub animations: Vec<SceneAnimationRecord>,
    /// Secondary animation data list. Not modeled; preserved verbatim.
    pub animation_extra: Vec<OpaqueBlock>,
}

/// A node of the container's scene tree: scenes plus the scene name
/// dictionary, and optional sub-nodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeSection {
    pub scenes: Vec<SceneRecord>,
    /// Stored pre-sorted by name (ordinal); load must go through `index`.
    pub dictionary: Vec<SceneDictionaryEntry>,
    /// Sub-node hierarchies below the top level.
    pub children: Vec<NodeSection>,
}
