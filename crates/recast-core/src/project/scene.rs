use castfile::Vec2;
use serde::{Deserialize, Serialize};

use crate::project::animation::AnimationGroup;
use crate::project::cast::CastGroup;

/// Scene fields the editor does not interpret, carried for round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SceneExtra {
    pub unk00: u32,
    pub unk0c: u32,
    pub unk10: u32,
}

/// A named container of cast groups and animation groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub z_index: u32,
    pub aspect_ratio: f32,
    pub frame_rate: f32,
    /// Per-texture normalized size table, parallel to the project texture
    /// list. Entries missing for newly added textures are derived at save
    /// time from the design resolution.
    pub texture_sizes: Vec<Vec2>,
    pub extra: SceneExtra,
    pub groups: Vec<CastGroup>,
    pub animations: Vec<AnimationGroup>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            z_index: 0,
            aspect_ratio: 16.0 / 9.0,
            frame_rate: 60.0,
            texture_sizes: Vec::new(),
            extra: SceneExtra::default(),
            groups: Vec::new(),
            animations: Vec::new(),
        }
    }
}
