use std::collections::btree_map;
use std::collections::BTreeMap;

use castfile::scene::SubImage;
use castfile::Vec2;
use serde::{Deserialize, Serialize};

use crate::project::texture::Texture;

/// Project-unique sprite identifier. Casts and font mappings reference
/// sprites weakly through this id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SpriteId(pub u32);

/// A rectangular region of one texture, in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// Index of the owning texture in the project texture list.
    pub texture: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    /// Convert a container sub-image (normalized 0..1) into pixel space.
    pub fn from_sub_image(sub: &SubImage, texture: &Texture) -> Self {
        let tw = texture.width as f32;
        let th = texture.height as f32;
        Self {
            texture: sub.texture_index as usize,
            x: sub.top_left.x * tw,
            y: sub.top_left.y * th,
            width: (sub.bottom_right.x - sub.top_left.x) * tw,
            height: (sub.bottom_right.y - sub.top_left.y) * th,
        }
    }

    /// Convert back to a normalized sub-image. Exact inverse of
    /// [`Sprite::from_sub_image`] given the same texture dimensions.
    pub fn to_sub_image(&self, texture: &Texture) -> SubImage {
        let tw = texture.width as f32;
        let th = texture.height as f32;
        SubImage {
            texture_index: self.texture as u32,
            top_left: Vec2::new(self.x / tw, self.y / th),
            bottom_right: Vec2::new((self.x + self.width) / tw, (self.y + self.height) / th),
        }
    }
}

/// Id-keyed sprite set. Iteration order is ascending id, which is also the
/// order sprites were created in — the resolver depends on this being
/// deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpritePool {
    entries: BTreeMap<SpriteId, Sprite>,
    next_id: u32,
}

impl SpritePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sprite, assigning a fresh project-unique id.
    pub fn insert(&mut self, sprite: Sprite) -> SpriteId {
        let id = SpriteId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, sprite);
        id
    }

    /// Weak lookup: `None` is a valid result, not an error.
    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.entries.get_mut(&id)
    }

    pub fn remove(&mut self, id: SpriteId) -> Option<Sprite> {
        self.entries.remove(&id)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, SpriteId, Sprite> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
