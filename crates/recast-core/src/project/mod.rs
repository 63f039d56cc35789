pub mod animation;
pub mod cast;
pub mod font;
pub mod scene;
pub mod sprite;
pub mod texture;

pub use animation::{AnimationGroup, CastTimeline, Channel, GroupTimeline, Keyframe, Track};
pub use cast::{Cast, CastExtra, CastGroup, CastKind};
pub use font::{CharacterMapping, Font, FontId, FontPool};
pub use scene::{Scene, SceneExtra};
pub use sprite::{Sprite, SpriteId, SpritePool};
pub use texture::{Texture, TextureList};

use serde::{Deserialize, Serialize};

/// The editable in-memory project: everything the presentation layer works
/// on and everything Save derives container records from.
///
/// An explicit value, not ambient state — multiple independent projects can
/// coexist and each Load/Save call names the one it operates on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    pub textures: TextureList,
    pub sprites: SpritePool,
    pub fonts: FontPool,
    pub scenes: Vec<Scene>,
}

impl Project {
    pub fn new() -> Self {
        Self {
            textures: TextureList::new("textures"),
            sprites: SpritePool::new(),
            fonts: FontPool::new(),
            scenes: Vec::new(),
        }
    }

    /// Create a sprite on a texture and register it with both the pool and
    /// the texture's sprite list.
    pub fn create_sprite(&mut self, texture: usize, x: f32, y: f32, width: f32, height: f32) -> Option<SpriteId> {
        if texture >= self.textures.len() {
            return None;
        }
        let id = self.sprites.insert(Sprite {
            texture,
            x,
            y,
            width,
            height,
        });
        self.textures.textures[texture].sprites.push(id);
        Some(id)
    }
}
