use serde::{Deserialize, Serialize};

use crate::project::sprite::SpriteId;

/// A texture known to the project.
///
/// `name` is the file stem without extension; the container stores the full
/// file name and the save path re-appends the format's fixed `.dds`
/// extension. Dimensions come from the decoded image; a texture whose file
/// was missing at load time keeps `0×0` so container indices stay aligned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Texture {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Sprites carved out of this texture.
    pub sprites: Vec<SpriteId>,
}

impl Texture {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            sprites: Vec::new(),
        }
    }

    /// Whether the backing image was decoded. A `0×0` texture cannot host
    /// sprites (no dimensions to denormalize against).
    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// The project-wide ordered texture list. Order mirrors the container's
/// texture section exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextureList {
    pub name: String,
    pub textures: Vec<Texture>,
}

impl TextureList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            textures: Vec::new(),
        }
    }

    pub fn push(&mut self, texture: Texture) -> usize {
        self.textures.push(texture);
        self.textures.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Texture> {
        self.textures.get(index)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
