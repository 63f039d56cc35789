use serde::{Deserialize, Serialize};

use crate::font::FontSection;
use crate::scene::NodeSection;
use crate::texture::TextureRecord;

/// Typed contents of one project resource container.
///
/// Produced and consumed by the external section-level reader/writer; the
/// editor core rewrites the sections it models and leaves the rest alone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Container {
    pub textures: Vec<TextureRecord>,
    pub fonts: FontSection,
    /// Top-level node of the scene tree.
    pub root: NodeSection,
}

impl Container {
    /// Total cast count across every scene of the top-level node.
    pub fn cast_count(&self) -> usize {
        self.root
            .scenes
            .iter()
            .flat_map(|s| s.groups.iter())
            .map(|g| g.casts.len())
            .sum()
    }
}
