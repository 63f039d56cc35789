use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::project::sprite::SpriteId;

/// Project-unique font identifier. Text casts reference fonts weakly
/// through this id; the container stores fonts by name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FontId(pub u32);

/// One character → sprite mapping of a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterMapping {
    /// Source character code, kept as stored for exact round-trip.
    pub character: u32,
    /// Weak sprite reference; `None` when unresolved.
    pub sprite: Option<SpriteId>,
}

/// A font: name plus an ordered character mapping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub name: String,
    pub mappings: Vec<CharacterMapping>,
}

impl Font {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mappings: Vec::new(),
        }
    }
}

/// Id-keyed font set with ascending-id iteration order, which is also the
/// container storage order fonts are written back in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FontPool {
    entries: BTreeMap<FontId, Font>,
    next_id: u32,
}

impl FontPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, font: Font) -> FontId {
        let id = FontId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, font);
        id
    }

    /// Weak lookup: `None` is a valid result, not an error.
    pub fn get(&self, id: FontId) -> Option<&Font> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: FontId) -> Option<&mut Font> {
        self.entries.get_mut(&id)
    }

    /// Reverse lookup by name. First match in id order wins.
    pub fn find_by_name(&self, name: &str) -> Option<FontId> {
        self.entries
            .iter()
            .find(|(_, font)| font.name == name)
            .map(|(id, _)| *id)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, FontId, Font> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
