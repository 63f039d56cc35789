//! Cross-reference resolution between the editable model and the
//! container's index-based encoding: sprite ↔ sub-image, font ↔ name,
//! cast ↔ dictionary entry, plus the canonical dictionary sort order.

use std::collections::HashMap;

use castfile::scene::{CastDictionaryEntry, SubImage};
use castfile::NO_REFERENCE;

use crate::error::{Error, Result};
use crate::project::{FontId, FontPool, SpriteId, SpritePool, TextureList};

/// Save-direction sub-image table: one entry per pool sprite, assigned in
/// pool iteration order.
///
/// Deduplication is by sprite *identity*, never geometry — two sprites with
/// identical rectangles get two distinct entries. The runtime is known to
/// accept this; whether it would accept geometric merging is unverified, so
/// the historical behavior is kept.
#[derive(Debug, Default)]
pub struct SubImageTable {
    entries: Vec<SubImage>,
    index_by_sprite: HashMap<SpriteId, u32>,
}

impl SubImageTable {
    /// Build the table from the current sprite pool. Deterministic: the
    /// same pool state always produces the same index assignment.
    pub fn build(sprites: &SpritePool, textures: &TextureList) -> Result<Self> {
        let mut table = SubImageTable::default();
        for (&id, sprite) in sprites.iter() {
            let texture = textures
                .get(sprite.texture)
                .ok_or(Error::UnresolvedReference {
                    kind: "texture",
                    id: sprite.texture as u32,
                })?;
            let index = table.entries.len() as u32;
            table.entries.push(sprite.to_sub_image(texture));
            table.index_by_sprite.insert(id, index);
        }
        Ok(table)
    }

    /// Sub-image index for a live sprite reference. Failing here means the
    /// table was built from a different project state than is being saved.
    pub fn resolve(&self, id: SpriteId) -> Result<u32> {
        self.index_by_sprite
            .get(&id)
            .copied()
            .ok_or(Error::UnresolvedReference {
                kind: "sprite",
                id: id.0,
            })
    }

    /// Resolve an optional slot reference; `None` maps to [`NO_REFERENCE`].
    pub fn resolve_slot(&self, slot: Option<SpriteId>) -> Result<i32> {
        match slot {
            Some(id) => Ok(self.resolve(id)? as i32),
            None => Ok(NO_REFERENCE),
        }
    }

    pub fn entries(&self) -> &[SubImage] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load-direction mapping from container sub-image index to the sprite
/// created for it. A `None` entry means the sub-image referenced a texture
/// the project could not host a sprite on; references to it stay dangling.
#[derive(Debug, Default)]
pub struct SpriteIndex {
    sprites: Vec<Option<SpriteId>>,
}

impl SpriteIndex {
    pub fn push(&mut self, sprite: Option<SpriteId>) {
        self.sprites.push(sprite);
    }

    /// Weak lookup: out-of-range and unhosted indices are `None`.
    pub fn lookup(&self, sub_image_index: i32) -> Option<SpriteId> {
        if sub_image_index < 0 {
            return None;
        }
        self.sprites.get(sub_image_index as usize).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }
}

/// Font name for a weak font reference. Cast records store fonts by name;
/// a dangling id is not an error — the record's font name is left unset.
pub fn find_font_name(fonts: &FontPool, id: Option<FontId>) -> Option<&str> {
    id.and_then(|id| fonts.get(id)).map(|font| font.name.as_str())
}

/// Sort dictionary entries by name using byte-wise ordinal comparison.
/// Stable: duplicate names preserve their relative input order, which keeps
/// a double save byte-identical.
pub fn sort_by_name<T, F>(entries: &mut [T], name: F)
where
    F: Fn(&T) -> &str,
{
    entries.sort_by(|a, b| name(a).as_bytes().cmp(name(b).as_bytes()));
}

/// Load-direction cast name lookup: (group index, cast index) → name.
pub fn cast_names(dictionary: &[CastDictionaryEntry]) -> HashMap<(u32, u32), &str> {
    dictionary
        .iter()
        .map(|entry| ((entry.group_index, entry.cast_index), entry.name.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{Sprite, Texture};

    fn pool_with_textures() -> (SpritePool, TextureList) {
        let mut textures = TextureList::new("textures");
        textures.push(Texture::new("a", 64, 64));
        let mut sprites = SpritePool::new();
        sprites.insert(Sprite {
            texture: 0,
            x: 0.0,
            y: 0.0,
            width: 32.0,
            height: 32.0,
        });
        sprites.insert(Sprite {
            texture: 0,
            x: 32.0,
            y: 0.0,
            width: 32.0,
            height: 32.0,
        });
        (sprites, textures)
    }

    #[test]
    fn build_is_deterministic() {
        let (sprites, textures) = pool_with_textures();
        let a = SubImageTable::build(&sprites, &textures).unwrap();
        let b = SubImageTable::build(&sprites, &textures).unwrap();
        assert_eq!(a.entries(), b.entries());
        for (&id, _) in sprites.iter() {
            assert_eq!(a.resolve(id).unwrap(), b.resolve(id).unwrap());
        }
    }

    #[test]
    fn identical_rectangles_get_distinct_entries() {
        let mut textures = TextureList::new("textures");
        textures.push(Texture::new("a", 64, 64));
        let mut sprites = SpritePool::new();
        let rect = Sprite {
            texture: 0,
            x: 0.0,
            y: 0.0,
            width: 32.0,
            height: 32.0,
        };
        let first = sprites.insert(rect);
        let second = sprites.insert(rect);

        let table = SubImageTable::build(&sprites, &textures).unwrap();
        assert_eq!(table.len(), 2);
        assert_ne!(table.resolve(first).unwrap(), table.resolve(second).unwrap());
        assert_eq!(table.entries()[0], table.entries()[1]);
    }

    #[test]
    fn unknown_sprite_is_unresolved() {
        let (sprites, textures) = pool_with_textures();
        let table = SubImageTable::build(&sprites, &textures).unwrap();
        let err = table.resolve(SpriteId(99)).unwrap_err();
        assert!(matches!(err, Error::UnresolvedReference { kind: "sprite", id: 99 }));
    }

    #[test]
    fn out_of_range_texture_fails_build() {
        let (_, textures) = pool_with_textures();
        let mut sprites = SpritePool::new();
        sprites.insert(Sprite {
            texture: 7,
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        });
        let err = SubImageTable::build(&sprites, &textures).unwrap_err();
        assert!(matches!(err, Error::UnresolvedReference { kind: "texture", .. }));
    }

    #[test]
    fn none_slot_resolves_to_sentinel() {
        let (sprites, textures) = pool_with_textures();
        let table = SubImageTable::build(&sprites, &textures).unwrap();
        assert_eq!(table.resolve_slot(None).unwrap(), NO_REFERENCE);
    }

    #[test]
    fn ordinal_sort_is_stable_for_duplicate_names() {
        let mut entries = vec![
            ("b", 0u32),
            ("a", 1),
            ("b", 2),
            ("A", 3),
            ("a", 4),
        ];
        sort_by_name(&mut entries, |e| e.0);
        // Ordinal: uppercase sorts before lowercase; ties keep input order.
        assert_eq!(entries, vec![("A", 3), ("a", 1), ("a", 4), ("b", 0), ("b", 2)]);
    }

    #[test]
    fn dangling_font_id_has_no_name() {
        let fonts = FontPool::new();
        assert_eq!(find_font_name(&fonts, Some(FontId(3))), None);
        assert_eq!(find_font_name(&fonts, None), None);
    }
}
