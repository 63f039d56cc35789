use serde::{Deserialize, Serialize};

/// One character → sub-image mapping in a font record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterMappingRecord {
    /// Source character code.
    pub character: u32,
    /// Index into the first scene's sub-image table, or [`crate::NO_REFERENCE`].
    pub sub_image_index: i32,
}

/// A font record: an ordered list of character mappings.
///
/// The font's name is not stored here — it lives in the font dictionary,
/// keyed back to this record by index.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FontRecord {
    pub mappings: Vec<CharacterMappingRecord>,
}

/// Name dictionary entry for a font.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontDictionaryEntry {
    pub name: String,
    /// Storage index of the [`FontRecord`] this name belongs to.
    pub index: u32,
}

/// The container's font section: records in storage order plus the
/// name-sorted dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FontSection {
    pub fonts: Vec<FontRecord>,
    /// Stored pre-sorted by name (ordinal); load must go through `index`.
    pub dictionary: Vec<FontDictionaryEntry>,
}
