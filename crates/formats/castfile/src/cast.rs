use serde::{Deserialize, Serialize};

use crate::types::{Vec2, SPRITE_SLOTS};

/// Transform and color block of a cast record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CastTransformRecord {
    pub unk00: u32,
    pub translation: Vec2,
    /// Rotation in degrees.
    pub rotation: f32,
    pub scale: Vec2,
    pub unk18: f32,
    /// Packed RGBA.
    pub color: u32,
    pub gradient_top_left: u32,
    pub gradient_bottom_left: u32,
    pub gradient_top_right: u32,
    pub gradient_bottom_right: u32,
    pub unk30: u32,
    pub unk34: u32,
    pub unk38: u32,
}

/// A single cast record.
///
/// The draw kind selects which payload the runtime reads: `1` draws the
/// sprite slots, `2` draws `text` with the font named by `font_name`, `0`
/// draws nothing (grouping only). All payload fields are present on every
/// record regardless of kind; `sprite_slots` always holds exactly
/// [`SPRITE_SLOTS`] entries with [`crate::NO_REFERENCE`] for unused slots.
///
/// The cast's name is not stored here — it lives in the scene's cast
/// dictionary, keyed by (group index, cast index).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastRecord {
    pub unk00: u32,
    /// Draw kind: 0 = group, 1 = sprite, 2 = text.
    pub kind: u32,
    /// Non-zero when the cast is drawn.
    pub enabled: u32,
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
    pub unk2c: u32,
    pub unk34: u32,
    pub flags: u32,
    pub unk3c: u32,
    /// Text payload for kind 2.
    pub text: String,
    /// Name of the font used by the text payload; empty when unset.
    pub font_name: String,
    pub font_spacing: u32,
    pub width: u32,
    pub height: u32,
    pub unk58: u32,
    pub unk5c: u32,
    pub offset: Vec2,
    pub unk68: f32,
    pub unk6c: f32,
    pub unk70: u32,
    pub transform: CastTransformRecord,
    /// Indices into the scene's sub-image table.
    pub sprite_slots: [i32; SPRITE_SLOTS],
}

/// One entry of a cast group's hierarchy table, parallel to the flat cast
/// list. [`crate::NO_REFERENCE`] means no child / no next sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyNode {
    /// Flat index of this cast's first child.
    pub child_index: i32,
    /// Flat index of this cast's next sibling under the same parent.
    pub next_index: i32,
}

impl HierarchyNode {
    pub fn none() -> Self {
        Self {
            child_index: crate::NO_REFERENCE,
            next_index: crate::NO_REFERENCE,
        }
    }
}

impl Default for HierarchyNode {
    fn default() -> Self {
        Self::none()
    }
}

/// A cast group: casts flattened in canonical pre-order plus the parallel
/// hierarchy table that encodes the tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CastGroupRecord {
    pub casts: Vec<CastRecord>,
    /// Parallel to `casts`; same length.
    pub hierarchy: Vec<HierarchyNode>,
    pub unk08: u32,
}
