use castfile::{Vec2, SPRITE_SLOTS};
use serde::{Deserialize, Serialize};

use crate::project::font::FontId;
use crate::project::sprite::SpriteId;

/// Per-kind payload of a cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CastKind {
    /// Draws nothing; exists to group children.
    Group,
    /// Textured quad with up to [`SPRITE_SLOTS`] frames of material.
    Sprite {
        /// Weak sprite references; slot order is the material frame order.
        slots: [Option<SpriteId>; SPRITE_SLOTS],
    },
    /// Text drawn with a font.
    Text {
        /// Weak font reference; `None` leaves the record's font name unset.
        font: Option<FontId>,
        text: String,
        spacing: u32,
    },
}

impl CastKind {
    /// Empty sprite payload (all slots unreferenced).
    pub fn empty_sprite() -> Self {
        CastKind::Sprite {
            slots: [None; SPRITE_SLOTS],
        }
    }
}

/// Container fields the editor does not interpret, carried through edits so
/// a save never has to reach back into stale records.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CastExtra {
    pub unk00: u32,
    pub unk2c: u32,
    pub unk34: u32,
    pub unk3c: u32,
    pub unk58: u32,
    pub unk5c: u32,
    pub unk68: f32,
    pub unk6c: f32,
    pub unk70: u32,
    pub transform_unk00: u32,
    pub transform_unk18: f32,
    pub transform_unk30: u32,
    pub transform_unk34: u32,
    pub transform_unk38: u32,
}

/// A single visual element of a scene: sprite quad, text, or group.
///
/// Identity for persistence purposes is the **name**, not the position —
/// the container's cast dictionary maps names to (group, cast) indices that
/// are regenerated on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cast {
    pub name: String,
    pub enabled: bool,
    pub kind: CastKind,
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
    pub width: u32,
    pub height: u32,
    pub offset: Vec2,
    pub flags: u32,
    pub translation: Vec2,
    /// Rotation in degrees.
    pub rotation: f32,
    pub scale: Vec2,
    /// Packed RGBA.
    pub color: u32,
    pub gradient_top_left: u32,
    pub gradient_bottom_left: u32,
    pub gradient_top_right: u32,
    pub gradient_bottom_right: u32,
    pub extra: CastExtra,
    /// Ordered children; child order is part of the hierarchy encoding.
    pub children: Vec<Cast>,
}

impl Cast {
    pub fn new(name: impl Into<String>, kind: CastKind) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            kind,
            top_left: Vec2::default(),
            top_right: Vec2::default(),
            bottom_left: Vec2::default(),
            bottom_right: Vec2::default(),
            width: 0,
            height: 0,
            offset: Vec2::default(),
            flags: 0,
            translation: Vec2::default(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            color: 0xFFFF_FFFF,
            gradient_top_left: 0xFFFF_FFFF,
            gradient_bottom_left: 0xFFFF_FFFF,
            gradient_top_right: 0xFFFF_FFFF,
            gradient_bottom_right: 0xFFFF_FFFF,
            extra: CastExtra::default(),
            children: Vec::new(),
        }
    }

    /// Number of casts in this subtree, this cast included.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Cast::subtree_len).sum::<usize>()
    }
}

/// An ordered forest of top-level casts composing one layer set of a scene.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CastGroup {
    pub casts: Vec<Cast>,
    pub unk08: u32,
}

impl CastGroup {
    /// Total cast count across the whole forest.
    pub fn cast_count(&self) -> usize {
        self.casts.iter().map(Cast::subtree_len).sum()
    }
}
