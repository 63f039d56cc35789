use serde::{Deserialize, Serialize};

/// Sentinel for an absent index: sprite slots, hierarchy child/next links,
/// font character mappings.
pub const NO_REFERENCE: i32 = -1;

/// Sentinel frame number meaning "no explicit frame" in a keyframe.
/// Interpolation/hold semantics are defined by the runtime; the editor only
/// preserves the value.
pub const NO_FRAME: u32 = 0xFFFF_FFFF;

/// Every cast carries exactly this many sprite slots; unused slots hold
/// [`NO_REFERENCE`], never fewer entries.
pub const SPRITE_SLOTS: usize = 32;

/// Two-component float vector as stored in the container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Raw bytes of a record this crate does not model. Preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OpaqueBlock(pub Vec<u8>);
