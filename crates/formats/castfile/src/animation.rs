use serde::{Deserialize, Serialize};

/// Name dictionary entry for an animation group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationDictionaryEntry {
    pub name: String,
    /// Storage index into the scene's animation lists.
    pub index: u32,
}

/// Per-animation frame metadata, parallel to the keyframe data list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationFrameRecord {
    pub unk00: u32,
    /// Duration of the animation in frames.
    pub frame_count: f32,
}

/// A single keyframe as stored in a channel block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyframeRecord {
    /// Frame number, or [`crate::NO_FRAME`] for "no explicit frame".
    pub frame: u32,
    pub value: f32,
    pub interpolation: u32,
    pub tangent_in: f32,
    pub tangent_out: f32,
    pub unk14: u32,
}

/// One packed per-channel keyframe block.
///
/// Which channel a block belongs to is not stored on the block: it is
/// implied by its position among the set bits of the owning
/// [`CastAnimationRecord::flags`] word, in increasing bit order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChannelBlockRecord {
    pub unk00: u32,
    pub keyframes: Vec<KeyframeRecord>,
}

/// Animation data for one cast within one animation group.
///
/// Invariant: `flags.count_ones() == blocks.len()`; blocks are stored in
/// increasing channel-bit order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CastAnimationRecord {
    /// Presence bit per animation channel.
    pub flags: u32,
    pub blocks: Vec<ChannelBlockRecord>,
}

/// Animation data for every cast of one cast group, in the group's flat
/// cast order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupAnimationRecord {
    pub casts: Vec<CastAnimationRecord>,
}

/// Keyframe data of one animation group across all cast groups of a scene.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneAnimationRecord {
    pub groups: Vec<GroupAnimationRecord>,
}
