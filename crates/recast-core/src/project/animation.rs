use serde::{Deserialize, Serialize};

/// The fixed, ordered set of animation channels a cast can participate in.
/// Discriminants are the bit positions of the container's per-cast flag
/// word; packed blocks are stored in increasing bit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Visibility,
    TranslateX,
    TranslateY,
    Rotation,
    ScaleX,
    ScaleY,
    SpriteIndex,
    Color,
    GradientTopLeft,
    GradientBottomLeft,
    GradientTopRight,
    GradientBottomRight,
}

impl Channel {
    pub const COUNT: usize = 12;

    /// All channels in bit order.
    pub const ALL: [Channel; Channel::COUNT] = [
        Channel::Visibility,
        Channel::TranslateX,
        Channel::TranslateY,
        Channel::Rotation,
        Channel::ScaleX,
        Channel::ScaleY,
        Channel::SpriteIndex,
        Channel::Color,
        Channel::GradientTopLeft,
        Channel::GradientBottomLeft,
        Channel::GradientTopRight,
        Channel::GradientBottomRight,
    ];

    /// Bit position in the flag word.
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Flag-word bit for this channel.
    pub fn bit(self) -> u32 {
        1 << self.index()
    }

    /// Channel for a flag-word bit position.
    pub fn from_index(index: u32) -> Option<Channel> {
        Channel::ALL.get(index as usize).copied()
    }
}

/// One keyframe of an animation track.
///
/// `frame` is stored exactly as in the container: [`castfile::NO_FRAME`]
/// means "no explicit frame" and must never be collided with a real frame
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub frame: u32,
    pub value: f32,
    pub interpolation: u32,
    pub tangent_in: f32,
    pub tangent_out: f32,
    pub unk14: u32,
}

impl Keyframe {
    /// Whether this keyframe carries an explicit frame number.
    pub fn has_frame(&self) -> bool {
        self.frame != castfile::NO_FRAME
    }
}

/// An ordered keyframe sequence for one animation channel of one cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub channel: Channel,
    pub unk00: u32,
    pub keyframes: Vec<Keyframe>,
}

impl Track {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            unk00: 0,
            keyframes: Vec::new(),
        }
    }
}

/// Animation tracks of one cast within one animation group. May be empty
/// (the cast does not animate in this group).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CastTimeline {
    pub tracks: Vec<Track>,
}

/// Timelines for every cast of one cast group, in canonical flattened cast
/// order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupTimeline {
    pub casts: Vec<CastTimeline>,
}

/// A named animation spanning all cast groups of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationGroup {
    pub name: String,
    pub unk00: u32,
    /// Duration in frames.
    pub duration: f32,
    /// One timeline set per cast group, in scene group order.
    pub groups: Vec<GroupTimeline>,
}

impl AnimationGroup {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            unk00: 0,
            duration,
            groups: Vec::new(),
        }
    }
}
