//! Animation track packer/unpacker: a cast's sparse channel set ↔ the
//! container's flag word plus contiguous block list.

use castfile::animation::{CastAnimationRecord, ChannelBlockRecord, KeyframeRecord};

use crate::error::{Error, Result};
use crate::project::{Channel, Keyframe, Track};

/// Pack a cast's live track set into a flag word and per-channel blocks in
/// increasing channel-bit order.
///
/// Two tracks on the same channel collapse to one flag bit, which the block
/// count then contradicts — reported as [`Error::TrackCountMismatch`].
pub fn pack(tracks: &[Track]) -> Result<CastAnimationRecord> {
    let mut flags = 0u32;
    for track in tracks {
        flags |= track.channel.bit();
    }
    if flags.count_ones() as usize != tracks.len() {
        return Err(Error::TrackCountMismatch {
            expected: flags.count_ones() as usize,
            found: tracks.len(),
        });
    }

    let mut ordered: Vec<&Track> = tracks.iter().collect();
    ordered.sort_by_key(|track| track.channel.index());

    let blocks = ordered
        .into_iter()
        .map(|track| ChannelBlockRecord {
            unk00: track.unk00,
            keyframes: track.keyframes.iter().map(keyframe_to_record).collect(),
        })
        .collect();

    Ok(CastAnimationRecord { flags, blocks })
}

/// Unpack a flag word plus block list back into per-channel tracks.
///
/// The block list length must equal the flag word's population count; a
/// mismatch aborts with [`Error::TrackCountMismatch`] rather than
/// truncating or padding. Flag bits at or above the known channel count
/// mean the container uses channels this editor has no model for.
pub fn unpack(record: &CastAnimationRecord) -> Result<Vec<Track>> {
    if record.flags >> Channel::COUNT != 0 {
        return Err(Error::Unsupported {
            feature: "animation channels beyond the known set",
        });
    }
    let expected = record.flags.count_ones() as usize;
    if record.blocks.len() != expected {
        return Err(Error::TrackCountMismatch {
            expected,
            found: record.blocks.len(),
        });
    }

    let mut tracks = Vec::with_capacity(expected);
    let mut blocks = record.blocks.iter();
    for index in 0..Channel::COUNT as u32 {
        if record.flags & (1 << index) == 0 {
            continue;
        }
        // Popcount agreement above guarantees a block per set bit.
        let block = blocks.next().ok_or(Error::TrackCountMismatch {
            expected,
            found: record.blocks.len(),
        })?;
        let channel = Channel::from_index(index).ok_or(Error::Unsupported {
            feature: "animation channels beyond the known set",
        })?;
        tracks.push(Track {
            channel,
            unk00: block.unk00,
            keyframes: block.keyframes.iter().map(record_to_keyframe).collect(),
        });
    }
    Ok(tracks)
}

fn keyframe_to_record(key: &Keyframe) -> KeyframeRecord {
    KeyframeRecord {
        frame: key.frame,
        value: key.value,
        interpolation: key.interpolation,
        tangent_in: key.tangent_in,
        tangent_out: key.tangent_out,
        unk14: key.unk14,
    }
}

fn record_to_keyframe(record: &KeyframeRecord) -> Keyframe {
    Keyframe {
        frame: record.frame,
        value: record.value,
        interpolation: record.interpolation,
        tangent_in: record.tangent_in,
        tangent_out: record.tangent_out,
        unk14: record.unk14,
    }
}
