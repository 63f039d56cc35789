//! Typed records for the project resource container used by UI scene files.
//!
//! Two-layer split:
//! - the byte-level section reader/writer is an external collaborator and is
//!   **not** part of this crate — it produces and consumes the records here;
//! - this crate defines the record layout: sections, dictionaries, sentinels.
//!
//! Index conventions the container relies on:
//! - names live in separately-sorted dictionary tables, not on the records;
//! - cast parent/child links are flattened into sibling-linked index arrays;
//! - per-cast animation tracks exist only for channels whose bit is set in a
//!   flag word, so block counts vary per cast;
//! - sprite references go through a shared sub-image table.

pub mod animation;
pub mod cast;
pub mod container;
pub mod font;
pub mod scene;
pub mod texture;
pub mod types;

pub use container::Container;
pub use types::{Vec2, NO_FRAME, NO_REFERENCE, SPRITE_SLOTS};
