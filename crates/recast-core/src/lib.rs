//! Editable UI scene model and round-trip codecs for project resource
//! containers.
//!
//! The container format stores an edit-hostile encoding: names in
//! separately-sorted dictionaries, cast trees as sibling-linked index
//! arrays, animation tracks packed behind per-channel flag bits, and sprite
//! references routed through a shared sub-image table. This crate owns the
//! bidirectional mapping between that encoding and an editable model:
//!
//! - [`resolve`] — cross-reference resolution and dictionary sort order
//! - [`hierarchy`] — cast forest ↔ flat index table
//! - [`tracks`] — per-cast channel set ↔ flag word + block list
//! - [`pipeline`] — load/save orchestration over the above

pub mod error;
pub mod hierarchy;
pub mod pipeline;
pub mod project;
pub mod resolve;
pub mod tracks;

pub use error::{Error, Result};
pub use pipeline::{ContainerStore, LoadOutcome, Session, TextureProbe};
pub use project::Project;
