use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A live sprite/font/texture reference could not be mapped at save
    /// time. The model and the resolver table were built from different
    /// states; this is an invariant violation, not user error.
    #[error("unresolved {kind} reference ({id}) at save time")]
    UnresolvedReference { kind: &'static str, id: u32 },

    /// Cyclic, out-of-range, or unreached hierarchy indices. The source
    /// file is corrupt or from an unsupported variant.
    #[error("malformed cast hierarchy: {reason} (index {index})")]
    MalformedHierarchy { reason: &'static str, index: i64 },

    /// A cast's animation flag word and its block list disagree.
    #[error("animation track count mismatch: flag word declares {expected} tracks, found {found}")]
    TrackCountMismatch { expected: usize, found: usize },

    /// Texture files referenced by the container were absent from disk at
    /// load time. Recorded per texture during load; saving is refused
    /// until the files are supplied and the container is re-opened.
    #[error("missing textures: {}", .names.join(", "))]
    MissingTextures { names: Vec<String> },

    /// Two parallel container tables disagree on length.
    #[error("{table} table mismatch: expected {expected} entries, found {found}")]
    TableMismatch {
        table: &'static str,
        expected: usize,
        found: usize,
    },

    /// The container uses a feature this editor has no model for.
    #[error("unsupported container feature: {feature}")]
    Unsupported { feature: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
