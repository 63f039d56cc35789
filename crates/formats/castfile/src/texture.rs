use serde::{Deserialize, Serialize};

/// A texture name entry in the container's texture list section.
///
/// The name is the on-disk file name including extension; pixel dimensions
/// are not stored in the container and come from the decoded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureRecord {
    pub name: String,
}
