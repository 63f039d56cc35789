//! Round-trip orchestrator: drives the resolver, hierarchy codec, and track
//! packer to populate the model from a container and derive a full
//! replacement record set on save.
//!
//! The byte-level container reader/writer and the texture decoder are
//! external collaborators, injected through the traits below.

pub mod load;
pub mod save;

use std::path::{Path, PathBuf};

use castfile::Container;

use crate::error::{Error, Result};
use crate::project::Project;

pub use load::{load_container, LoadOutcome};
pub use save::save_container;

/// Section-level reader/writer for project resource containers.
pub trait ContainerStore {
    fn read(&self, path: &Path) -> Result<Container>;
    fn write(&self, path: &Path, container: &Container) -> Result<()>;
}

/// Texture loader: decoded pixel dimensions for a texture file, or `None`
/// when the file is absent.
pub trait TextureProbe {
    fn probe(&self, path: &Path) -> Option<(u32, u32)>;
}

/// One editing session over a single container file.
///
/// Owns the working container (for pass-through of unmodeled sections), the
/// editable project, and the missing-texture list recorded at load time.
/// Load and Save are each one synchronous pass; a hosting application that
/// edits concurrently must serialize calls externally.
pub struct Session {
    path: PathBuf,
    container: Container,
    project: Project,
    missing_textures: Vec<String>,
}

impl Session {
    /// Read and load a container for editing.
    pub fn open(
        path: impl Into<PathBuf>,
        store: &dyn ContainerStore,
        probe: &dyn TextureProbe,
    ) -> Result<Session> {
        let path = path.into();
        let container = store.read(&path)?;
        let root_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let outcome = load::load_container(&container, &root_dir, probe)?;

        eprintln!(
            "[recast] loaded {}: {} textures, {} sprites, {} fonts, {} scenes",
            path.display(),
            outcome.project.textures.len(),
            outcome.project.sprites.len(),
            outcome.project.fonts.len(),
            outcome.project.scenes.len(),
        );
        if !outcome.missing_textures.is_empty() {
            eprintln!(
                "[recast] {} texture file(s) missing; saving disabled",
                outcome.missing_textures.len()
            );
        }

        Ok(Session {
            path,
            container,
            project: outcome.project,
            missing_textures: outcome.missing_textures,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn project_mut(&mut self) -> &mut Project {
        &mut self.project
    }

    /// Texture files that were absent at load time.
    pub fn missing_textures(&self) -> &[String] {
        &self.missing_textures
    }

    /// Saving is refused while any texture was missing at load time.
    pub fn can_save(&self) -> bool {
        self.missing_textures.is_empty()
    }

    /// Save back to the path the session was opened from.
    pub fn save(&mut self, store: &dyn ContainerStore) -> Result<()> {
        let path = self.path.clone();
        self.save_as(path, store)
    }

    /// Rebuild every modeled container section from the project and write
    /// the result. Checked before anything is mutated: if textures were
    /// missing at load time, the container and the file stay untouched.
    pub fn save_as(&mut self, path: impl Into<PathBuf>, store: &dyn ContainerStore) -> Result<()> {
        if !self.missing_textures.is_empty() {
            return Err(Error::MissingTextures {
                names: self.missing_textures.clone(),
            });
        }
        save::save_container(&self.project, &mut self.container)?;

        let path = path.into();
        store.write(&path, &self.container)?;
        self.path = path;
        eprintln!("[recast] saved {}", self.path.display());
        Ok(())
    }
}
