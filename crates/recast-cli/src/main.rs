use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use castfile::Container;
use clap::{Parser, Subcommand};
use recast_core::{ContainerStore, Session, TextureProbe};

#[derive(Parser)]
#[command(name = "recast", about = "Round-trip tool for UI scene project resource containers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a section summary of a JSON-serialized container.
    Info {
        /// Path to the container JSON.
        file: PathBuf,
    },
    /// Load a container through the full pipeline and report the model.
    Check {
        /// Path to the container JSON. Texture files are probed next to it.
        file: PathBuf,
    },
    /// Load a container and save it back out — the round-trip proof.
    Rewrite {
        /// Path to the container JSON.
        file: PathBuf,
        /// Output path for the rewritten container.
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Container store over JSON files — the development stand-in for the
/// engine's section-level reader/writer.
struct JsonStore;

impl ContainerStore for JsonStore {
    fn read(&self, path: &Path) -> recast_core::Result<Container> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn write(&self, path: &Path, container: &Container) -> recast_core::Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), container)?;
        Ok(())
    }
}

/// Texture probe that reads pixel dimensions from a DDS header. A present
/// file with an unrecognized header still counts as found (the pipeline
/// only refuses to save over *absent* files) but reports no dimensions.
struct DdsProbe;

impl TextureProbe for DdsProbe {
    fn probe(&self, path: &Path) -> Option<(u32, u32)> {
        let mut header = [0u8; 20];
        let mut file = File::open(path).ok()?;
        file.read_exact(&mut header).ok()?;
        if &header[0..4] != b"DDS " {
            return Some((0, 0));
        }
        let height = u32::from_le_bytes(header[12..16].try_into().ok()?);
        let width = u32::from_le_bytes(header[16..20].try_into().ok()?);
        Some((width, height))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Info { file } => info(&file),
        Command::Check { file } => check(&file),
        Command::Rewrite { file, output } => rewrite(&file, &output),
    }
}

fn info(file: &Path) -> Result<()> {
    let container = JsonStore
        .read(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    println!("textures: {}", container.textures.len());
    for texture in &container.textures {
        println!("  {}", texture.name);
    }
    println!("fonts: {}", container.fonts.fonts.len());
    for entry in &container.fonts.dictionary {
        println!("  {} -> record {}", entry.name, entry.index);
    }
    println!("scenes: {}", container.root.scenes.len());
    let mut dictionary = container.root.dictionary.clone();
    dictionary.sort_by_key(|entry| entry.index);
    for entry in &dictionary {
        let scene = &container.root.scenes[entry.index as usize];
        let casts: usize = scene.groups.iter().map(|g| g.casts.len()).sum();
        println!(
            "  {}: {} group(s), {} cast(s), {} animation(s), {} sub-image(s)",
            entry.name,
            scene.groups.len(),
            casts,
            scene.animations.len(),
            scene.sub_images.len(),
        );
    }
    if !container.root.children.is_empty() {
        println!("sub-nodes: {} (unsupported by the editor)", container.root.children.len());
    }
    Ok(())
}

fn check(file: &Path) -> Result<()> {
    let session = Session::open(file, &JsonStore, &DdsProbe)
        .with_context(|| format!("failed to load {}", file.display()))?;

    let project = session.project();
    println!("textures: {}", project.textures.len());
    println!("sprites:  {}", project.sprites.len());
    println!("fonts:    {}", project.fonts.len());
    println!("scenes:   {}", project.scenes.len());
    for scene in &project.scenes {
        let casts: usize = scene.groups.iter().map(|g| g.cast_count()).sum();
        println!("  {}: {} cast(s), {} animation(s)", scene.name, casts, scene.animations.len());
    }

    if session.can_save() {
        println!("ok");
    } else {
        println!("missing textures (saving disabled):");
        for name in session.missing_textures() {
            println!("  {name}");
        }
    }
    Ok(())
}

fn rewrite(file: &Path, output: &Path) -> Result<()> {
    let mut session = Session::open(file, &JsonStore, &DdsProbe)
        .with_context(|| format!("failed to load {}", file.display()))?;
    session
        .save_as(output, &JsonStore)
        .with_context(|| format!("failed to save {}", output.display()))?;
    Ok(())
}
