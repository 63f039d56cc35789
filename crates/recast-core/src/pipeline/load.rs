//! Container → model direction of the round trip.
//!
//! Order matters: textures first (sprite geometry needs their dimensions),
//! then sprites from the first scene's sub-image table, then fonts (their
//! mappings reference sprites), then scenes (casts reference sprites and
//! fonts, animations reference casts).

use std::collections::HashMap;
use std::path::Path;

use castfile::cast::{CastGroupRecord, CastRecord};
use castfile::scene::SceneRecord;
use castfile::Container;

use crate::error::{Error, Result};
use crate::hierarchy::{self, TreeNode};
use crate::pipeline::TextureProbe;
use crate::project::{
    AnimationGroup, Cast, CastGroup, CastKind, CastTimeline, CharacterMapping, Font, FontId,
    GroupTimeline, Project, Scene, SceneExtra, Sprite, Texture,
};
use crate::resolve::{self, SpriteIndex};
use crate::tracks;

/// Result of a load: the editable project plus the names of every texture
/// file that was absent from disk. A non-empty list disables saving for the
/// session but does not abort the load.
#[derive(Debug)]
pub struct LoadOutcome {
    pub project: Project,
    pub missing_textures: Vec<String>,
}

/// Populate a fresh project from a parsed container.
///
/// `root_dir` is the directory the container file lives in; texture files
/// are probed next to it.
pub fn load_container(
    container: &Container,
    root_dir: &Path,
    probe: &dyn TextureProbe,
) -> Result<LoadOutcome> {
    if !container.root.children.is_empty() {
        return Err(Error::Unsupported {
            feature: "sub-node hierarchies below the top level",
        });
    }

    let mut project = Project::new();
    let mut missing_textures = Vec::new();

    // Texture list. Missing files keep a placeholder entry so container
    // texture indices stay aligned with the model list.
    for record in &container.textures {
        let stem = record
            .name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(record.name.as_str());
        match probe.probe(&root_dir.join(&record.name)) {
            Some((width, height)) => {
                project.textures.push(Texture::new(stem, width, height));
            }
            None => {
                missing_textures.push(record.name.clone());
                project.textures.push(Texture::new(stem, 0, 0));
            }
        }
    }

    // Sprites come from the first scene's sub-image table only, per format
    // convention; later scenes carry copies of the same table.
    let mut sprite_index = SpriteIndex::default();
    if let Some(first) = container.root.scenes.first() {
        for sub in &first.sub_images {
            let hosted = project
                .textures
                .get(sub.texture_index as usize)
                .filter(|texture| texture.has_dimensions())
                .map(|texture| Sprite::from_sub_image(sub, texture));
            match hosted {
                Some(sprite) => {
                    let id = project.sprites.insert(sprite);
                    project.textures.textures[sub.texture_index as usize]
                        .sprites
                        .push(id);
                    sprite_index.push(Some(id));
                }
                None => sprite_index.push(None),
            }
        }
    }

    // Fonts: storage order, names re-keyed through the dictionary's declared
    // indices (the dictionary itself is stored name-sorted).
    let font_section = &container.fonts;
    if font_section.dictionary.len() != font_section.fonts.len() {
        return Err(Error::TableMismatch {
            table: "font dictionary",
            expected: font_section.fonts.len(),
            found: font_section.dictionary.len(),
        });
    }
    let mut font_dictionary = font_section.dictionary.clone();
    font_dictionary.sort_by_key(|entry| entry.index);
    for (record, entry) in font_section.fonts.iter().zip(&font_dictionary) {
        let mut font = Font::new(entry.name.clone());
        for mapping in &record.mappings {
            font.mappings.push(CharacterMapping {
                character: mapping.character,
                sprite: sprite_index.lookup(mapping.sub_image_index),
            });
        }
        project.fonts.insert(font);
    }

    let font_ids: HashMap<String, FontId> = project
        .fonts
        .iter()
        .map(|(&id, font)| (font.name.clone(), id))
        .collect();

    // Scenes: storage order, names re-keyed through the scene dictionary.
    let node = &container.root;
    if node.dictionary.len() != node.scenes.len() {
        return Err(Error::TableMismatch {
            table: "scene dictionary",
            expected: node.scenes.len(),
            found: node.dictionary.len(),
        });
    }
    let mut scene_dictionary = node.dictionary.clone();
    scene_dictionary.sort_by_key(|entry| entry.index);
    for (record, entry) in node.scenes.iter().zip(&scene_dictionary) {
        let scene = load_scene(record, &entry.name, &sprite_index, &font_ids)?;
        project.scenes.push(scene);
    }

    Ok(LoadOutcome {
        project,
        missing_textures,
    })
}

fn load_scene(
    record: &SceneRecord,
    name: &str,
    sprite_index: &SpriteIndex,
    font_ids: &HashMap<String, FontId>,
) -> Result<Scene> {
    let mut scene = Scene::new(name);
    scene.z_index = record.z_index;
    scene.aspect_ratio = record.aspect_ratio;
    scene.frame_rate = record.frame_rate;
    scene.texture_sizes = record.texture_sizes.clone();
    scene.extra = SceneExtra {
        unk00: record.unk00,
        unk0c: record.unk0c,
        unk10: record.unk10,
    };

    let names = resolve::cast_names(&record.cast_dictionary);
    for (group_index, group) in record.groups.iter().enumerate() {
        scene
            .groups
            .push(load_group(group, group_index as u32, &names, sprite_index, font_ids)?);
    }

    // Animations: the dictionary, frame metadata, and keyframe data are
    // parallel tables keyed by the dictionary's declared index.
    let animation_count = record.animations.len();
    if record.animation_dictionary.len() != animation_count {
        return Err(Error::TableMismatch {
            table: "animation dictionary",
            expected: animation_count,
            found: record.animation_dictionary.len(),
        });
    }
    if record.animation_frames.len() != animation_count {
        return Err(Error::TableMismatch {
            table: "animation frame",
            expected: animation_count,
            found: record.animation_frames.len(),
        });
    }
    let mut animation_dictionary = record.animation_dictionary.clone();
    animation_dictionary.sort_by_key(|entry| entry.index);
    for (index, entry) in animation_dictionary.iter().enumerate() {
        let frame = &record.animation_frames[index];
        let data = &record.animations[index];

        let mut group = AnimationGroup::new(entry.name.clone(), frame.frame_count);
        group.unk00 = frame.unk00;
        if data.groups.len() != record.groups.len() {
            return Err(Error::TableMismatch {
                table: "animation timeline",
                expected: record.groups.len(),
                found: data.groups.len(),
            });
        }
        for (group_record, group_data) in record.groups.iter().zip(&data.groups) {
            if group_data.casts.len() != group_record.casts.len() {
                return Err(Error::TableMismatch {
                    table: "cast timeline",
                    expected: group_record.casts.len(),
                    found: group_data.casts.len(),
                });
            }
            let mut timeline = GroupTimeline::default();
            for cast_data in &group_data.casts {
                timeline.casts.push(CastTimeline {
                    tracks: tracks::unpack(cast_data)?,
                });
            }
            group.groups.push(timeline);
        }
        scene.animations.push(group);
    }

    Ok(scene)
}

fn load_group(
    record: &CastGroupRecord,
    group_index: u32,
    names: &HashMap<(u32, u32), &str>,
    sprite_index: &SpriteIndex,
    font_ids: &HashMap<String, FontId>,
) -> Result<CastGroup> {
    if record.hierarchy.len() != record.casts.len() {
        return Err(Error::TableMismatch {
            table: "cast hierarchy",
            expected: record.casts.len(),
            found: record.hierarchy.len(),
        });
    }
    let shape = hierarchy::decode(&record.hierarchy)?;
    let casts = build_forest(&shape, record, group_index, names, sprite_index, font_ids)?;
    Ok(CastGroup {
        casts,
        unk08: record.unk08,
    })
}

fn build_forest(
    shape: &[TreeNode],
    record: &CastGroupRecord,
    group_index: u32,
    names: &HashMap<(u32, u32), &str>,
    sprite_index: &SpriteIndex,
    font_ids: &HashMap<String, FontId>,
) -> Result<Vec<Cast>> {
    let mut out = Vec::with_capacity(shape.len());
    for node in shape {
        let cast_record = &record.casts[node.index];
        // A cast without a dictionary entry still needs a name — the name is
        // its persistence identity and the dictionary is regenerated from it
        // on save.
        let name = names
            .get(&(group_index, node.index as u32))
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("cast_{group_index}_{}", node.index));
        let mut cast = load_cast(cast_record, name, sprite_index, font_ids)?;
        cast.children = build_forest(&node.children, record, group_index, names, sprite_index, font_ids)?;
        out.push(cast);
    }
    Ok(out)
}

fn load_cast(
    record: &CastRecord,
    name: String,
    sprite_index: &SpriteIndex,
    font_ids: &HashMap<String, FontId>,
) -> Result<Cast> {
    let kind = match record.kind {
        0 => CastKind::Group,
        1 => {
            let mut slots = [None; castfile::SPRITE_SLOTS];
            for (slot, &index) in slots.iter_mut().zip(&record.sprite_slots) {
                *slot = sprite_index.lookup(index);
            }
            CastKind::Sprite { slots }
        }
        2 => CastKind::Text {
            font: font_ids.get(&record.font_name).copied(),
            text: record.text.clone(),
            spacing: record.font_spacing,
        },
        _ => {
            return Err(Error::Unsupported {
                feature: "unknown cast draw kind",
            })
        }
    };

    let mut cast = Cast::new(name, kind);
    cast.enabled = record.enabled != 0;
    cast.top_left = record.top_left;
    cast.top_right = record.top_right;
    cast.bottom_left = record.bottom_left;
    cast.bottom_right = record.bottom_right;
    cast.width = record.width;
    cast.height = record.height;
    cast.offset = record.offset;
    cast.flags = record.flags;
    cast.translation = record.transform.translation;
    cast.rotation = record.transform.rotation;
    cast.scale = record.transform.scale;
    cast.color = record.transform.color;
    cast.gradient_top_left = record.transform.gradient_top_left;
    cast.gradient_bottom_left = record.transform.gradient_bottom_left;
    cast.gradient_top_right = record.transform.gradient_top_right;
    cast.gradient_bottom_right = record.transform.gradient_bottom_right;
    cast.extra = crate::project::CastExtra {
        unk00: record.unk00,
        unk2c: record.unk2c,
        unk34: record.unk34,
        unk3c: record.unk3c,
        unk58: record.unk58,
        unk5c: record.unk5c,
        unk68: record.unk68,
        unk6c: record.unk6c,
        unk70: record.unk70,
        transform_unk00: record.transform.unk00,
        transform_unk18: record.transform.unk18,
        transform_unk30: record.transform.unk30,
        transform_unk34: record.transform.unk34,
        transform_unk38: record.transform.unk38,
    };
    Ok(cast)
}
