//! Model → container direction of the round trip.
//!
//! Every replacement section is built before the container is touched, so a
//! failed save leaves the container exactly as loaded. Dictionary tables
//! are regenerated from entity names on every save — never patched.

use castfile::animation::{
    AnimationDictionaryEntry, AnimationFrameRecord, GroupAnimationRecord, SceneAnimationRecord,
};
use castfile::cast::{CastGroupRecord, CastRecord, CastTransformRecord};
use castfile::font::{CharacterMappingRecord, FontDictionaryEntry, FontRecord, FontSection};
use castfile::scene::{CastDictionaryEntry, SceneDictionaryEntry, SceneRecord};
use castfile::texture::TextureRecord;
use castfile::{Container, Vec2, NO_REFERENCE, SPRITE_SLOTS};

use crate::error::{Error, Result};
use crate::hierarchy;
use crate::project::{Cast, CastKind, Project, Scene};
use crate::resolve::{self, SubImageTable};
use crate::tracks;

/// Reference design resolution the per-texture normalized-size table is
/// expressed against.
const DESIGN_WIDTH: f32 = 1280.0;
const DESIGN_HEIGHT: f32 = 720.0;

/// The container's fixed texture file extension.
const TEXTURE_EXTENSION: &str = ".dds";

/// Derive a full replacement record set from the project and commit it into
/// the container. Sections the model has no representation for are carried
/// over untouched.
pub fn save_container(project: &Project, container: &mut Container) -> Result<()> {
    let table = SubImageTable::build(&project.sprites, &project.textures)?;

    let textures = build_textures(project);
    let fonts = build_fonts(project, &table)?;

    let mut scenes = Vec::with_capacity(project.scenes.len());
    let mut dictionary = Vec::with_capacity(project.scenes.len());
    for (index, scene) in project.scenes.iter().enumerate() {
        // The secondary animation data list has no model; carry it over from
        // the record previously at this storage index.
        let previous = container.root.scenes.get(index);
        scenes.push(build_scene(project, scene, &table, previous)?);
        dictionary.push(SceneDictionaryEntry {
            name: scene.name.clone(),
            index: index as u32,
        });
    }
    resolve::sort_by_name(&mut dictionary, |entry| &entry.name);

    container.textures = textures;
    container.fonts = fonts;
    container.root.scenes = scenes;
    container.root.dictionary = dictionary;
    Ok(())
}

fn build_textures(project: &Project) -> Vec<TextureRecord> {
    project
        .textures
        .textures
        .iter()
        .map(|texture| TextureRecord {
            name: format!("{}{}", texture.name, TEXTURE_EXTENSION),
        })
        .collect()
}

fn build_fonts(project: &Project, table: &SubImageTable) -> Result<FontSection> {
    let mut section = FontSection::default();
    for (index, (_, font)) in project.fonts.iter().enumerate() {
        let mut record = FontRecord::default();
        for mapping in &font.mappings {
            record.mappings.push(CharacterMappingRecord {
                character: mapping.character,
                sub_image_index: table.resolve_slot(mapping.sprite)?,
            });
        }
        section.fonts.push(record);
        section.dictionary.push(FontDictionaryEntry {
            name: font.name.clone(),
            index: index as u32,
        });
    }
    resolve::sort_by_name(&mut section.dictionary, |entry| &entry.name);
    Ok(section)
}

fn build_scene(
    project: &Project,
    scene: &Scene,
    table: &SubImageTable,
    previous: Option<&SceneRecord>,
) -> Result<SceneRecord> {
    let mut record = SceneRecord {
        unk00: scene.extra.unk00,
        z_index: scene.z_index,
        unk0c: scene.extra.unk0c,
        unk10: scene.extra.unk10,
        aspect_ratio: scene.aspect_ratio,
        frame_rate: scene.frame_rate,
        texture_sizes: build_texture_sizes(project, scene),
        sub_images: table.entries().to_vec(),
        ..SceneRecord::default()
    };

    for (group_index, group) in scene.groups.iter().enumerate() {
        let (flat, nodes) = hierarchy::encode(&group.casts);
        let mut casts = Vec::with_capacity(flat.len());
        for (cast_index, cast) in flat.iter().enumerate() {
            casts.push(build_cast(project, cast, table)?);
            record.cast_dictionary.push(CastDictionaryEntry {
                name: cast.name.clone(),
                group_index: group_index as u32,
                cast_index: cast_index as u32,
            });
        }
        record.groups.push(CastGroupRecord {
            casts,
            hierarchy: nodes,
            unk08: group.unk08,
        });
    }
    resolve::sort_by_name(&mut record.cast_dictionary, |entry| &entry.name);

    for (index, animation) in scene.animations.iter().enumerate() {
        record.animation_dictionary.push(AnimationDictionaryEntry {
            name: animation.name.clone(),
            index: index as u32,
        });
        record.animation_frames.push(AnimationFrameRecord {
            unk00: animation.unk00,
            frame_count: animation.duration,
        });

        if animation.groups.len() != record.groups.len() {
            return Err(Error::TableMismatch {
                table: "animation timeline",
                expected: record.groups.len(),
                found: animation.groups.len(),
            });
        }
        let mut groups = Vec::with_capacity(animation.groups.len());
        for (timeline, group_record) in animation.groups.iter().zip(&record.groups) {
            if timeline.casts.len() != group_record.casts.len() {
                return Err(Error::TableMismatch {
                    table: "cast timeline",
                    expected: group_record.casts.len(),
                    found: timeline.casts.len(),
                });
            }
            let casts = timeline
                .casts
                .iter()
                .map(|cast| tracks::pack(&cast.tracks))
                .collect::<Result<_>>()?;
            groups.push(GroupAnimationRecord { casts });
        }
        record.animations.push(SceneAnimationRecord { groups });
    }
    resolve::sort_by_name(&mut record.animation_dictionary, |entry| &entry.name);

    if let Some(previous) = previous {
        record.animation_extra = previous.animation_extra.clone();
    }
    Ok(record)
}

/// Per-texture normalized size table. Entries the scene does not carry
/// (newly added textures) are derived from the design resolution.
fn build_texture_sizes(project: &Project, scene: &Scene) -> Vec<Vec2> {
    project
        .textures
        .textures
        .iter()
        .enumerate()
        .map(|(index, texture)| {
            scene.texture_sizes.get(index).copied().unwrap_or_else(|| {
                Vec2::new(
                    texture.width as f32 / DESIGN_WIDTH,
                    texture.height as f32 / DESIGN_HEIGHT,
                )
            })
        })
        .collect()
}

fn build_cast(project: &Project, cast: &Cast, table: &SubImageTable) -> Result<CastRecord> {
    let mut sprite_slots = [NO_REFERENCE; SPRITE_SLOTS];
    let mut text = String::new();
    let mut font_name = String::new();
    let mut font_spacing = 0;

    let kind = match &cast.kind {
        CastKind::Group => 0,
        CastKind::Sprite { slots } => {
            for (out, &slot) in sprite_slots.iter_mut().zip(slots.iter()) {
                *out = table.resolve_slot(slot)?;
            }
            1
        }
        CastKind::Text {
            font,
            text: body,
            spacing,
        } => {
            // Fonts are stored by name; a dangling id leaves the name unset.
            if let Some(name) = resolve::find_font_name(&project.fonts, *font) {
                font_name = name.to_string();
            }
            text = body.clone();
            font_spacing = *spacing;
            2
        }
    };

    Ok(CastRecord {
        unk00: cast.extra.unk00,
        kind,
        enabled: cast.enabled as u32,
        top_left: cast.top_left,
        top_right: cast.top_right,
        bottom_left: cast.bottom_left,
        bottom_right: cast.bottom_right,
        unk2c: cast.extra.unk2c,
        unk34: cast.extra.unk34,
        flags: cast.flags,
        unk3c: cast.extra.unk3c,
        text,
        font_name,
        font_spacing,
        width: cast.width,
        height: cast.height,
        unk58: cast.extra.unk58,
        unk5c: cast.extra.unk5c,
        offset: cast.offset,
        unk68: cast.extra.unk68,
        unk6c: cast.extra.unk6c,
        unk70: cast.extra.unk70,
        transform: CastTransformRecord {
            unk00: cast.extra.transform_unk00,
            translation: cast.translation,
            rotation: cast.rotation,
            scale: cast.scale,
            unk18: cast.extra.transform_unk18,
            color: cast.color,
            gradient_top_left: cast.gradient_top_left,
            gradient_bottom_left: cast.gradient_bottom_left,
            gradient_top_right: cast.gradient_top_right,
            gradient_bottom_right: cast.gradient_bottom_right,
            unk30: cast.extra.transform_unk30,
            unk34: cast.extra.transform_unk34,
            unk38: cast.extra.transform_unk38,
        },
        sprite_slots,
    })
}
