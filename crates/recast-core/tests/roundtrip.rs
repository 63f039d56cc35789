//! End-to-end load/save tests over in-memory stand-ins for the external
//! container store and texture loader.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use castfile::animation::{CastAnimationRecord, ChannelBlockRecord};
use castfile::cast::{CastGroupRecord, CastRecord, CastTransformRecord, HierarchyNode};
use castfile::scene::{NodeSection, SceneDictionaryEntry, SceneRecord};
use castfile::texture::TextureRecord;
use castfile::{Container, Vec2, NO_FRAME, NO_REFERENCE, SPRITE_SLOTS};
use recast_core::pipeline::{load_container, save_container, ContainerStore, Session, TextureProbe};
use recast_core::project::{
    AnimationGroup, Cast, CastGroup, CastKind, CastTimeline, Channel, CharacterMapping, Font,
    GroupTimeline, Keyframe, Project, Scene, Texture, Track,
};
use recast_core::Error;

struct MapProbe(HashMap<PathBuf, (u32, u32)>);

impl MapProbe {
    fn new(entries: &[(&str, u32, u32)]) -> Self {
        Self(
            entries
                .iter()
                .map(|&(name, w, h)| (PathBuf::from(name), (w, h)))
                .collect(),
        )
    }
}

impl TextureProbe for MapProbe {
    fn probe(&self, path: &Path) -> Option<(u32, u32)> {
        self.0.get(path).copied()
    }
}

struct MemStore {
    containers: RefCell<HashMap<PathBuf, Container>>,
    writes: Cell<usize>,
}

impl MemStore {
    fn with(path: &str, container: Container) -> Self {
        let mut containers = HashMap::new();
        containers.insert(PathBuf::from(path), container);
        Self {
            containers: RefCell::new(containers),
            writes: Cell::new(0),
        }
    }
}

impl ContainerStore for MemStore {
    fn read(&self, path: &Path) -> recast_core::Result<Container> {
        self.containers
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound).into())
    }

    fn write(&self, path: &Path, container: &Container) -> recast_core::Result<()> {
        self.containers
            .borrow_mut()
            .insert(path.to_path_buf(), container.clone());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

fn empty_cast_record() -> CastRecord {
    CastRecord {
        unk00: 0,
        kind: 0,
        enabled: 1,
        top_left: Vec2::default(),
        top_right: Vec2::default(),
        bottom_left: Vec2::default(),
        bottom_right: Vec2::default(),
        unk2c: 0,
        unk34: 0,
        flags: 0,
        unk3c: 0,
        text: String::new(),
        font_name: String::new(),
        font_spacing: 0,
        width: 0,
        height: 0,
        unk58: 0,
        unk5c: 0,
        offset: Vec2::default(),
        unk68: 0.0,
        unk6c: 0.0,
        unk70: 0,
        transform: CastTransformRecord::default(),
        sprite_slots: [NO_REFERENCE; SPRITE_SLOTS],
    }
}

/// Two textures, two sprites on the first, and one scene with
/// `Root -> [ChildA, ChildB]`: ChildA draws the first sprite, ChildB is a
/// text cast, and a color animation targets ChildA.
fn sample_project() -> Project {
    let mut project = Project::new();
    project.textures.push(Texture::new("a", 64, 32));
    project.textures.push(Texture::new("b", 32, 32));
    let first = project.create_sprite(0, 0.0, 0.0, 32.0, 32.0).unwrap();
    let second = project.create_sprite(0, 32.0, 0.0, 32.0, 32.0).unwrap();
    assert_ne!(first, second);

    let mut font = Font::new("fnt");
    font.mappings.push(CharacterMapping {
        character: 'A' as u32,
        sprite: Some(first),
    });
    let font_id = project.fonts.insert(font);

    let mut child_a = Cast::new("ChildA", CastKind::empty_sprite());
    if let CastKind::Sprite { slots } = &mut child_a.kind {
        slots[0] = Some(first);
    }
    child_a.width = 32;
    child_a.height = 32;

    let mut child_b = Cast::new(
        "ChildB",
        CastKind::Text {
            font: Some(font_id),
            text: "hi".into(),
            spacing: 2,
        },
    );
    child_b.translation = Vec2::new(8.0, 4.0);

    let mut root = Cast::new("Root", CastKind::Group);
    root.children = vec![child_a, child_b];

    let mut scene = Scene::new("main");
    scene.groups.push(CastGroup {
        casts: vec![root],
        unk08: 0,
    });

    // Color animation on ChildA (flat index 1), one keyframe using the
    // "no frame" sentinel.
    let mut animation = AnimationGroup::new("fade", 30.0);
    let mut timeline = GroupTimeline::default();
    timeline.casts = vec![
        CastTimeline::default(),
        CastTimeline {
            tracks: vec![Track {
                channel: Channel::Color,
                unk00: 0,
                keyframes: vec![
                    Keyframe {
                        frame: 0,
                        value: 1.0,
                        interpolation: 0,
                        tangent_in: 0.0,
                        tangent_out: 0.0,
                        unk14: 0,
                    },
                    Keyframe {
                        frame: NO_FRAME,
                        value: 0.0,
                        interpolation: 0,
                        tangent_in: 0.0,
                        tangent_out: 0.0,
                        unk14: 0,
                    },
                ],
            }],
        },
        CastTimeline::default(),
    ];
    animation.groups.push(timeline);
    scene.animations.push(animation);

    project.scenes.push(scene);
    project
}

fn sample_probe() -> MapProbe {
    MapProbe::new(&[("a.dds", 64, 32), ("b.dds", 32, 32)])
}

#[test]
fn save_then_reload_reproduces_the_project() {
    let project = sample_project();
    let mut container = Container::default();
    save_container(&project, &mut container).unwrap();

    // Dictionaries come out name-sorted.
    assert_eq!(
        container.textures,
        vec![
            TextureRecord { name: "a.dds".into() },
            TextureRecord { name: "b.dds".into() },
        ]
    );
    let scene = &container.root.scenes[0];
    let cast_names: Vec<&str> = scene
        .cast_dictionary
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(cast_names, ["ChildA", "ChildB", "Root"]);
    // Flat order is pre-order: Root, ChildA, ChildB.
    assert_eq!(scene.groups[0].casts.len(), 3);
    assert_eq!(
        scene.groups[0].hierarchy,
        vec![
            HierarchyNode { child_index: 1, next_index: -1 },
            HierarchyNode { child_index: -1, next_index: 2 },
            HierarchyNode { child_index: -1, next_index: -1 },
        ]
    );
    // Two sub-images, normalized against the 64×32 texture.
    assert_eq!(scene.sub_images.len(), 2);
    assert_eq!(scene.sub_images[0].top_left, Vec2::new(0.0, 0.0));
    assert_eq!(scene.sub_images[0].bottom_right, Vec2::new(0.5, 1.0));
    assert_eq!(scene.sub_images[1].top_left, Vec2::new(0.5, 0.0));
    assert_eq!(scene.sub_images[1].bottom_right, Vec2::new(1.0, 1.0));

    let outcome = load_container(&container, Path::new(""), &sample_probe()).unwrap();
    assert!(outcome.missing_textures.is_empty());
    let reloaded = outcome.project;

    // Sprite rectangles survive the pixel → normalized → pixel trip.
    let rects: Vec<(f32, f32, f32, f32)> = reloaded
        .sprites
        .iter()
        .map(|(_, s)| (s.x, s.y, s.width, s.height))
        .collect();
    assert_eq!(rects.len(), 2);
    for (rect, expected) in rects.iter().zip([
        (0.0, 0.0, 32.0, 32.0),
        (32.0, 0.0, 32.0, 32.0),
    ]) {
        assert!((rect.0 - expected.0).abs() < 1e-4);
        assert!((rect.1 - expected.1).abs() < 1e-4);
        assert!((rect.2 - expected.2).abs() < 1e-4);
        assert!((rect.3 - expected.3).abs() < 1e-4);
    }

    // Hierarchy shape and names.
    let scene = &reloaded.scenes[0];
    assert_eq!(scene.name, "main");
    let root = &scene.groups[0].casts[0];
    assert_eq!(root.name, "Root");
    assert!(matches!(root.kind, CastKind::Group));
    let children: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(children, ["ChildA", "ChildB"]);

    // ChildA still draws the first sprite.
    let CastKind::Sprite { slots } = &root.children[0].kind else {
        panic!("ChildA should be a sprite cast");
    };
    let slot = slots[0].expect("slot 0 should resolve");
    let sprite = reloaded.sprites.get(slot).unwrap();
    assert!((sprite.x - 0.0).abs() < 1e-4);
    assert!((sprite.width - 32.0).abs() < 1e-4);
    assert!(slots[1].is_none());

    // ChildB kept its font by name, and the font kept its mapping.
    let CastKind::Text { font, text, spacing } = &root.children[1].kind else {
        panic!("ChildB should be a text cast");
    };
    let font = font.expect("font should resolve by name");
    assert_eq!(reloaded.fonts.get(font).unwrap().name, "fnt");
    assert_eq!(text, "hi");
    assert_eq!(*spacing, 2);
    let mapping = reloaded.fonts.get(font).unwrap().mappings[0];
    assert_eq!(mapping.character, 'A' as u32);
    assert!(mapping.sprite.is_some());

    // Animation round trip, sentinel included.
    let animation = &scene.animations[0];
    assert_eq!(animation.name, "fade");
    assert!((animation.duration - 30.0).abs() < f32::EPSILON);
    let track = &animation.groups[0].casts[1].tracks[0];
    assert_eq!(track.channel, Channel::Color);
    assert_eq!(track.keyframes[0].frame, 0);
    assert_eq!(track.keyframes[1].frame, NO_FRAME);
    assert!(animation.groups[0].casts[0].tracks.is_empty());
    assert!(animation.groups[0].casts[2].tracks.is_empty());
}

#[test]
fn saving_twice_without_edits_is_byte_identical() {
    let project = sample_project();
    let mut first = Container::default();
    save_container(&project, &mut first).unwrap();
    let mut second = first.clone();
    save_container(&project, &mut second).unwrap();
    assert_eq!(first, second);

    // And a full load→save cycle reproduces the same records.
    let reloaded = load_container(&first, Path::new(""), &sample_probe())
        .unwrap()
        .project;
    let mut third = first.clone();
    save_container(&reloaded, &mut third).unwrap();
    assert_eq!(first, third);
}

#[test]
fn missing_texture_is_recorded_and_blocks_save() {
    let mut container = Container::default();
    container.textures.push(TextureRecord { name: "missing.dds".into() });
    container.root.scenes.push(SceneRecord::default());
    container.root.dictionary.push(SceneDictionaryEntry {
        name: "main".into(),
        index: 0,
    });

    let store = MemStore::with("proj/ui.bin", container);
    let probe = MapProbe::new(&[]);
    let mut session = Session::open("proj/ui.bin", &store, &probe).unwrap();

    assert_eq!(session.missing_textures(), ["missing.dds".to_string()]);
    assert!(!session.can_save());

    let err = session.save(&store).unwrap_err();
    assert!(matches!(err, Error::MissingTextures { .. }));
    // Refused before anything was written.
    assert_eq!(store.writes.get(), 0);
}

#[test]
fn sub_nodes_are_rejected_as_unsupported() {
    let mut container = Container::default();
    container.root.children.push(NodeSection::default());
    let err = load_container(&container, Path::new(""), &MapProbe::new(&[])).unwrap_err();
    assert!(matches!(err, Error::Unsupported { .. }));
}

#[test]
fn flag_block_disagreement_aborts_the_load() {
    let mut container = Container::default();
    let mut scene = SceneRecord::default();
    scene.groups.push(CastGroupRecord {
        casts: vec![empty_cast_record()],
        hierarchy: vec![HierarchyNode::none()],
        unk08: 0,
    });
    // Three channel bits set, only two blocks supplied.
    scene.animations.push(castfile::animation::SceneAnimationRecord {
        groups: vec![castfile::animation::GroupAnimationRecord {
            casts: vec![CastAnimationRecord {
                flags: 0b111,
                blocks: vec![ChannelBlockRecord::default(), ChannelBlockRecord::default()],
            }],
        }],
    });
    scene.animation_dictionary.push(castfile::animation::AnimationDictionaryEntry {
        name: "broken".into(),
        index: 0,
    });
    scene.animation_frames.push(castfile::animation::AnimationFrameRecord {
        unk00: 0,
        frame_count: 10.0,
    });
    container.root.scenes.push(scene);
    container.root.dictionary.push(SceneDictionaryEntry {
        name: "main".into(),
        index: 0,
    });

    let err = load_container(&container, Path::new(""), &MapProbe::new(&[])).unwrap_err();
    assert!(matches!(err, Error::TrackCountMismatch { expected: 3, found: 2 }));
}

#[test]
fn scene_names_rekey_through_declared_indices() {
    // Dictionary stored name-sorted: "alpha" names scene 1, "beta" scene 0.
    let mut container = Container::default();
    container.root.scenes.push(SceneRecord::default());
    container.root.scenes.push(SceneRecord::default());
    container.root.dictionary.push(SceneDictionaryEntry {
        name: "alpha".into(),
        index: 1,
    });
    container.root.dictionary.push(SceneDictionaryEntry {
        name: "beta".into(),
        index: 0,
    });

    let project = load_container(&container, Path::new(""), &MapProbe::new(&[]))
        .unwrap()
        .project;
    assert_eq!(project.scenes[0].name, "beta");
    assert_eq!(project.scenes[1].name, "alpha");
}
