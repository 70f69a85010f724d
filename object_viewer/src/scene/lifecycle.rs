//! Scene lifecycle: build a whole scene from the object list, loop, tear down.
//!
//! Every entity a scene spawns hangs under one [`SceneRoot`], so teardown is
//! a single recursive despawn no matter how far construction got. Per-frame
//! systems only run in [`SceneState::Looping`]; leaving that state stops the
//! old scene's loop before the next one is built.

use bevy::prelude::*;

use crate::camera::{update_orbit_cameras, OrbitControls};
use crate::data::ObjectDescriptor;
use crate::render::RendererResource;
use crate::scene::layout::{plan_boxes, LayoutMode};

const CAMERA_POSITION: Vec3 = Vec3::new(10.0, 10.0, 20.0);
const CAMERA_FOV_DEGREES: f32 = 75.0;
const CAMERA_NEAR: f32 = 0.1;
const CAMERA_FAR: f32 = 1000.0;
const LIGHT_POSITION: Vec3 = Vec3::new(10.0, 20.0, 10.0);
const LIGHT_ILLUMINANCE: f32 = 8_000.0;
const AMBIENT_BRIGHTNESS: f32 = 400.0;
const GRID_SIZE: f32 = 100.0;
const GRID_DIVISIONS: u32 = 50;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SceneState {
    #[default]
    Unmounted,
    Constructing,
    Looping,
}

/// Renderer input. Every replacement bumps the generation.
#[derive(Resource, Debug, Default)]
pub struct SceneObjects {
    objects: Vec<ObjectDescriptor>,
    generation: u64,
}

impl SceneObjects {
    pub fn replace(&mut self, objects: Vec<ObjectDescriptor>) {
        self.objects = objects;
        self.generation += 1;
    }

    pub fn objects(&self) -> &[ObjectDescriptor] {
        &self.objects
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The scene currently on screen.
#[derive(Resource, Debug)]
pub struct ActiveScene {
    pub root: Entity,
    pub generation: u64,
    /// Construction failed and the scene was built without objects.
    pub fallback: bool,
}

/// Per-scene frame counter, advanced once per frame while looping.
#[derive(Resource, Debug)]
pub struct FrameLoop {
    pub generation: u64,
    pub frames: u64,
}

#[derive(Component)]
pub struct SceneRoot;

#[derive(Component)]
pub struct SceneCamera;

/// Marker + data for object box entities.
#[derive(Component, Debug, Clone)]
pub struct ObjectBox {
    pub index: usize,
    pub name: String,
    pub size: Vec3,
}

/// Ground grid drawn each frame by the grid plugin.
#[derive(Component, Debug, Clone, Copy)]
pub struct GroundGrid {
    pub size: f32,
    pub divisions: u32,
}

pub fn scene_plugin(app: &mut App) {
    app.init_state::<SceneState>()
        .init_resource::<SceneObjects>()
        .init_resource::<LayoutMode>()
        .init_resource::<RendererResource>()
        .add_systems(OnEnter(SceneState::Constructing), construct_scene)
        .add_systems(OnExit(SceneState::Looping), teardown_scene)
        .add_systems(OnEnter(SceneState::Unmounted), teardown_scene)
        .add_systems(
            Update,
            (advance_frame_loop, update_orbit_cameras, watch_scene_input)
                .run_if(in_state(SceneState::Looping)),
        );
}

pub fn mount_scene(mut next: ResMut<NextState<SceneState>>) {
    next.set(SceneState::Constructing);
}

#[allow(clippy::too_many_arguments)]
pub fn construct_scene(
    mut commands: Commands,
    objects: Res<SceneObjects>,
    layout: Res<LayoutMode>,
    renderer: Res<RendererResource>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut next: ResMut<NextState<SceneState>>,
) {
    let generation = objects.generation();
    let root = commands
        .spawn((SceneRoot, Transform::default(), Visibility::default()))
        .id();
    spawn_rig(&mut commands, root);

    let fallback = match plan_boxes(objects.objects(), *layout) {
        Ok(boxes) => {
            renderer
                .0
                .spawn_objects(&mut commands, &mut meshes, &mut materials, root, &boxes);
            debug!(generation, boxes = boxes.len(), "scene constructed");
            false
        }
        Err(err) => {
            warn!("scene construction failed, showing blank scene: {err}");
            true
        }
    };

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
    });
    commands.insert_resource(ActiveScene {
        root,
        generation,
        fallback,
    });
    commands.insert_resource(FrameLoop {
        generation,
        frames: 0,
    });
    next.set(SceneState::Looping);
}

/// Camera, lights and ground grid: the part of every scene that does not
/// depend on the objects.
fn spawn_rig(commands: &mut Commands, root: Entity) {
    commands.entity(root).with_children(|parent| {
        parent.spawn((
            SceneCamera,
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: CAMERA_FOV_DEGREES.to_radians(),
                near: CAMERA_NEAR,
                far: CAMERA_FAR,
                ..default()
            }),
            Transform::from_translation(CAMERA_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
            OrbitControls::looking_at(CAMERA_POSITION, Vec3::ZERO),
        ));
        parent.spawn((
            DirectionalLight {
                illuminance: LIGHT_ILLUMINANCE,
                shadows_enabled: true,
                ..default()
            },
            Transform::from_translation(LIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        ));
        parent.spawn((
            GroundGrid {
                size: GRID_SIZE,
                divisions: GRID_DIVISIONS,
            },
            Transform::default(),
            Visibility::default(),
        ));
    });
}

/// Release everything the active scene spawned. Safe to run with no scene.
pub fn teardown_scene(mut commands: Commands, active: Option<Res<ActiveScene>>) {
    let Some(active) = active else {
        return;
    };
    commands.entity(active.root).despawn_recursive();
    commands.remove_resource::<ActiveScene>();
    commands.remove_resource::<FrameLoop>();
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.0,
    });
    debug!(generation = active.generation, "scene torn down");
}

fn advance_frame_loop(frame_loop: Option<ResMut<FrameLoop>>) {
    if let Some(mut frame_loop) = frame_loop {
        frame_loop.frames += 1;
    }
}

/// Rebuild when the object list has been replaced since construction.
fn watch_scene_input(
    objects: Res<SceneObjects>,
    active: Option<Res<ActiveScene>>,
    mut next: ResMut<NextState<SceneState>>,
) {
    let Some(active) = active else {
        return;
    };
    if active.generation != objects.generation() {
        next.set(SceneState::Constructing);
    }
}

#[cfg(test)]
mod tests {
    use bevy::state::app::StatesPlugin;

    use super::*;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_plugins(scene_plugin);
        app
    }

    fn settle(app: &mut App) {
        for _ in 0..3 {
            app.update();
        }
    }

    fn mounted_with(objects: Vec<ObjectDescriptor>) -> App {
        let mut app = test_app();
        app.world_mut().resource_mut::<SceneObjects>().replace(objects);
        app.world_mut()
            .resource_mut::<NextState<SceneState>>()
            .set(SceneState::Constructing);
        settle(&mut app);
        app
    }

    fn replace(app: &mut App, objects: Vec<ObjectDescriptor>) {
        app.world_mut().resource_mut::<SceneObjects>().replace(objects);
        settle(app);
    }

    fn boxes(app: &mut App) -> Vec<(usize, Vec3, Vec3)> {
        let world = app.world_mut();
        let mut found: Vec<_> = world
            .query::<(&ObjectBox, &Transform)>()
            .iter(world)
            .map(|(b, t)| (b.index, b.size, t.translation))
            .collect();
        found.sort_by_key(|(index, _, _)| *index);
        found
    }

    fn count<C: Component>(app: &mut App) -> usize {
        let world = app.world_mut();
        world.query::<&C>().iter(world).count()
    }

    fn state(app: &App) -> SceneState {
        *app.world().resource::<State<SceneState>>().get()
    }

    fn unit(name: &str) -> ObjectDescriptor {
        ObjectDescriptor::sized(name, 1.0, 1.0, 1.0)
    }

    #[test]
    fn starts_unmounted_with_nothing_spawned() {
        let mut app = test_app();
        settle(&mut app);

        assert_eq!(state(&app), SceneState::Unmounted);
        assert_eq!(count::<SceneRoot>(&mut app), 0);
        assert!(app.world().get_resource::<FrameLoop>().is_none());
    }

    #[test]
    fn construction_builds_rig_and_one_box_per_object() {
        let objects = vec![
            ObjectDescriptor::sized("a", 2.0, 1.0, 1.0),
            ObjectDescriptor::sized("b", 1.0, 3.0, 1.0),
            unit("c"),
        ];
        let mut app = mounted_with(objects);

        assert_eq!(state(&app), SceneState::Looping);
        assert_eq!(count::<SceneRoot>(&mut app), 1);
        assert_eq!(count::<SceneCamera>(&mut app), 1);
        assert_eq!(count::<DirectionalLight>(&mut app), 1);
        assert_eq!(count::<GroundGrid>(&mut app), 1);

        let found = boxes(&mut app);
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].1, Vec3::new(2.0, 1.0, 1.0));
        assert_eq!(found[0].2, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(found[1].1, Vec3::new(1.0, 3.0, 1.0));
        assert_eq!(found[1].2, Vec3::new(3.0, 1.5, 0.0));
    }

    #[test]
    fn camera_and_light_follow_fixed_policy() {
        let mut app = mounted_with(Vec::new());
        let world = app.world_mut();

        let (projection, transform) = world
            .query_filtered::<(&Projection, &Transform), With<SceneCamera>>()
            .single(world);
        let Projection::Perspective(perspective) = projection else {
            panic!("scene camera should use a perspective projection");
        };
        assert!((perspective.fov - 75f32.to_radians()).abs() < 1e-6);
        assert!(transform.translation.distance(CAMERA_POSITION) < 1e-3);

        let light = world.query::<&DirectionalLight>().single(world);
        assert!(light.shadows_enabled);
        assert_eq!(
            world.resource::<AmbientLight>().brightness,
            AMBIENT_BRIGHTNESS
        );
    }

    #[test]
    fn replacing_with_empty_list_leaves_no_boxes() {
        let mut app = mounted_with(vec![unit("a")]);
        assert_eq!(boxes(&mut app).len(), 1);

        replace(&mut app, Vec::new());

        assert_eq!(state(&app), SceneState::Looping);
        assert!(boxes(&mut app).is_empty());
        assert_eq!(count::<SceneRoot>(&mut app), 1);
        assert_eq!(count::<SceneCamera>(&mut app), 1);
    }

    #[test]
    fn rebuild_keeps_a_single_frame_loop() {
        let mut app = mounted_with(vec![unit("a")]);
        let first_root = app.world().resource::<ActiveScene>().root;

        replace(&mut app, vec![unit("a"), unit("b")]);
        replace(&mut app, vec![unit("c")]);

        let active = app.world().resource::<ActiveScene>();
        let generation = app.world().resource::<SceneObjects>().generation();
        assert_eq!(active.generation, generation);
        assert_ne!(active.root, first_root);
        assert!(!app.world().entities().contains(first_root));

        let frame_loop = app.world().resource::<FrameLoop>();
        assert_eq!(frame_loop.generation, generation);
        assert_eq!(count::<SceneRoot>(&mut app), 1);
        assert_eq!(count::<SceneCamera>(&mut app), 1);
    }

    #[test]
    fn frame_loop_advances_every_frame_while_looping() {
        let mut app = mounted_with(vec![unit("a")]);
        let before = app.world().resource::<FrameLoop>().frames;

        app.update();
        app.update();

        assert_eq!(app.world().resource::<FrameLoop>().frames, before + 2);
    }

    #[test]
    fn unmount_releases_everything_and_stops_the_loop() {
        let mut app = mounted_with(vec![unit("a"), unit("b")]);

        app.world_mut()
            .resource_mut::<NextState<SceneState>>()
            .set(SceneState::Unmounted);
        settle(&mut app);

        assert_eq!(state(&app), SceneState::Unmounted);
        assert_eq!(count::<SceneRoot>(&mut app), 0);
        assert_eq!(count::<ObjectBox>(&mut app), 0);
        assert_eq!(count::<SceneCamera>(&mut app), 0);
        assert!(app.world().get_resource::<FrameLoop>().is_none());
        assert!(app.world().get_resource::<ActiveScene>().is_none());
        assert_eq!(app.world().resource::<AmbientLight>().brightness, 0.0);
    }

    #[test]
    fn non_finite_input_falls_back_to_blank_scene() {
        let mut app = mounted_with(vec![
            unit("fine"),
            ObjectDescriptor::sized("broken", f64::INFINITY, 1.0, 1.0),
        ]);

        assert_eq!(state(&app), SceneState::Looping);
        assert!(app.world().resource::<ActiveScene>().fallback);
        assert!(boxes(&mut app).is_empty());
        assert_eq!(count::<SceneCamera>(&mut app), 1);

        replace(&mut app, vec![unit("fine")]);

        assert!(!app.world().resource::<ActiveScene>().fallback);
        assert_eq!(boxes(&mut app).len(), 1);
    }

    #[test]
    fn stored_layout_places_boxes_at_their_coordinates() {
        let mut app = test_app();
        app.insert_resource(LayoutMode::Stored);
        app.world_mut()
            .resource_mut::<SceneObjects>()
            .replace(vec![unit("a").at(5.0, 2.0, -1.0)]);
        app.world_mut()
            .resource_mut::<NextState<SceneState>>()
            .set(SceneState::Constructing);
        settle(&mut app);

        assert_eq!(boxes(&mut app)[0].2, Vec3::new(5.0, 2.5, -1.0));
    }
}
