pub(crate) mod grid;
pub mod layout;
mod lifecycle;
pub(crate) mod materials;

pub use grid::grid_plugin;
pub use layout::{BoxSpec, LayoutMode, SceneError};
pub use lifecycle::{
    construct_scene, mount_scene, scene_plugin, teardown_scene, ActiveScene, FrameLoop,
    GroundGrid, ObjectBox, SceneCamera, SceneObjects, SceneRoot, SceneState,
};
