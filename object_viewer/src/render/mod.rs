//! Renderer traits and default implementations.

mod boxes;

use bevy::prelude::*;

use crate::scene::layout::BoxSpec;

pub use boxes::{BoxGridRenderer, BoxMaterialSettings};

/// Spawns the per-object part of a scene. Camera, lights and grid are
/// built by the scene lifecycle; implementations only add object entities
/// as children of `root`, so teardown releases them with the scene.
pub trait ObjectRenderer: Send + Sync + 'static {
    fn spawn_objects(
        &self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        root: Entity,
        boxes: &[BoxSpec],
    );
}

#[derive(Resource)]
pub struct RendererResource(pub Box<dyn ObjectRenderer>);

impl RendererResource {
    pub fn new(renderer: impl ObjectRenderer) -> Self {
        Self(Box::new(renderer))
    }
}

impl Default for RendererResource {
    fn default() -> Self {
        Self::new(BoxGridRenderer::default())
    }
}
