use bevy::prelude::*;

use crate::render::ObjectRenderer;
use crate::scene::layout::BoxSpec;
use crate::scene::{materials, ObjectBox};

#[derive(Clone, Debug)]
pub struct BoxMaterialSettings {
    pub metallic: f32,
    pub roughness: f32,
}

impl Default for BoxMaterialSettings {
    fn default() -> Self {
        Self {
            metallic: 0.3,
            roughness: 0.5,
        }
    }
}

/// One solid box per object, coloured by index.
#[derive(Default)]
pub struct BoxGridRenderer {
    pub settings: BoxMaterialSettings,
}

impl ObjectRenderer for BoxGridRenderer {
    fn spawn_objects(
        &self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        root: Entity,
        boxes: &[BoxSpec],
    ) {
        commands.entity(root).with_children(|parent| {
            for spec in boxes {
                let material = materials::box_material(
                    materials,
                    spec.hue,
                    self.settings.metallic,
                    self.settings.roughness,
                );
                parent.spawn((
                    Mesh3d(meshes.add(Cuboid::new(spec.size.x, spec.size.y, spec.size.z))),
                    MeshMaterial3d(material),
                    Transform::from_translation(spec.translation),
                    Visibility::Visible,
                    ObjectBox {
                        index: spec.index,
                        name: spec.name.clone(),
                        size: spec.size,
                    },
                ));
            }
        });
    }
}
