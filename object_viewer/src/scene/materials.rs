//! Material helpers for object boxes.

use bevy::prelude::*;

/// Fully saturated, mid-lightness colour for a hue in degrees.
pub fn hue_color(hue: f32) -> Color {
    Color::hsl(hue, 1.0, 0.5)
}

pub fn box_material(
    materials: &mut Assets<StandardMaterial>,
    hue: f32,
    metallic: f32,
    roughness: f32,
) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: hue_color(hue),
        metallic,
        perceptual_roughness: roughness,
        ..default()
    })
}
