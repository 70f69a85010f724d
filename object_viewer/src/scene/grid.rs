//! Ground grid, redrawn with gizmos every looping frame.

use std::f32::consts::FRAC_PI_2;

use bevy::math::Isometry3d;
use bevy::prelude::*;

use crate::scene::{GroundGrid, SceneState};

const GRID_COLOR: Color = Color::srgb(0.35, 0.35, 0.35);

pub fn grid_plugin(app: &mut App) {
    app.add_systems(
        Update,
        draw_ground_grid.run_if(in_state(SceneState::Looping)),
    );
}

fn draw_ground_grid(mut gizmos: Gizmos, grids: Query<(&GroundGrid, &GlobalTransform)>) {
    for (grid, transform) in &grids {
        let divisions = grid.divisions.max(1);
        let cell = grid.size / divisions as f32;
        // Gizmo grids lie in the local XY plane; tip it onto XZ.
        let isometry = Isometry3d::new(
            transform.translation(),
            Quat::from_rotation_x(FRAC_PI_2),
        );
        gizmos.grid(isometry, UVec2::splat(divisions), Vec2::splat(cell), GRID_COLOR);
    }
}
