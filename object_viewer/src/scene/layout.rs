//! Box placement and palette: pure functions from descriptor index to transform.

use bevy::prelude::*;

use crate::data::ObjectDescriptor;

/// Objects per grid row.
pub const ROW_CAPACITY: usize = 5;
/// Gap between neighbouring boxes.
pub const SPACING: f32 = 2.0;
/// Hue step between consecutive objects, in degrees.
pub const HUE_STEP: usize = 60;

/// How boxes are positioned in the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Resource)]
pub enum LayoutMode {
    /// Ignore stored coordinates; arrange by index on a ground grid.
    #[default]
    AutoGrid,
    /// Place each box at its stored `(x, y, z)`, resting on `y`.
    Stored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub column: usize,
}

pub fn grid_cell(index: usize) -> GridCell {
    GridCell {
        row: index / ROW_CAPACITY,
        column: index % ROW_CAPACITY,
    }
}

/// Box centre for the object at `index`.
pub fn object_translation(index: usize, object: &ObjectDescriptor, mode: LayoutMode) -> Vec3 {
    let (w, h, d) = (object.w as f32, object.h as f32, object.d as f32);
    match mode {
        LayoutMode::AutoGrid => {
            let cell = grid_cell(index);
            Vec3::new(
                cell.column as f32 * (w + SPACING),
                h / 2.0,
                cell.row as f32 * (d + SPACING),
            )
        }
        LayoutMode::Stored => {
            Vec3::new(object.x as f32, object.y as f32 + h / 2.0, object.z as f32)
        }
    }
}

/// Hue in degrees; repeats every six objects.
pub fn object_hue(index: usize) -> f32 {
    ((index % (360 / HUE_STEP)) * HUE_STEP) as f32
}

/// Everything needed to spawn one box.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxSpec {
    pub index: usize,
    pub name: String,
    pub size: Vec3,
    pub translation: Vec3,
    pub hue: f32,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("object #{index} ({name:?}) has a non-finite dimension or coordinate")]
    NonFinite { index: usize, name: String },
}

/// Lay out every object, or fail if any of them cannot be placed.
///
/// Finiteness is checked on the `f32` geometry, since values that fit in an
/// `f64` can still overflow once narrowed.
pub fn plan_boxes(
    objects: &[ObjectDescriptor],
    mode: LayoutMode,
) -> Result<Vec<BoxSpec>, SceneError> {
    objects
        .iter()
        .enumerate()
        .map(|(index, object)| {
            let size = Vec3::new(object.w as f32, object.h as f32, object.d as f32);
            let translation = object_translation(index, object, mode);
            if !size.is_finite() || !translation.is_finite() {
                return Err(SceneError::NonFinite {
                    index,
                    name: object.name.clone(),
                });
            }
            Ok(BoxSpec {
                index,
                name: object.name.clone(),
                size,
                translation,
                hue: object_hue(index),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(name: &str) -> ObjectDescriptor {
        ObjectDescriptor::sized(name, 1.0, 1.0, 1.0)
    }

    #[test]
    fn single_box_rests_on_the_ground_at_origin() {
        let boxes = plan_boxes(
            &[ObjectDescriptor::sized("a", 2.0, 1.0, 1.0)],
            LayoutMode::AutoGrid,
        )
        .unwrap();

        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].size, Vec3::new(2.0, 1.0, 1.0));
        assert_eq!(boxes[0].translation, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn sixth_box_wraps_to_second_row() {
        let objects: Vec<_> = (0..6).map(|i| unit(&format!("u{i}"))).collect();

        let boxes = plan_boxes(&objects, LayoutMode::AutoGrid).unwrap();

        let xs: Vec<f32> = boxes[..5].iter().map(|b| b.translation.x).collect();
        assert_eq!(xs, vec![0.0, 3.0, 6.0, 9.0, 12.0]);
        assert!(boxes[..5].iter().all(|b| b.translation.z == 0.0));
        assert_eq!(boxes[5].translation, Vec3::new(0.0, 0.5, 3.0));
    }

    #[test]
    fn grid_cell_uses_floor_division() {
        for index in 0..23 {
            let cell = grid_cell(index);
            assert_eq!(cell.row, index / 5);
            assert_eq!(cell.column, index % 5);
            assert_eq!(grid_cell(index), cell);
        }
        assert_eq!(grid_cell(14), GridCell { row: 2, column: 4 });
    }

    #[test]
    fn hue_repeats_every_six_objects() {
        for index in 0..30 {
            assert_eq!(object_hue(index), object_hue(index + 6));
            assert_eq!(object_hue(index), ((index * 60) % 360) as f32);
        }
        assert_eq!(object_hue(usize::MAX - 1), object_hue((usize::MAX - 1) % 6));
    }

    #[test]
    fn auto_grid_ignores_stored_coordinates() {
        let object = unit("placed").at(40.0, 7.0, -3.0);

        assert_eq!(
            object_translation(0, &object, LayoutMode::AutoGrid),
            Vec3::new(0.0, 0.5, 0.0)
        );
    }

    #[test]
    fn stored_layout_honours_coordinates() {
        let object = ObjectDescriptor::sized("placed", 1.0, 4.0, 1.0).at(40.0, 7.0, -3.0);

        assert_eq!(
            object_translation(3, &object, LayoutMode::Stored),
            Vec3::new(40.0, 9.0, -3.0)
        );
    }

    #[test]
    fn degenerate_sizes_are_kept() {
        let boxes = plan_boxes(
            &[ObjectDescriptor::sized("flat", 0.0, -1.0, 2.0)],
            LayoutMode::AutoGrid,
        )
        .unwrap();

        assert_eq!(boxes[0].size, Vec3::new(0.0, -1.0, 2.0));
    }

    #[test]
    fn non_finite_object_fails_planning() {
        let objects = vec![unit("ok"), ObjectDescriptor::sized("bad", f64::NAN, 1.0, 1.0)];

        let err = plan_boxes(&objects, LayoutMode::AutoGrid).unwrap_err();

        assert_eq!(
            err,
            SceneError::NonFinite {
                index: 1,
                name: "bad".into(),
            }
        );
    }

    #[test]
    fn saturated_dimension_overflows_f32_and_fails_planning() {
        let huge = ObjectDescriptor::sized("huge", u128::MAX as f64, 1.0, 1.0);
        assert!(huge.is_finite());

        let err = plan_boxes(&[huge], LayoutMode::AutoGrid).unwrap_err();

        assert_eq!(
            err,
            SceneError::NonFinite {
                index: 0,
                name: "huge".into(),
            }
        );
    }

    #[test]
    fn stored_height_overflow_fails_planning() {
        let object = ObjectDescriptor::sized("tall", 1.0, 3.0e38, 1.0).at(0.0, 3.0e38, 0.0);

        let err = plan_boxes(&[object], LayoutMode::Stored).unwrap_err();

        assert!(matches!(err, SceneError::NonFinite { index: 0, .. }));
    }
}
