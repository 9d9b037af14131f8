//! Segmented back-projection of depth pixels.

use nalgebra::Point3;

use percept_types::RgbdFrame;
use placement_types::PointCloud;

/// Back-projects every pixel of `frame` whose segmentation label equals
/// `label` and whose depth is within the sensor's valid range, returning
/// the resulting points in world coordinates.
///
/// Pixels are visited in row-major order, so repeated extraction from the
/// same frame is deterministic.
#[must_use]
pub fn segmented_world_points(frame: &RgbdFrame, label: u32) -> PointCloud {
    let mut points = Vec::new();
    for y in 0..frame.height {
        for x in 0..frame.width {
            if frame.label_at(x, y) != Some(label) {
                continue;
            }
            let Some(depth) = frame.depth_at(x, y) else {
                continue;
            };
            if !frame.is_valid_depth(depth) {
                continue;
            }
            let camera_point: Point3<f64> =
                frame
                    .intrinsics
                    .unproject(f64::from(x), f64::from(y), f64::from(depth));
            points.push(frame.extrinsics.camera_to_world(&camera_point));
        }
    }
    PointCloud::from_points(points)
}
