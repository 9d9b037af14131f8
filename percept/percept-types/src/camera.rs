//! Camera calibration types.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use placement_types::RigidPose;

/// Camera intrinsic parameters (pinhole model, no distortion).
///
/// Projects a camera-frame point `[X, Y, Z]` to pixel coordinates:
/// ```text
/// u = fx * X/Z + cx
/// v = fy * Y/Z + cy
/// ```
///
/// # Example
///
/// ```
/// use percept_types::CameraIntrinsics;
///
/// let intrinsics = CameraIntrinsics::ideal(500.0, 640, 480);
/// assert_eq!(intrinsics.cx, 320.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraIntrinsics {
    /// Focal length in pixels (x direction).
    pub fx: f64,
    /// Focal length in pixels (y direction).
    pub fy: f64,
    /// Principal point x-coordinate in pixels.
    pub cx: f64,
    /// Principal point y-coordinate in pixels.
    pub cy: f64,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl CameraIntrinsics {
    /// Creates new camera intrinsics.
    #[must_use]
    pub const fn new(fx: f64, fy: f64, cx: f64, cy: f64, width: u32, height: u32) -> Self {
        Self {
            fx,
            fy,
            cx,
            cy,
            width,
            height,
        }
    }

    /// Creates intrinsics for an ideal pinhole camera centered in the image.
    #[must_use]
    pub fn ideal(focal_length: f64, width: u32, height: u32) -> Self {
        Self {
            fx: focal_length,
            fy: focal_length,
            cx: f64::from(width) / 2.0,
            cy: f64::from(height) / 2.0,
            width,
            height,
        }
    }

    /// Projects a camera-frame point to pixel coordinates.
    ///
    /// Returns `None` if the point is behind the camera (Z ≤ 0).
    #[must_use]
    pub fn project(&self, point: &Point3<f64>) -> Option<[f64; 2]> {
        if point.z <= 0.0 {
            return None;
        }
        Some([
            self.fx * point.x / point.z + self.cx,
            self.fy * point.y / point.z + self.cy,
        ])
    }

    /// Unprojects a pixel at the given depth to a camera-frame point.
    #[must_use]
    pub fn unproject(&self, u: f64, v: f64, depth: f64) -> Point3<f64> {
        Point3::new(
            (u - self.cx) / self.fx * depth,
            (v - self.cy) / self.fy * depth,
            depth,
        )
    }
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        Self::ideal(500.0, 640, 480)
    }
}

/// Camera extrinsics: the camera's pose in the world frame.
///
/// A camera-frame point `p` maps to the world as `pose ∘ p`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraExtrinsics {
    /// Camera-to-world pose.
    pub pose: RigidPose,
}

impl CameraExtrinsics {
    /// Creates extrinsics from a camera-to-world pose.
    #[must_use]
    pub const fn new(pose: RigidPose) -> Self {
        Self { pose }
    }

    /// Transforms a camera-frame point into world coordinates.
    #[must_use]
    pub fn camera_to_world(&self, point: &Point3<f64>) -> Point3<f64> {
        self.pose.transform_point(point)
    }
}

/// A camera's full calibration, as persisted with demonstrations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraCalibration {
    /// Intrinsic parameters.
    pub intrinsics: CameraIntrinsics,
    /// Extrinsic parameters.
    pub extrinsics: CameraExtrinsics,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::UnitQuaternion;

    #[test]
    fn test_project_unproject_round_trip() {
        let intrinsics = CameraIntrinsics::ideal(500.0, 640, 480);
        let point = Point3::new(0.2, -0.1, 1.5);
        let [u, v] = intrinsics.project(&point).unwrap();
        let back = intrinsics.unproject(u, v, point.z);
        assert_relative_eq!(back.coords, point.coords, epsilon = 1e-9);
    }

    #[test]
    fn test_project_behind_camera() {
        let intrinsics = CameraIntrinsics::default();
        assert!(intrinsics.project(&Point3::new(0.0, 0.0, -1.0)).is_none());
    }

    #[test]
    fn test_camera_to_world() {
        let pose = RigidPose::new(
            Point3::new(0.0, 0.0, 1.0),
            UnitQuaternion::from_euler_angles(0.0, 0.0, std::f64::consts::PI),
        );
        let extrinsics = CameraExtrinsics::new(pose);
        let world = extrinsics.camera_to_world(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(world.x, -1.0, epsilon = 1e-9);
        assert_relative_eq!(world.z, 1.0, epsilon = 1e-9);
    }
}
