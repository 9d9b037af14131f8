//! The persisted demonstration schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use percept_types::CameraCalibration;
use placement_types::{MeshReference, PerRole, PointCloud, RigidPose};

/// One labeled relational-placement demonstration.
///
/// Immutable once built: a record captures exactly what was observed and
/// accepted for a single successful trial. The child's final cloud is the
/// start cloud rigidly transformed by the accepted relative transform;
/// the parent's final cloud equals its start cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoRecord {
    /// Aggregate success flag (always true for persisted records).
    pub success: bool,
    /// Object class names per role.
    pub object_classes: PerRole<String>,
    /// Fused start clouds per role, world coordinates.
    pub start_clouds: PerRole<PointCloud>,
    /// Final clouds per role.
    pub final_clouds: PerRole<PointCloud>,
    /// Start poses per role.
    pub start_poses: PerRole<RigidPose>,
    /// Final poses per role.
    pub final_poses: PerRole<RigidPose>,
    /// Calibration of every camera that contributed to the clouds.
    pub cameras: Vec<CameraCalibration>,
    /// Mesh asset references and scale vectors per role.
    pub meshes: PerRole<MeshReference>,
    /// The accepted relative transform.
    pub relative_transform: RigidPose,
    /// Auxiliary part-pose metadata from the relation proposer, opaque to
    /// the validation pipeline.
    pub part_poses: BTreeMap<String, RigidPose>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use placement_types::ObjectClass;

    fn sample_record() -> DemoRecord {
        let start_child = PointCloud::from_points(vec![Point3::new(0.0, 0.0, 0.1)]);
        let relative = RigidPose::from_position(Point3::new(0.0, 0.0, 0.05));
        DemoRecord {
            success: true,
            object_classes: PerRole::new(
                ObjectClass::Rack.as_str().to_owned(),
                ObjectClass::Mug.as_str().to_owned(),
            ),
            start_clouds: PerRole::new(PointCloud::new(), start_child.clone()),
            final_clouds: PerRole::new(PointCloud::new(), start_child.transformed(&relative)),
            start_poses: PerRole::new(RigidPose::identity(), RigidPose::identity()),
            final_poses: PerRole::new(RigidPose::identity(), relative),
            cameras: Vec::new(),
            meshes: PerRole::new(
                MeshReference::uniform("rack.obj", 1.0),
                MeshReference::uniform("mug.obj", 0.3),
            ),
            relative_transform: relative,
            part_poses: BTreeMap::new(),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: DemoRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_child_final_cloud_is_transformed_start() {
        let record = sample_record();
        let expected = record
            .start_clouds
            .child
            .transformed(&record.relative_transform);
        assert_eq!(record.final_clouds.child, expected);
    }
}
