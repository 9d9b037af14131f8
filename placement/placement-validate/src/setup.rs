//! Trial setup sampling: mesh scales, start poses, container sizing.

use nalgebra::{UnitQuaternion, Vector2, Vector3};
use rand::Rng;
use tracing::warn;

use placement_types::{LoadPoseType, ObjectClass, Point3, RigidPose, ScaleRange};

/// Table region an object's start position is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRegion {
    /// X range (low, high).
    pub x: (f64, f64),
    /// Y range (low, high).
    pub y: (f64, f64),
    /// Table surface height.
    pub table_z: f64,
}

impl SampleRegion {
    /// Creates a region.
    #[must_use]
    pub const fn new(x: (f64, f64), y: (f64, f64), table_z: f64) -> Self {
        Self { x, y, table_z }
    }
}

/// Samples a non-uniform mesh scale from the class range.
///
/// When `randomized` is off this is the class default, uniformly. When on,
/// up to three independent scalars are drawn from the range and arranged
/// by one of five equally likely patterns (all equal, `[a, a, b]`,
/// `[a, b, b]`, `[a, b, a]`, `[a, b, c]`), covering both uniform and
/// mildly anisotropic shapes.
pub fn sample_mesh_scale<R: Rng>(rng: &mut R, range: ScaleRange, randomized: bool) -> Vector3<f64> {
    if !randomized || range.high <= range.low {
        return Vector3::new(range.default, range.default, range.default);
    }
    let a = rng.gen_range(range.low..range.high);
    let b = rng.gen_range(range.low..range.high);
    let c = rng.gen_range(range.low..range.high);
    match rng.gen_range(0..5) {
        0 => Vector3::new(a, a, a),
        1 => Vector3::new(a, a, b),
        2 => Vector3::new(a, b, b),
        3 => Vector3::new(a, b, a),
        _ => Vector3::new(a, b, c),
    }
}

/// Checks that a container parent is large enough for its child and
/// returns a corrective uniform parent scale when it is not.
///
/// Extents are the planar (XY) bounding-box extents of each mesh, scaled
/// and rotated upright. When the child's largest extent exceeds 3/4 of the
/// container's smallest planar extent, the parent is enlarged so the child
/// fits with margin drawn uniformly from [1.5, 2.0).
pub fn container_fit_rescale<R: Rng>(
    rng: &mut R,
    parent_planar_extents: &Vector2<f64>,
    child_planar_extents: &Vector2<f64>,
) -> Option<f64> {
    let child_max = child_planar_extents.x.max(child_planar_extents.y);
    let parent_min = parent_planar_extents.x.min(parent_planar_extents.y);
    if child_max <= 0.75 * parent_min {
        return None;
    }
    let margin = rng.gen_range(1.5..2.0);
    let scale = child_max * margin / parent_min;
    warn!(
        scale,
        child_max, parent_min, "rescaling container parent to fit child"
    );
    Some(scale)
}

/// Samples a start pose for one of the sampled load-pose policies.
///
/// The position is uniform over `region` at table height, and every
/// sampled pose gets an extra uniform body yaw in [-π, π). Under
/// [`LoadPoseType::RandomUpright`] the orientation starts from the class
/// upright; under [`LoadPoseType::AnyPose`] roll and pitch (and yaw,
/// except for classes with restricted tilt) are perturbed uniformly in
/// ±π/3 first.
///
/// Returns `None` for [`LoadPoseType::DemoPose`]: those objects reuse the
/// recorded demonstration pose instead of sampling one.
pub fn sample_start_pose<R: Rng>(
    rng: &mut R,
    class: ObjectClass,
    policy: LoadPoseType,
    region: &SampleRegion,
) -> Option<RigidPose> {
    let base_rotation = match policy {
        LoadPoseType::DemoPose => return None,
        LoadPoseType::RandomUpright => class.upright_rotation(),
        LoadPoseType::AnyPose => {
            let third_pi = std::f64::consts::FRAC_PI_3;
            let roll = rng.gen_range(-third_pi..third_pi);
            let pitch = rng.gen_range(-third_pi..third_pi);
            let yaw = if class.restricted_tilt() {
                0.0
            } else {
                rng.gen_range(-third_pi..third_pi)
            };
            UnitQuaternion::from_euler_angles(roll, pitch, yaw)
        }
    };

    let position = Point3::new(
        rng.gen_range(region.x.0..region.x.1),
        rng.gen_range(region.y.0..region.y.1),
        region.table_z,
    );
    let body_yaw = UnitQuaternion::from_axis_angle(
        &Vector3::z_axis(),
        rng.gen_range(-std::f64::consts::PI..std::f64::consts::PI),
    );
    Some(RigidPose::new(position, body_yaw * base_rotation))
}
