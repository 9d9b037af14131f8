//! Rigid-body pose representation.
//!
//! A [`RigidPose`] is a position plus a unit-quaternion orientation. Poses
//! are immutable: every derived pose is produced by composition or
//! inversion, never by in-place mutation, so a validated pose stays valid
//! for its whole lifetime.
//!
//! Raw orientation data entering from outside (simulator state, serialized
//! demonstrations, sensor calibration) is validated at construction. A
//! quaternion whose norm deviates from 1 by more than [`UNIT_TOLERANCE`],
//! or a matrix whose rotation block is not orthonormal, is rejected with
//! [`PlacementError::MalformedQuaternion`] /
//! [`PlacementError::NonOrthonormalRotation`] rather than silently
//! renormalized.

use nalgebra::{Isometry3, Matrix3, Matrix4, Point3, Quaternion, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PlacementError, Result};

/// Maximum deviation from unit norm (quaternions) or orthonormality
/// (rotation matrices) accepted by the validating constructors.
pub const UNIT_TOLERANCE: f64 = 1e-6;

/// Position and orientation of a rigid body.
///
/// # Example
///
/// ```
/// use placement_types::RigidPose;
/// use nalgebra::Point3;
///
/// let pose = RigidPose::from_position(Point3::new(1.0, 2.0, 3.0));
/// let local = Point3::new(1.0, 0.0, 0.0);
/// assert_eq!(pose.transform_point(&local), Point3::new(2.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RigidPose {
    /// Position in the ambient frame.
    pub position: Point3<f64>,
    /// Orientation as a unit quaternion.
    pub rotation: UnitQuaternion<f64>,
}

impl Default for RigidPose {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidPose {
    /// The identity pose (origin, no rotation).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Creates a pose from position and an already-unit rotation.
    #[must_use]
    pub const fn new(position: Point3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self { position, rotation }
    }

    /// Creates a pose from position only (identity rotation).
    #[must_use]
    pub fn from_position(position: Point3<f64>) -> Self {
        Self {
            position,
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Validates a raw quaternion and builds a pose from it.
    ///
    /// The quaternion is given in `(x, y, z, w)` component order. Residual
    /// floating-point error within [`UNIT_TOLERANCE`] is folded back onto
    /// the unit sphere; anything larger is malformed input.
    ///
    /// # Errors
    ///
    /// [`PlacementError::MalformedQuaternion`] if the norm deviates from 1
    /// by more than [`UNIT_TOLERANCE`].
    pub fn from_quaternion(position: Point3<f64>, xyzw: [f64; 4]) -> Result<Self> {
        let quat = Quaternion::new(xyzw[3], xyzw[0], xyzw[1], xyzw[2]);
        let norm = quat.norm();
        if !norm.is_finite() || (norm - 1.0).abs() > UNIT_TOLERANCE {
            return Err(PlacementError::MalformedQuaternion { norm });
        }
        Ok(Self {
            position,
            rotation: UnitQuaternion::new_normalize(quat),
        })
    }

    /// Builds a pose from the flat `[x, y, z, qx, qy, qz, qw]` layout used
    /// by simulator state queries and persisted demonstrations.
    ///
    /// # Errors
    ///
    /// [`PlacementError::MalformedQuaternion`] if the orientation part is
    /// not a unit quaternion.
    pub fn from_flat(flat: &[f64; 7]) -> Result<Self> {
        Self::from_quaternion(
            Point3::new(flat[0], flat[1], flat[2]),
            [flat[3], flat[4], flat[5], flat[6]],
        )
    }

    /// Returns the flat `[x, y, z, qx, qy, qz, qw]` form of this pose.
    #[must_use]
    pub fn to_flat(&self) -> [f64; 7] {
        let q = self.rotation.quaternion();
        [
            self.position.x,
            self.position.y,
            self.position.z,
            q.i,
            q.j,
            q.k,
            q.w,
        ]
    }

    /// Validates a 4×4 homogeneous matrix and builds a pose from it.
    ///
    /// # Errors
    ///
    /// [`PlacementError::NonOrthonormalRotation`] if the top-left 3×3 block
    /// is not a proper rotation (orthonormal, determinant +1) within
    /// [`UNIT_TOLERANCE`], or if the bottom row is not `[0, 0, 0, 1]`.
    pub fn from_matrix(matrix: &Matrix4<f64>) -> Result<Self> {
        let bottom = matrix.row(3);
        let bottom_dev = (bottom[0].abs())
            .max(bottom[1].abs())
            .max(bottom[2].abs())
            .max((bottom[3] - 1.0).abs());
        let rot: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let ortho_dev = (rot * rot.transpose() - Matrix3::identity()).norm();
        let det_dev = (rot.determinant() - 1.0).abs();
        let deviation = bottom_dev.max(ortho_dev).max(det_dev);
        if !deviation.is_finite() || deviation > UNIT_TOLERANCE {
            return Err(PlacementError::NonOrthonormalRotation { deviation });
        }
        Ok(Self {
            position: Point3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]),
            rotation: UnitQuaternion::from_rotation_matrix(
                &nalgebra::Rotation3::from_matrix_unchecked(rot),
            ),
        })
    }

    /// Returns the 4×4 homogeneous matrix form of this pose.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix4<f64> {
        self.to_isometry().to_homogeneous()
    }

    /// Creates a pose from an isometry.
    #[must_use]
    pub fn from_isometry(iso: Isometry3<f64>) -> Self {
        Self {
            position: Point3::from(iso.translation.vector),
            rotation: iso.rotation,
        }
    }

    /// Converts to an isometry.
    #[must_use]
    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(self.position.coords.into(), self.rotation)
    }

    /// Returns this pose with the orientation replaced and the position
    /// kept. Used for canonical re-grounding of arbitrarily oriented
    /// bodies.
    #[must_use]
    pub const fn with_rotation(&self, rotation: UnitQuaternion<f64>) -> Self {
        Self {
            position: self.position,
            rotation,
        }
    }

    /// Returns this pose translated by `offset` in the ambient frame.
    #[must_use]
    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        Self {
            position: self.position + offset,
            rotation: self.rotation,
        }
    }

    /// Transforms a point from this pose's local frame to the ambient frame.
    #[must_use]
    pub fn transform_point(&self, local: &Point3<f64>) -> Point3<f64> {
        self.position + self.rotation * local.coords
    }

    /// Transforms a vector (rotation only).
    #[must_use]
    pub fn transform_vector(&self, local: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * local
    }

    /// Composes two poses: `self ∘ other`, i.e. `other` applied within
    /// `self`'s frame. This convention is fixed; every piece of placement
    /// geometry relies on it.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            position: self.transform_point(&other.position),
            rotation: self.rotation * other.rotation,
        }
    }

    /// Computes the inverse pose, so that `self ∘ self⁻¹` is the identity
    /// within floating tolerance.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv_rotation = self.rotation.inverse();
        Self {
            position: Point3::from(-(inv_rotation * self.position.coords)),
            rotation: inv_rotation,
        }
    }

    /// Angular distance to another pose's orientation, in radians.
    #[must_use]
    pub fn angle_to(&self, other: &Self) -> f64 {
        self.rotation.angle_to(&other.rotation)
    }

    /// Checks that the pose contains no `NaN` or `Inf` values.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.coords.iter().all(|x| x.is_finite())
            && self.rotation.coords.iter().all(|x| x.is_finite())
    }
}
