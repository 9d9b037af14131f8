//! Object identity: roles, classes, and per-trial observations.
//!
//! The supported object classes form a closed set. Class-specific behavior
//! (canonical upright orientation, mesh-scale ranges, the body axis checked
//! by upright criteria) lives in a lookup table on [`ObjectClass`] instead
//! of string dispatch, so an unsupported class is unrepresentable.

use std::fmt;
use std::path::PathBuf;

use nalgebra::{UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cloud::PointCloud;
use crate::pose::RigidPose;

/// Which side of the spatial relation an object plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObjectRole {
    /// The object the relation is anchored on.
    Parent,
    /// The object being placed relative to the parent.
    Child,
}

impl ObjectRole {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Child => "child",
        }
    }
}

impl fmt::Display for ObjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parent/child pair of values, indexed by [`ObjectRole`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PerRole<T> {
    /// The parent-side value.
    pub parent: T,
    /// The child-side value.
    pub child: T,
}

impl<T> PerRole<T> {
    /// Creates a pair.
    pub const fn new(parent: T, child: T) -> Self {
        Self { parent, child }
    }

    /// Borrows the value for `role`.
    pub const fn get(&self, role: ObjectRole) -> &T {
        match role {
            ObjectRole::Parent => &self.parent,
            ObjectRole::Child => &self.child,
        }
    }

    /// Mutably borrows the value for `role`.
    pub fn get_mut(&mut self, role: ObjectRole) -> &mut T {
        match role {
            ObjectRole::Parent => &mut self.parent,
            ObjectRole::Child => &mut self.child,
        }
    }

    /// Applies `f` to both sides.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerRole<U> {
        PerRole {
            parent: f(self.parent),
            child: f(self.child),
        }
    }

    /// Borrowing view of both sides.
    pub const fn as_ref(&self) -> PerRole<&T> {
        PerRole {
            parent: &self.parent,
            child: &self.child,
        }
    }
}

/// Closed set of object classes with known loading behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObjectClass {
    /// ShapeNet mug.
    Mug,
    /// ShapeNet bowl.
    Bowl,
    /// ShapeNet bottle.
    Bottle,
    /// Manually modeled hanging rack.
    Rack,
    /// Procedurally generated rack, easy variant.
    SynRackEasy,
    /// Procedurally generated rack, hard variant.
    SynRackHard,
    /// Procedurally generated cuboid.
    Cuboid,
    /// Open-top box container.
    BoxContainer,
}

/// Inclusive mesh-scale range with a nominal default.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScaleRange {
    /// Lower bound.
    pub low: f64,
    /// Upper bound.
    pub high: f64,
    /// Value used when randomized scaling is off.
    pub default: f64,
}

impl ScaleRange {
    const fn new(low: f64, high: f64, default: f64) -> Self {
        Self { low, high, default }
    }

    /// Fixed scale (no randomization range).
    const fn fixed(value: f64) -> Self {
        Self {
            low: value,
            high: value,
            default: value,
        }
    }
}

impl ObjectClass {
    /// Every supported class.
    pub const ALL: [Self; 8] = [
        Self::Mug,
        Self::Bowl,
        Self::Bottle,
        Self::Rack,
        Self::SynRackEasy,
        Self::SynRackHard,
        Self::Cuboid,
        Self::BoxContainer,
    ];

    /// Stable snake_case name, used in persisted records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mug => "mug",
            Self::Bowl => "bowl",
            Self::Bottle => "bottle",
            Self::Rack => "rack",
            Self::SynRackEasy => "syn_rack_easy",
            Self::SynRackHard => "syn_rack_hard",
            Self::Cuboid => "cuboid",
            Self::BoxContainer => "box_container",
        }
    }

    /// Canonical upright orientation for this class.
    ///
    /// ShapeNet meshes for mugs, bowls and bottles are authored with the
    /// opening along −Y, so upright is a roll of π/2 about X; the remaining
    /// classes are authored upright.
    #[must_use]
    pub fn upright_rotation(self) -> UnitQuaternion<f64> {
        match self {
            Self::Mug | Self::Bowl | Self::Bottle => {
                UnitQuaternion::from_euler_angles(std::f64::consts::FRAC_PI_2, 0.0, 0.0)
            }
            _ => UnitQuaternion::identity(),
        }
    }

    /// Mesh-scale sampling range for this class.
    #[must_use]
    pub const fn scale_range(self) -> ScaleRange {
        match self {
            Self::Mug => ScaleRange::new(0.25, 0.45, 0.3),
            Self::Bowl => ScaleRange::new(0.2, 0.4, 0.3),
            Self::Bottle => ScaleRange::new(0.15, 0.45, 0.3),
            Self::SynRackEasy | Self::SynRackHard => ScaleRange::new(0.25, 0.45, 0.3),
            Self::BoxContainer => ScaleRange::new(0.8, 1.2, 1.0),
            Self::Rack | Self::Cuboid => ScaleRange::fixed(1.0),
        }
    }

    /// Body axis that points to world-up when the object stands upright.
    ///
    /// Rolled ShapeNet classes carry their symmetry axis along body Y; the
    /// upright-authored classes along body Z.
    #[must_use]
    pub fn upright_axis(self) -> Vector3<f64> {
        match self {
            Self::Mug | Self::Bowl | Self::Bottle => Vector3::y(),
            _ => Vector3::z(),
        }
    }

    /// Whether instances are pinned to the world by a constraint while
    /// loaded (thin racks tip over before the trial otherwise).
    #[must_use]
    pub const fn world_fixed_while_loaded(self) -> bool {
        matches!(self, Self::SynRackEasy | Self::SynRackHard)
    }

    /// Whether arbitrary-pose sampling may only tilt (roll/pitch), keeping
    /// yaw for the separate body-yaw randomization.
    #[must_use]
    pub const fn restricted_tilt(self) -> bool {
        matches!(self, Self::Bowl | Self::Bottle)
    }
}

impl fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an object's initial pose is chosen when loaded into the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LoadPoseType {
    /// Arbitrary orientation; the placement composer re-grounds the parent
    /// to its canonical upright orientation.
    AnyPose,
    /// Start pose taken from a recorded demonstration.
    DemoPose,
    /// Upright orientation with randomized position and yaw.
    RandomUpright,
}

/// Reference to the object's mesh asset and its applied scale.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshReference {
    /// Visual mesh path.
    pub path: PathBuf,
    /// Pre-computed convex decomposition used for collision, if present.
    pub collision_path: Option<PathBuf>,
    /// Non-uniform scale applied to the mesh.
    pub scale: Vector3<f64>,
}

impl MeshReference {
    /// Creates a reference with uniform scale.
    #[must_use]
    pub fn uniform(path: impl Into<PathBuf>, scale: f64) -> Self {
        Self {
            path: path.into(),
            collision_path: None,
            scale: Vector3::new(scale, scale, scale),
        }
    }

    /// Creates a reference with a non-uniform scale vector.
    #[must_use]
    pub fn scaled(path: impl Into<PathBuf>, scale: Vector3<f64>) -> Self {
        Self {
            path: path.into(),
            collision_path: None,
            scale,
        }
    }

    /// Sets the collision-mesh path.
    #[must_use]
    pub fn with_collision_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.collision_path = Some(path.into());
        self
    }
}

/// Everything sensed about one object at trial start.
///
/// Created once after fusion and read-only from then on; both the placement
/// composer and the stress test derive their geometry from this snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectObservation {
    /// The role this object plays in the relation.
    pub role: ObjectRole,
    /// The object's class.
    pub class: ObjectClass,
    /// Fused, outlier-filtered point cloud in world coordinates.
    pub cloud: PointCloud,
    /// The object's pose when the cloud was captured.
    pub start_pose: RigidPose,
    /// Mesh asset and scale.
    pub mesh: MeshReference,
}
