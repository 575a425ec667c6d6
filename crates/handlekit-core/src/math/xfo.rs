//! Rigid transform with non-uniform scale.
//!
//! `Xfo` stores translation, orientation and scale separately so handles
//! can manipulate one component at a time and serialize the result without
//! going through a matrix.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Translation, orientation and scale.
///
/// Composition follows parent-then-child order: `parent.multiply(&child)`
/// maps a point from the child's frame into the parent's frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Xfo {
    /// Translation
    pub tr: DVec3,
    /// Orientation
    pub ori: DQuat,
    /// Scale
    pub sc: DVec3,
}

impl Xfo {
    /// The identity transform
    pub const IDENTITY: Xfo = Xfo {
        tr: DVec3::ZERO,
        ori: DQuat::IDENTITY,
        sc: DVec3::ONE,
    };

    /// Create a transform from its components
    pub fn new(tr: DVec3, ori: DQuat, sc: DVec3) -> Self {
        Self { tr, ori, sc }
    }

    /// Pure translation
    pub fn from_translation(tr: DVec3) -> Self {
        Self {
            tr,
            ..Self::IDENTITY
        }
    }

    /// Pure rotation
    pub fn from_rotation(ori: DQuat) -> Self {
        Self {
            ori,
            ..Self::IDENTITY
        }
    }

    /// Pure scale
    pub fn from_scale(sc: DVec3) -> Self {
        Self {
            sc,
            ..Self::IDENTITY
        }
    }

    /// Compose `self` (parent) with `other` (child)
    pub fn multiply(&self, other: &Xfo) -> Xfo {
        Xfo {
            tr: self.tr + self.ori * (self.sc * other.tr),
            ori: (self.ori * other.ori).normalize(),
            sc: self.sc * other.sc,
        }
    }

    /// The transform that undoes `self`
    ///
    /// Exact for uniform scale; non-uniform scale combined with rotation is
    /// not representable by an `Xfo` and is approximated per component.
    pub fn inverse(&self) -> Xfo {
        let sc = self.sc.recip();
        let ori = self.ori.inverse();
        Xfo {
            tr: (ori * -self.tr) * sc,
            ori,
            sc,
        }
    }

    /// Map a point from this transform's local frame to its parent frame
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.tr + self.ori * (self.sc * point)
    }

    /// Blend towards `other` by `t`
    pub fn lerp(&self, other: &Xfo, t: f64) -> Xfo {
        Xfo {
            tr: self.tr.lerp(other.tr, t),
            ori: self.ori.slerp(other.ori, t),
            sc: self.sc.lerp(other.sc, t),
        }
    }

    /// Local X axis in the parent frame
    pub fn x_axis(&self) -> DVec3 {
        self.ori * DVec3::X
    }

    /// Local Y axis in the parent frame
    pub fn y_axis(&self) -> DVec3 {
        self.ori * DVec3::Y
    }

    /// Local Z axis in the parent frame
    pub fn z_axis(&self) -> DVec3 {
        self.ori * DVec3::Z
    }

    /// Component-wise comparison within `epsilon`
    ///
    /// Orientations `q` and `-q` describe the same rotation and compare equal.
    pub fn approx_eq(&self, other: &Xfo, epsilon: f64) -> bool {
        self.tr.abs_diff_eq(other.tr, epsilon)
            && self.sc.abs_diff_eq(other.sc, epsilon)
            && (self.ori.abs_diff_eq(other.ori, epsilon)
                || self.ori.abs_diff_eq(-other.ori, epsilon))
    }
}

impl Default for Xfo {
    fn default() -> Self {
        Self::IDENTITY
    }
}
