/// Rigid-body transforms applied in place to a point set
use nalgebra::Matrix3;

use crate::geometry::{Offset, Point, Solid};

/// Rotation matrix composition
pub struct Transform;

impl Transform {
    /// Compose the three angle slots into one rotation matrix.
    ///
    /// The angles are positional: `a1` feeds the `cx`/`sx` terms, `a2` the
    /// `cy`/`sy` terms and `a3` the `cz`/`sz` terms of the matrix below.
    pub fn rotation_matrix(a1: f64, a2: f64, a3: f64) -> Matrix3<f64> {
        let (sx, cx) = a1.sin_cos();
        let (sy, cy) = a2.sin_cos();
        let (sz, cz) = a3.sin_cos();

        Matrix3::new(
            cx * cy,
            cx * sy * sz - sx * cz,
            cx * sy * cz + sx * sz,
            sx * cy,
            sx * sy * sz + cx * cz,
            sx * sy * cz - cx * sz,
            -sy,
            cy * sz,
            cy * cz,
        )
    }
}

/// In-place rotation, translation and scaling of a local-frame point set.
///
/// None of these operations know about a world offset; for a [`Solid`]
/// the `center` is left untouched.
pub trait RigidBody {
    fn points_mut(&mut self) -> &mut [Point];

    /// Replace every point `p` with `R * p`. No re-orthonormalisation is
    /// done, so many small steps drift slowly.
    fn rotate(&mut self, a1: f64, a2: f64, a3: f64) {
        let rotation = Transform::rotation_matrix(a1, a2, a3);
        for point in self.points_mut() {
            *point = rotation * *point;
        }
    }

    /// Add an offset to every local coordinate
    fn shift(&mut self, dx: f64, dy: f64, dz: f64) {
        let delta = Offset::new(dx, dy, dz);
        for point in self.points_mut() {
            *point += delta;
        }
    }

    /// Scale every point about the local origin
    fn enlarge(&mut self, factor: f64) {
        for point in self.points_mut() {
            point.coords *= factor;
        }
    }
}

impl RigidBody for Solid {
    fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }
}
