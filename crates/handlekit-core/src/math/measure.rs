//! Geometry behind radius and angle measurements.

use super::Xfo;
use glam::DVec3;

/// Rounded feature a radius can be measured on. The feature's axis is the
/// Z axis of its transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadialFeature {
    Circle,
    Cylinder,
}

/// End points of a radius measurement taken at `hit`.
///
/// Returns the point on the feature's axis and the point on its rim that
/// face `hit`. `radius` is in the feature's local units and is scaled by
/// the transform's X scale. `None` when `hit` lies on the axis.
pub fn measure_radius(
    feature: RadialFeature,
    xfo: &Xfo,
    radius: f64,
    hit: DVec3,
) -> Option<(DVec3, DVec3)> {
    let zaxis = xfo.z_axis().normalize_or_zero();
    let to_hit = hit - xfo.tr;
    let along = zaxis * to_hit.dot(zaxis);
    let axis_pos = match feature {
        RadialFeature::Circle => xfo.tr,
        RadialFeature::Cylinder => xfo.tr + along,
    };
    let outward = to_hit - along;
    let length = outward.length();
    if length == 0.0 {
        return None;
    }
    let edge_pos = axis_pos + outward * (radius * xfo.sc.x / length);
    Some((axis_pos, edge_pos))
}

/// Angle between two faces, each given by a point on it and its normal as Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleMeasurement {
    /// Angle between the face tangents, in radians
    pub angle: f64,
    /// Direction from each face point towards the shared edge
    pub tangents: [DVec3; 2],
    /// Distance from each face point to the point nearest the other tangent
    pub distances: [f64; 2],
    /// Midpoint of the two nearest points, where a label goes
    pub label_pos: DVec3,
}

/// Measure the angle between the faces through `a` and `b`.
///
/// The tangents lie in each face, perpendicular to the edge both faces
/// share. `None` for parallel faces, which have no shared edge.
pub fn measure_angle(a: &Xfo, b: &Xfo) -> Option<AngleMeasurement> {
    let norm_a = a.z_axis().normalize_or_zero();
    let norm_b = b.z_axis().normalize_or_zero();
    let axis = norm_a.cross(norm_b).normalize_or_zero();
    if axis == DVec3::ZERO {
        return None;
    }
    let tangent_a = axis.cross(norm_a).normalize();
    let tangent_b = axis.cross(norm_b).normalize();

    let [dist_a, dist_b] = closest_ray_params(a.tr, tangent_a, b.tr, tangent_b)?;
    let near_a = a.tr + tangent_a * dist_a;
    let near_b = b.tr + tangent_b * dist_b;

    Some(AngleMeasurement {
        angle: tangent_a.angle_between(tangent_b),
        tangents: [tangent_a, tangent_b],
        distances: [dist_a, dist_b],
        label_pos: (near_a + near_b) * 0.5,
    })
}

/// Parameters along two unit rays of their mutually closest points
fn closest_ray_params(p: DVec3, u: DVec3, q: DVec3, v: DVec3) -> Option<[f64; 2]> {
    let w = p - q;
    let b = u.dot(v);
    let d = u.dot(w);
    let e = v.dot(w);
    let denom = 1.0 - b * b;
    if denom.abs() < 1e-12 {
        return None;
    }
    Some([(b * e - d) / denom, (e - b * d) / denom])
}
