//! Geometry primitives used by shapes, scenery, and traces.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A plane `normal · p = offset` with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Plane {
    /// Unit normal, or zero for the degenerate plane.
    pub normal: Vec3,
    /// Distance of the plane from the origin along `normal`.
    pub offset: f32,
}

impl Plane {
    /// Builds a plane through `point` facing `normal`.
    ///
    /// The normal is normalised; a degenerate normal yields the zero plane.
    #[must_use]
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let unit = normal.normalize_or_zero();
        Self {
            normal: unit,
            offset: unit.dot(point),
        }
    }

    /// Signed distance of `point` from the plane.
    #[must_use]
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.offset
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Lowest corner.
    pub min: Vec3,
    /// Highest corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box spanning two opposite corners given in any order.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box of `half_extents` around `center`.
    #[must_use]
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Box enclosing a segment swept by a sphere of radius `extent`.
    #[must_use]
    pub fn of_segment(start: Vec3, segment: Vec3, extent: f32) -> Self {
        let pad = Vec3::splat(extent.max(0.0));
        let end = start + segment;
        Self {
            min: start.min(end) - pad,
            max: start.max(end) + pad,
        }
    }

    /// Smallest box enclosing every point, or `None` for an empty slice.
    #[must_use]
    pub fn enclosing(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::new(*first, *first), |acc, p| Self {
            min: acc.min.min(*p),
            max: acc.max.max(*p),
        }))
    }

    /// Smallest box enclosing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Whether `other` lies entirely inside this box.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }

    /// Whether the boxes share any point, touching included.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Whether `point` lies inside or on the box.
    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.min.cmple(point).all() && self.max.cmpge(point).all()
    }

    /// Box grown by `amount` on every side; negative amounts are ignored.
    #[must_use]
    pub fn expanded(&self, amount: f32) -> Self {
        let pad = Vec3::splat(amount.max(0.0));
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Slab test of a segment against the box.
    ///
    /// Returns the entry fraction and the face normal hit. A segment starting
    /// inside the box reports no entry.
    #[must_use]
    pub fn segment_entry(&self, start: Vec3, segment: Vec3) -> Option<(f32, Vec3)> {
        const AXES: [Vec3; 3] = [Vec3::X, Vec3::Y, Vec3::Z];
        let mut enter = 0.0_f32;
        let mut exit = 1.0_f32;
        let mut normal = Vec3::ZERO;
        for axis in AXES {
            let origin = start.dot(axis);
            let delta = segment.dot(axis);
            let (lo, hi) = (self.min.dot(axis), self.max.dot(axis));
            if delta.abs() < f32::EPSILON {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }
            let (near, far, face) = if delta > 0.0 {
                ((lo - origin) / delta, (hi - origin) / delta, -axis)
            } else {
                ((hi - origin) / delta, (lo - origin) / delta, axis)
            };
            if near > enter {
                enter = near;
                normal = face;
            }
            exit = exit.min(far);
            if enter > exit {
                return None;
            }
        }
        (normal != Vec3::ZERO).then_some((enter, normal))
    }
}

/// A one-sided scenery triangle.
///
/// The front face is the side the counter-clockwise winding of `a, b, c`
/// points at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// First vertex.
    pub a: Vec3,
    /// Second vertex.
    pub b: Vec3,
    /// Third vertex.
    pub c: Vec3,
}

impl Triangle {
    /// Triangle with the given counter-clockwise vertices.
    #[must_use]
    pub const fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Supporting plane facing the front side.
    #[must_use]
    pub fn plane(&self) -> Plane {
        Plane::from_point_normal(self.a, (self.b - self.a).cross(self.c - self.a))
    }

    /// Tight bounding box.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.a.min(self.b).min(self.c), self.a.max(self.b).max(self.c))
    }

    /// Whether `point`, assumed on the triangle's plane, lies inside it.
    #[must_use]
    pub fn contains_coplanar(&self, point: Vec3, normal: Vec3) -> bool {
        let edges = [(self.a, self.b), (self.b, self.c), (self.c, self.a)];
        edges
            .iter()
            .all(|(from, to)| (*to - *from).cross(point - *from).dot(normal) >= -1e-4)
    }

    /// Sweeps a sphere of radius `extent` along the segment against the front
    /// face.
    ///
    /// Returns the fraction where the sphere touches the face and the contact
    /// normal. Back-face and parallel motions never hit.
    #[must_use]
    pub fn sweep(&self, start: Vec3, segment: Vec3, extent: f32) -> Option<(f32, Vec3)> {
        let plane = self.plane();
        if plane.normal == Vec3::ZERO {
            return None;
        }
        let from = plane.distance(start) - extent;
        let to = plane.distance(start + segment) - extent;
        if from < -extent.max(0.0) - 1e-4 || to >= 0.0 || from - to <= f32::EPSILON {
            return None;
        }
        let fraction = (from / (from - to)).max(0.0);
        let centre = start + segment * fraction;
        let contact = centre - plane.normal * (plane.distance(centre));
        self.contains_coplanar(contact, plane.normal)
            .then_some((fraction, plane.normal))
    }
}
