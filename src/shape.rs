//! Bounding volumes owned by entities.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::geometry::Aabb;
use crate::trace::Trace;

/// Geometric kind of a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// No volume. Only swept traces can touch it.
    Point,
    /// Sphere around the position.
    Sphere {
        /// Non-negative radius.
        radius: f32,
    },
    /// Axis-aligned box.
    Box {
        /// Non-negative half size along each axis.
        half_extents: Vec3,
    },
}

/// An entity's bounding volume; owns the entity's world position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    position: Vec3,
    kind: ShapeKind,
}

impl Shape {
    /// Shape of `kind` at `position`.
    #[must_use]
    pub const fn new(position: Vec3, kind: ShapeKind) -> Self {
        Self { position, kind }
    }

    /// Volume-less shape at `position`.
    #[must_use]
    pub const fn point(position: Vec3) -> Self {
        Self::new(position, ShapeKind::Point)
    }

    /// Sphere at `position`; negative radii collapse to zero.
    #[must_use]
    pub const fn sphere(position: Vec3, radius: f32) -> Self {
        Self::new(
            position,
            ShapeKind::Sphere {
                radius: radius.max(0.0),
            },
        )
    }

    /// Axis-aligned box at `position`; extents are taken by magnitude.
    #[must_use]
    pub fn cuboid(position: Vec3, half_extents: Vec3) -> Self {
        Self::new(
            position,
            ShapeKind::Box {
                half_extents: half_extents.abs(),
            },
        )
    }

    /// World position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Moves the shape to `position`.
    pub const fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Moves the shape by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Geometric kind.
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Radius of the sphere this shape sweeps when it moves.
    #[must_use]
    pub fn extent(&self) -> f32 {
        match self.kind {
            ShapeKind::Point => 0.0,
            ShapeKind::Sphere { radius } => radius,
            ShapeKind::Box { half_extents } => half_extents.max_element(),
        }
    }

    /// Bounding box at the current position.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        match self.kind {
            ShapeKind::Point => Aabb::new(self.position, self.position),
            ShapeKind::Sphere { radius } => Aabb::from_center(self.position, Vec3::splat(radius)),
            ShapeKind::Box { half_extents } => Aabb::from_center(self.position, half_extents),
        }
    }

    /// Tests the trace against this shape, recording the impact if it is
    /// nearer than the trace's current one.
    pub fn trace(&self, trace: &mut Trace) -> bool {
        match self.kind {
            ShapeKind::Point => {
                trace.extent > 0.0 && sweep_sphere(self.position, trace.extent, trace)
            }
            ShapeKind::Sphere { radius } => {
                sweep_sphere(self.position, radius + trace.extent, trace)
            }
            ShapeKind::Box { half_extents } => {
                let bounds = Aabb::from_center(self.position, half_extents).expanded(trace.extent);
                bounds
                    .segment_entry(trace.start, trace.segment)
                    .is_some_and(|(fraction, normal)| trace.offer(fraction, normal))
            }
        }
    }
}

fn sweep_sphere(centre: Vec3, radius: f32, trace: &mut Trace) -> bool {
    let relative = trace.start - centre;
    let motion = trace.segment;
    let a = motion.length_squared();
    if a <= f32::EPSILON {
        return false;
    }
    let b = relative.dot(motion);
    let c = relative.length_squared() - radius * radius;
    if c < 0.0 {
        // Overlapping already: block only motion that goes deeper.
        return b < 0.0 && trace.offer(0.0, relative.normalize_or(-motion.normalize()));
    }
    let discriminant = b * b - a * c;
    if discriminant < 0.0 {
        return false;
    }
    let fraction = (-b - discriminant.sqrt()) / a;
    let normal = (trace.start + motion * fraction - centre).normalize_or_zero();
    trace.offer(fraction, normal)
}
