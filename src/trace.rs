//! Segment traces and their accumulated nearest-impact result.

use glam::Vec3;

use crate::category::SlotRef;
use crate::geometry::Plane;
use crate::vector_math::point_along;
use crate::TRACE_EPSILON;

/// A segment-versus-world collision query.
///
/// The input half is the origin, the segment vector, and the radius of the
/// sphere swept along it (zero for ray casts). The output half is rewritten as
/// candidates are tested; every accepted candidate is strictly nearer than
/// the previous one, so after traversal the trace holds the nearest impact.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// Origin of the segment.
    pub start: Vec3,
    /// Segment vector from `start` to the end point.
    pub segment: Vec3,
    /// Radius of the swept sphere.
    pub extent: f32,
    /// Fraction of the segment travelled before the impact; `1.0` means none.
    pub fraction_impact: f32,
    /// Impact fraction backed off by [`TRACE_EPSILON`], used to place
    /// sliding movers.
    pub fraction_real: f32,
    /// Plane to slide along at the nearest impact.
    pub correction: Plane,
    /// Dynamic entity that produced the nearest impact, if any.
    pub target: Option<SlotRef>,
}

/// Impact fields of a trace captured at one point of the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactSnapshot {
    /// Captured [`Trace::fraction_impact`].
    pub fraction_impact: f32,
    /// Captured [`Trace::fraction_real`].
    pub fraction_real: f32,
    /// Captured [`Trace::correction`].
    pub correction: Plane,
    /// Captured [`Trace::target`].
    pub target: Option<SlotRef>,
}

impl Trace {
    /// A ray cast with no volume.
    #[must_use]
    pub fn ray(start: Vec3, segment: Vec3) -> Self {
        Self::swept(start, segment, 0.0)
    }

    /// A sphere of radius `extent` swept along the segment.
    #[must_use]
    pub fn swept(start: Vec3, segment: Vec3, extent: f32) -> Self {
        Self {
            start,
            segment,
            extent: extent.max(0.0),
            fraction_impact: 1.0,
            fraction_real: 1.0,
            correction: Plane::default(),
            target: None,
        }
    }

    /// Whether any impact has been recorded.
    #[must_use]
    pub const fn is_impact(&self) -> bool {
        self.fraction_impact < 1.0
    }

    /// End point of the segment.
    #[must_use]
    pub fn end(&self) -> Vec3 {
        self.start + self.segment
    }

    /// World position of the nearest impact along the segment.
    #[must_use]
    pub fn impact_point(&self) -> Vec3 {
        point_along(self.start, self.segment, self.fraction_impact)
    }

    /// Position a mover may safely occupy after the impact.
    #[must_use]
    pub fn rest_point(&self) -> Vec3 {
        point_along(self.start, self.segment, self.fraction_real)
    }

    /// Records a candidate impact if it is nearer than the current one.
    ///
    /// Returns whether the candidate was accepted.
    pub fn offer(&mut self, fraction: f32, normal: Vec3) -> bool {
        if !(0.0..self.fraction_impact).contains(&fraction) {
            return false;
        }
        let length = self.segment.length();
        let backoff = if length > 0.0 {
            TRACE_EPSILON / length
        } else {
            0.0
        };
        let centre = point_along(self.start, self.segment, fraction);
        self.set_impact(
            Plane::from_point_normal(centre, normal),
            fraction,
            (fraction - backoff).max(0.0),
        );
        true
    }

    /// Overwrites the impact fields.
    pub const fn set_impact(&mut self, correction: Plane, fraction_impact: f32, fraction_real: f32) {
        self.correction = correction;
        self.fraction_impact = fraction_impact;
        self.fraction_real = fraction_real;
    }

    /// Captures the current impact fields.
    #[must_use]
    pub const fn snapshot(&self) -> ImpactSnapshot {
        ImpactSnapshot {
            fraction_impact: self.fraction_impact,
            fraction_real: self.fraction_real,
            correction: self.correction,
            target: self.target,
        }
    }

    /// Force-overwrites the impact fields with a previously captured state.
    pub const fn restore(&mut self, snapshot: ImpactSnapshot) {
        self.set_impact(
            snapshot.correction,
            snapshot.fraction_impact,
            snapshot.fraction_real,
        );
        self.target = snapshot.target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    fn fresh_trace_has_no_impact() {
        let trace = Trace::ray(Vec3::ZERO, Vec3::X);
        assert!(!trace.is_impact());
        assert_eq!(trace.impact_point(), Vec3::X);
    }

    #[rstest]
    fn offers_only_accept_nearer_impacts() {
        let mut trace = Trace::ray(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
        assert!(trace.offer(0.6, Vec3::NEG_X));
        assert!(!trace.offer(0.8, Vec3::NEG_X));
        assert!(trace.offer(0.3, Vec3::NEG_X));
        assert_relative_eq!(trace.fraction_impact, 0.3);
        assert!(trace.fraction_real < trace.fraction_impact);
        assert_relative_eq!(trace.impact_point().x, 3.0);
    }

    #[rstest]
    fn restore_rewinds_impact_fields() {
        let mut trace = Trace::ray(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
        assert!(trace.offer(0.5, Vec3::NEG_X));
        let saved = trace.snapshot();
        assert!(trace.offer(0.1, Vec3::Y));
        trace.restore(saved);
        assert_relative_eq!(trace.fraction_impact, 0.5);
        assert_eq!(trace.correction.normal, Vec3::NEG_X);
    }
}
