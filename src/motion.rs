//! Collision-response policies.
//!
//! A [`Motion`] takes the displacement a [`Mover`] wants for this tick and
//! resolves it against the world through a [`Tracer`], updating the shape's
//! position and reporting whether anything blocked it.

use serde::{Deserialize, Serialize};

use crate::mover::Mover;
use crate::query::{Querier, Tracer};
use crate::shape::Shape;
use crate::trace::Trace;
use crate::{FLOOR_NORMAL_MIN, MAX_SLIDE_ITERATIONS, MIN_MOVE_SQUARED};

/// Collision-response policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Motion {
    /// Slide along blocking planes, clipping the remaining displacement.
    #[default]
    Slide,
    /// Stop dead at the first impact.
    Stop,
    /// Never moves and never traces.
    Fixed,
}

impl Motion {
    /// Advances `shape` for one tick of `dt` seconds.
    ///
    /// Returns whether a blocking collision occurred.
    pub fn process(
        self,
        shape: &mut Shape,
        mover: &mut Mover,
        tracer: &mut dyn Tracer,
        querier: &Querier,
        dt: f32,
    ) -> bool {
        match self {
            Self::Slide => slide(shape, mover, tracer, querier, dt),
            Self::Stop => stop(shape, mover, tracer, querier, dt),
            Self::Fixed => false,
        }
    }
}

fn slide(
    shape: &mut Shape,
    mover: &mut Mover,
    tracer: &mut dyn Tracer,
    querier: &Querier,
    dt: f32,
) -> bool {
    let up = mover.up();
    let mut remaining = mover.displacement(dt);
    let mut collided = false;
    for _ in 0..MAX_SLIDE_ITERATIONS {
        if remaining.length_squared() < MIN_MOVE_SQUARED {
            break;
        }
        let mut trace = Trace::swept(shape.position(), remaining, shape.extent());
        tracer.trace(querier, &mut trace);
        if !trace.is_impact() {
            shape.translate(remaining);
            break;
        }
        collided = true;
        shape.set_position(trace.rest_point());
        let normal = trace.correction.normal;
        if normal.dot(up) >= FLOOR_NORMAL_MIN {
            mover.land();
        }
        let left = trace.segment * (1.0 - trace.fraction_impact);
        remaining = left - normal * left.dot(normal);
    }
    collided
}

fn stop(
    shape: &mut Shape,
    mover: &Mover,
    tracer: &mut dyn Tracer,
    querier: &Querier,
    dt: f32,
) -> bool {
    let displacement = mover.displacement(dt);
    if displacement.length_squared() < MIN_MOVE_SQUARED {
        return false;
    }
    let mut trace = Trace::swept(shape.position(), displacement, shape.extent());
    tracer.trace(querier, &mut trace);
    if trace.is_impact() {
        shape.set_position(trace.rest_point());
        true
    } else {
        shape.translate(displacement);
        false
    }
}
