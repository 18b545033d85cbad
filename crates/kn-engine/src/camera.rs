use serde::{Deserialize, Serialize};
use tracing::warn;

use kn_core::Vec3;

/// Duration of every camera transition, in milliseconds.
pub const TRANSITION_MS: u32 = 3000;
/// Default distance the camera stands off from a focused node.
pub const FOCUS_STANDOFF: f64 = 100.0;
/// Overview distance per cube root of the node count.
pub const OVERVIEW_DISTANCE_FACTOR: f64 = 170.0;

/// A camera transition for the rendering surface to execute. This crate
/// only computes these; animating them is the surface's job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraDirective {
    /// Where the camera should end up.
    pub position: Vec3,
    /// The point it should look at.
    pub look_at: Vec3,
    /// Transition duration in milliseconds.
    pub transition_ms: u32,
}

/// Computes focus and overview directives, remembering the current one so
/// a degenerate focus target can be answered with "stay where you are".
#[derive(Debug, Clone)]
pub struct CameraRig {
    directive: CameraDirective,
    standoff: f64,
    overview_factor: f64,
}

impl CameraRig {
    /// A rig starting at the overview position for a graph of `node_count`
    /// courses.
    pub fn new(node_count: usize) -> Self {
        let mut rig = Self {
            directive: CameraDirective {
                position: Vec3::ORIGIN,
                look_at: Vec3::ORIGIN,
                transition_ms: TRANSITION_MS,
            },
            standoff: FOCUS_STANDOFF,
            overview_factor: OVERVIEW_DISTANCE_FACTOR,
        };
        rig.overview(node_count);
        rig
    }

    /// Set the focus standoff distance.
    pub fn with_standoff(mut self, standoff: f64) -> Self {
        self.standoff = standoff;
        self
    }

    /// Set the overview distance factor.
    pub fn with_overview_factor(mut self, factor: f64) -> Self {
        self.overview_factor = factor;
        self
    }

    /// The current directive.
    pub fn directive(&self) -> CameraDirective {
        self.directive
    }

    /// Aim at `target` from outside it: the camera sits on the ray from
    /// the origin through the target, `standoff` beyond it.
    ///
    /// A target at the origin has no such ray; that case is a no-op that
    /// returns the current directive unchanged (with a diagnostic), never
    /// a division by zero.
    pub fn focus(&mut self, target: Vec3) -> CameraDirective {
        let magnitude = target.magnitude();
        if magnitude == 0.0 {
            warn!("focus target at origin has no standoff ray; camera unchanged");
            return self.directive;
        }

        let ratio = 1.0 + self.standoff / magnitude;
        self.directive = CameraDirective {
            position: target.scaled(ratio),
            look_at: target,
            transition_ms: TRANSITION_MS,
        };
        self.directive
    }

    /// Pull back to the whole-graph overview: distance along the z axis
    /// scales with the cube root of the node count, so framing stays
    /// proportional to dataset size.
    pub fn overview(&mut self, node_count: usize) -> CameraDirective {
        let distance = (node_count as f64).cbrt() * self.overview_factor;
        self.directive = CameraDirective {
            position: Vec3::new(0.0, 0.0, distance),
            look_at: Vec3::ORIGIN,
            transition_ms: TRANSITION_MS,
        };
        self.directive
    }
}
