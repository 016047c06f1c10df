//! Sphere-overlap ground detection
//!
//! A grounded check is a boolean overlap test at an anchor point below the
//! actor's body: any collider in the ground groups inside the probe sphere
//! counts. No surface normal or contact depth is reported.

use glam::Vec3;
use rapier3d::prelude::{InteractionGroups, QueryFilter, RigidBodyHandle};

use crate::PhysicsWorld;

/// Ground-probe placement and filtering
#[derive(Debug, Clone)]
pub struct GroundProbe {
    /// Probe center relative to the body position (typically below the feet)
    pub local_offset: Vec3,
    /// Overlap sphere radius
    pub radius: f32,
    /// Collision groups counted as ground
    pub groups: InteractionGroups,
}

impl GroundProbe {
    /// Create a probe matching all collision groups
    pub fn new(local_offset: Vec3, radius: f32) -> Self {
        Self {
            local_offset,
            radius,
            groups: InteractionGroups::all(),
        }
    }

    /// Restrict the probe to specific collision groups
    pub fn with_groups(mut self, groups: InteractionGroups) -> Self {
        self.groups = groups;
        self
    }

    /// Test whether the actor at `body_position` is standing on ground
    ///
    /// `exclude` should be the actor's own body so its collider never
    /// satisfies its own probe.
    pub fn is_grounded(
        &self,
        world: &PhysicsWorld,
        body_position: Vec3,
        exclude: Option<RigidBodyHandle>,
    ) -> bool {
        let mut filter = QueryFilter::new().groups(self.groups);
        if let Some(body) = exclude {
            filter = filter.exclude_rigid_body(body);
        }

        world.overlap_ball(body_position + self.local_offset, self.radius, filter)
    }
}
