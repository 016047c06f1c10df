//! Actor binding: controller + rigid body + ground probe + camera anchor

use glam::Vec3;
use rapier3d::prelude::RigidBodyHandle;
use strider_core::FixedClock;
use strider_physics::{GroundProbe, PhysicsWorld};

use crate::camera::CameraRig;
use crate::input::InputBuffer;

use super::{LocomotionConfig, LocomotionController};

/// Fatal precondition failures
///
/// A missing collaborator would let the state machine corrupt the actor's
/// physical state undetectably, so construction refuses to proceed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActorError {
    #[error("rigid body {0:?} not found in the physics world")]
    BodyNotFound(RigidBodyHandle),
}

/// A simulated actor driven by the locomotion controller
///
/// Owns the controller state, the ground probe placement, and the camera
/// anchor; the rigid body itself stays in the physics world and is touched
/// once per tick (one velocity read, one velocity write).
pub struct Actor {
    /// The state machine
    pub controller: LocomotionController,
    /// Camera orientation anchor
    pub camera: CameraRig,
    body: RigidBodyHandle,
    probe: GroundProbe,
    clock: FixedClock,
    moving: bool,
}

impl Actor {
    /// Bind an actor to a rigid body, failing fast if the handle is stale
    ///
    /// `probe_offset` places the ground-check anchor relative to the body
    /// (typically at the feet); the probe radius comes from
    /// `config.ground_distance`.
    pub fn new(
        world: &PhysicsWorld,
        body: RigidBodyHandle,
        probe_offset: Vec3,
        config: LocomotionConfig,
    ) -> Result<Self, ActorError> {
        if world.get_rigid_body(body).is_none() {
            return Err(ActorError::BodyNotFound(body));
        }

        for warning in config.validate() {
            tracing::warn!("degenerate locomotion parameter: {}", warning);
        }
        if (config.gravity_y - world.config.gravity.y).abs() > f32::EPSILON {
            tracing::warn!(
                "gravity_y {} disagrees with the physics world gravity {}",
                config.gravity_y,
                world.config.gravity.y
            );
        }

        let probe = GroundProbe::new(probe_offset, config.ground_distance);
        Ok(Self {
            controller: LocomotionController::new(config),
            camera: CameraRig::new(),
            body,
            probe,
            clock: FixedClock::default(),
            moving: false,
        })
    }

    /// Restrict the ground probe to specific collision groups
    pub fn with_ground_groups(mut self, groups: rapier3d::prelude::InteractionGroups) -> Self {
        self.probe = self.probe.clone().with_groups(groups);
        self
    }

    /// Replace the default fixed-step clock
    pub fn with_clock(mut self, clock: FixedClock) -> Self {
        self.clock = clock;
        self
    }

    /// The bound rigid body
    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    /// Whether a move input is active (animation signal)
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Whether a launch has occurred without a grounded tick since
    pub fn is_jumping(&self) -> bool {
        self.controller.is_jumping()
    }

    /// Run the actor's ground probe at its current position
    pub fn grounded(&self, world: &PhysicsWorld) -> Result<bool, ActorError> {
        let position = world
            .body_position(self.body)
            .ok_or(ActorError::BodyNotFound(self.body))?;
        Ok(self.probe.is_grounded(world, position, Some(self.body)))
    }

    /// Run one fixed simulation step
    ///
    /// Snapshot -> probe -> state machine -> velocity write-back -> camera.
    pub fn fixed_step(
        &mut self,
        world: &mut PhysicsWorld,
        input: &InputBuffer,
        dt: f32,
    ) -> Result<(), ActorError> {
        let snapshot = input.snapshot();
        self.moving = snapshot.move_active;

        let position = world
            .body_position(self.body)
            .ok_or(ActorError::BodyNotFound(self.body))?;
        let velocity = world
            .linear_velocity(self.body)
            .ok_or(ActorError::BodyNotFound(self.body))?;
        let grounded = self.probe.is_grounded(world, position, Some(self.body));

        let out = self.controller.tick(&snapshot, grounded, velocity, dt, dt);

        world.set_linear_velocity(self.body, out.velocity);
        self.camera.apply_look(out.look_delta);
        Ok(())
    }

    /// Advance by a rendered frame's delta, running whole fixed steps
    ///
    /// Steps the physics world after each fixed step so the body integrates
    /// base gravity between ticks. Returns the number of steps taken.
    pub fn advance(
        &mut self,
        world: &mut PhysicsWorld,
        input: &InputBuffer,
        raw_dt: f32,
    ) -> Result<u32, ActorError> {
        self.clock.advance(raw_dt);
        let steps = self.clock.drain_steps();
        let dt = self.clock.config.fixed_timestep;

        for _ in 0..steps {
            self.fixed_step(world, input, dt)?;
            world.step();
        }
        Ok(steps)
    }

    /// Teleport the body and clear the state machine (respawn)
    pub fn respawn(&mut self, world: &mut PhysicsWorld, position: Vec3) -> Result<(), ActorError> {
        let body = world
            .get_rigid_body_mut(self.body)
            .ok_or(ActorError::BodyNotFound(self.body))?;
        body.set_translation(rapier3d::prelude::vector![position.x, position.y, position.z], true);
        body.set_linvel(rapier3d::prelude::vector![0.0, 0.0, 0.0], true);
        self.controller.reset();
        Ok(())
    }
}
