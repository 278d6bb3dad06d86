//! Smoothed motion metrics for a tracked node.

use crate::error::Result;
use crate::ids::NodeId;
use crate::scene::Scene;
use crate::structs::{Quaternion, Vector3};

/// Exponential moving average over a fixed period.
#[derive(Clone, Copy, Debug)]
pub struct Ema {
    multiplier: f32,
    value: f32,
    primed: bool,
}

impl Ema {
    pub fn new(periods: f32) -> Self {
        Self {
            multiplier: 2.0 / (periods + 1.0),
            value: 0.0,
            primed: false,
        }
    }

    /// Fold in a sample and return the updated average. The first sample
    /// seeds the average directly.
    pub fn update(&mut self, sample: f32) -> f32 {
        if self.primed {
            self.value += (sample - self.value) * self.multiplier;
        } else {
            self.value = sample;
            self.primed = true;
        }
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

const SMOOTHING_PERIODS: f32 = 5.0;

/// Velocity of a tracked node relative to an origin node, smoothed with an
/// EMA so per-frame tracking jitter does not dominate. Call
/// [`update`](Self::update) once per frame.
pub struct KinematicMetrics {
    pub object: NodeId,
    pub origin: NodeId,
    last_position: Vector3,
    last_rotation: Quaternion,
    velocity_x: Ema,
    velocity_y: Ema,
    velocity_z: Ema,
    angular_speed: Ema,
}

impl KinematicMetrics {
    pub fn new(scene: &Scene, object: NodeId, origin: NodeId) -> Result<Self> {
        let (position, rotation) = Self::relative_pose(scene, object, origin)?;
        Ok(Self {
            object,
            origin,
            last_position: position,
            last_rotation: rotation,
            velocity_x: Ema::new(SMOOTHING_PERIODS),
            velocity_y: Ema::new(SMOOTHING_PERIODS),
            velocity_z: Ema::new(SMOOTHING_PERIODS),
            angular_speed: Ema::new(SMOOTHING_PERIODS),
        })
    }

    fn relative_pose(scene: &Scene, object: NodeId, origin: NodeId) -> Result<(Vector3, Quaternion)> {
        let origin_world = scene.world_matrix(origin)?;
        let object_world = scene.world_matrix(object)?;
        let relative = crate::structs::Transform3D::from_mat4(origin_world.inverse() * object_world);
        Ok((relative.position, relative.rotation))
    }

    /// Fold in the poses of the current frame. A non-positive `dt_secs`
    /// leaves the averages untouched.
    pub fn update(&mut self, scene: &Scene, dt_secs: f32) -> Result<()> {
        let (position, rotation) = Self::relative_pose(scene, self.object, self.origin)?;
        if dt_secs > 0.0 {
            let delta = position - self.last_position;
            self.velocity_x.update(delta.x / dt_secs);
            self.velocity_y.update(delta.y / dt_secs);
            self.velocity_z.update(delta.z / dt_secs);

            let (_, angle) = rotation.mul(self.last_rotation.inverse()).to_axis_angle();
            self.angular_speed.update(angle.abs() / dt_secs);
        }
        self.last_position = position;
        self.last_rotation = rotation;
        Ok(())
    }

    /// Smoothed linear velocity in origin-local space, meters per second.
    pub fn linear_velocity(&self) -> Vector3 {
        Vector3::new(
            self.velocity_x.value(),
            self.velocity_y.value(),
            self.velocity_z.value(),
        )
    }

    pub fn linear_speed(&self) -> f32 {
        self.linear_velocity().length()
    }

    /// Smoothed angular speed, radians per second.
    pub fn angular_speed(&self) -> f32 {
        self.angular_speed.value()
    }
}
