//! Euler orientation in degrees for a Z-up, X-forward, Y-right world.
//!
//! Positive yaw turns the forward axis toward +Y, positive pitch lifts it
//! toward +Z and positive roll drops the right axis toward -Z. The quaternion
//! form composes as `yaw * pitch * roll` (roll applied first).

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Rotator = Rotator {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Rotation about +Z turning +X toward +Y.
    pub fn yaw_quat(yaw_deg: f32) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), yaw_deg.to_radians())
    }

    /// Rotation about +Y lifting +X toward +Z.
    pub fn pitch_quat(pitch_deg: f32) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -pitch_deg.to_radians())
    }

    /// Rotation about +X dropping +Y toward -Z.
    pub fn roll_quat(roll_deg: f32) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -roll_deg.to_radians())
    }

    pub fn to_quat(&self) -> UnitQuaternion<f32> {
        Self::yaw_quat(self.yaw) * Self::pitch_quat(self.pitch) * Self::roll_quat(self.roll)
    }

    /// Recover pitch/yaw/roll from a rotation. Yaw and roll land in
    /// `(-180, 180]`, pitch in `[-90, 90]`.
    pub fn from_quat(q: &UnitQuaternion<f32>) -> Self {
        let x_axis = q * Vector3::x();
        let y_axis = q * Vector3::y();
        let z_axis = q * Vector3::z();

        let pitch = x_axis
            .z
            .atan2((x_axis.x * x_axis.x + x_axis.y * x_axis.y).sqrt())
            .to_degrees();
        let yaw = x_axis.y.atan2(x_axis.x).to_degrees();

        // Right axis of the same pitch/yaw without roll; roll is the angle
        // between it and the actual right axis around forward.
        let no_roll = Self::new(pitch, yaw, 0.0).to_quat();
        let s_y = no_roll * Vector3::y();
        let roll = z_axis.dot(&s_y).atan2(y_axis.dot(&s_y)).to_degrees();

        Self {
            pitch,
            yaw: normalize_axis(yaw),
            roll: normalize_axis(roll),
        }
    }

    /// Unit forward (+X) axis of this orientation.
    pub fn forward(&self) -> Vector3<f32> {
        self.to_quat() * Vector3::x()
    }

    /// Unit right (+Y) axis of this orientation.
    pub fn right(&self) -> Vector3<f32> {
        self.to_quat() * Vector3::y()
    }
}

/// Wrap an angle in degrees into `(-180, 180]`.
#[inline]
pub fn normalize_axis(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
