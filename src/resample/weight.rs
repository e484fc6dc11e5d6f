//! Angular falloff weight of a pane at an output direction.
//!
//! The weight is separable: the output direction's yaw and pitch are each
//! compared with the pane axis, offset by the cosine of the half FOV and
//! normalised to `[0, 1]`. The product is squared so distorted tile edges
//! fade out faster than a linear ramp would.

use super::projector::PaneProjector;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Weights below this are treated as no contribution.
pub const DEFAULT_WEIGHT_EPSILON: f32 = 1e-4;

/// Shape of the per-pane blend weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Falloff {
    /// `(w_theta * w_phi)^2`.
    #[default]
    Squared,
    /// 1 anywhere inside the pane footprint, 0 outside.
    Flat,
}

/// Final (already squared) weight of `projector`'s pane at yaw `theta_deg`,
/// pitch `phi_deg`.
#[inline]
pub fn angular_weight(projector: &PaneProjector, theta_deg: f32, phi_deg: f32, falloff: Falloff) -> f32 {
    let (st, ct) = theta_deg.to_radians().sin_cos();
    let (sp, cp) = phi_deg.to_radians().sin_cos();
    let on_theta = Vector3::new(ct, st, 0.0);
    let on_phi = Vector3::new(cp, 0.0, sp);
    let (yaw_axis, pitch_axis) = projector.basis();
    let (cos_h, cos_v) = projector.cos_half_fov();

    let w_theta = (on_theta.dot(yaw_axis) - cos_h).max(0.0) / (1.0 - cos_h);
    let w_phi = (on_phi.dot(pitch_axis) - cos_v).max(0.0) / (1.0 - cos_v);
    match falloff {
        Falloff::Squared => {
            let w = w_theta * w_phi;
            w * w
        }
        Falloff::Flat => {
            if w_theta > 0.0 && w_phi > 0.0 {
                1.0
            } else {
                0.0
            }
        }
    }
}
