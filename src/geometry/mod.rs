//! Geometry helpers shared by the layout planner and the resampler.
//!
//! - [`rotator`] – pitch/yaw/roll orientations in a Z-up, X-forward, Y-right
//!   frame and their quaternion form.
//! - [`projection`] – reversed-Z perspective matrices and the axis swizzle
//!   from world axes into view axes.
//! - [`intervals`] – even subdivision of yaw/pitch ranges into grid steps.
//! - [`spherical`] – equirectangular pixel ↔ spherical angle ↔ direction.

pub mod intervals;
pub mod projection;
pub mod rotator;
pub mod spherical;

pub use intervals::{distribute_centered, distribute_left_closed};
pub use projection::{project_to_pixel, reversed_z_perspective, world_to_view};
pub use rotator::Rotator;
pub use spherical::{direction_from_angles, EquirectGrid};
