use nalgebra::{Matrix4, Vector3, Vector4};

const EPS: f32 = 1e-9;

/// Reversed-Z perspective projection in column-vector form.
///
/// `half_fov_x_rad` is the half horizontal field of view; the vertical extent
/// follows from the `width / height` pixel aspect. View space is x-right,
/// y-up, z-forward; clip `w` carries the forward distance and clip `z`
/// the constant `near` (depth is unused by the stitcher).
pub fn reversed_z_perspective(
    half_fov_x_rad: f32,
    width: f32,
    height: f32,
    near: f32,
) -> Matrix4<f32> {
    let inv_tan = 1.0 / half_fov_x_rad.max(1e-6).tan();
    let aspect = if height > 0.0 { width / height } else { 1.0 };
    Matrix4::new(
        inv_tan, 0.0, 0.0, 0.0, //
        0.0, inv_tan * aspect, 0.0, 0.0, //
        0.0, 0.0, 0.0, near, //
        0.0, 0.0, 1.0, 0.0,
    )
}

/// Swizzle world axes (x-forward, y-right, z-up) into view axes
/// (x-right, y-up, z-forward).
#[inline]
pub fn world_to_view(v: &Vector3<f32>) -> Vector3<f32> {
    Vector3::new(v.y, v.z, v.x)
}

/// Inverse of [`world_to_view`].
#[inline]
pub fn view_to_world(v: &Vector3<f32>) -> Vector3<f32> {
    Vector3::new(v.z, v.x, v.y)
}

/// Project a view-space direction to continuous pixel coordinates of a
/// `width × height` image (pixel `i` spans `[i, i + 1)`, row 0 at the top).
///
/// Returns `None` for directions at or behind the image plane.
pub fn project_to_pixel(
    proj: &Matrix4<f32>,
    view_dir: &Vector3<f32>,
    width: f32,
    height: f32,
) -> Option<[f32; 2]> {
    let clip = proj * Vector4::new(view_dir.x, view_dir.y, view_dir.z, 1.0);
    let w = clip.w;
    if !w.is_finite() || w <= EPS || !clip.x.is_finite() || !clip.y.is_finite() {
        return None;
    }
    let ndc_x = clip.x / w;
    let ndc_y = clip.y / w;
    let sx = (ndc_x + 1.0) * 0.5 * width;
    // NDC y grows upward, image rows grow downward.
    let sy = height - (ndc_y + 1.0) * 0.5 * height;
    Some([sx, sy])
}
