/// Fixed camera looking at the axes box
use nalgebra::{Matrix4, Point3, Vector3};

use crate::scene::AxisLimits;

/// Default elevation above the XY plane, in degrees
pub const DEFAULT_ELEVATION: f32 = 30.0;
/// Default azimuth around the Z axis, in degrees
pub const DEFAULT_AZIMUTH: f32 = -60.0;

/// Camera configuration for 3D rendering.
///
/// The camera orbits the center of the axes box at a fixed elevation and
/// azimuth with Z pointing up, and uses an orthographic projection large
/// enough to keep the whole box in view. It depends only on the axis
/// limits, never on what is drawn inside them.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Half of the visible height, in world units
    pub half_extent: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera for the default view of `limits` on a `width` x `height`
    /// surface whose pixels are `cell_aspect` times as wide as they are tall.
    pub fn for_frame(limits: &[AxisLimits; 3], width: u32, height: u32, cell_aspect: f32) -> Self {
        Self::orbit(
            limits,
            DEFAULT_ELEVATION,
            DEFAULT_AZIMUTH,
            width,
            height,
            cell_aspect,
        )
    }

    pub fn orbit(
        limits: &[AxisLimits; 3],
        elevation_deg: f32,
        azimuth_deg: f32,
        width: u32,
        height: u32,
        cell_aspect: f32,
    ) -> Self {
        let target = Point3::new(limits[0].center(), limits[1].center(), limits[2].center());
        let radius = Vector3::new(limits[0].span(), limits[1].span(), limits[2].span()).norm() / 2.0;
        let radius = radius.max(f32::EPSILON);

        let (elev, azim) = (elevation_deg.to_radians(), azimuth_deg.to_radians());
        let direction = Vector3::new(
            elev.cos() * azim.cos(),
            elev.cos() * azim.sin(),
            elev.sin(),
        );
        let distance = radius * 3.0;

        Self {
            position: target + direction * distance,
            target,
            up: Vector3::z(),
            half_extent: radius,
            aspect: width.max(1) as f32 * cell_aspect / height.max(1) as f32,
            near: distance - radius * 2.0,
            far: distance + radius * 2.0,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let (half_w, half_h) = if self.aspect >= 1.0 {
            (self.half_extent * self.aspect, self.half_extent)
        } else {
            (self.half_extent, self.half_extent / self.aspect)
        };
        Matrix4::new_orthographic(-half_w, half_w, -half_h, half_h, self.near, self.far)
    }

    /// Project a world-space point to screen space.
    ///
    /// Returns `(x, y, depth)`, with depth growing away from the camera.
    /// Points outside the screen are still returned; only non-finite
    /// results are dropped.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let view_projection = self.projection_matrix() * self.view_matrix();
        let ndc = view_projection.transform_point(point);

        if !(ndc.x.is_finite() && ndc.y.is_finite() && ndc.z.is_finite()) {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}
