//! 2D camera shared by every scene

use glam::{Mat4, Vec2, Vec3};

/// 2D orthographic camera
///
/// `zoom` is the half-height of the visible region in world units.
#[derive(Debug, Clone)]
pub struct Camera2D {
    pub position: Vec3,
    pub zoom: f32,
    pub aspect_ratio: f32,
}

impl Camera2D {
    pub const MIN_ZOOM: f32 = 0.5;
    pub const MAX_ZOOM: f32 = 50.0;

    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            zoom: 1.0,
            aspect_ratio,
        }
    }

    /// Half width and half height of the visible region
    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(self.zoom * self.aspect_ratio, self.zoom)
    }

    pub fn view_projection(&self) -> Mat4 {
        let half = self.half_extent();
        let projection = Mat4::orthographic_rh(-half.x, half.x, -half.y, half.y, -1.0, 1.0);
        projection * Mat4::from_translation(-self.position)
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Scale the view by `factor` (> 1 zooms out), clamped to a sane range
    pub fn zoom_by(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        }
    }

    /// Map a world point to physical pixels, origin at the top-left corner
    pub fn world_to_screen(&self, world: Vec2, viewport: [u32; 2]) -> Vec2 {
        let ndc = (world - self.position.truncate()) / self.half_extent();
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport[0] as f32,
            (1.0 - ndc.y) * 0.5 * viewport[1] as f32,
        )
    }

    /// Inverse of [`Camera2D::world_to_screen`]
    pub fn screen_to_world(&self, screen: Vec2, viewport: [u32; 2]) -> Vec2 {
        let ndc = Vec2::new(
            screen.x / viewport[0].max(1) as f32 * 2.0 - 1.0,
            1.0 - screen.y / viewport[1].max(1) as f32 * 2.0,
        );
        self.position.truncate() + ndc * self.half_extent()
    }

    /// Length of one world unit in physical pixels
    pub fn pixels_per_unit(&self, viewport: [u32; 2]) -> f32 {
        viewport[1] as f32 / (2.0 * self.zoom)
    }
}

/// Camera uniform data for shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera_2d(camera: &Camera2D) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            position: [camera.position.x, camera.position.y, camera.position.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera2D {
        let mut camera = Camera2D::new(1280.0 / 720.0);
        camera.zoom = 5.0;
        camera
    }

    #[test]
    fn test_origin_maps_to_viewport_center() {
        let p = camera().world_to_screen(Vec2::ZERO, [1280, 720]);
        assert!((p.x - 640.0).abs() < 1e-3);
        assert!((p.y - 360.0).abs() < 1e-3);
    }

    #[test]
    fn test_top_edge_maps_to_row_zero() {
        let p = camera().world_to_screen(Vec2::new(0.0, 5.0), [1280, 720]);
        assert!(p.y.abs() < 1e-3);
    }

    #[test]
    fn test_screen_world_roundtrip_with_offset() {
        let mut camera = camera();
        camera.position = Vec3::new(2.0, -1.0, 0.0);
        let world = Vec2::new(3.5, 0.25);
        let screen = camera.world_to_screen(world, [1280, 720]);
        let back = camera.screen_to_world(screen, [1280, 720]);
        assert!((back - world).length() < 1e-4);
    }

    #[test]
    fn test_zoom_by_clamps() {
        let mut camera = camera();
        camera.zoom_by(0.5);
        assert!((camera.zoom - 2.5).abs() < 1e-6);
        camera.zoom_by(1000.0);
        assert_eq!(camera.zoom, Camera2D::MAX_ZOOM);
        camera.zoom_by(-1.0);
        assert_eq!(camera.zoom, Camera2D::MAX_ZOOM);
    }

    #[test]
    fn test_pixels_per_unit() {
        assert!((camera().pixels_per_unit([1280, 720]) - 72.0).abs() < 1e-4);
    }
}
