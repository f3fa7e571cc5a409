//! Orthographic camera that keeps a 2×2 world-unit plane filling the canvas.
//!
//! The frustum is always centred on the origin. Whichever axis is longer on
//! screen gets the unit half extent and the other axis shrinks with the aspect
//! ratio, so the plane overflows the shorter side instead of letterboxing.

use glam::{Mat4, Vec3};

/// View-volume box plus position; mirrors the browser library's camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicCamera {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

/// Half extents of a centred frustum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub half_width: f32,
    pub half_height: f32,
}

/// Applies the aspect policy: landscape keeps unit half-width, portrait keeps
/// unit half-height.
pub fn frustum_for_aspect(width: u32, height: u32) -> Frustum {
    let width = width.max(1) as f32;
    let height = height.max(1) as f32;
    let aspect = width / height;
    if aspect >= 1.0 {
        Frustum {
            half_width: 1.0,
            half_height: height / width,
        }
    } else {
        Frustum {
            half_width: aspect,
            half_height: 1.0,
        }
    }
}

impl OrthographicCamera {
    /// Lesson camera: unit box, clip planes at 0.1 and 10, one unit back on Z.
    pub fn lesson() -> Self {
        Self {
            left: -1.0,
            right: 1.0,
            top: 1.0,
            bottom: -1.0,
            near: 0.1,
            far: 10.0,
            position: Vec3::new(0.0, 0.0, 1.0),
        }
    }

    /// Resizes the view volume for a canvas of `width`×`height` pixels.
    pub fn fit(&mut self, width: u32, height: u32) {
        let frustum = frustum_for_aspect(width, height);
        self.left = -frustum.half_width;
        self.right = frustum.half_width;
        self.top = frustum.half_height;
        self.bottom = -frustum.half_height;
    }

    /// Projection into wgpu clip space (depth in `[0, 1]`).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }

    /// World-to-camera transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position).inverse()
    }
}

impl Default for OrthographicCamera {
    fn default() -> Self {
        Self::lesson()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn landscape_keeps_unit_width() {
        let frustum = frustum_for_aspect(1920, 1080);
        assert_close(frustum.half_width, 1.0);
        assert_close(frustum.half_height, 1080.0 / 1920.0);
    }

    #[test]
    fn portrait_keeps_unit_height() {
        let frustum = frustum_for_aspect(600, 1200);
        assert_close(frustum.half_width, 0.5);
        assert_close(frustum.half_height, 1.0);
    }

    #[test]
    fn square_canvas_is_unit_box() {
        let frustum = frustum_for_aspect(800, 800);
        assert_close(frustum.half_width, 1.0);
        assert_close(frustum.half_height, 1.0);
    }

    #[test]
    fn fit_stays_centred() {
        let mut camera = OrthographicCamera::lesson();
        for (width, height) in [(1920, 1080), (300, 900), (1, 1), (0, 0)] {
            camera.fit(width, height);
            assert_close(camera.left, -camera.right);
            assert_close(camera.bottom, -camera.top);
            assert!(camera.right > 0.0 && camera.top > 0.0);
        }
    }

    #[test]
    fn frustum_corners_map_to_clip_corners() {
        let mut camera = OrthographicCamera::lesson();
        camera.fit(1600, 800);
        let clip = camera.projection_matrix()
            * camera.view_matrix()
            * Vec4::new(camera.right, camera.top, 0.0, 1.0);
        assert_close(clip.x, 1.0);
        assert_close(clip.y, 1.0);
        assert!(clip.z >= 0.0 && clip.z <= 1.0);
    }

    #[test]
    fn plane_overflows_short_axis_only() {
        let mut camera = OrthographicCamera::lesson();
        camera.fit(1000, 500);
        let projection = camera.projection_matrix() * camera.view_matrix();
        let corner = projection * Vec4::new(1.0, 1.0, 0.0, 1.0);
        assert_close(corner.x, 1.0);
        assert_close(corner.y, 2.0);
    }
}
