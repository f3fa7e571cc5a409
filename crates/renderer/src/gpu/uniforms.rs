use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::camera::OrthographicCamera;

/// CPU mirror of the `ShaderbookMaterial` block injected by `compile`.
///
/// Fields follow std140: each `mat4` takes 64 bytes, `u_color` is padded to a
/// full `vec4` slot, and the block is rounded up to 16 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MaterialUniforms {
    pub projection_matrix: [[f32; 4]; 4],
    pub model_view_matrix: [[f32; 4]; 4],
    pub model_matrix: [[f32; 4]; 4],
    pub view_matrix: [[f32; 4]; 4],
    pub u_color: [f32; 3],
    _padding0: f32,
    pub u_mouse: [f32; 2],
    pub u_resolution: [f32; 2],
    pub u_time: f32,
    _padding1: [f32; 3],
}

impl MaterialUniforms {
    pub fn new(width: u32, height: u32, color: [f32; 3]) -> Self {
        let mut uniforms = Self {
            projection_matrix: Mat4::IDENTITY.to_cols_array_2d(),
            model_view_matrix: Mat4::IDENTITY.to_cols_array_2d(),
            model_matrix: Mat4::IDENTITY.to_cols_array_2d(),
            view_matrix: Mat4::IDENTITY.to_cols_array_2d(),
            u_color: color,
            _padding0: 0.0,
            u_mouse: [0.0, 0.0],
            u_resolution: [0.0, 0.0],
            u_time: 0.0,
            _padding1: [0.0; 3],
        };
        uniforms.set_resolution(width, height);
        uniforms
    }

    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.u_resolution = [width as f32, height as f32];
    }

    /// Copies the camera matrices; the plane itself never moves, so the model
    /// matrix stays identity and model-view equals view.
    pub fn set_camera(&mut self, camera: &OrthographicCamera) {
        let model = Mat4::IDENTITY;
        let view = camera.view_matrix();
        self.projection_matrix = camera.projection_matrix().to_cols_array_2d();
        self.view_matrix = view.to_cols_array_2d();
        self.model_matrix = model.to_cols_array_2d();
        self.model_view_matrix = (view * model).to_cols_array_2d();
    }

    pub fn set_mouse(&mut self, position: [f32; 2]) {
        self.u_mouse = position;
    }

    pub fn set_time(&mut self, seconds: f32) {
        self.u_time = seconds;
    }

    pub fn set_color(&mut self, color: [f32; 3]) {
        self.u_color = color;
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    /// The CPU mirror must match the std140 layout of the GLSL block.
    #[test]
    fn material_uniforms_follow_std140_layout() {
        let uniforms = MaterialUniforms::new(1920, 1080, [1.0, 0.0, 0.0]);
        let base = &uniforms as *const _ as usize;

        assert_eq!(size_of::<MaterialUniforms>(), 304);
        assert_eq!((&uniforms.projection_matrix as *const _ as usize) - base, 0);
        assert_eq!((&uniforms.model_view_matrix as *const _ as usize) - base, 64);
        assert_eq!((&uniforms.model_matrix as *const _ as usize) - base, 128);
        assert_eq!((&uniforms.view_matrix as *const _ as usize) - base, 192);
        assert_eq!((&uniforms.u_color as *const _ as usize) - base, 256);
        assert_eq!((&uniforms.u_mouse as *const _ as usize) - base, 272);
        assert_eq!((&uniforms.u_resolution as *const _ as usize) - base, 280);
        assert_eq!((&uniforms.u_time as *const _ as usize) - base, 288);
    }

    #[test]
    fn resolution_tracks_last_resize() {
        let mut uniforms = MaterialUniforms::new(800, 600, [0.0; 3]);
        assert_eq!(uniforms.u_resolution, [800.0, 600.0]);
        uniforms.set_resolution(1024, 768);
        uniforms.set_resolution(640, 480);
        assert_eq!(uniforms.u_resolution, [640.0, 480.0]);
    }

    #[test]
    fn mouse_starts_at_origin() {
        let uniforms = MaterialUniforms::new(800, 600, [0.0; 3]);
        assert_eq!(uniforms.u_mouse, [0.0, 0.0]);
        assert_eq!(uniforms.u_time, 0.0);
    }

    #[test]
    fn camera_matrices_are_copied_column_major() {
        let mut camera = OrthographicCamera::lesson();
        camera.fit(1920, 1080);
        let mut uniforms = MaterialUniforms::new(1920, 1080, [0.0; 3]);
        uniforms.set_camera(&camera);

        assert_eq!(
            uniforms.projection_matrix,
            camera.projection_matrix().to_cols_array_2d()
        );
        assert_eq!(uniforms.model_view_matrix, uniforms.view_matrix);
        assert_eq!(uniforms.model_matrix, Mat4::IDENTITY.to_cols_array_2d());
        // Translation lives in the last column: camera sits at z = 1.
        assert_eq!(uniforms.view_matrix[3], [0.0, 0.0, -1.0, 1.0]);
    }

    #[test]
    fn bytes_cover_whole_block() {
        let uniforms = MaterialUniforms::new(1, 1, [0.25, 0.5, 0.75]);
        let bytes = uniforms.as_bytes();
        assert_eq!(bytes.len(), 304);
        let color: &[f32] = bytemuck::cast_slice(&bytes[256..268]);
        assert_eq!(color, &[0.25, 0.5, 0.75]);
    }
}
