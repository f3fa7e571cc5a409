use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tracing::debug;
use winit::dpi::PhysicalSize;

use crate::camera::OrthographicCamera;
use crate::compile::{translate_program, ShaderError};
use crate::geometry::PlaneGeometry;
use crate::runtime::TimeSample;
use crate::types::{RendererConfig, ShaderProgram};

use super::context::GpuContext;
use super::pipeline::{
    encode_plane_pass, MaterialBinding, MaterialPipeline, MultisampleTarget, PipelineLayouts,
    PlaneMesh,
};
use super::uniforms::MaterialUniforms;

const STATS_INTERVAL: Duration = Duration::from_secs(1);

/// Everything the window needs to draw lessons: surface, camera, plane,
/// uniform buffer, and the active pipeline.
pub(crate) struct GpuState {
    context: GpuContext,
    layouts: PipelineLayouts,
    binding: MaterialBinding,
    mesh: PlaneMesh,
    pipeline: MaterialPipeline,
    uniforms: MaterialUniforms,
    camera: OrthographicCamera,
    multisample_target: Option<MultisampleTarget>,
    default_color: [f32; 3],
    last_stats: Instant,
    frames_since_stats: u32,
}

impl GpuState {
    pub(crate) fn new<T>(
        target: &T,
        initial_size: PhysicalSize<u32>,
        config: &RendererConfig,
        program: &ShaderProgram,
    ) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context =
            GpuContext::new(target, initial_size, config.antialiasing, config.color_space)?;
        let layouts = PipelineLayouts::new(&context.device);

        let mut camera = OrthographicCamera::lesson();
        camera.fit(context.size.width, context.size.height);
        let mut uniforms = MaterialUniforms::new(
            context.size.width,
            context.size.height,
            program.color.unwrap_or(config.color),
        );
        uniforms.set_camera(&camera);

        let binding = MaterialBinding::new(&context.device, &layouts, &uniforms);
        let mesh = PlaneMesh::new(&context.device, &PlaneGeometry::lesson_plane());

        let translated = translate_program(program)
            .with_context(|| format!("failed to translate lesson `{}`", program.label))?;
        let pipeline = MaterialPipeline::new(
            &context.device,
            &layouts,
            context.surface_format,
            context.sample_count,
            &translated,
        )
        .with_context(|| format!("failed to build pipeline for lesson `{}`", program.label))?;

        let multisample_target = MultisampleTarget::for_sample_count(
            &context.device,
            context.surface_format,
            context.size.width,
            context.size.height,
            context.sample_count,
        );

        debug!(
            width = context.size.width,
            height = context.size.height,
            sample_count = context.sample_count,
            lesson = %program.label,
            "gpu state ready"
        );

        Ok(Self {
            context,
            layouts,
            binding,
            mesh,
            pipeline,
            uniforms,
            camera,
            multisample_target,
            default_color: config.color,
            last_stats: Instant::now(),
            frames_since_stats: 0,
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    pub(crate) fn lesson_label(&self) -> &str {
        &self.pipeline.label
    }

    /// Refits the camera and `u_resolution`. Zero or oversized requests keep
    /// the previous size.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if !self.context.resize(new_size) {
            return;
        }
        let PhysicalSize { width, height } = self.context.size;
        self.camera.fit(width, height);
        self.uniforms.set_camera(&self.camera);
        self.uniforms.set_resolution(width, height);
        self.multisample_target = MultisampleTarget::for_sample_count(
            &self.context.device,
            self.context.surface_format,
            width,
            height,
            self.context.sample_count,
        );
        debug!(width, height, "resized surface");
    }

    /// Reapplies the current surface configuration after `Lost`/`Outdated`.
    pub(crate) fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Swaps in a new lesson. On error the previous pipeline stays bound.
    pub(crate) fn set_program(&mut self, program: &ShaderProgram) -> Result<(), ShaderError> {
        let translated = translate_program(program)?;
        let pipeline = MaterialPipeline::new(
            &self.context.device,
            &self.layouts,
            self.context.surface_format,
            self.context.sample_count,
            &translated,
        )?;
        self.pipeline = pipeline;
        self.uniforms
            .set_color(program.color.unwrap_or(self.default_color));
        Ok(())
    }

    pub(crate) fn render(
        &mut self,
        time: TimeSample,
        mouse: [f32; 2],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.surface.get_current_texture()?;

        self.uniforms.set_time(time.seconds);
        self.uniforms.set_mouse(mouse);
        self.binding.write(&self.context.queue, &self.uniforms);
        self.record_stats(time);

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("render encoder"),
                });
        encode_plane_pass(
            &mut encoder,
            &view,
            self.multisample_target.as_ref(),
            &self.pipeline,
            &self.binding,
            &self.mesh,
        );
        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn record_stats(&mut self, time: TimeSample) {
        self.frames_since_stats += 1;
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_stats);
        if elapsed < STATS_INTERVAL {
            return;
        }
        let fps = self.frames_since_stats as f32 / elapsed.as_secs_f32();
        debug!(
            fps = fps.round(),
            frame = time.frame_index,
            u_time = self.uniforms.u_time,
            u_mouse = ?self.uniforms.u_mouse,
            u_resolution = ?self.uniforms.u_resolution,
            lesson = %self.pipeline.label,
            "render stats"
        );
        self.frames_since_stats = 0;
        self.last_stats = now;
    }
}
