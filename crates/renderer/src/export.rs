//! Offscreen rendering of a single lesson frame to PNG.
//!
//! Uses the same translation, uniform block, camera and plane as the window,
//! but targets an RGBA texture that is copied back to the CPU.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

use crate::camera::OrthographicCamera;
use crate::compile::translate_program;
use crate::geometry::PlaneGeometry;
use crate::gpu::context::{
    create_instance, log_adapter, request_device, resolve_sample_count, SurfaceColorSpace,
};
use crate::gpu::pipeline::{
    encode_plane_pass, MaterialBinding, MaterialPipeline, MultisampleTarget, PipelineLayouts,
    PlaneMesh,
};
use crate::gpu::MaterialUniforms;
use crate::types::{Antialiasing, ColorSpaceMode, ShaderProgram, DEFAULT_COLOR};

const BYTES_PER_PIXEL: u32 = 4;

/// One still frame to render.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub path: PathBuf,
    pub size: (u32, u32),
    /// Value written to `u_time`.
    pub time: f32,
    /// Value written to `u_mouse`, in pixels from the top-left corner.
    pub mouse: [f32; 2],
    pub antialiasing: Antialiasing,
    pub color_space: ColorSpaceMode,
    pub color: [f32; 3],
}

impl ExportRequest {
    pub fn new(path: impl Into<PathBuf>, size: (u32, u32)) -> Self {
        Self {
            path: path.into(),
            size,
            time: 0.0,
            mouse: [0.0, 0.0],
            antialiasing: Antialiasing::default(),
            color_space: ColorSpaceMode::default(),
            color: DEFAULT_COLOR,
        }
    }
}

/// Renders `program` once and writes the frame to `request.path`.
pub fn export_png(program: &ShaderProgram, request: &ExportRequest) -> Result<PathBuf> {
    let (width, height) = request.size;
    if width == 0 || height == 0 {
        anyhow::bail!("export size must be non-zero, got {width}x{height}");
    }

    let pixels = render_rgba(program, request)?;
    write_png(&request.path, width, height, pixels)?;
    info!(
        lesson = %program.label,
        path = %request.path.display(),
        width,
        height,
        "exported still frame"
    );
    Ok(request.path.clone())
}

fn render_rgba(program: &ShaderProgram, request: &ExportRequest) -> Result<Vec<u8>> {
    let (width, height) = request.size;
    let format = match SurfaceColorSpace::from(request.color_space) {
        SurfaceColorSpace::Gamma => wgpu::TextureFormat::Rgba8Unorm,
        SurfaceColorSpace::Linear => wgpu::TextureFormat::Rgba8UnormSrgb,
    };

    let instance = create_instance();
    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::default(),
        compatible_surface: None,
        force_fallback_adapter: false,
    }))
    .context("failed to find a GPU adapter for export")?;
    let is_software = log_adapter(&adapter);

    let max_dimension = adapter.limits().max_texture_dimension_2d;
    if width > max_dimension || height > max_dimension {
        anyhow::bail!(
            "GPU max texture dimension is {max_dimension}, requested export is {width}x{height}"
        );
    }

    let sample_count = resolve_sample_count(&adapter, format, request.antialiasing, is_software);
    let (device, queue) = request_device(&adapter, "shaderbook export device", sample_count)?;

    let layouts = PipelineLayouts::new(&device);
    let translated = translate_program(program)
        .with_context(|| format!("failed to translate lesson `{}`", program.label))?;
    let pipeline = MaterialPipeline::new(&device, &layouts, format, sample_count, &translated)
        .with_context(|| format!("failed to build pipeline for lesson `{}`", program.label))?;

    let mut camera = OrthographicCamera::lesson();
    camera.fit(width, height);
    let mut uniforms =
        MaterialUniforms::new(width, height, program.color.unwrap_or(request.color));
    uniforms.set_camera(&camera);
    uniforms.set_time(request.time);
    uniforms.set_mouse(request.mouse);
    let binding = MaterialBinding::new(&device, &layouts, &uniforms);
    let mesh = PlaneMesh::new(&device, &PlaneGeometry::lesson_plane());

    let extent = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("export target"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());
    let multisample =
        MultisampleTarget::for_sample_count(&device, format, width, height, sample_count);

    let bytes_per_row = padded_bytes_per_row(width);
    let readback = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("export readback"),
        size: u64::from(bytes_per_row) * u64::from(height),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("export encoder"),
    });
    encode_plane_pass(
        &mut encoder,
        &view,
        multisample.as_ref(),
        &pipeline,
        &binding,
        &mesh,
    );
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture: &target,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &readback,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        extent,
    );
    queue.submit(std::iter::once(encoder.finish()));

    let slice = readback.slice(..);
    let (sender, receiver) = mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = sender.send(result);
    });
    device
        .poll(wgpu::PollType::Wait)
        .map_err(|err| anyhow!("failed waiting for export readback: {err}"))?;
    receiver
        .recv()
        .context("export readback callback was dropped")?
        .map_err(|err| anyhow!("failed to map export readback: {err}"))?;

    let pixels = {
        let mapped = slice.get_mapped_range();
        unpad_rows(&mapped, width, height, bytes_per_row)
    };
    readback.unmap();
    debug!(width, height, sample_count, ?format, "read back export frame");
    Ok(pixels)
}

fn write_png(path: &Path, width: u32, height: u32, pixels: Vec<u8>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let image = image::RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| anyhow!("export buffer does not match {width}x{height}"))?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Row pitch for texture-to-buffer copies, aligned to `COPY_BYTES_PER_ROW_ALIGNMENT`.
fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_PIXEL;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

fn unpad_rows(data: &[u8], width: u32, height: u32, bytes_per_row: u32) -> Vec<u8> {
    let row_len = (width * BYTES_PER_PIXEL) as usize;
    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for row in data.chunks(bytes_per_row as usize).take(height as usize) {
        pixels.extend_from_slice(&row[..row_len]);
    }
    pixels
}
