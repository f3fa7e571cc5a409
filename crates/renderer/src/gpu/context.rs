use anyhow::{anyhow, Context as AnyhowContext, Result};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use wgpu::TextureFormatFeatureFlags;
use winit::dpi::PhysicalSize;

use crate::types::{Antialiasing, ColorSpaceMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SurfaceColorSpace {
    Gamma,
    Linear,
}

impl From<ColorSpaceMode> for SurfaceColorSpace {
    fn from(mode: ColorSpaceMode) -> Self {
        match mode {
            ColorSpaceMode::Auto | ColorSpaceMode::Gamma => SurfaceColorSpace::Gamma,
            ColorSpaceMode::Linear => SurfaceColorSpace::Linear,
        }
    }
}

pub(crate) struct GpuContext {
    pub _instance: wgpu::Instance,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    pub sample_count: u32,
    pub surface_format: wgpu::TextureFormat,
    pub max_texture_dimension: u32,
}

pub(crate) fn create_instance() -> wgpu::Instance {
    wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        flags: wgpu::InstanceFlags::default(),
        memory_budget_thresholds: wgpu::MemoryBudgetThresholds::default(),
        backend_options: wgpu::BackendOptions::default(),
    })
}

pub(crate) fn log_adapter(adapter: &wgpu::Adapter) -> bool {
    let info = adapter.get_info();
    let is_software = info.device_type == wgpu::DeviceType::Cpu;
    tracing::debug!(
        name = %info.name,
        backend = ?info.backend,
        device_type = ?info.device_type,
        is_software,
        "selected GPU adapter"
    );
    is_software
}

/// Picks the MSAA sample count for `format`, falling back to the closest
/// supported count below the request.
pub(crate) fn resolve_sample_count(
    adapter: &wgpu::Adapter,
    format: wgpu::TextureFormat,
    antialiasing: Antialiasing,
    is_software: bool,
) -> u32 {
    let format_features = adapter.get_texture_format_features(format);
    let mut supported_samples = format_features.flags.supported_sample_counts();
    if !supported_samples.contains(&1) {
        supported_samples.push(1);
    }
    supported_samples.sort_unstable();
    supported_samples.dedup();

    let mut sample_count = match antialiasing {
        Antialiasing::Auto => *supported_samples.last().unwrap_or(&1),
        Antialiasing::Off => 1,
        Antialiasing::Samples(requested) => {
            if supported_samples.contains(&requested) {
                requested
            } else {
                let fallback = supported_samples
                    .iter()
                    .copied()
                    .filter(|&count| count <= requested)
                    .max()
                    .unwrap_or(1);
                tracing::warn!(
                    requested,
                    fallback,
                    ?supported_samples,
                    "requested MSAA sample count not supported; falling back"
                );
                fallback
            }
        }
    };

    if sample_count > 1
        && !format_features
            .flags
            .contains(TextureFormatFeatureFlags::MULTISAMPLE_RESOLVE)
    {
        tracing::warn!(
            ?format,
            "texture format does not support MSAA resolve; disabling MSAA"
        );
        sample_count = 1;
    }

    if is_software && sample_count > 1 {
        tracing::warn!(
            sample_count,
            "software rasterizer detected; disabling MSAA for performance"
        );
        sample_count = 1;
    }

    sample_count
}

pub(crate) fn request_device(
    adapter: &wgpu::Adapter,
    label: &str,
    sample_count: u32,
) -> Result<(wgpu::Device, wgpu::Queue)> {
    let mut required_features = wgpu::Features::empty();
    if sample_count > 4 {
        required_features |= wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES;
    }
    pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
        label: Some(label),
        required_features,
        required_limits: adapter.limits(),
        memory_hints: wgpu::MemoryHints::MemoryUsage,
        trace: wgpu::Trace::default(),
    }))
    .context("failed to create GPU device")
}

impl GpuContext {
    pub(crate) fn new<T>(
        target: &T,
        initial_size: PhysicalSize<u32>,
        antialiasing: Antialiasing,
        color_space: ColorSpaceMode,
    ) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let instance = create_instance();

        let window_handle = target
            .window_handle()
            .map_err(|err| anyhow!("failed to acquire window handle: {err}"))?;
        let display_handle = target
            .display_handle()
            .map_err(|err| anyhow!("failed to acquire display handle: {err}"))?;

        let surface = unsafe {
            instance.create_surface_unsafe(wgpu::SurfaceTargetUnsafe::RawHandle {
                raw_display_handle: display_handle.as_raw(),
                raw_window_handle: window_handle.as_raw(),
            })
        }
        .context("failed to create rendering surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("failed to find a suitable GPU adapter")?;
        let is_software = log_adapter(&adapter);

        let max_texture_dimension = adapter.limits().max_texture_dimension_2d;
        let requested_width = initial_size.width.max(1);
        let requested_height = initial_size.height.max(1);
        if requested_width > max_texture_dimension || requested_height > max_texture_dimension {
            anyhow::bail!(
                "GPU max texture dimension is {max_texture_dimension}, requested surface is {requested_width}x{requested_height}"
            );
        }

        let surface_caps = surface.get_capabilities(&adapter);
        let first_format = *surface_caps
            .formats
            .first()
            .context("surface reports no supported formats")?;
        let surface_format = match SurfaceColorSpace::from(color_space) {
            SurfaceColorSpace::Linear => surface_caps
                .formats
                .iter()
                .copied()
                .find(|format| format.is_srgb())
                .unwrap_or_else(|| {
                    tracing::warn!(
                        fallback = ?first_format,
                        "no sRGB surface format available; using the first supported format"
                    );
                    first_format
                }),
            SurfaceColorSpace::Gamma => surface_caps
                .formats
                .iter()
                .copied()
                .find(|format| !format.is_srgb())
                .unwrap_or_else(|| {
                    tracing::warn!(
                        fallback = ?first_format,
                        "no non-sRGB surface format available; using the first supported format"
                    );
                    first_format
                }),
        };

        let sample_count =
            resolve_sample_count(&adapter, surface_format, antialiasing, is_software);
        let (device, queue) = request_device(&adapter, "shaderbook device", sample_count)?;

        let present_mode = surface_caps
            .present_modes
            .iter()
            .copied()
            .find(|mode| *mode == wgpu::PresentMode::Fifo)
            .or_else(|| surface_caps.present_modes.first().copied())
            .unwrap_or(wgpu::PresentMode::Fifo);
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        tracing::debug!(?present_mode, ?surface_format, sample_count, "configuring surface");

        let size = PhysicalSize::new(requested_width, requested_height);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            size,
            sample_count,
            surface_format,
            max_texture_dimension,
        })
    }

    /// Applies a new surface size. Returns `false` when the size was rejected.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) -> bool {
        let Some(new_size) = accepted_size(new_size, self.max_texture_dimension) else {
            return false;
        };

        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        true
    }

    pub(crate) fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}

/// Filters a requested surface size: zero-area sizes (minimised windows) and
/// sizes past the GPU texture limit are rejected so the previous size stays.
pub(crate) fn accepted_size(
    new_size: PhysicalSize<u32>,
    max_texture_dimension: u32,
) -> Option<PhysicalSize<u32>> {
    if new_size.width == 0 || new_size.height == 0 {
        return None;
    }
    if new_size.width > max_texture_dimension || new_size.height > max_texture_dimension {
        tracing::warn!(
            width = new_size.width,
            height = new_size.height,
            max = max_texture_dimension,
            "ignoring resize beyond GPU texture limit"
        );
        return None;
    }
    Some(new_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_area_sizes_are_rejected() {
        assert_eq!(accepted_size(PhysicalSize::new(0, 600), 8192), None);
        assert_eq!(accepted_size(PhysicalSize::new(800, 0), 8192), None);
        assert_eq!(accepted_size(PhysicalSize::new(0, 0), 8192), None);
    }

    #[test]
    fn sizes_past_texture_limit_are_rejected() {
        assert_eq!(accepted_size(PhysicalSize::new(8193, 600), 8192), None);
        assert_eq!(accepted_size(PhysicalSize::new(800, 10_000), 8192), None);
    }

    #[test]
    fn sizes_within_limit_pass_through() {
        let size = PhysicalSize::new(1920, 1080);
        assert_eq!(accepted_size(size, 8192), Some(size));
        let edge = PhysicalSize::new(8192, 8192);
        assert_eq!(accepted_size(edge, 8192), Some(edge));
    }

    #[test]
    fn auto_color_space_uses_gamma_surface() {
        assert_eq!(
            SurfaceColorSpace::from(ColorSpaceMode::Auto),
            SurfaceColorSpace::Gamma
        );
        assert_eq!(
            SurfaceColorSpace::from(ColorSpaceMode::Linear),
            SurfaceColorSpace::Linear
        );
    }
}
