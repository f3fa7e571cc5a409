use thiserror::Error;

use crate::runtime::RenderPolicy;

/// Default `u_color`: the `0xff0000` red every lesson starts from.
pub const DEFAULT_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid colour `{0}`; expected #rrggbb, 0xrrggbb, or rrggbb")]
pub struct ColorParseError(pub String);

/// Splits a packed `0xRRGGBB` value into unit-range channels, no gamma applied.
pub fn color_from_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

pub fn parse_hex_color(input: &str) -> Result<[f32; 3], ColorParseError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError(input.to_string()));
    }
    u32::from_str_radix(digits, 16)
        .map(color_from_hex)
        .map_err(|_| ColorParseError(input.to_string()))
}

/// Vertex + fragment source pair written in the WebGL `ShaderMaterial` dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderProgram {
    /// Human-readable name used for GPU labels, logs, and the window title.
    pub label: String,
    pub vertex: String,
    pub fragment: String,
    /// Per-lesson `u_color`; the renderer default applies when `None`.
    pub color: Option<[f32; 3]>,
}

impl ShaderProgram {
    pub fn new(
        label: impl Into<String>,
        vertex: impl Into<String>,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            vertex: vertex.into(),
            fragment: fragment.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: Option<[f32; 3]>) -> Self {
        self.color = color;
        self
    }
}

/// Output color handling for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSpaceMode {
    /// Match the browser canvas: shader output is written to the swapchain untouched.
    #[default]
    Auto,
    /// Treat shader outputs as gamma-encoded; use non-sRGB surfaces.
    Gamma,
    /// Treat shader outputs as linear and let an sRGB swapchain encode them.
    Linear,
}

/// Anti-aliasing policy for the render pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Antialiasing {
    /// Pick the highest sample count supported by the surface format.
    #[default]
    Auto,
    /// Disable MSAA and render directly into the swapchain.
    Off,
    /// Request a specific MSAA sample count (clamped to what the device supports).
    Samples(u32),
}

/// Immutable configuration passed to the renderer at start-up.
///
/// `RendererConfig` mirrors CLI flags and configuration file values: how
/// large the window should be, how frames are paced, and the static colour
/// fed to `u_color`.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Initial window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Anti-aliasing mode requested by the caller.
    pub antialiasing: Antialiasing,
    /// Desired color handling for the swapchain.
    pub color_space: ColorSpaceMode,
    /// Animate continuously or hold a still timestamp.
    pub policy: RenderPolicy,
    /// Value of the `u_color` uniform.
    pub color: [f32; 3],
}

impl Default for RendererConfig {
    /// Provides a 720p animated configuration.
    fn default() -> Self {
        Self {
            surface_size: (1280, 720),
            antialiasing: Antialiasing::default(),
            color_space: ColorSpaceMode::default(),
            policy: RenderPolicy::default(),
            color: DEFAULT_COLOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_color_is_pure_red() {
        assert_eq!(color_from_hex(0xff0000), DEFAULT_COLOR);
    }

    #[test]
    fn parses_hex_prefixes() {
        assert_eq!(parse_hex_color("#00ff00").unwrap(), [0.0, 1.0, 0.0]);
        assert_eq!(parse_hex_color("0x0000FF").unwrap(), [0.0, 0.0, 1.0]);
        let grey = parse_hex_color(" 808080 ").unwrap();
        assert!((grey[0] - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_short_or_non_hex_colors() {
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
        assert!(parse_hex_color("").is_err());
    }
}
