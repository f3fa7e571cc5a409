//! Renderer crate for shaderbook.
//!
//! Draws one full-screen plane through an orthographic camera and shades it
//! with a lesson's vertex/fragment pair. The overall flow is:
//!
//! ```text
//!   CLI / tour
//!          │ RendererConfig + ProgramSource
//!          ▼
//!   Renderer::run ──▶ WindowState ──▶ winit event loop ──▶ render_frame()
//!          ▲                 │                                   │
//!          │                 └─ pointer / resize ─▶ MaterialUniforms ─▶ GPU UBO
//!          │
//!   Renderer::export ──▶ offscreen texture ──▶ PNG
//! ```
//!
//! Lesson sources are written in the WebGL `ShaderMaterial` dialect and are
//! rewritten by [`compile`] into GLSL 450 before `wgpu` sees them. The same
//! translation backs [`validate_program`], which needs no GPU.

pub mod camera;
pub mod compile;
mod export;
pub mod geometry;
mod gpu;
pub mod input;
pub mod runtime;
mod types;
mod window;

use anyhow::Result;
use std::path::PathBuf;

pub use compile::{translate_program, validate_program, ShaderError, Stage, TranslatedProgram};
pub use export::ExportRequest;
pub use gpu::MaterialUniforms;
pub use runtime::RenderPolicy;
pub use types::{
    color_from_hex, parse_hex_color, Antialiasing, ColorParseError, ColorSpaceMode,
    RendererConfig, ShaderProgram, DEFAULT_COLOR,
};
pub use window::{Navigation, ProgramSource};

/// High-level entry point that owns the chosen configuration.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Opens the lesson window and blocks until it is closed.
    ///
    /// The first lesson comes from `source.current()`; failing to build it is
    /// an error, later lessons that fail to compile are only logged.
    pub fn run<S>(&mut self, source: S) -> Result<()>
    where
        S: ProgramSource + 'static,
    {
        window::run_window(self.config.clone(), source)
    }

    /// Renders one frame of `program` offscreen and saves it as PNG.
    pub fn export(&self, program: &ShaderProgram, request: &ExportRequest) -> Result<PathBuf> {
        export::export_png(program, request)
    }
}
