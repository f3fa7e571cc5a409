//! GPU side of the renderer.
//!
//! - `context` owns the wgpu instance, device and surface, and reconfigures
//!   the swapchain on resize.
//! - `uniforms` mirrors the material block that `compile` injects into every
//!   lesson.
//! - `pipeline` turns a translated lesson into a render pipeline and owns the
//!   plane mesh plus uniform buffer.
//! - `state` glues everything together for the window loop.

pub(crate) mod context;
pub(crate) mod pipeline;
mod state;
mod uniforms;

pub(crate) use state::GpuState;
pub use uniforms::MaterialUniforms;
