use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use tracing::{error, info, warn};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

use crate::gpu::GpuState;
use crate::input::PointerState;
use crate::runtime::{time_source_for_policy, BoxedTimeSource, FrameScheduler, RenderPolicy, TimeSample};
use crate::types::{RendererConfig, ShaderProgram};

const WINDOW_TITLE: &str = "shaderbook";

/// Direction requested by the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
}

/// Supplies lessons to the window and decides when they change.
///
/// `navigate` and `tick` return `true` when the current program changed; the
/// window then fetches it with `current` and swaps pipelines.
pub trait ProgramSource {
    fn current(&mut self) -> Result<ShaderProgram>;

    fn navigate(&mut self, step: Navigation, now: Instant) -> bool;

    /// Advances on its own (timed tours). Called once per loop iteration.
    fn tick(&mut self, _now: Instant) -> bool {
        false
    }

    /// Next instant at which `tick` may change the program.
    fn next_deadline(&self) -> Option<Instant> {
        None
    }
}

/// Keyboard shortcuts understood by the lesson window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Navigate(Navigation),
    RestartClock,
    Quit,
}

pub(crate) fn action_for_key(key: &Key) -> Option<KeyAction> {
    match key {
        Key::Named(NamedKey::ArrowRight) => Some(KeyAction::Navigate(Navigation::Next)),
        Key::Named(NamedKey::ArrowLeft) => Some(KeyAction::Navigate(Navigation::Previous)),
        Key::Named(NamedKey::Escape) => Some(KeyAction::Quit),
        Key::Character(value) => match value.as_str() {
            "n" | "N" => Some(KeyAction::Navigate(Navigation::Next)),
            "p" | "P" => Some(KeyAction::Navigate(Navigation::Previous)),
            "r" | "R" => Some(KeyAction::RestartClock),
            "q" | "Q" => Some(KeyAction::Quit),
            _ => None,
        },
        _ => None,
    }
}

/// Aggregates GPU state and input for the lesson window.
pub(crate) struct WindowState {
    window: Arc<Window>,
    gpu: GpuState,
    pointer: PointerState,
}

impl WindowState {
    pub(crate) fn new(
        window: Arc<Window>,
        config: &RendererConfig,
        program: &ShaderProgram,
    ) -> Result<Self> {
        let size = window.inner_size();
        let gpu = GpuState::new(window.as_ref(), size, config, program)?;
        let state = Self {
            window,
            gpu,
            pointer: PointerState::new(),
        };
        state.refresh_title();
        Ok(state)
    }

    pub(crate) fn window(&self) -> &Window {
        self.window.as_ref()
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }

    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    pub(crate) fn render_frame(&mut self, time: TimeSample) -> Result<(), wgpu::SurfaceError> {
        self.gpu.render(time, self.pointer.position())
    }

    /// Loads the source's current lesson. Failures keep the running pipeline.
    fn swap_program(&mut self, source: &mut dyn ProgramSource) -> bool {
        let program = match source.current() {
            Ok(program) => program,
            Err(err) => {
                error!("failed to load lesson: {err:?}");
                return false;
            }
        };
        match self.gpu.set_program(&program) {
            Ok(()) => {
                info!(lesson = %program.label, "switched lesson");
                self.refresh_title();
                true
            }
            Err(err) => {
                error!(
                    lesson = %program.label,
                    "lesson failed to compile; keeping `{}`: {err}",
                    self.gpu.lesson_label()
                );
                false
            }
        }
    }

    fn refresh_title(&self) {
        self.window
            .set_title(&format!("{WINDOW_TITLE}: {}", self.gpu.lesson_label()));
    }
}

/// Pairs the frame scheduler with the clock feeding `u_time`.
pub(crate) struct RenderPolicyDriver {
    scheduler: FrameScheduler,
    time_source: BoxedTimeSource,
}

impl RenderPolicyDriver {
    pub(crate) fn new(policy: RenderPolicy) -> Self {
        Self {
            time_source: time_source_for_policy(&policy),
            scheduler: FrameScheduler::new(policy),
        }
    }

    pub(crate) fn sample(&mut self) -> TimeSample {
        self.time_source.sample()
    }

    pub(crate) fn mark_rendered(&mut self, now: Instant) {
        self.scheduler.mark_rendered(now);
    }

    pub(crate) fn invalidate(&mut self) {
        self.scheduler.invalidate();
    }

    pub(crate) fn ready_for_frame(&self, now: Instant) -> bool {
        self.scheduler.ready_for_frame(now)
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub(crate) fn reset(&mut self) {
        self.time_source.reset();
        self.scheduler.reset();
    }
}

/// Opens the lesson window and drives the `winit` event loop until quit.
pub(crate) fn run_window<S>(config: RendererConfig, mut source: S) -> Result<()>
where
    S: ProgramSource + 'static,
{
    let initial = source.current().context("failed to load the first lesson")?;

    let event_loop = EventLoop::new().context("failed to initialize event loop")?;
    let window_size = PhysicalSize::new(config.surface_size.0, config.surface_size.1);
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(window_size)
        .build(&event_loop)
        .context("failed to create lesson window")?;
    let window = Arc::new(window);

    let mut state = WindowState::new(window, &config, &initial)?;
    let mut policy_driver = RenderPolicyDriver::new(config.policy.clone());
    info!(
        lesson = %initial.label,
        width = state.size().width,
        height = state.size().height,
        "lesson window ready"
    );
    state.window().request_redraw();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { window_id, event } if window_id == state.window().id() => {
                match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                        elwt.exit();
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if event.state != ElementState::Pressed || event.repeat {
                            return;
                        }
                        match action_for_key(&event.logical_key) {
                            Some(KeyAction::Navigate(step)) => {
                                if source.navigate(step, Instant::now())
                                    && state.swap_program(&mut source)
                                {
                                    policy_driver.reset();
                                }
                            }
                            Some(KeyAction::RestartClock) => {
                                policy_driver.reset();
                            }
                            Some(KeyAction::Quit) => elwt.exit(),
                            None => {}
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        state.pointer.cursor_moved(position);
                        policy_driver.invalidate();
                    }
                    WindowEvent::Touch(touch) => {
                        if state.pointer.touch_moved(touch.phase, touch.location) {
                            policy_driver.invalidate();
                        }
                    }
                    WindowEvent::Resized(new_size) => {
                        state.resize(new_size);
                        policy_driver.invalidate();
                    }
                    WindowEvent::ScaleFactorChanged {
                        mut inner_size_writer,
                        ..
                    } => {
                        if let Err(err) = inner_size_writer.request_inner_size(state.size()) {
                            warn!("failed to keep window size after scale change: {err}");
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let sample = policy_driver.sample();
                        match state.render_frame(sample) {
                            Ok(()) => policy_driver.mark_rendered(Instant::now()),
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                state.gpu.reconfigure();
                                policy_driver.invalidate();
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                error!("surface out of memory; closing lesson window");
                                elwt.exit();
                            }
                            Err(wgpu::SurfaceError::Timeout) => {
                                warn!("surface timeout; retrying next frame");
                            }
                            Err(other) => {
                                warn!("surface error: {other:?}; retrying next frame");
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                let now = Instant::now();
                if source.tick(now) && state.swap_program(&mut source) {
                    policy_driver.reset();
                }

                if policy_driver.ready_for_frame(now) {
                    state.window().request_redraw();
                    elwt.set_control_flow(ControlFlow::Wait);
                } else {
                    let deadline = match (policy_driver.next_deadline(), source.next_deadline()) {
                        (Some(frame), Some(lesson)) => Some(frame.min(lesson)),
                        (frame, lesson) => frame.or(lesson),
                    };
                    match deadline {
                        Some(deadline) => elwt.set_control_flow(ControlFlow::WaitUntil(deadline)),
                        None => elwt.set_control_flow(ControlFlow::Wait),
                    }
                }
            }
            _ => {}
        })
        .map_err(|err| anyhow!("window event loop error: {err}"))
}
