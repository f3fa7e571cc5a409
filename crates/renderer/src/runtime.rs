use std::time::{Duration, Instant};

/// High-level behaviour requested by the caller.
///
/// The render policy decides whether frames animate continuously or the
/// shader is evaluated at one fixed timestamp.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPolicy {
    /// Run the render loop continuously, optionally clamping the frame rate.
    Animate {
        /// Optional requested frames-per-second cap.
        target_fps: Option<f32>,
    },
    /// Hold `u_time` at a fixed value. Pointer and resize still redraw.
    Still {
        /// Timestamp to evaluate the shader at (seconds).
        time: f32,
    },
}

impl Default for RenderPolicy {
    fn default() -> Self {
        Self::Animate { target_fps: None }
    }
}

/// Snapshot of the time state supplied to the shader uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSample {
    /// Elapsed wall-clock or fixed time in seconds.
    pub seconds: f32,
    /// Monotonic frame counter for the running session.
    pub frame_index: u64,
}

impl TimeSample {
    pub fn new(seconds: f32, frame_index: u64) -> Self {
        Self {
            seconds,
            frame_index,
        }
    }
}

/// Abstraction over where time values originate from.
pub trait TimeSource: Send {
    /// Restarts the clock from zero.
    fn reset(&mut self);
    /// Produces a time sample for the next frame.
    fn sample(&mut self) -> TimeSample;
}

/// Time source backed by the system monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
    frame: u64,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source whose zero point is `origin`; used by tests.
    pub fn starting_at(origin: Instant) -> Self {
        Self { origin, frame: 0 }
    }

    fn sample_at(&mut self, now: Instant) -> TimeSample {
        let elapsed = now.saturating_duration_since(self.origin);
        let sample = TimeSample::new(elapsed.as_secs_f32(), self.frame);
        self.frame = self.frame.saturating_add(1);
        sample
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::starting_at(Instant::now())
    }
}

impl TimeSource for SystemTimeSource {
    fn reset(&mut self) {
        self.origin = Instant::now();
        self.frame = 0;
    }

    fn sample(&mut self) -> TimeSample {
        self.sample_at(Instant::now())
    }
}

/// Time source that always reports a fixed timestamp.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    time: f32,
    frame: u64,
}

impl FixedTimeSource {
    pub fn new(time: f32) -> Self {
        Self { time, frame: 0 }
    }
}

impl TimeSource for FixedTimeSource {
    fn reset(&mut self) {
        self.frame = 0;
    }

    fn sample(&mut self) -> TimeSample {
        let sample = TimeSample::new(self.time, self.frame);
        self.frame = self.frame.saturating_add(1);
        sample
    }
}

/// Convenient alias for owning time sources behind trait objects.
pub type BoxedTimeSource = Box<dyn TimeSource + Send>;

/// Builds a time source suited to the requested render policy.
pub fn time_source_for_policy(policy: &RenderPolicy) -> BoxedTimeSource {
    match policy {
        RenderPolicy::Animate { .. } => Box::new(SystemTimeSource::new()),
        RenderPolicy::Still { time } => Box::new(FixedTimeSource::new(*time)),
    }
}

/// Decides when the event loop should request the next redraw.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    policy: RenderPolicy,
    frame_interval: Option<Duration>,
    last_render: Option<Instant>,
    dirty: bool,
}

impl FrameScheduler {
    pub fn new(policy: RenderPolicy) -> Self {
        let frame_interval = match &policy {
            RenderPolicy::Animate {
                target_fps: Some(fps),
            } if *fps > 0.0 => {
                Some(Duration::try_from_secs_f32(1.0 / fps).unwrap_or(Duration::MAX))
            }
            _ => None,
        };
        Self {
            policy,
            frame_interval,
            last_render: None,
            dirty: true,
        }
    }

    /// Forces the next check to report a pending frame (input, resize, lesson swap).
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn mark_rendered(&mut self, now: Instant) {
        self.last_render = Some(now);
        self.dirty = false;
    }

    pub fn ready_for_frame(&self, now: Instant) -> bool {
        match self.policy {
            RenderPolicy::Still { .. } => self.dirty,
            RenderPolicy::Animate { .. } => match (self.frame_interval, self.last_render) {
                (Some(interval), Some(last)) => {
                    self.dirty || now.saturating_duration_since(last) >= interval
                }
                _ => true,
            },
        }
    }

    /// Returns when the next capped frame is due, if the loop should sleep.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (&self.policy, self.frame_interval, self.last_render) {
            (RenderPolicy::Animate { .. }, Some(interval), Some(last)) => {
                last.checked_add(interval)
            }
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.last_render = None;
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_time_is_monotonic_and_counts_frames() {
        let origin = Instant::now();
        let mut source = SystemTimeSource::starting_at(origin);
        let first = source.sample_at(origin + Duration::from_millis(500));
        let second = source.sample_at(origin + Duration::from_millis(1500));
        assert!((first.seconds - 0.5).abs() < 1e-4);
        assert!((second.seconds - 1.5).abs() < 1e-4);
        assert_eq!(first.frame_index, 0);
        assert_eq!(second.frame_index, 1);
    }

    #[test]
    fn samples_before_origin_clamp_to_zero() {
        let origin = Instant::now() + Duration::from_secs(10);
        let mut source = SystemTimeSource::starting_at(origin);
        assert_eq!(source.sample_at(Instant::now()).seconds, 0.0);
    }

    #[test]
    fn still_policy_holds_time() {
        let mut source = time_source_for_policy(&RenderPolicy::Still { time: 2.5 });
        assert_eq!(source.sample().seconds, 2.5);
        assert_eq!(source.sample().seconds, 2.5);
    }

    #[test]
    fn capped_scheduler_waits_for_interval() {
        let mut scheduler = FrameScheduler::new(RenderPolicy::Animate {
            target_fps: Some(4.0),
        });
        let now = Instant::now();
        assert!(scheduler.ready_for_frame(now));
        scheduler.mark_rendered(now);
        assert!(!scheduler.ready_for_frame(now + Duration::from_millis(125)));
        assert!(scheduler.ready_for_frame(now + Duration::from_millis(250)));
        assert_eq!(
            scheduler.next_deadline(),
            Some(now + Duration::from_millis(250))
        );
    }

    #[test]
    fn uncapped_scheduler_always_ready() {
        let mut scheduler = FrameScheduler::new(RenderPolicy::default());
        let now = Instant::now();
        scheduler.mark_rendered(now);
        assert!(scheduler.ready_for_frame(now));
        assert!(scheduler.next_deadline().is_none());
    }

    #[test]
    fn vanishing_fps_waits_without_deadline() {
        let mut scheduler = FrameScheduler::new(RenderPolicy::Animate {
            target_fps: Some(1e-30),
        });
        let now = Instant::now();
        assert!(scheduler.ready_for_frame(now));
        scheduler.mark_rendered(now);
        assert!(!scheduler.ready_for_frame(now + Duration::from_secs(3600)));
        assert!(scheduler.next_deadline().is_none());
    }

    #[test]
    fn still_scheduler_renders_only_when_invalidated() {
        let mut scheduler = FrameScheduler::new(RenderPolicy::Still { time: 0.0 });
        let now = Instant::now();
        assert!(scheduler.ready_for_frame(now));
        scheduler.mark_rendered(now);
        assert!(!scheduler.ready_for_frame(now));
        scheduler.invalidate();
        assert!(scheduler.ready_for_frame(now));
    }
}
