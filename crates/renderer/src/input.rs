use winit::dpi::PhysicalPosition;
use winit::event::TouchPhase;

/// Last observed pointer position in window pixels, top-left origin.
///
/// Mouse and touch share one slot. Every move overwrites it; nothing is
/// queued or smoothed.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerState {
    position: [f32; 2],
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> [f32; 2] {
        self.position
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.set(position);
    }

    /// Records a touch point. Only drags move the pointer; returns `true`
    /// when the position was written.
    pub fn touch_moved(&mut self, phase: TouchPhase, location: PhysicalPosition<f64>) -> bool {
        match phase {
            TouchPhase::Moved => {
                self.set(location);
                true
            }
            TouchPhase::Started | TouchPhase::Ended | TouchPhase::Cancelled => false,
        }
    }

    fn set(&mut self, position: PhysicalPosition<f64>) {
        self.position = [position.x as f32, position.y as f32];
    }
}
