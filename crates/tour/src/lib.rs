use std::time::{Duration, Instant};

use rand::prelude::*;
use settings::TourModeSetting;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TourError {
    #[error("a tour needs at least one lesson")]
    Empty,
    #[error("tour dwell must be greater than zero")]
    ZeroDwell,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TourMode {
    #[default]
    Sequence,
    Shuffle,
}

impl From<TourModeSetting> for TourMode {
    fn from(value: TourModeSetting) -> Self {
        match value {
            TourModeSetting::Sequence => Self::Sequence,
            TourModeSetting::Shuffle => Self::Shuffle,
        }
    }
}

/// Walks a list of lessons in order or shuffled, optionally advancing on
/// its own once `dwell` has elapsed.
pub struct Tour<T> {
    items: Vec<T>,
    mode: TourMode,
    dwell: Option<Duration>,
    order: Vec<usize>,
    cursor: usize,
    last_started: Instant,
    rng: StdRng,
}

impl<T> Tour<T> {
    pub fn new(
        items: Vec<T>,
        mode: TourMode,
        dwell: Option<Duration>,
        seed: u64,
    ) -> Result<Self, TourError> {
        if items.is_empty() {
            return Err(TourError::Empty);
        }
        if dwell.is_some_and(|dwell| dwell.is_zero()) {
            return Err(TourError::ZeroDwell);
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let order = build_order(items.len(), mode, None, &mut rng);
        Ok(Self {
            items,
            mode,
            dwell,
            order,
            cursor: 0,
            last_started: Instant::now(),
            rng,
        })
    }

    pub fn current(&self) -> &T {
        &self.items[self.order[self.cursor]]
    }

    /// One-based position within the current pass, and the pass length.
    pub fn position(&self) -> (usize, usize) {
        (self.cursor + 1, self.order.len())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    fn restart(&mut self, now: Instant) {
        self.last_started = now;
    }

    /// Moves to the next lesson. Returns `false` when there is nothing to
    /// move to.
    pub fn next(&mut self, now: Instant) -> bool {
        self.last_started = now;
        if self.items.len() <= 1 {
            return false;
        }
        self.cursor += 1;
        if self.cursor >= self.order.len() {
            let last = self.order.last().copied();
            self.order = build_order(self.items.len(), self.mode, last, &mut self.rng);
            self.cursor = 0;
        }
        true
    }

    /// Moves back one lesson, wrapping to the end of the current pass.
    pub fn previous(&mut self, now: Instant) -> bool {
        self.last_started = now;
        if self.items.len() <= 1 {
            return false;
        }
        self.cursor = match self.cursor {
            0 => self.order.len() - 1,
            cursor => cursor - 1,
        };
        true
    }

    /// Advances when the dwell time of the current lesson has elapsed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.next_deadline() {
            Some(deadline) if now >= deadline => self.next(now),
            _ => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        if self.items.len() <= 1 {
            return None;
        }
        // A dwell past the clock's range never expires.
        self.dwell
            .and_then(|dwell| self.last_started.checked_add(dwell))
    }
}

fn build_order(len: usize, mode: TourMode, previous: Option<usize>, rng: &mut StdRng) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    match mode {
        TourMode::Sequence => {}
        TourMode::Shuffle => {
            order.shuffle(rng);
            // Never show the same lesson twice in a row across a pass boundary.
            if len > 1 && previous == Some(order[0]) {
                order.swap(0, 1);
            }
        }
    }
    order
}
