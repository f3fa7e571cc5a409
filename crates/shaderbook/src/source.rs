use std::time::Instant;

use anyhow::{Context, Result};
use lessons::{Catalog, LessonHandle};
use renderer::{Navigation, ProgramSource, ShaderProgram};
use tour::Tour;
use tracing::info;

/// Feeds the lesson window from a tour. Lessons are resolved each time they
/// become current, so edits to a local lesson show up on the next visit.
pub struct TourSource {
    tour: Tour<LessonHandle>,
    catalog: Catalog,
}

impl TourSource {
    pub fn new(tour: Tour<LessonHandle>, catalog: Catalog) -> Self {
        Self { tour, catalog }
    }
}

impl ProgramSource for TourSource {
    fn current(&mut self) -> Result<ShaderProgram> {
        let handle = self.tour.current();
        let lesson = self
            .catalog
            .resolve(handle)
            .with_context(|| format!("failed to load lesson '{handle}'"))?;
        let (position, total) = self.tour.position();
        info!(
            lesson = %lesson.name,
            title = %lesson.title,
            origin = %lesson.origin,
            position,
            total,
            "now showing"
        );
        Ok(lesson.to_program())
    }

    fn navigate(&mut self, step: Navigation, now: Instant) -> bool {
        match step {
            Navigation::Next => self.tour.next(now),
            Navigation::Previous => self.tour.previous(now),
        }
    }

    fn tick(&mut self, now: Instant) -> bool {
        self.tour.tick(now)
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.tour.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tour::TourMode;

    fn source(names: &[&str], dwell: Option<Duration>) -> TourSource {
        let handles = names
            .iter()
            .map(|name| LessonHandle::Builtin(name.to_string()))
            .collect();
        let tour = Tour::new(handles, TourMode::Sequence, dwell, 0).unwrap();
        TourSource::new(tour, Catalog::default())
    }

    #[test]
    fn keys_walk_the_tour() {
        let now = Instant::now();
        let mut source = source(&["circle", "rectangle"], None);
        assert_eq!(source.current().unwrap().label, "circle");
        assert!(source.navigate(Navigation::Next, now));
        assert_eq!(source.current().unwrap().label, "rectangle");
        assert!(source.navigate(Navigation::Previous, now));
        assert_eq!(source.current().unwrap().label, "circle");
        assert_eq!(source.next_deadline(), None);
    }

    #[test]
    fn dwell_advances_on_tick() {
        let mut source = source(&["step", "smoothstep"], Some(Duration::from_millis(10)));
        let later = Instant::now() + Duration::from_secs(1);
        assert!(source.tick(later));
        assert_eq!(source.current().unwrap().label, "smoothstep");
    }

    #[test]
    fn unknown_lesson_is_an_error() {
        let mut source = source(&["pentagon"], None);
        let err = source.current().unwrap_err();
        assert!(format!("{err:#}").contains("builtin:pentagon"));
    }
}
