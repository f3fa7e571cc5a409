//! Resolves lesson handles against the built-in set and on-disk search roots.
//!
//! Types:
//!
//! - `Catalog` stores the lesson search roots (config dir, data dir, or any
//!   directory passed on the command line).
//!
//! Functions:
//!
//! - `Catalog::resolve` turns a `LessonHandle` into a loaded `Lesson`.
//! - `Catalog::list` enumerates built-ins followed by every valid lesson
//!   directory found directly under a search root.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, warn};

use crate::builtin::{find_builtin, BUILTIN_LESSONS};
use crate::local::LocalLesson;
use crate::manifest::MANIFEST_FILE;
use crate::{Lesson, LessonHandle};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    roots: Vec<PathBuf>,
}

impl Catalog {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn resolve(&self, handle: &LessonHandle) -> Result<Lesson> {
        match handle {
            LessonHandle::Builtin(name) => find_builtin(name)
                .map(|lesson| lesson.to_lesson())
                .ok_or_else(|| anyhow!("unknown built-in lesson '{name}'")),
            LessonHandle::Local(path) => self.load_local(path).map(LocalLesson::into_lesson),
        }
    }

    pub fn resolve_all(&self, handles: &[LessonHandle]) -> Result<Vec<Lesson>> {
        handles
            .iter()
            .map(|handle| {
                self.resolve(handle)
                    .with_context(|| format!("failed to resolve lesson '{handle}'"))
            })
            .collect()
    }

    /// Built-ins first, then local lessons sorted by directory within each root.
    /// Directories with a broken manifest are skipped with a warning.
    pub fn list(&self) -> Vec<Lesson> {
        let mut lessons: Vec<Lesson> = BUILTIN_LESSONS
            .iter()
            .map(|lesson| lesson.to_lesson())
            .collect();

        for root in &self.roots {
            let mut dirs = match lesson_dirs(root) {
                Ok(dirs) => dirs,
                Err(err) => {
                    debug!(root = %root.display(), error = %err, "skipping lesson root");
                    continue;
                }
            };
            dirs.sort();
            for dir in dirs {
                match LocalLesson::load(&dir) {
                    Ok(local) => lessons.push(local.into_lesson()),
                    Err(err) => {
                        warn!(path = %dir.display(), error = %err, "skipping invalid lesson")
                    }
                }
            }
        }
        lessons
    }

    fn load_local(&self, path: &Path) -> Result<LocalLesson> {
        if path.as_os_str().is_empty() {
            return Err(anyhow!("lesson path must not be empty"));
        }

        debug!(requested = %path.display(), roots = ?self.roots, "resolving local lesson");
        let candidates = if path.is_absolute() || path.exists() {
            vec![path.to_path_buf()]
        } else {
            self.roots.iter().map(|root| root.join(path)).collect()
        };

        for candidate in candidates {
            debug!(candidate = %candidate.display(), "checking lesson candidate");
            if candidate.exists() {
                return LocalLesson::load(&candidate).map_err(|err| {
                    warn!(path = %candidate.display(), error = %err, "failed to load lesson");
                    anyhow!(err).context(format!("invalid lesson at {}", candidate.display()))
                });
            }
        }

        warn!(requested = %path.display(), roots = ?self.roots, "lesson missing");
        Err(anyhow!(
            "unable to locate lesson '{}'. searched roots: {:?}",
            path.display(),
            self.roots
        ))
    }
}

fn lesson_dirs(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.join(MANIFEST_FILE).is_file() {
            dirs.push(path);
        }
    }
    Ok(dirs)
}
