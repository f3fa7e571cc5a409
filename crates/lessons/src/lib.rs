//! Lesson catalogue for shaderbook: the built-in lessons compiled into the
//! binary plus lesson directories described by `lesson.toml`.
//!
//! Types:
//!
//! - `LessonHandle` is what the CLI and the tour file hand in: a built-in
//!   name or a path to a lesson directory.
//! - `Lesson` is a fully loaded lesson, regardless of where it came from.
//! - `LessonOrigin` records whether a lesson is built-in or local.
mod builtin;
mod catalog;
mod local;
mod manifest;

pub use builtin::{builtin_names, find_builtin, BuiltinLesson, BUILTIN_LESSONS};
pub use catalog::Catalog;
pub use local::{LessonError, LocalLesson};
pub use manifest::{LessonManifest, MANIFEST_FILE};

use std::fmt;
use std::path::PathBuf;

use renderer::ShaderProgram;

const BUILTIN_SCHEME: &str = "builtin:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonHandle {
    Builtin(String),
    Local(PathBuf),
}

impl LessonHandle {
    /// `builtin:<name>` and bare built-in names select built-ins; anything
    /// else is treated as a lesson directory.
    pub fn from_input(input: &str) -> Self {
        if let Some(name) = input.strip_prefix(BUILTIN_SCHEME) {
            Self::Builtin(name.to_string())
        } else if find_builtin(input).is_some() {
            Self::Builtin(input.to_string())
        } else {
            Self::Local(PathBuf::from(input))
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }

    /// Every built-in lesson in teaching order.
    pub fn all_builtins() -> Vec<Self> {
        builtin_names()
            .map(|name| Self::Builtin(name.to_string()))
            .collect()
    }
}

impl fmt::Display for LessonHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(name) => write!(f, "{BUILTIN_SCHEME}{name}"),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonOrigin {
    Builtin,
    Local(PathBuf),
}

impl fmt::Display for LessonOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("built-in"),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lesson {
    pub name: String,
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub vertex: String,
    pub fragment: String,
    /// Lesson-specific `u_color`; `None` falls back to the configured colour.
    pub color: Option<[f32; 3]>,
    pub origin: LessonOrigin,
}

impl Lesson {
    pub fn to_program(&self) -> ShaderProgram {
        ShaderProgram::new(&self.name, &self.vertex, &self.fragment).with_color(self.color)
    }

    pub fn handle(&self) -> LessonHandle {
        match &self.origin {
            LessonOrigin::Builtin => LessonHandle::Builtin(self.name.clone()),
            LessonOrigin::Local(path) => LessonHandle::Local(path.clone()),
        }
    }
}
