//! Schema for `lesson.toml`, the file that turns a directory into a lesson.
//!
//! Types:
//!
//! - `LessonManifest` names the lesson, describes it for `shaderbook list`, and
//!   points at the vertex/fragment sources relative to the lesson directory.
//!
//! Functions:
//!
//! - `LessonManifest::validate` returns human-readable issues so loaders can
//!   report every problem at once instead of failing on the first.
//! - `LessonManifest::color` parses the optional `u_color` override.
use std::path::{Component, Path, PathBuf};

use renderer::{parse_hex_color, ColorParseError};
use serde::{Deserialize, Serialize};

pub const MANIFEST_FILE: &str = "lesson.toml";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LessonManifest {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_vertex")]
    pub vertex: PathBuf,
    #[serde(default = "default_fragment")]
    pub fragment: PathBuf,
    /// `u_color` for this lesson as `#rrggbb`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

fn default_vertex() -> PathBuf {
    PathBuf::from("vertex.glsl")
}

fn default_fragment() -> PathBuf {
    PathBuf::from("fragment.glsl")
}

impl LessonManifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            summary: None,
            tags: Vec::new(),
            vertex: default_vertex(),
            fragment: default_fragment(),
            color: None,
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.name.trim().is_empty() {
            issues.push("lesson name must not be empty".to_string());
        } else if !is_slug(&self.name) {
            issues.push(format!(
                "lesson name '{}' must use lowercase letters, digits and '-'",
                self.name
            ));
        }
        for (stage, path) in [("vertex", &self.vertex), ("fragment", &self.fragment)] {
            if path.as_os_str().is_empty() {
                issues.push(format!("{stage} source path must not be empty"));
            } else if !stays_inside(path) {
                issues.push(format!(
                    "{stage} source '{}' must be a relative path inside the lesson directory",
                    path.display()
                ));
            }
        }
        if let Err(err) = self.color() {
            issues.push(err.to_string());
        }
        issues
    }

    pub fn color(&self) -> Result<Option<[f32; 3]>, ColorParseError> {
        self.color.as_deref().map(parse_hex_color).transpose()
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

pub(crate) fn is_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn stays_inside(path: &Path) -> bool {
    path.components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_manifest_uses_default_sources() {
        let manifest: LessonManifest = toml::from_str("name = \"waves\"").unwrap();
        assert_eq!(manifest.vertex, PathBuf::from("vertex.glsl"));
        assert_eq!(manifest.fragment, PathBuf::from("fragment.glsl"));
        assert_eq!(manifest.display_title(), "waves");
        assert!(manifest.validate().is_empty());
    }

    #[test]
    fn parses_full_manifest() {
        let manifest: LessonManifest = toml::from_str(
            r##"
            name = "stripes"
            title = "Stripes"
            summary = "fract() on one axis"
            tags = ["tiling", "fract"]
            vertex = "shaders/stripes.vert"
            fragment = "shaders/stripes.frag"
            color = "#00ff80"
            "##,
        )
        .unwrap();
        assert_eq!(manifest.display_title(), "Stripes");
        assert_eq!(manifest.tags, vec!["tiling", "fract"]);
        let color = manifest.color().unwrap().unwrap();
        assert_eq!(color[0], 0.0);
        assert_eq!(color[1], 1.0);
        assert!((color[2] - 128.0 / 255.0).abs() < 1e-6);
        assert!(manifest.validate().is_empty());
    }

    #[test]
    fn reports_every_issue() {
        let mut manifest = LessonManifest::new("Bad Name");
        manifest.vertex = PathBuf::from("../outside.vert");
        manifest.fragment = PathBuf::new();
        manifest.color = Some("red".into());
        let issues = manifest.validate();
        assert_eq!(issues.len(), 4, "{issues:?}");
        assert!(issues[0].contains("Bad Name"));
        assert!(issues[1].contains("outside.vert"));
        assert!(issues[2].contains("fragment"));
        assert!(issues[3].contains("red"));
    }

    #[test]
    fn slug_rules() {
        assert!(is_slug("moving-rectangle"));
        assert!(is_slug("step2"));
        assert!(!is_slug("-leading"));
        assert!(!is_slug("Upper"));
        assert!(!is_slug("with space"));
        assert!(!is_slug(""));
    }
}
