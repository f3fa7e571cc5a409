//! Loads lesson directories from disk.
//!
//! Types:
//!
//! - `LessonError` classifies missing manifests, parse and validation failures,
//!   and unreadable sources so the CLI can report them precisely.
//! - `LocalLesson` holds the lesson directory, its parsed `LessonManifest`, and
//!   both GLSL sources read at load time.
//!
//! Functions:
//!
//! - `LocalLesson::load` reads `lesson.toml`, validates it, then reads the
//!   sources it names.
//! - `LocalLesson::into_lesson` converts the directory into the catalogue's
//!   `Lesson` representation.
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::manifest::{LessonManifest, MANIFEST_FILE};
use crate::{Lesson, LessonOrigin};

#[derive(Debug, Error)]
pub enum LessonError {
    #[error("lesson manifest not found at {0}")]
    ManifestMissing(PathBuf),

    #[error("failed to parse lesson manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),

    #[error("lesson manifest validation failed: {0:?}")]
    ManifestValidation(Vec<String>),

    #[error("missing shader source: {0}")]
    SourceMissing(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct LocalLesson {
    root: PathBuf,
    manifest: LessonManifest,
    vertex: String,
    fragment: String,
}

impl LocalLesson {
    pub fn load(root: impl AsRef<Path>) -> Result<Self, LessonError> {
        let root = root.as_ref().to_path_buf();
        let manifest_path = root.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            return Err(LessonError::ManifestMissing(manifest_path));
        }

        let manifest_raw = fs::read_to_string(&manifest_path)?;
        let manifest: LessonManifest = toml::from_str(&manifest_raw)?;
        let issues = manifest.validate();
        if !issues.is_empty() {
            return Err(LessonError::ManifestValidation(issues));
        }

        let vertex = read_source(&root.join(&manifest.vertex))?;
        let fragment = read_source(&root.join(&manifest.fragment))?;
        debug!(lesson = %manifest.name, root = %root.display(), "loaded local lesson");

        Ok(Self {
            root,
            manifest,
            vertex,
            fragment,
        })
    }

    pub fn into_lesson(self) -> Lesson {
        // Colour was checked by `validate` during load.
        let color = self.manifest.color().ok().flatten();
        let title = self.manifest.display_title().to_string();
        Lesson {
            name: self.manifest.name,
            title,
            summary: self.manifest.summary.unwrap_or_default(),
            tags: self.manifest.tags,
            vertex: self.vertex,
            fragment: self.fragment,
            color,
            origin: LessonOrigin::Local(self.root),
        }
    }
}

fn read_source(path: &Path) -> Result<String, LessonError> {
    if !path.is_file() {
        return Err(LessonError::SourceMissing(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const VERTEX: &str = "varying vec2 v_uv;\nvoid main() {\n    v_uv = uv;\n    gl_Position = projectionMatrix * modelViewMatrix * vec4(position, 1.0);\n}\n";
    pub(crate) const FRAGMENT: &str = "varying vec2 v_uv;\nvoid main() {\n    gl_FragColor = vec4(v_uv, 0.0, 1.0);\n}\n";

    pub(crate) fn write_lesson(dir: &Path, manifest: &LessonManifest, extra_files: &[(&str, &str)]) {
        let manifest_str = toml::to_string(manifest).expect("serialize manifest");
        fs::create_dir_all(dir).expect("create lesson dir");
        fs::write(dir.join(MANIFEST_FILE), manifest_str).expect("write manifest");
        for (path, contents) in extra_files {
            let full_path = dir.join(path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent).expect("create dirs");
            }
            fs::write(full_path, contents).expect("write file");
        }
    }

    #[test]
    fn loads_valid_lesson() {
        let temp = tempfile::tempdir().unwrap();
        let mut manifest = LessonManifest::new("uv-check");
        manifest.title = Some("UV check".into());
        manifest.color = Some("#0000ff".into());
        write_lesson(
            temp.path(),
            &manifest,
            &[("vertex.glsl", VERTEX), ("fragment.glsl", FRAGMENT)],
        );

        let lesson = LocalLesson::load(temp.path())
            .expect("load lesson")
            .into_lesson();
        assert_eq!(lesson.name, "uv-check");
        assert_eq!(lesson.vertex, VERTEX);
        assert_eq!(lesson.fragment, FRAGMENT);
        assert_eq!(lesson.title, "UV check");
        assert_eq!(lesson.color, Some([0.0, 0.0, 1.0]));
        assert!(matches!(lesson.origin, LessonOrigin::Local(ref root) if root == temp.path()));
        renderer::validate_program(&lesson.to_program()).expect("lesson validates");
    }

    #[test]
    fn missing_manifest_is_reported() {
        let temp = tempfile::tempdir().unwrap();
        let err = LocalLesson::load(temp.path()).unwrap_err();
        assert!(matches!(err, LessonError::ManifestMissing(path) if path.ends_with(MANIFEST_FILE)));
    }

    #[test]
    fn missing_fragment_is_reported() {
        let temp = tempfile::tempdir().unwrap();
        write_lesson(
            temp.path(),
            &LessonManifest::new("half"),
            &[("vertex.glsl", VERTEX)],
        );
        let err = LocalLesson::load(temp.path()).unwrap_err();
        assert!(matches!(err, LessonError::SourceMissing(path) if path.ends_with("fragment.glsl")));
    }

    #[test]
    fn invalid_manifest_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(
            temp.path().join(MANIFEST_FILE),
            "name = \"ok\"\ncolor = \"#12345\"\n",
        )
        .unwrap();
        let err = LocalLesson::load(temp.path()).unwrap_err();
        assert!(matches!(err, LessonError::ManifestValidation(issues) if issues.len() == 1));
    }

    #[test]
    fn unparsable_manifest_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join(MANIFEST_FILE), "name = [").unwrap();
        let err = LocalLesson::load(temp.path()).unwrap_err();
        assert!(matches!(err, LessonError::ManifestParse(_)));
    }
}
