use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories_next::ProjectDirs;
use tracing::debug;

pub const ENV_CONFIG_DIR: &str = "SHADERBOOK_CONFIG_DIR";
pub const ENV_DATA_DIR: &str = "SHADERBOOK_DATA_DIR";

const QUALIFIER: &str = "org";
const ORGANISATION: &str = "Shaderbook";
const APPLICATION: &str = "shaderbook";

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> Result<Self> {
        let config_override = env_override(ENV_CONFIG_DIR);
        let data_override = env_override(ENV_DATA_DIR);

        let (config_dir, data_dir) = match (config_override, data_override) {
            (Some(config_dir), Some(data_dir)) => (config_dir, data_dir),
            (config_override, data_override) => {
                let project_dirs = ProjectDirs::from(QUALIFIER, ORGANISATION, APPLICATION)
                    .ok_or_else(|| anyhow!("failed to determine user directories"))?;
                (
                    config_override.unwrap_or_else(|| project_dirs.config_dir().to_path_buf()),
                    data_override.unwrap_or_else(|| project_dirs.data_dir().to_path_buf()),
                )
            }
        };

        debug!(
            config = %config_dir.display(),
            data = %data_dir.display(),
            "resolved shaderbook paths"
        );
        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(settings::CONFIG_FILE)
    }

    /// Directories searched for lesson folders, in priority order.
    pub fn lesson_roots(&self) -> Vec<PathBuf> {
        let mut roots = vec![self.config_dir.join("lessons")];
        let data_lessons = self.data_dir.join("lessons");
        if !roots.contains(&data_lessons) {
            roots.push(data_lessons);
        }
        roots
    }
}

fn env_override(name: &str) -> Option<PathBuf> {
    match env::var_os(name) {
        Some(value) if !value.as_os_str().is_empty() => Some(PathBuf::from(value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::sync::{Mutex, OnceLock};
    use tempfile::TempDir;

    fn env_lock() -> &'static Mutex<()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    struct EnvGuard {
        key: &'static str,
        previous: Option<OsString>,
    }

    impl EnvGuard {
        fn set(key: &'static str, value: &Path) -> Self {
            let previous = env::var_os(key);
            env::set_var(key, value);
            Self { key, previous }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = self.previous.take() {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    #[test]
    fn env_overrides_take_precedence() {
        let _guard = env_lock().lock().unwrap();
        let root = TempDir::new().unwrap();
        let config_dir = root.path().join("config");
        let data_dir = root.path().join("data");

        let _config_guard = EnvGuard::set(ENV_CONFIG_DIR, &config_dir);
        let _data_guard = EnvGuard::set(ENV_DATA_DIR, &data_dir);

        let paths = AppPaths::discover().unwrap();
        assert_eq!(paths.config_dir(), config_dir.as_path());
        assert_eq!(paths.data_dir(), data_dir.as_path());
        assert_eq!(paths.config_file(), config_dir.join("shaderbook.toml"));
        assert_eq!(
            paths.lesson_roots(),
            vec![config_dir.join("lessons"), data_dir.join("lessons")]
        );
    }

    #[test]
    fn shared_directory_is_searched_once() {
        let _guard = env_lock().lock().unwrap();
        let root = TempDir::new().unwrap();

        let _config_guard = EnvGuard::set(ENV_CONFIG_DIR, root.path());
        let _data_guard = EnvGuard::set(ENV_DATA_DIR, root.path());

        let paths = AppPaths::discover().unwrap();
        assert_eq!(paths.lesson_roots(), vec![root.path().join("lessons")]);
    }
}
