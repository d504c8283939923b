mod edge_cases;

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Point RIG_CONFIG at a (not yet written) config.toml inside a temp dir
pub(crate) fn setup_config_file() -> (TempDir, PathBuf, EnvGuard) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    let guard = EnvGuard::set(crate::CONFIG_PATH_ENV, path.to_str().unwrap());
    (temp, path, guard)
}
