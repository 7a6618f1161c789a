//! Loading `unicourse.toml` at startup.

use store::UniCourseConfig;

/// Read the config file from the platform config directory
/// (`<config_dir>/unicourse/unicourse.toml`). A missing file yields defaults;
/// an unreadable or malformed one is logged and also yields defaults.
pub fn load_config() -> UniCourseConfig {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let Some(dir) = dirs::config_dir() else {
            return UniCourseConfig::default();
        };
        load_config_from(&dir.join("unicourse").join(UniCourseConfig::filename()))
    }
    #[cfg(target_arch = "wasm32")]
    {
        UniCourseConfig::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_config_from(path: &std::path::Path) -> UniCourseConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return UniCourseConfig::default(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            return UniCourseConfig::default();
        }
    };
    UniCourseConfig::from_toml(&text).unwrap_or_else(|e| {
        tracing::warn!("Invalid {}: {}", path.display(), e);
        UniCourseConfig::default()
    })
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_from_file() {
        let dir = std::env::temp_dir().join(format!("unicourse_cfg_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(UniCourseConfig::filename());

        // Missing file
        assert_eq!(load_config_from(&path), UniCourseConfig::default());

        std::fs::write(&path, "[auth]\nlatency_ms = 0\n").unwrap();
        assert_eq!(load_config_from(&path).auth.latency_ms, 0);

        // Malformed file falls back to defaults
        std::fs::write(&path, "[auth\n").unwrap();
        assert_eq!(load_config_from(&path), UniCourseConfig::default());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
