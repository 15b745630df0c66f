use std::path::{Path, PathBuf};

/// Directory holding config.toml, the task document and the log file.
/// Respects XDG_CONFIG_HOME, otherwise `~/.config/tuido`.
pub fn config_dir() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        })
        .join("tuido")
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Resolve the task document path: explicit override first, then the
/// configured `data_file`, then `config.json` in the config directory.
/// A relative `data_file` is taken relative to the config file's directory.
pub fn resolve_data_path(
    override_path: Option<&Path>,
    configured: Option<&Path>,
    config_path: &Path,
) -> PathBuf {
    if let Some(path) = override_path {
        return path.to_path_buf();
    }
    match configured {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => config_path
            .parent()
            .unwrap_or(Path::new("."))
            .join(path),
        None => config_dir().join("config.json"),
    }
}

/// Log file path: configured or `tuido.log` in the config directory
pub fn resolve_log_path(configured: Option<&Path>) -> PathBuf {
    configured
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config_dir().join("tuido.log"))
}
