use std::path::PathBuf;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "TODO_DATA_DIR";

/// Where the project snapshot lives on disk.
///
/// Resolution order: explicit path, `TODO_DATA_DIR`, the platform data
/// directory, then `./.todo`.
pub fn data_dir(explicit: Option<PathBuf>) -> PathBuf {
    resolve(explicit, std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
}

fn resolve(explicit: Option<PathBuf>, from_env: Option<PathBuf>) -> PathBuf {
    explicit
        .or(from_env.filter(|p| !p.as_os_str().is_empty()))
        .or_else(platform_data_dir)
        .unwrap_or_else(|| PathBuf::from(".todo"))
}

fn platform_data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "RustTodoApp").map(|dirs| dirs.data_dir().to_path_buf())
}
