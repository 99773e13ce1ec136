use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Where log files go. Never the terminal: the UI owns it.
    pub fn log_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("tapr"),
            )
        } else {
            ProjectDirs::from("", "", "tapr").map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }
}
