//! Cross-platform application paths

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppPaths {
    data_dir: PathBuf,
}

impl AppPaths {
    /// Use `override_dir` if given, else the OS data directory. The directory
    /// is created if missing.
    pub fn new(override_dir: Option<PathBuf>) -> Result<Self, AppError> {
        let data_dir = match override_dir {
            Some(dir) => dir,
            None => Self::get_data_dir()?,
        };

        // Ensure directory exists
        fs::create_dir_all(&data_dir).map_err(|source| AppError::Io {
            path: data_dir.clone(),
            source,
        })?;

        Ok(Self { data_dir })
    }

    fn get_data_dir() -> Result<PathBuf, AppError> {
        let base = dirs::data_dir().ok_or(AppError::NoDataDir)?;
        Ok(base.join("labyrinth"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn progress_file(&self) -> PathBuf {
        self.data_dir.join("progress.json")
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }
}
