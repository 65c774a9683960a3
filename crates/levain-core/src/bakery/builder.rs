//! Builder for creating and configuring Bakery instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Bakery;
use crate::{
    db::Database,
    error::{BakeryError, Result},
};

/// Builder for creating and configuring Bakery instances.
#[derive(Debug, Clone, Default)]
pub struct BakeryBuilder {
    database_path: Option<PathBuf>,
}

impl BakeryBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/levain/levain.db` or `~/.local/share/levain/levain.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the bakery, creating the database file and schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `BakeryError::FileSystem` if the database directory cannot be
    /// created, `BakeryError::XdgDirectory` if no default location exists,
    /// and `BakeryError::Database` if schema initialization fails
    pub async fn build(self) -> Result<Bakery> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| BakeryError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let init_path = db_path.clone();
        task::spawn_blocking(move || Database::new(&init_path).map(drop))
            .await
            .map_err(BakeryError::join)??;

        log::debug!("Using database {}", db_path.display());
        Ok(Bakery::new(db_path))
    }

    /// Returns the default database path following the XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("levain")
            .place_data_file("levain.db")
            .map_err(|e| BakeryError::XdgDirectory(e.to_string()))
    }
}
