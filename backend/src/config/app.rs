//! Application settings loaded via OrthoConfig.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Address the HTTP server binds to when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Catalogue file read when none is configured.
pub const DEFAULT_DATA_PATH: &str = "data/books_data.csv";

/// Server settings: where to listen and which catalogue file to serve.
///
/// Values come from `--bind-addr`/`--data-path`, `BOOKSHELF_BIND_ADDR`/
/// `BOOKSHELF_DATA_PATH`, or a configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKSHELF")]
pub struct AppSettings {
    /// Socket address for the HTTP listener.
    #[ortho_config(default = default_bind_addr())]
    pub bind_addr: SocketAddr,
    /// Path of the scraped CSV snapshot.
    #[ortho_config(default = default_data_path())]
    pub data_path: PathBuf,
}

impl AppSettings {
    /// Configured bind address; [`DEFAULT_BIND_ADDR`] when unset.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Configured data path; [`DEFAULT_DATA_PATH`] when unset.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.data_path.clone()
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}
