//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use bookshelf::config::TokenSettings;

/// Everything `create_server` needs to build the listener and its state.
#[derive(Debug)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) data_path: PathBuf,
    pub(crate) tokens: TokenSettings,
}

impl ServerConfig {
    /// Construct a server configuration from validated settings.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, data_path: PathBuf, tokens: TokenSettings) -> Self {
        Self {
            bind_addr,
            data_path,
            tokens,
        }
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Exercised by server tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the catalogue file the server will load.
    #[must_use]
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }
}
