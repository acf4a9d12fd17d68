//! Startup configuration.
//!
//! - [`AppSettings`]: bind address and data file, layered by `OrthoConfig`.
//! - [`TokenSettings`]: signing secret, algorithm and token lifetimes, read
//!   from the environment and validated according to the [`BuildMode`].

mod app;
mod token;

pub use app::{AppSettings, DEFAULT_BIND_ADDR, DEFAULT_DATA_PATH};
pub use token::{
    BuildMode, SigningAlgorithm, TokenConfigError, TokenSettings, token_settings_from_env,
};
