//! Token signing configuration parsing and validation.
//!
//! Debug builds tolerate missing or malformed values and fall back to
//! defaults with a warning, including an ephemeral signing secret. Release
//! builds require a real secret and reject malformed values.

use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use chrono::Duration;
use mockable::Env;
use tracing::warn;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::TokenLifetimes;

const SECRET_ENV: &str = "JWT_SECRET";
const SECRET_FILE_ENV: &str = "JWT_SECRET_FILE";
const ALGORITHM_ENV: &str = "JWT_ALGORITHM";
const ACCESS_TTL_ENV: &str = "ACCESS_TOKEN_TTL_MINUTES";
const REFRESH_TTL_ENV: &str = "REFRESH_TOKEN_TTL_DAYS";
const SECRET_MIN_LEN: usize = 32;
const ALGORITHM_EXPECTED: &str = "HS256|HS384|HS512";
const ACCESS_TTL_MAX_MINUTES: i64 = 60 * 24 * 365;
const REFRESH_TTL_MAX_DAYS: i64 = 3650;
const ACCESS_TTL_EXPECTED: &str = "a whole number of minutes between 1 and 525600";
const REFRESH_TTL_EXPECTED: &str = "a whole number of days between 1 and 3650";

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Defaults and warnings instead of errors.
    Debug,
    /// Explicit, valid settings required.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bookshelf::config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// HMAC algorithm used to sign tokens.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SigningAlgorithm {
    /// HMAC with SHA-256.
    #[default]
    Hs256,
    /// HMAC with SHA-384.
    Hs384,
    /// HMAC with SHA-512.
    Hs512,
}

impl SigningAlgorithm {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HS256" => Some(Self::Hs256),
            "HS384" => Some(Self::Hs384),
            "HS512" => Some(Self::Hs512),
            _ => None,
        }
    }
}

/// Validated token settings.
pub struct TokenSettings {
    /// Shared HMAC secret.
    pub secret: Zeroizing<Vec<u8>>,
    /// Signing algorithm.
    pub algorithm: SigningAlgorithm,
    /// Access and refresh token lifetimes.
    pub lifetimes: TokenLifetimes,
}

impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("lifetimes", &self.lifetimes)
            .finish()
    }
}

/// Errors raised while validating token configuration.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The configured secret is too short for release builds.
    #[error("token secret too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
}

/// Build token settings from environment variables and build mode.
///
/// `JWT_SECRET` takes precedence over `JWT_SECRET_FILE`.
///
/// # Examples
///
/// ```rust
/// use bookshelf::config::{BuildMode, SigningAlgorithm, token_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "JWT_SECRET" => Some("0123456789abcdef0123456789abcdef".to_owned()),
///     "JWT_ALGORITHM" => Some("HS512".to_owned()),
///     _ => None,
/// });
///
/// let settings = token_settings_from_env(&env, BuildMode::Release).unwrap();
/// assert_eq!(settings.algorithm, SigningAlgorithm::Hs512);
/// assert_eq!(settings.lifetimes.access.num_minutes(), 30);
/// ```
pub fn token_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let secret = secret_from_env(env, mode)?;
    let algorithm = algorithm_from_env(env, mode)?;
    let defaults = TokenLifetimes::default();
    let access_minutes = bounded_from_env(
        env,
        mode,
        Bounded {
            name: ACCESS_TTL_ENV,
            default: defaults.access.num_minutes(),
            max: ACCESS_TTL_MAX_MINUTES,
            expected: ACCESS_TTL_EXPECTED,
        },
    )?;
    let refresh_days = bounded_from_env(
        env,
        mode,
        Bounded {
            name: REFRESH_TTL_ENV,
            default: defaults.refresh.num_days(),
            max: REFRESH_TTL_MAX_DAYS,
            expected: REFRESH_TTL_EXPECTED,
        },
    )?;

    Ok(TokenSettings {
        secret,
        algorithm,
        lifetimes: TokenLifetimes {
            access: Duration::minutes(access_minutes),
            refresh: Duration::days(refresh_days),
        },
    })
}

fn secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Zeroizing<Vec<u8>>, TokenConfigError> {
    if let Some(value) = env.string(SECRET_ENV).filter(|v| !v.is_empty()) {
        return check_length(Zeroizing::new(value.into_bytes()), mode);
    }

    let Some(path) = env.string(SECRET_FILE_ENV).map(PathBuf::from) else {
        if mode.is_debug() {
            warn!("JWT_SECRET not set; using temporary signing secret (dev only)");
            return Ok(ephemeral_secret());
        }
        return Err(TokenConfigError::MissingEnv { name: SECRET_ENV });
    };

    match read_secret_file(&path) {
        Ok(secret) => check_length(secret, mode),
        Err(error) if mode.is_debug() => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary signing secret (dev only)"
            );
            Ok(ephemeral_secret())
        }
        Err(error) => Err(TokenConfigError::SecretRead {
            path,
            source: error,
        }),
    }
}

fn check_length(
    secret: Zeroizing<Vec<u8>>,
    mode: BuildMode,
) -> Result<Zeroizing<Vec<u8>>, TokenConfigError> {
    let length = secret.len();
    if length >= SECRET_MIN_LEN {
        return Ok(secret);
    }
    if mode.is_debug() {
        warn!(length, "token secret shorter than {SECRET_MIN_LEN} bytes");
        return Ok(secret);
    }
    Err(TokenConfigError::SecretTooShort {
        length,
        min_len: SECRET_MIN_LEN,
    })
}

/// Read a secret file, dropping trailing whitespace left by editors.
fn read_secret_file(path: &Path) -> io::Result<Zeroizing<Vec<u8>>> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    let mut bytes = Zeroizing::new(dir.read(file_name)?);
    while bytes.last().is_some_and(u8::is_ascii_whitespace) {
        bytes.pop();
    }
    Ok(bytes)
}

fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut bytes = Vec::with_capacity(SECRET_MIN_LEN);
    bytes.extend_from_slice(Uuid::new_v4().as_bytes());
    bytes.extend_from_slice(Uuid::new_v4().as_bytes());
    Zeroizing::new(bytes)
}

fn algorithm_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SigningAlgorithm, TokenConfigError> {
    let Some(value) = env.string(ALGORITHM_ENV) else {
        return Ok(SigningAlgorithm::default());
    };
    match SigningAlgorithm::parse(&value) {
        Some(algorithm) => Ok(algorithm),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid JWT_ALGORITHM; defaulting to HS256");
            Ok(SigningAlgorithm::default())
        }
        None => Err(TokenConfigError::InvalidEnv {
            name: ALGORITHM_ENV,
            value,
            expected: ALGORITHM_EXPECTED,
        }),
    }
}

struct Bounded {
    name: &'static str,
    default: i64,
    max: i64,
    expected: &'static str,
}

fn bounded_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    bound: Bounded,
) -> Result<i64, TokenConfigError> {
    let Some(value) = env.string(bound.name) else {
        return Ok(bound.default);
    };
    match value.trim().parse::<i64>() {
        Ok(parsed) if (1..=bound.max).contains(&parsed) => Ok(parsed),
        _ if mode.is_debug() => {
            warn!(
                value = %value,
                variable = bound.name,
                default = bound.default,
                "invalid token lifetime; using default"
            );
            Ok(bound.default)
        }
        _ => Err(TokenConfigError::InvalidEnv {
            name: bound.name,
            value,
            expected: bound.expected,
        }),
    }
}
