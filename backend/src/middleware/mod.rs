//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit in front of every handler,
//! currently trace correlation and request logging.

pub mod trace;

pub use trace::{TRACE_ID_HEADER, Trace};
