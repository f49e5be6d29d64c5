//! Foreign handle helpers.
//!
//! Typed integer handles for C APIs, and ready-made owners for the C
//! runtime on unix targets.

pub mod handles;

#[cfg(unix)]
pub mod crt;
