// src/log.rs
//
// Logging goes through `tracing`. The short macros keep call sites terse;
// `init` installs the subscriber once, from the binary.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}

const DEFAULT_DIRECTIVE: &str = "clippercard=info";
const VERBOSE_DIRECTIVE: &str = "clippercard=debug";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogOptions {
    pub verbose: bool,
    /// Append to this file instead of writing to stderr.
    pub file: Option<PathBuf>,
}

/// Install the global subscriber. `RUST_LOG` wins over `verbose` when set.
/// Calling it twice is harmless; the second install is ignored.
pub fn init(opts: &LogOptions) -> Result<()> {
    let directive = if opts.verbose { VERBOSE_DIRECTIVE } else { DEFAULT_DIRECTIVE };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = match &opts.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    if installed.is_err() {
        logd!("log subscriber already installed");
    }
    Ok(())
}
