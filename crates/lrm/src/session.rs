use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Environment variable set by a running GRASS session.
pub const GISBASE_ENV: &str = "GISBASE";

/// Capability handle proving a GRASS installation is available.
///
/// The pipeline never inspects the ambient environment itself: the session is
/// constructed once at startup and handed to the process-backed toolkit.
#[derive(Debug, Clone)]
pub struct GrassSession {
    gisbase: PathBuf,
}

impl GrassSession {
    /// Detect the surrounding GRASS session through `GISBASE`.
    pub fn from_env() -> Result<Self> {
        Self::from_gisbase_var(std::env::var_os(GISBASE_ENV))
    }

    /// Construct the capability explicitly, without touching the environment.
    pub fn with_gisbase(gisbase: impl Into<PathBuf>) -> Self {
        Self { gisbase: gisbase.into() }
    }

    pub fn gisbase(&self) -> &Path {
        &self.gisbase
    }

    fn from_gisbase_var(value: Option<OsString>) -> Result<Self> {
        match value {
            Some(dir) if !dir.is_empty() => Ok(Self::with_gisbase(PathBuf::from(dir))),
            _ => Err(Error::MissingGrassEnvironment),
        }
    }
}
