//! Runtime configuration for vir
//!
//! Values come from command-line flags or their environment variables;
//! unset values fall back to defaults derived from the home directory.

use crate::errors::{Result, VirError};
use std::path::{Path, PathBuf};
use vir_cache::dir_descriptor;

/// Name of the state directory under the user's home
pub const STATE_DIR_NAME: &str = ".vir";

const SCOPE: &str = "vir/config";

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Root directory of the music library
    pub music_root: Option<PathBuf>,
    /// Directory holding vir state; `~/.vir` when unset
    pub state_dir: Option<PathBuf>,
    /// Explicit cache descriptor, overriding `state_dir`
    pub cache: Option<String>,
}

impl Config {
    pub fn music_root(&self) -> Result<&Path> {
        self.music_root
            .as_deref()
            .ok_or(VirError::MusicRootNotConfigured { scope: SCOPE })
    }

    pub fn state_dir(&self) -> Result<PathBuf> {
        match &self.state_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::home_dir()
                .map(|home| home.join(STATE_DIR_NAME))
                .ok_or(VirError::UserLookupFailed { scope: SCOPE }),
        }
    }

    /// Descriptor for the state cache
    pub fn cache_descriptor(&self) -> Result<String> {
        match &self.cache {
            Some(descriptor) => Ok(descriptor.clone()),
            None => Ok(dir_descriptor(self.state_dir()?)),
        }
    }
}
