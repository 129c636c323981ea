//! Transparent compression for stored values
//!
//! The mode is chosen once when a store is opened and applies to every
//! read and write on it. Compressed entries carry a `.gz` suffix on disk.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read, Write};

/// Descriptor option that enables gzip (presence only, value ignored)
pub const GZIP_OPTION: &str = "gzip";

/// On-disk suffix for gzip entries
pub const GZIP_SUFFIX: &str = ".gz";

/// Compression mode of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Values are stored as-is
    #[default]
    Off,
    /// Values are stored as a gzip stream
    Gzip,
}

impl Compression {
    /// Derive the mode from descriptor options
    pub fn from_options(options: &HashMap<String, String>) -> Self {
        if options.contains_key(GZIP_OPTION) {
            Self::Gzip
        } else {
            Self::Off
        }
    }

    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Gzip)
    }

    /// Suffix appended to the key to form the file name
    pub const fn file_suffix(self) -> &'static str {
        match self {
            Self::Off => "",
            Self::Gzip => GZIP_SUFFIX,
        }
    }

    /// Read a whole entry, decompressing if needed
    pub(crate) fn read_all(self, file: File) -> io::Result<Vec<u8>> {
        let mut data = Vec::new();
        match self {
            Self::Off => {
                let mut file = file;
                file.read_to_end(&mut data)?;
            }
            Self::Gzip => {
                let mut decoder = GzDecoder::new(file);
                decoder.read_to_end(&mut data)?;
            }
        }
        Ok(data)
    }

    /// Write a whole entry, compressing if needed, and flush it to disk.
    ///
    /// The gzip stream is finished before the file is synced, so a reader
    /// never sees a truncated trailer once this returns.
    pub(crate) fn write_all(self, file: File, value: &[u8]) -> io::Result<()> {
        let file = match self {
            Self::Off => {
                let mut file = file;
                file.write_all(value)?;
                file
            }
            Self::Gzip => {
                let mut encoder = GzEncoder::new(file, flate2::Compression::default());
                encoder.write_all(value)?;
                encoder.finish()?
            }
        };
        file.sync_all()
    }
}
