//! Track metadata from ID3 tags
//!
//! Only the fields vir indexes are kept: title, artist, album and track
//! number. ID3v2 tags are preferred; files with only an ID3v1 trailer are
//! read from that.

use crate::errors::{Result, VirError};
use id3::{ErrorKind, Tag, TagLike};
use std::path::{Path, PathBuf};

const SCOPE: &str = "vir/track";

/// Frame holding the track number, `N` or `N/M`
const TRACK_FRAME: &str = "TRCK";

/// Metadata of a track from its ID3 tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// `None` when the tag has no usable track number
    pub number: Option<u32>,
}

/// A track with the metadata read from its tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub full_path: PathBuf,
    pub metadata: Metadata,
    /// Non-fatal problems found while reading the tag
    pub errata: Vec<String>,
}

impl Track {
    /// Load a track from its ID3 data given the full path to a file
    pub fn load(full_path: &Path) -> Result<Self> {
        let (tag, damage) = read_tag(full_path)?;

        let mut errata: Vec<String> = damage.into_iter().collect();
        let track = tag.get(TRACK_FRAME).and_then(|frame| frame.content().text());
        let number = match parse_track_number(track) {
            Ok(number) => Some(number),
            Err(erratum) => {
                tracing::debug!(path = %full_path.display(), %erratum, "track number unusable");
                errata.push(erratum);
                None
            }
        };

        Ok(Self {
            full_path: full_path.to_path_buf(),
            metadata: Metadata {
                title: clean(tag.title().unwrap_or_default()),
                artist: clean(tag.artist().unwrap_or_default()),
                album: clean(tag.album().unwrap_or_default()),
                number,
            },
            errata,
        })
    }
}

/// Read the file's tag, preferring ID3v2 and falling back to an ID3v1 trailer
fn read_tag(path: &Path) -> Result<(Tag, Option<String>)> {
    match id3::v1v2::read_from_path(path) {
        Ok(tag) => Ok((tag, None)),
        Err(mut err) => match err.partial_tag.take() {
            // frames read before the damage are still usable
            Some(tag) => Ok((tag, Some(format!("partially read id3 tag: {err}")))),
            None => Err(VirError::TrackMetadataLoadFailed {
                scope: SCOPE,
                path: path.to_path_buf(),
                reason: load_failure_reason(&err.kind).to_string(),
                source: Some(err),
            }),
        },
    }
}

fn load_failure_reason(kind: &ErrorKind) -> &'static str {
    match kind {
        ErrorKind::NoTag => "no ID3 tag",
        ErrorKind::Io(_) => "could not read file",
        _ => "invalid ID3 tag",
    }
}

/// Parse a `TRCK` value: `N` or `N/M`
fn parse_track_number(frame: Option<&str>) -> std::result::Result<u32, String> {
    let Some(frame) = frame else {
        return Err("no track number (TRCK) in tags".to_string());
    };

    let value = clean(frame);
    let number = match value.split_once('/') {
        Some((number, _total)) => number,
        None => value.as_str(),
    };

    number
        .trim()
        .parse()
        .map_err(|e| format!("invalid track number format in tags: {number}: {e}"))
}

fn clean(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\0' | '&')).collect()
}
