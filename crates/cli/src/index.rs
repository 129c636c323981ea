//! Music library index
//!
//! An index is bound to one library root. Listing walks the root
//! depth-first in file-name order; rebuilding records the root in the state
//! cache and reads every listed file's tag.

use crate::errors::{Result, VirError};
use crate::state::StateCache;
use crate::track::Track;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SCOPE: &str = "vir/index";

/// A vir music library index
#[derive(Debug)]
pub struct Index {
    root: PathBuf,
    state: StateCache,
}

/// Outcome of [`Index::rebuild`]
#[derive(Debug, Default)]
pub struct RebuildReport {
    pub tracks: Vec<Track>,
    /// Files whose tags could not be read; the rebuild carries on past them
    pub failures: Vec<VirError>,
}

impl Index {
    /// Load an index for `root`, which must be an existing directory
    pub fn load(root: impl Into<PathBuf>, state: StateCache) -> Result<Self> {
        let root = root.into();
        check_library_root(&root)?;
        Ok(Self { root, state })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Yield every file under the root, relative to it.
    ///
    /// A walk error is yielded once and ends the listing.
    pub fn list_music_files(&self) -> MusicFiles {
        MusicFiles {
            root: self.root.clone(),
            walker: WalkDir::new(&self.root).sort_by_file_name().into_iter(),
            done: false,
        }
    }

    /// Record the root as the last indexed library, then read every track
    pub fn rebuild(&self) -> Result<RebuildReport> {
        self.state.set_music_root(&self.root)?;

        let mut report = RebuildReport::default();
        for entry in self.list_music_files() {
            let rel_path = entry?;
            match Track::load(&self.full_path(&rel_path)) {
                Ok(track) => report.tracks.push(track),
                Err(e) => {
                    tracing::warn!(path = %rel_path.display(), error = %e, "skipping file");
                    report.failures.push(e);
                }
            }
        }

        tracing::info!(
            root = %self.root.display(),
            tracks = report.tracks.len(),
            skipped = report.failures.len(),
            "rebuilt index"
        );
        Ok(report)
    }

    fn full_path(&self, rel_path: &Path) -> PathBuf {
        self.root.join(rel_path)
    }
}

/// Iterator over library files, see [`Index::list_music_files`]
pub struct MusicFiles {
    root: PathBuf,
    walker: walkdir::IntoIter,
    done: bool,
}

impl Iterator for MusicFiles {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.walker.next()? {
                Ok(entry) if entry.file_type().is_dir() => continue,
                Ok(entry) => {
                    let rel_path = entry
                        .path()
                        .strip_prefix(&self.root)
                        .unwrap_or(entry.path());
                    return Some(Ok(rel_path.to_path_buf()));
                }
                Err(source) => {
                    self.done = true;
                    return Some(Err(VirError::MusicLibraryWalk {
                        scope: SCOPE,
                        source,
                    }));
                }
            }
        }
    }
}

fn check_library_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(VirError::MusicLibraryRootIsNotDir {
            scope: SCOPE,
            path: root.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(VirError::MusicLibraryRootDoesNotExist {
            scope: SCOPE,
            path: root.to_path_buf(),
        }),
        Err(source) => Err(VirError::Fatal {
            scope: SCOPE,
            source,
        }),
    }
}
