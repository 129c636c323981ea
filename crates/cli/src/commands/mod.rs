use crate::config::Config;
use crate::errors::{Result, VirError};
use crate::index::Index;
use crate::state::StateCache;
use clap::Subcommand;
use std::io::Write;

const SCOPE: &str = "vir/commands";

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List all music files
    #[command(visible_alias = "ls")]
    ListFiles,

    /// Rebuild the vir index
    #[command(visible_alias = "r")]
    RebuildIndex,

    /// Show the music library root recorded by the last rebuild
    LastRoot,
}

impl Commands {
    /// Run the command, writing its output to `out`
    pub fn execute(self, config: &Config, out: &mut impl Write) -> Result<()> {
        let state = StateCache::from_config(config)?;

        match self {
            Commands::ListFiles => {
                let index = Index::load(config.music_root()?, state)?;
                for entry in index.list_music_files() {
                    writeln!(out, "{}", entry?.display()).map_err(output_failed)?;
                }
            }
            Commands::RebuildIndex => {
                let index = Index::load(config.music_root()?, state)?;
                let report = index.rebuild()?;
                for track in &report.tracks {
                    let meta = &track.metadata;
                    let number = meta
                        .number
                        .map(|n| n.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    writeln!(
                        out,
                        "{}\t{}\t{}\t{}\t{}",
                        track.full_path.display(),
                        number,
                        meta.artist,
                        meta.album,
                        meta.title
                    )
                    .map_err(output_failed)?;
                }
                for failure in &report.failures {
                    tracing::warn!("{failure}");
                }
            }
            Commands::LastRoot => {
                if let Some(root) = state.last_music_root()? {
                    writeln!(out, "{}", root.display()).map_err(output_failed)?;
                }
            }
        }

        Ok(())
    }
}

fn output_failed(source: std::io::Error) -> VirError {
    VirError::Fatal {
        scope: SCOPE,
        source,
    }
}
