use clap::Parser;
use std::path::PathBuf;
use vir::{Commands, Config};

#[derive(Parser)]
#[command(name = "vir")]
#[command(about = "Manage your music library", long_about = None)]
#[command(version)]
struct Cli {
    /// Music library root directory
    #[arg(long, visible_alias = "mr", env = "VIR_MUSIC_ROOT", global = true)]
    music_root: Option<PathBuf>,

    /// Directory for vir state (defaults to ~/.vir)
    #[arg(long, env = "VIR_STATE_DIR", global = true)]
    state_dir: Option<PathBuf>,

    /// Cache descriptor overriding the state directory, e.g. dir:/tmp/vir?gzip=1
    #[arg(long, env = "VIR_CACHE", global = true)]
    cache: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    vir::logging::init(cli.verbose).map_err(|e| eyre::eyre!(e))?;

    let config = Config {
        music_root: cli.music_root,
        state_dir: cli.state_dir,
        cache: cli.cache,
    };

    let stdout = std::io::stdout();
    cli.command.execute(&config, &mut stdout.lock())?;
    Ok(())
}
