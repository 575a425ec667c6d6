use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use handlekit::demo::{demo_scene, replay_onto_demo_scene, run_demo_session};
use handlekit::{
    init_logging, Config, HistoryFile, UndoRedoManager, BUILD_DATE, VERSION,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "handlekit")]
#[command(about = "Manipulation handles with undoable, replayable edits")]
struct Cli {
    /// Configuration file (JSON or TOML); defaults to the user config
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted editing session and print its history
    Demo {
        /// Save the resulting history to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Replay a saved history against a fresh demo scene
    Replay {
        /// History file written by `demo --save`
        file: PathBuf,
    },
    /// Print the effective configuration
    Config {
        /// Print only the location of the user config file
        #[arg(long)]
        path: bool,
    },
    /// Print version and build date
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Demo { save } => demo(&config, save.as_deref()),
        Commands::Replay { file } => replay(&config, &file),
        Commands::Config { path } => show_config(&config, path),
        Commands::Version => {
            println!("handlekit {} (built {})", VERSION, BUILD_DATE);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path)),
        None => {
            let path = Config::config_file_path()?;
            Ok(Config::load_or_default(&path)?)
        }
    }
}

fn demo(config: &Config, save: Option<&Path>) -> Result<()> {
    let root = demo_scene();
    let mut manager = UndoRedoManager::with_depth(config.history.max_depth);
    run_demo_session(&root, &mut manager, config)?;

    for (i, summary) in manager.history().iter().enumerate() {
        println!("{:>2}. {}", i + 1, summary);
    }

    if let Some(path) = save {
        HistoryFile::from_manager(&manager)?
            .save(path)
            .with_context(|| format!("Failed to save history to {:?}", path))?;
        println!("History saved to {}", path.display());
    }
    Ok(())
}

fn replay(config: &Config, file: &Path) -> Result<()> {
    let history = HistoryFile::load(file)
        .with_context(|| format!("Failed to load history from {:?}", file))?;
    let (root, _manager, report) = replay_onto_demo_scene(&history, config)?;

    println!("Applied {} changes", report.applied);
    for name in &report.inert {
        println!("Skipped '{}': target not found", name);
    }
    for child in root.children() {
        println!("  {} at {:?}", child.name(), child.global_xfo().tr);
    }
    Ok(())
}

fn show_config(config: &Config, path_only: bool) -> Result<()> {
    if path_only {
        println!("{}", Config::config_file_path()?.display());
    } else {
        println!("{}", serde_json::to_string_pretty(config)?);
    }
    Ok(())
}
