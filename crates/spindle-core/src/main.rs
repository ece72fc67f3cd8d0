use clap::{Parser, Subcommand};
use spindle_core::ipc::{self, Command};
use spindle_core::source;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spindlectl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the carousel window
    Show,
    /// Hide the carousel window
    Hide,
    /// Move to the next image
    Next,
    /// Move to the previous image
    #[command(alias = "previous")]
    Prev,
    /// Jump to an image by zero-based index (negative counts from the end)
    Goto {
        #[arg(allow_hyphen_values = true)]
        index: i64,
    },
    /// Reload the configuration and image list
    Reload,
    /// List the carousel items a directory would produce
    Scan {
        /// Directory to scan for images
        dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Show => send(Command::Show),
        Commands::Hide => send(Command::Hide),
        Commands::Next => send(Command::Next),
        Commands::Prev => send(Command::Previous),
        Commands::Goto { index } => send(Command::Goto(index)),
        Commands::Reload => send(Command::Reload),
        Commands::Scan { dir } => scan(dir),
    }
}

fn send(command: Command) -> anyhow::Result<()> {
    log::debug!("Sending '{}' to {}", command, ipc::SOCKET_PATH);
    ipc::send(command)?;
    Ok(())
}

fn scan(dir: PathBuf) -> anyhow::Result<()> {
    let items = source::scan_directory(&dir)?;
    if items.is_empty() {
        anyhow::bail!("No images found in '{}'.", dir.display());
    }

    for (i, item) in items.iter().enumerate() {
        match &item.caption {
            Some(caption) => println!("{i:>3}  {}  ({caption})", item.source),
            None => println!("{i:>3}  {}", item.source),
        }
    }
    Ok(())
}
