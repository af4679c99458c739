//! Workspace automation: man page and shell completion generation.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation tasks")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages into target/man
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
    /// Generate shell completions into target/completions
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
    },
}

fn main() -> std::io::Result<()> {
    let xtask = Xtask::parse();
    match xtask.task {
        Task::Man { out_dir } => generate_man(&out_dir),
        Task::Completions { out_dir } => generate_completions(&out_dir),
    }
}

fn generate_man(out_dir: &PathBuf) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let cmd = prosegrade::command();
    clap_mangen::generate_to(cmd, out_dir)?;
    println!("man pages written to {}", out_dir.display());
    Ok(())
}

fn generate_completions(out_dir: &PathBuf) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let mut cmd = prosegrade::command();
    let name = cmd.get_name().to_string();
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::Elvish, Shell::PowerShell] {
        clap_complete::generate_to(shell, &mut cmd, &name, out_dir)?;
    }
    println!("completions written to {}", out_dir.display());
    Ok(())
}
