//! walkmap - random-walk drawings over SVG maps
//!
//! Usage:
//!   walkmap walk <svg> [-p <preset>] [-c <config>]   Draw walks over every polygon
//!   walkmap presets                                 List built-in region presets

mod cli;

use clap::{Parser, Subcommand};
use tracing::Level;

use cli::{WalkArgs, cmd_presets, cmd_walk};

#[derive(Parser, Debug)]
#[command(name = "walkmap", version, about = "Random-walk line drawings over polygon maps")]
struct Args {
    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate walks for every polygon in an SVG file
    Walk(WalkArgs),
    /// List the built-in region presets
    Presets,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Walk(walk_args) => cmd_walk(&walk_args),
        Command::Presets => {
            cmd_presets();
            Ok(())
        }
    }
}
