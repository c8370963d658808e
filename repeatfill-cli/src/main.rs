//! repeatfill CLI - command-line interface
//!
//! Compiles pattern specs, dumps reads from a repeat target, sends control
//! messages and manages `~/.repeatfill/config.ini`.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::compile::CompileArgs;
use commands::config::ConfigCommands;
use commands::dump::DumpArgs;
use commands::message::MessageArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "repeatfill")]
#[command(version = repeatfill::VERSION)]
#[command(about = "Synthetic storage target filled with a repeating byte pattern", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a pattern spec and print its repeat unit
    Compile(CompileArgs),

    /// Read from a repeat target and dump the bytes
    Dump(DumpArgs),

    /// Send one control message (seq.config <spec> or seq.show)
    Message(MessageArgs),

    /// View or change configuration settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Compile(args) => commands::compile::run(args),
        Commands::Dump(args) => commands::dump::run(args, cli.debug),
        Commands::Message(args) => commands::message::run(args, cli.debug),
        Commands::Config(command) => commands::config::run(command),
    }
}
