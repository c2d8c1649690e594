mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    components, export, init, validate, ComponentsArgs, ExportArgs, InitArgs, ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagesmith CLI - build pages from component trees
#[derive(Parser, Debug)]
#[command(name = "pagesmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Pagesmith project
    Init(InitArgs),

    /// Export a project to HTML, CSS and JS
    Export(ExportArgs),

    /// List the registered component types
    Components(ComponentsArgs),

    /// Check a project against the component registry
    Validate(ValidateArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Export(args) => export(args, &cwd),
            Command::Components(args) => components(args),
            Command::Validate(args) => validate(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
