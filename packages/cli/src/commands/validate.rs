use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagesmith_common::RealFileSystem;
use pagesmith_editor::EditSession;
use pagesmith_registry::DiagnosticLevel;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Project JSON (overrides config)
    pub project: Option<PathBuf>,

    /// Show all diagnostics including info level
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn validate(args: ValidateArgs, cwd: &Path) -> Result<()> {
    let fs = RealFileSystem;
    let config = Config::load(&fs, cwd)?;
    let project_path = args
        .project
        .map(|p| cwd.join(p))
        .unwrap_or_else(|| config.project_path(cwd));

    let session = EditSession::load(&fs, &project_path)
        .with_context(|| format!("loading {}", project_path.display()))?;
    let diagnostics = session.validate();

    let errors = diagnostics
        .iter()
        .filter(|d| matches!(d.level, DiagnosticLevel::Error))
        .count();
    let warnings = diagnostics
        .iter()
        .filter(|d| matches!(d.level, DiagnosticLevel::Warning))
        .count();

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&diagnostics)?);
    } else {
        println!("🔍 {} {}", "Validating".green().bold(), project_path.display());
        println!();

        for diagnostic in &diagnostics {
            let level_str = match diagnostic.level {
                DiagnosticLevel::Error => "error".red().bold(),
                DiagnosticLevel::Warning => "warning".yellow().bold(),
                DiagnosticLevel::Info => "info".blue().bold(),
            };

            if !args.verbose && matches!(diagnostic.level, DiagnosticLevel::Info) {
                continue;
            }

            let node = session
                .find(&diagnostic.node_id)
                .map(|n| n.display_name.as_str())
                .unwrap_or("?");
            println!(
                "  {}[{}]: {} ({} {})",
                level_str,
                diagnostic.rule,
                diagnostic.message,
                node,
                diagnostic.node_id.to_string().dimmed()
            );
            if let Some(suggestion) = &diagnostic.suggestion {
                println!("    {} {}", "help:".cyan(), suggestion);
            }
        }

        println!();
        if errors == 0 && warnings == 0 {
            println!("   {} No issues found!", "✓".green());
        } else {
            println!(
                "   {} {}, {} {}",
                "Errors:".red(),
                errors,
                "Warnings:".yellow(),
                warnings
            );
        }
    }

    if errors > 0 {
        anyhow::bail!("{} validation error(s) in {}", errors, project_path.display());
    }

    Ok(())
}
