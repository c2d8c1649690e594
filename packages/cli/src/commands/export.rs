use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagesmith_common::{FileSystem, RealFileSystem};
use pagesmith_editor::EditSession;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const INDEX_FILE: &str = "index.html";
pub const STYLES_FILE: &str = "styles.css";
/// Only written when the page has something to run
pub const SCRIPT_FILE: &str = "script.js";

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Project JSON (overrides config)
    pub project: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Page title (overrides config)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Print the full page to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,
}

pub fn export(args: ExportArgs, cwd: &Path) -> Result<()> {
    export_with(&mut RealFileSystem, args, cwd)
}

pub fn export_with(fs: &mut dyn FileSystem, args: ExportArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(fs, cwd)?;
    let project_path = args
        .project
        .map(|p| cwd.join(p))
        .unwrap_or_else(|| config.project_path(cwd));
    let out_dir = args
        .out_dir
        .map(|p| cwd.join(p))
        .unwrap_or_else(|| config.out_dir(cwd));
    let title = args.title.or_else(|| config.title.clone());

    let session = EditSession::load(fs, &project_path)
        .with_context(|| format!("loading {}", project_path.display()))?;
    let output = session.export(title.as_deref(), &config.export)?;

    if args.stdout {
        println!("{}", output.full_page);
        return Ok(());
    }

    println!("{}", "🔨 Exporting Pagesmith project...".bright_blue().bold());

    let mut files = vec![
        (INDEX_FILE, output.full_page.as_str()),
        (STYLES_FILE, output.css.as_str()),
    ];
    if !output.js.is_empty() {
        files.push((SCRIPT_FILE, output.js.as_str()));
    }

    for (name, contents) in files {
        let path = out_dir.join(name);
        fs.write(&path, contents)
            .with_context(|| format!("writing {}", path.display()))?;
        debug!(path = %path.display(), bytes = contents.len(), "wrote export file");
        println!("  {} {}", "✓".green(), path.display());
    }

    println!();
    println!(
        "{} Exported {} → {}",
        "✅".green(),
        session.name(),
        out_dir.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_common::MemoryFileSystem;
    use pagesmith_document::{Animation, AnimationTrigger, ComponentType};

    fn project_fs(animated: bool) -> MemoryFileSystem {
        let mut session = EditSession::new("export-test");
        session.rename("Export Test");
        let heading = session.insert(ComponentType::Heading, None, None).unwrap();
        if animated {
            session.attach_animation(
                &heading.id,
                Animation::preset("a1", "fadeIn", AnimationTrigger::OnScroll),
            );
        }

        let mut fs = MemoryFileSystem::new();
        session.save(&mut fs, Path::new("/work/project.json")).unwrap();
        fs
    }

    fn args() -> ExportArgs {
        ExportArgs {
            project: None,
            out_dir: None,
            title: None,
            stdout: false,
        }
    }

    #[test]
    fn test_export_writes_page_and_styles() {
        let mut fs = project_fs(false);
        export_with(&mut fs, args(), Path::new("/work")).unwrap();

        let page = &fs.files[Path::new("/work/dist/index.html")];
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Export Test</title>"));
        assert!(fs.files.contains_key(Path::new("/work/dist/styles.css")));
        // Nothing interactive, so no script
        assert!(!fs.files.contains_key(Path::new("/work/dist/script.js")));
    }

    #[test]
    fn test_export_writes_script_for_scroll_animations() {
        let mut fs = project_fs(true);
        export_with(&mut fs, args(), Path::new("/work")).unwrap();

        let script = &fs.files[Path::new("/work/dist/script.js")];
        assert!(script.contains("IntersectionObserver"));
    }

    #[test]
    fn test_flags_override_config() {
        let mut fs = project_fs(false);
        fs.add_file(
            "/work/pagesmith.config.json",
            r#"{ "outDir": "public", "title": "From Config" }"#,
        );

        let mut overridden = args();
        overridden.out_dir = Some(PathBuf::from("out"));
        overridden.title = Some("From Flag".to_string());
        export_with(&mut fs, overridden, Path::new("/work")).unwrap();

        let page = &fs.files[Path::new("/work/out/index.html")];
        assert!(page.contains("<title>From Flag</title>"));
        assert!(!fs.files.contains_key(Path::new("/work/public/index.html")));
    }

    #[test]
    fn test_missing_project_fails() {
        let mut fs = MemoryFileSystem::new();
        let result = export_with(&mut fs, args(), Path::new("/work"));
        assert!(result.is_err());
    }
}
