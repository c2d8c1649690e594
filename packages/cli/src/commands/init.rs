use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagesmith_common::{FileSystem, RealFileSystem};
use pagesmith_document::{ComponentType, NodePatch};
use pagesmith_editor::EditSession;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project name
    #[arg(short, long, default_value = "My Page")]
    pub name: String,

    /// Output directory for exports
    #[arg(short, long, default_value = "dist")]
    pub out_dir: String,

    /// Force overwrite existing config and project
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    init_with(&mut RealFileSystem, args, cwd)
}

pub fn init_with(fs: &mut dyn FileSystem, args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if fs.exists(&config_path) && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Pagesmith project...".bright_blue().bold()
    );

    let config = Config {
        out_dir: args.out_dir.clone(),
        ..Config::default()
    };

    // Starter page
    let project_path = config.project_path(cwd);
    if !fs.exists(&project_path) || args.force {
        let session = starter_page(&args.name);
        session.save(fs, &project_path)?;
        println!("  {} Created {}", "✓".green(), config.project);
    }

    fs.write(&config_path, &serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", config.project);
    println!("  2. Run: pagesmith export");
    println!("  3. Open {}/index.html", config.out_dir);

    Ok(())
}

/// A hero with a heading, a line of text and a call to action.
fn starter_page(name: &str) -> EditSession {
    let mut session = EditSession::new(slug(name));
    session.rename(name);

    if let Some(hero) = session.insert(ComponentType::Hero, None, None) {
        if let Some(heading) = session.insert(ComponentType::Heading, Some(&hero.id), None) {
            session.update(
                &heading.id,
                NodePatch::new().prop("content", name).prop("level", 1),
            );
        }
        session.insert(ComponentType::Text, Some(&hero.id), None);
        session.insert(ComponentType::Button, Some(&hero.id), None);
    }
    session
}

fn slug(name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "page".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_common::MemoryFileSystem;

    #[test]
    fn test_slug() {
        assert_eq!(slug("My Page"), "my-page");
        assert_eq!(slug("  Acme & Co!  "), "acme-co");
        assert_eq!(slug("!!!"), "page");
    }

    #[test]
    fn test_init_writes_config_and_project() {
        let mut fs = MemoryFileSystem::new();
        let cwd = Path::new("/work");
        let args = InitArgs {
            name: "Launch".to_string(),
            out_dir: "public".to_string(),
            force: false,
        };

        init_with(&mut fs, args, cwd).unwrap();

        let config = Config::load(&fs, cwd).unwrap();
        assert_eq!(config.out_dir, "public");

        let session = EditSession::load(&fs, &config.project_path(cwd)).unwrap();
        assert_eq!(session.name(), "Launch");
        assert_eq!(session.project_id(), "launch");
        let hero = &session.components()[0];
        assert_eq!(hero.component_type, ComponentType::Hero);
        assert_eq!(hero.children().len(), 3);
        assert_eq!(hero.children()[0].props.text("content"), Some("Launch"));
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file("/work/pagesmith.config.json", r#"{ "outDir": "keep" }"#);
        let args = InitArgs {
            name: "Other".to_string(),
            out_dir: "dist".to_string(),
            force: false,
        };

        init_with(&mut fs, args, Path::new("/work")).unwrap();

        assert_eq!(fs.files.len(), 1);
        assert!(fs.files[Path::new("/work/pagesmith.config.json")].contains("keep"));
    }
}
