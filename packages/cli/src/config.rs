use anyhow::{Context, Result};
use pagesmith_common::FileSystem;
use pagesmith_compiler_html::GenerateConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pagesmith.config.json";

/// Pagesmith configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Project JSON, relative to the config file
    #[serde(default = "default_project")]
    pub project: String,

    /// Directory that receives exported files
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Page title; the project name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Generation options passed through to the exporter
    #[serde(default)]
    pub export: GenerateConfig,
}

fn default_project() -> String {
    "project.json".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

impl Config {
    /// Load config from a directory, falling back to defaults when there is
    /// no config file
    pub fn load(fs: &dyn FileSystem, cwd: &Path) -> Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if !fs.exists(&config_path) {
            return Ok(Config::default());
        }

        let content = fs
            .read_to_string(&config_path)
            .with_context(|| format!("reading {}", config_path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", config_path.display()))?;
        config
            .export
            .validate()
            .with_context(|| format!("invalid export options in {}", config_path.display()))?;
        Ok(config)
    }

    pub fn project_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.project)
    }

    pub fn out_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: default_project(),
            out_dir: default_out_dir(),
            title: None,
            export: GenerateConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_common::MemoryFileSystem;

    #[test]
    fn test_parse_config() {
        let json = r##"{
            "project": "site/landing.json",
            "outDir": "public",
            "title": "Landing",
            "export": {
                "includeTheme": false,
                "themeVariables": { "primary": "#ff0066" },
                "globalCustomCode": { "css": "body { margin: 0; }" }
            }
        }"##;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.project, "site/landing.json");
        assert_eq!(config.out_dir, "public");
        assert_eq!(config.title.as_deref(), Some("Landing"));
        assert!(!config.export.include_theme);
        assert_eq!(config.export.theme_variables["primary"], "#ff0066");
        assert_eq!(config.export.scroll_threshold, 0.1);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.project, "project.json");
        assert_eq!(config.out_dir, "dist");
        assert!(config.title.is_none());
        assert!(config.export.include_theme);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let fs = MemoryFileSystem::new();
        let config = Config::load(&fs, Path::new("/work")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.project_path(Path::new("/work")),
            PathBuf::from("/work/project.json")
        );
    }

    #[test]
    fn test_load_fills_missing_fields() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file("/work/pagesmith.config.json", r#"{ "outDir": "build" }"#);

        let config = Config::load(&fs, Path::new("/work")).unwrap();
        assert_eq!(config.out_dir(Path::new("/work")), PathBuf::from("/work/build"));
        assert_eq!(config.project, "project.json");
    }

    #[test]
    fn test_load_rejects_unsafe_theme() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file(
            "/work/pagesmith.config.json",
            r#"{ "export": { "themeVariables": { "primary": "red; } body {" } } }"#,
        );

        assert!(Config::load(&fs, Path::new("/work")).is_err());
    }
}
