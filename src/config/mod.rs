use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::patch::Style;
use crate::render::RenderOptions;

fn default_margin() -> f64 {
    0.05
}
fn default_flip_y() -> bool {
    true
}
fn default_verbose() -> bool {
    false
}
fn default_style() -> Style {
    Style::new()
        .with("fill", "#6699cc")
        .with("stroke", "#333333")
        .with("fill-opacity", 0.5)
        .with("stroke-width", 0.01)
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default = "default_margin")]
    pub margin: f64,
    #[serde(default = "default_flip_y")]
    pub flip_y: bool,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    /// Style applied to every patch; passed to the renderer as-is
    #[serde(default = "default_style")]
    pub style: Style,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            output: None,
            margin: default_margin(),
            flip_y: default_flip_y(),
            verbose: default_verbose(),
            style: default_style(),
        }
    }
}

/// Result of searching the standard config locations
#[derive(Debug, Default)]
pub struct ConfigSearch {
    pub config: Option<FileConfig>,
    /// Files that exist but could not be read or parsed, in search order
    pub rejected: Vec<(PathBuf, String)>,
}

impl FileConfig {
    /// Search the standard locations; the first parseable file wins
    pub fn load() -> ConfigSearch {
        Self::load_from(&get_config_paths())
    }

    /// Search `paths` in order. Broken files are recorded and skipped so the
    /// caller can report them once logging is up.
    pub fn load_from(paths: &[PathBuf]) -> ConfigSearch {
        let mut search = ConfigSearch::default();

        for path in paths.iter().filter(|p| p.is_file()) {
            let parsed = std::fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|contents| toml::from_str(&contents).map_err(|e| e.to_string()));
            match parsed {
                Ok(config) => {
                    search.config = Some(config);
                    break;
                }
                Err(reason) => search.rejected.push((path.clone(), reason)),
            }
        }

        search
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            margin: self.margin,
            flip_y: self.flip_y,
        }
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("polypatch.toml"));
    paths.push(PathBuf::from(".polypatch.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("polypatch").join("config.toml"));
        paths.push(config_dir.join("polypatch.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".polypatch.toml"));
        paths.push(home.join(".config").join("polypatch").join("config.toml"));
    }

    paths
}
