use std::fmt;
use std::path;
use std::str::FromStr;

use super::*;

pub const CONFIG_FILE: &str = "_site.yml";

/// Settings as written in the settings file, before validation.
///
/// Required keys are `Option`s here so that a missing key can be reported by
/// name once the whole file has been read.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(skip)]
    pub root: path::PathBuf,
    #[serde(skip)]
    pub environment: Environment,
    pub author: Option<String>,
    pub site_name: Option<String>,
    pub site_url: Option<String>,
    pub timezone: Option<String>,
    pub default_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    pub theme: Option<String>,
    pub feeds: Feeds,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub static_paths: Vec<RelPath>,
    #[serde(skip_serializing_if = "PathMetadataMap::is_empty")]
    pub extra_path_metadata: PathMetadataMap,
    pub links: Vec<Link>,
    pub social: Vec<Link>,
    pub pagination: Pagination,
    pub markdown_extensions: Vec<MarkdownExtension>,
    pub relative_urls: bool,
}

impl Config {
    pub fn from_file<P: Into<path::PathBuf>>(path: P) -> Result<Config> {
        Self::from_file_internal(path.into(), Environment::Development)
    }

    /// Load `path` and apply the overlay for `environment` if one exists.
    pub fn from_file_for<P: Into<path::PathBuf>>(
        path: P,
        environment: Environment,
    ) -> Result<Config> {
        Self::from_file_internal(path.into(), environment)
    }

    fn from_file_internal(path: path::PathBuf, environment: Environment) -> Result<Config> {
        let mut merged = read_yaml(&path)?;

        if let Some(overlay_path) = environment.overlay_path(&path) {
            if overlay_path.exists() {
                log::debug!("Applying {} overlay `{}`", environment, overlay_path.display());
                let overlay = read_yaml(&overlay_path)?;
                merged = overlay_yaml(merged, overlay);
            } else {
                log::debug!(
                    "No {} overlay at `{}`, using base settings",
                    environment,
                    overlay_path.display()
                );
            }
        }

        let mut config = if merged.is_null() {
            Config::default()
        } else {
            serde_yaml::from_value(merged).map_err(|e| {
                Status::new("Failed to parse config")
                    .with_source(e)
                    .context_with(|c| c.insert("Path", path.display().to_string()))
            })?
        };

        let mut root = path;
        root.pop(); // Remove filename
        if root == path::Path::new("") {
            root = path::Path::new(".").to_owned();
        }
        config.root = root;
        config.environment = environment;

        Ok(config)
    }

    pub fn from_cwd<P: Into<path::PathBuf>>(cwd: P) -> Result<Config> {
        Self::from_cwd_internal(cwd.into(), Environment::Development)
    }

    pub fn from_cwd_for<P: Into<path::PathBuf>>(cwd: P, environment: Environment) -> Result<Config> {
        Self::from_cwd_internal(cwd.into(), environment)
    }

    fn from_cwd_internal(cwd: path::PathBuf, environment: Environment) -> Result<Config> {
        let file_path = find_project_file(&cwd, CONFIG_FILE);
        let config = file_path
            .map(|p| {
                log::debug!("Using config file `{}`", p.display());
                Self::from_file_for(&p, environment)
            })
            .unwrap_or_else(|| {
                log::warn!("No {CONFIG_FILE} file found in current directory, using default config.");
                let config = Config {
                    root: cwd,
                    environment,
                    ..Default::default()
                };
                Ok(config)
            })?;
        Ok(config)
    }
}

impl FromStr for Config {
    type Err = Status;

    /// Parse settings from text, rooted at the current directory.
    fn from_str(content: &str) -> Result<Self> {
        let mut config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| Status::new("Failed to parse config").with_source(e))?
        };
        config.root = path::Path::new(".").to_owned();
        Ok(config)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{converted}")
    }
}

fn read_yaml(path: &path::Path) -> Result<serde_yaml::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Status::new("Failed to read config")
            .with_source(e)
            .context_with(|c| c.insert("Path", path.display().to_string()))
    })?;

    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Null);
    }

    let value: serde_yaml::Value = serde_yaml::from_str(&content).map_err(|e| {
        Status::new("Failed to parse config")
            .with_source(e)
            .context_with(|c| c.insert("Path", path.display().to_string()))
    })?;
    if !(value.is_mapping() || value.is_null()) {
        return Err(Status::new("Config must be a mapping of keys to values")
            .context_with(|c| c.insert("Path", path.display().to_string())));
    }
    Ok(value)
}

/// Top-level keys of `overlay` replace those of `base`; nested values are
/// not merged.
fn overlay_yaml(base: serde_yaml::Value, overlay: serde_yaml::Value) -> serde_yaml::Value {
    match (base, overlay) {
        (serde_yaml::Value::Mapping(mut base), serde_yaml::Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                base.insert(key, value);
            }
            serde_yaml::Value::Mapping(base)
        }
        (base, serde_yaml::Value::Null) => base,
        (_, overlay) => overlay,
    }
}

fn find_project_file<P: Into<path::PathBuf>>(dir: P, name: &str) -> Option<path::PathBuf> {
    find_project_file_internal(dir.into(), name)
}

fn find_project_file_internal(dir: path::PathBuf, name: &str) -> Option<path::PathBuf> {
    let mut file_path = dir;
    file_path.push(name);
    while !file_path.exists() {
        file_path.pop(); // filename
        let hit_bottom = !file_path.pop();
        if hit_bottom {
            return None;
        }
        file_path.push(name);
    }
    Some(file_path)
}
