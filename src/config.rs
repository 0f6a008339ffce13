use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Folder configuration for a batch run.
///
/// All three folders default to paths relative to the working directory and
/// can be overridden individually, either in `config.json` or from the CLI.
///
/// # Loading
///
/// ```rust,no_run
/// use exif_scrub::config::Config;
///
/// // From a JSON file
/// let config = Config::load(Some("config.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut config = Config::default();
/// config.input_dir = "./holiday-photos".into();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Folder scanned for input images (flat, no recursion).
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    /// Folder receiving one metadata-free copy per processed image.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Folder receiving one `<stem>_report.txt` per opened image.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("./Images_Input")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./Images_Clean")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./Metadata_Logs")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            log_dir: default_log_dir(),
        }
    }
}

impl Config {
    /// Resolve the config file path — same directory as the executable.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("config.json"))
    }

    /// Load config from the given path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            log::warn!(
                "Config file not found at {}. Using defaults.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Report path for an input file: `<log_dir>/<stem>_report.txt`.
    pub fn report_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.log_dir.join(format!("{stem}_report.txt"))
    }

    /// Clean-copy path for an input file: `<output_dir>/<file name>`.
    pub fn clean_path(&self, input: &Path) -> PathBuf {
        match input.file_name() {
            Some(name) => self.output_dir.join(name),
            None => self.output_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_folders() {
        let config = Config::default();
        assert_eq!(config.input_dir, PathBuf::from("./Images_Input"));
        assert_eq!(config.output_dir, PathBuf::from("./Images_Clean"));
        assert_eq!(config.log_dir, PathBuf::from("./Metadata_Logs"));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.input_dir = PathBuf::from("/photos/in");
        config.save(Some(&path)).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.input_dir, PathBuf::from("/photos/in"));
        assert_eq!(loaded.output_dir, PathBuf::from("./Images_Clean"));
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.json"))).unwrap();
        assert_eq!(config.log_dir, PathBuf::from("./Metadata_Logs"));
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "input_dir": "/only/this" }"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("/only/this"));
        assert_eq!(config.output_dir, PathBuf::from("./Images_Clean"));
    }

    #[test]
    fn report_path_replaces_extension() {
        let config = Config::default();
        let report = config.report_path(Path::new("/in/photo.jpg"));
        assert_eq!(report, Path::new("./Metadata_Logs/photo_report.txt"));
    }

    #[test]
    fn clean_path_keeps_file_name() {
        let config = Config::default();
        let clean = config.clean_path(Path::new("/in/photo.jpg"));
        assert_eq!(clean, Path::new("./Images_Clean/photo.jpg"));
    }
}
