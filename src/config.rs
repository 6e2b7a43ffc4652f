use crate::error::{FixEmailsError, Result};
use bstr::ByteSlice;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Index file name used when neither the CLI nor a config file names one.
pub const DEFAULT_INDEX_FILE: &str = "1.txt";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub index_file: PathBuf,
    pub skip_blank_lines: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub show_summary: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            index_file: PathBuf::from(DEFAULT_INDEX_FILE),
            skip_blank_lines: false,
            base_directory: None, // Working directory
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { show_summary: true }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(FixEmailsError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| FixEmailsError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| FixEmailsError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["fix-emails.toml", ".fix-emails.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref index_file) = cli_args.index_file {
            self.input.index_file = index_file.clone();
        }

        if let Some(ref base_directory) = cli_args.base_directory {
            self.input.base_directory = Some(base_directory.clone());
        }

        if let Some(skip) = cli_args.skip_blank_lines {
            self.input.skip_blank_lines = skip;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.index_file.as_os_str().is_empty() {
            return Err(FixEmailsError::Config {
                message: "Index file path must not be empty".to_string(),
            });
        }

        if let Some(ref base) = self.input.base_directory {
            if !base.is_dir() {
                return Err(FixEmailsError::Config {
                    message: format!("Base directory does not exist: {}", base.display()),
                });
            }
        }

        Ok(())
    }

    /// Where the email named by an index line lives on disk. On unix the
    /// name's bytes become the path as they are.
    pub fn resolve_email_path(&self, filename: &[u8]) -> PathBuf {
        let name = filename.to_path_lossy();
        match self.input.base_directory {
            Some(ref base) => base.join(name),
            None => name.into_owned(),
        }
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub index_file: Option<PathBuf>,
    pub base_directory: Option<PathBuf>,
    pub skip_blank_lines: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index_file(mut self, index_file: Option<PathBuf>) -> Self {
        self.index_file = index_file;
        self
    }

    pub fn with_base_directory(mut self, base_directory: Option<PathBuf>) -> Self {
        self.base_directory = base_directory;
        self
    }

    pub fn with_skip_blank_lines(mut self, skip: Option<bool>) -> Self {
        self.skip_blank_lines = skip;
        self
    }
}
