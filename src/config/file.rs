//! Configuration file location and loading
//!
//! Decides which files are candidates (in precedence order) and reads them
//! into a single merged [`IniDocument`].

use crate::config::IniDocument;
use crate::error::ConfigError;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// System-wide configuration files, lowest precedence first
pub const SYSTEM_CONFIG_PATHS: [&str; 2] =
    ["/etc/zabbix_script.conf", "/etc/zabbix/zabbix_script.conf"];

/// Per-user configuration file name, relative to the home directory
pub const USER_CONFIG_FILE: &str = ".zabbix_script.conf";

/// Strategy for locating candidate configuration files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSources {
    /// Well-known system and user locations, plus an optional extra file read last
    SearchPath {
        home: Option<PathBuf>,
        extra: Option<PathBuf>,
    },
    /// Exactly one file (from the command line); `None` means defaults only
    SinglePath(Option<PathBuf>),
    /// An explicit ordered list of files
    Explicit(Vec<PathBuf>),
}

impl ConfigSources {
    /// Search-path mode rooted at the invoking user's home directory
    pub fn search_path(extra: Option<PathBuf>) -> Self {
        ConfigSources::SearchPath {
            home: dirs::home_dir(),
            extra,
        }
    }

    /// Single-path mode
    pub fn single_path(path: Option<PathBuf>) -> Self {
        ConfigSources::SinglePath(path)
    }

    /// Candidate files in precedence order (later wins)
    pub fn candidates(&self) -> Vec<PathBuf> {
        match self {
            ConfigSources::SearchPath { home, extra } => {
                let mut paths: Vec<PathBuf> =
                    SYSTEM_CONFIG_PATHS.iter().map(PathBuf::from).collect();

                if let Some(home) = home {
                    paths.push(home.join(USER_CONFIG_FILE));
                }

                if let Some(extra) = extra {
                    paths.push(extra.clone());
                }

                paths
            }
            ConfigSources::SinglePath(path) => path.iter().cloned().collect(),
            ConfigSources::Explicit(paths) => paths.clone(),
        }
    }

    /// The file the user named explicitly, if any
    fn explicit_path(&self) -> Option<&Path> {
        match self {
            ConfigSources::SearchPath { extra, .. } => extra.as_deref(),
            ConfigSources::SinglePath(path) => path.as_deref(),
            ConfigSources::Explicit(_) => None,
        }
    }
}

/// Configuration file handler
pub struct ConfigFile;

impl ConfigFile {
    /// Load one configuration file.
    ///
    /// Returns `Ok(None)` if the file does not exist. Any other read failure
    /// is an error, as is malformed content.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<IniDocument>, ConfigError> {
        let path = path.as_ref();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ConfigError::Unreadable {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        let doc = IniDocument::parse(&content, &path.display().to_string())?;
        Ok(Some(doc))
    }

    /// Load every candidate of `sources` and overlay them in order
    pub fn load_sources(sources: &ConfigSources) -> Result<IniDocument, ConfigError> {
        let mut merged = IniDocument::new();

        for path in sources.candidates() {
            match Self::load(&path)? {
                Some(doc) => {
                    log::info!("Loaded config from {}", path.display());
                    merged.overlay(doc);
                }
                None if sources.explicit_path() == Some(path.as_path()) => {
                    log::warn!("Configuration file {} does not exist", path.display());
                }
                None => log::debug!("No config at {}", path.display()),
            }
        }

        if merged.is_empty() {
            log::info!("No configuration found, using built-in defaults");
        }
        Ok(merged)
    }
}
