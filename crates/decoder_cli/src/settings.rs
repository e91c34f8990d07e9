//! Optional RON settings file.
//!
//! An explicitly named file must exist and parse. The implicit
//! `./wubdecode.ron` is best effort: missing means defaults, unreadable or
//! malformed yields defaults plus a warning. The warning is carried back to
//! the caller because the logger is only set up once settings are known.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use decoder_engine::BatchMode;
use serde::Deserialize;

use crate::cli::LogChoice;

pub const SETTINGS_FILENAME: &str = "wubdecode.ron";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub marker: Option<String>,
    pub mode: Option<BatchMode>,
    pub keep_blank: Option<bool>,
    pub encoding: Option<String>,
    pub log: Option<LogChoice>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedSettings {
    pub settings: Settings,
    /// File the settings came from, if any.
    pub source: Option<PathBuf>,
    /// Why the default settings file was ignored, if it was.
    pub warning: Option<String>,
}

impl LoadedSettings {
    fn ignored(warning: String) -> Self {
        Self {
            warning: Some(warning),
            ..Self::default()
        }
    }
}

pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<LoadedSettings> {
    match explicit {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file {}", path.display()))?;
            let settings = parse_settings(&content)
                .with_context(|| format!("failed to parse settings file {}", path.display()))?;
            Ok(LoadedSettings {
                settings,
                source: Some(path.to_path_buf()),
                warning: None,
            })
        }
        None => Ok(load_default_settings(Path::new(SETTINGS_FILENAME))),
    }
}

fn load_default_settings(path: &Path) -> LoadedSettings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return LoadedSettings::default();
        }
        Err(err) => {
            return LoadedSettings::ignored(format!(
                "Could not read settings from {:?}: {}",
                path, err
            ));
        }
    };

    match parse_settings(&content) {
        Ok(settings) => LoadedSettings {
            settings,
            source: Some(path.to_path_buf()),
            warning: None,
        },
        Err(err) => {
            LoadedSettings::ignored(format!("Could not parse settings from {:?}: {}", path, err))
        }
    }
}

fn parse_settings(content: &str) -> Result<Settings, ron::error::SpannedError> {
    ron::from_str(content)
}
