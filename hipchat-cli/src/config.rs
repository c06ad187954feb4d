//! Configuration file loading.
//!
//! The file is a flat TOML table using the callback's keys. Command line flags
//! and `HIPCHAT_*` environment variables take precedence over file values.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use hipchat_notify::Configuration;
use hipchat_notify::config::keys;
use serde_json::Value;
use tracing::debug;

use crate::error::{AppError, Result};

const CONFIG_DIR: &str = "hipchat-notify";
const CONFIG_FILE: &str = "config.toml";

/// Values that override the configuration file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_token: Option<String>,
    pub room: Option<String>,
    pub api_base_url: Option<String>,
}

impl Overrides {
    fn apply(self, values: &mut BTreeMap<String, Value>) {
        for (key, value) in [
            (keys::API_TOKEN, self.api_token),
            (keys::ROOM, self.room),
            (keys::API_BASE_URL, self.api_base_url),
        ] {
            if let Some(value) = value {
                values.insert(key.to_string(), Value::String(value));
            }
        }
    }
}

/// `<config dir>/hipchat-notify/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the configuration.
///
/// An explicit `path` must exist. Without one, the default location is used
/// when present, otherwise the file layer is empty.
pub fn load(
    path: Option<&Path>,
    overrides: Overrides,
    fill_defaults: bool,
) -> Result<Configuration> {
    let mut values = match path {
        Some(path) => read(path)?,
        None => match default_config_path() {
            Some(path) if path.is_file() => read(&path)?,
            _ => {
                debug!("No config file found, using flags and environment only");
                BTreeMap::new()
            }
        },
    };

    overrides.apply(&mut values);

    let configuration = Configuration::new(values);
    Ok(if fill_defaults {
        configuration.with_defaults()
    } else {
        configuration
    })
}

fn read(path: &Path) -> Result<BTreeMap<String, Value>> {
    debug!(path = %path.display(), "Loading config file");
    let content = std::fs::read_to_string(path).map_err(|source| AppError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content)
}

/// Parse a flat TOML table.
pub fn parse(content: &str) -> Result<BTreeMap<String, Value>> {
    Ok(toml::from_str(content)?)
}
