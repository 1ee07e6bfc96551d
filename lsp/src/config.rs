use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Client settings, read from initialization options or the `welle`
/// configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSettings {
    #[serde(default)]
    pub std_root: Option<PathBuf>,
    #[serde(default)]
    pub module_paths: Vec<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub completion: CompletionSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionSettings {
    #[serde(default = "enabled")]
    pub keywords: bool,
    #[serde(default = "enabled")]
    pub std_modules: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn enabled() -> bool {
    true
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            keywords: true,
            std_modules: true,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            std_root: None,
            module_paths: Vec::new(),
            log_level: default_log_level(),
            completion: CompletionSettings::default(),
        }
    }
}

impl ServerSettings {
    /// Settings from client options. Accepts the bare object or one nested
    /// under `welle`. Malformed options fall back to defaults.
    pub fn from_options(options: Option<&Value>) -> Self {
        let Some(value) = options else {
            return Self::default();
        };
        let section = value.get("welle").unwrap_or(value);
        match serde_json::from_value::<ServerSettings>(section.clone()) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("ignoring malformed settings: {err}");
                Self::default()
            }
        }
    }
}
