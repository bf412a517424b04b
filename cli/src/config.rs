use std::path::PathBuf;

use flood_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use flood_engine::game::SessionSettings;
use flood_engine::levels::CAMPAIGN_PACK_ID;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "fruit_flood.yaml";

fn default_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    override_path: Option<PathBuf>,
) -> ConfigManager<FileContentConfigProvider, CliConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(override_path.unwrap_or_else(default_config_path))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CliConfig {
    pub progress_file: String,
    /// Custom level pack; the built-in campaign is used when unset.
    pub levels_file: Option<String>,
    pub max_lives: u32,
    pub use_log_prefix: bool,
}

impl CliConfig {
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            max_lives: self.max_lives,
        }
    }

    /// Progress file for a level pack. Level ids repeat across packs, so every pack other
    /// than the campaign is stored next to `progress_file` with the pack id as a suffix.
    pub fn progress_path(&self, pack_id: &str) -> PathBuf {
        let base = PathBuf::from(&self.progress_file);
        if pack_id == CAMPAIGN_PACK_ID {
            return base;
        }

        let suffix: String = pack_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        let stem = base
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = match base.extension() {
            Some(extension) => format!("{}_{}.{}", stem, suffix, extension.to_string_lossy()),
            None => format!("{}_{}", stem, suffix),
        };
        base.with_file_name(file_name)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<(), String> {
        if self.progress_file.trim().is_empty() {
            return Err("Progress file must not be empty".to_string());
        }
        if let Some(levels_file) = &self.levels_file
            && levels_file.trim().is_empty()
        {
            return Err("Levels file must not be empty when set".to_string());
        }
        self.session_settings().validate()
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            progress_file: "fruit_flood_progress.yaml".to_string(),
            levels_file: None,
            max_lives: SessionSettings::default().max_lives,
            use_log_prefix: false,
        }
    }
}
