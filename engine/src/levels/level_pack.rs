use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};
use crate::game::Level;

/// A named, ordered group of levels as stored in a YAML level file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelPack {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub levels: Vec<Level>,
}

impl Default for LevelPack {
    fn default() -> Self {
        Self {
            id: "custom".to_string(),
            name: "Custom".to_string(),
            emoji: String::new(),
            levels: Vec::new(),
        }
    }
}

impl LevelPack {
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let pack: LevelPack = YamlConfigSerializer::new().deserialize(content)?;
        pack.validate()
            .map_err(|e| format!("Level pack validation error: {}", e))?;
        Ok(pack)
    }

    pub fn load(file_path: &Path) -> Result<Self, String> {
        let provider = FileContentConfigProvider::new(file_path);
        let Some(content) = provider.get_config_content()? else {
            return Err(format!("Level file {} not found", file_path.display()));
        };
        Self::from_yaml(&content)
    }

    pub fn title(&self) -> String {
        if self.emoji.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.emoji, self.name)
        }
    }
}

impl Validate for LevelPack {
    fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Level pack id must not be empty".to_string());
        }
        if self.levels.is_empty() {
            return Err(format!("Level pack {} has no levels", self.id));
        }

        let mut seen = BTreeSet::new();
        for level in &self.levels {
            level.validate()?;
            if !seen.insert(level.id) {
                return Err(format!(
                    "Level pack {} contains level {} twice",
                    self.id, level.id
                ));
            }
        }
        Ok(())
    }
}
