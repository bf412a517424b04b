use serde::{Deserialize, Serialize};

/// Converts a document to and from its stored text form.
pub trait ConfigSerializer<TConfig> {
    fn serialize(&self, config: &TConfig) -> Result<String, String>;
    fn deserialize(&self, content: &str) -> Result<TConfig, String>;
}

/// YAML via `serde_yaml_ng`. Accepts hand-edited files that start with a byte order mark.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlConfigSerializer;

const BYTE_ORDER_MARK: char = '\u{feff}';

impl YamlConfigSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl<TConfig> ConfigSerializer<TConfig> for YamlConfigSerializer
where
    TConfig: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, config: &TConfig) -> Result<String, String> {
        let mut text = serde_yaml_ng::to_string(config)
            .map_err(|e| format!("Failed to write YAML document: {}", e))?;
        if !text.ends_with('\n') {
            text.push('\n');
        }
        Ok(text)
    }

    fn deserialize(&self, content: &str) -> Result<TConfig, String> {
        let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
        serde_yaml_ng::from_str(content).map_err(|e| format!("Failed to read YAML document: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::SessionSettings;

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let settings: SessionSettings = YamlConfigSerializer::new()
            .deserialize("\u{feff}max_lives: 4\n")
            .unwrap();
        assert_eq!(settings.max_lives, 4);
    }

    #[test]
    fn test_output_ends_with_newline() {
        let text = YamlConfigSerializer::new()
            .serialize(&SessionSettings { max_lives: 2 })
            .unwrap();
        assert_eq!(text, "max_lives: 2\n");
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result: Result<SessionSettings, String> =
            YamlConfigSerializer::new().deserialize("max_lives: [");
        assert!(result.unwrap_err().starts_with("Failed to read YAML document"));
    }
}
