use serde::{Deserialize, Serialize};

use crate::config::Validate;

pub const MAX_LIVES_LIMIT: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Lives granted when the level demands a target fruit.
    pub max_lives: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self { max_lives: 3 }
    }
}

impl Validate for SessionSettings {
    fn validate(&self) -> Result<(), String> {
        if self.max_lives == 0 || self.max_lives > MAX_LIVES_LIMIT {
            return Err(format!(
                "Max lives must be between 1 and {}, got {}",
                MAX_LIVES_LIMIT, self.max_lives
            ));
        }
        Ok(())
    }
}
