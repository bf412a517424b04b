use crate::config::Validate;
use crate::game::Level;
use crate::identifiers::LevelId;

use super::builtin::{campaign_pack, tutorial_pack};
use super::LevelPack;

/// Ordered, validated level list with lookup by id.
#[derive(Clone, Debug)]
pub struct LevelCatalog {
    id: String,
    name: String,
    levels: Vec<Level>,
}

impl LevelCatalog {
    pub fn from_pack(pack: LevelPack) -> Result<Self, String> {
        pack.validate()?;
        Ok(Self::from_valid_pack(pack))
    }

    fn from_valid_pack(pack: LevelPack) -> Self {
        Self {
            id: pack.id.clone(),
            name: pack.title(),
            levels: pack.levels,
        }
    }

    pub fn tutorial() -> Self {
        Self::from_valid_pack(tutorial_pack())
    }

    pub fn campaign() -> Self {
        Self::from_valid_pack(campaign_pack())
    }

    /// Id of the pack the levels came from; level ids are only unique within it.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn first(&self) -> Option<&Level> {
        self.levels.first()
    }

    pub fn get(&self, level_id: LevelId) -> Option<&Level> {
        self.levels.iter().find(|level| level.id == level_id)
    }

    /// Level following `level_id` in catalog order.
    pub fn next_level(&self, level_id: LevelId) -> Option<&Level> {
        let index = self.levels.iter().position(|level| level.id == level_id)?;
        self.levels.get(index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_next() {
        let catalog = LevelCatalog::campaign();
        assert_eq!(catalog.len(), 60);
        assert_eq!(catalog.first().map(|l| l.id), Some(LevelId::new(1)));
        assert_eq!(catalog.get(LevelId::new(33)).map(|l| l.grid_size), Some(8));
        assert_eq!(
            catalog.next_level(LevelId::new(20)).map(|l| l.id),
            Some(LevelId::new(21))
        );
        assert!(catalog.next_level(LevelId::new(60)).is_none());
        assert!(catalog.get(LevelId::new(61)).is_none());
    }

    #[test]
    fn test_tutorial_catalog() {
        let catalog = LevelCatalog::tutorial();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.name().ends_with("Tutorial"));
        assert_eq!(catalog.id(), "tutorial");
        assert_eq!(LevelCatalog::campaign().id(), "campaign");
        assert!(catalog.next_level(LevelId::new(5)).is_none());
    }

    #[test]
    fn test_from_pack_rejects_invalid() {
        let pack = LevelPack {
            levels: vec![Level {
                fruit_count: 9,
                ..Level::default()
            }],
            ..LevelPack::default()
        };
        assert!(LevelCatalog::from_pack(pack).is_err());
    }

    #[test]
    fn test_next_follows_catalog_order() {
        let pack = LevelPack {
            levels: vec![
                Level { id: LevelId::new(10), ..Level::default() },
                Level { id: LevelId::new(3), ..Level::default() },
            ],
            ..LevelPack::default()
        };
        let catalog = LevelCatalog::from_pack(pack).unwrap();
        assert_eq!(
            catalog.next_level(LevelId::new(10)).map(|l| l.id),
            Some(LevelId::new(3))
        );
    }
}
