mod builtin;
mod catalog;
mod level_pack;

pub use builtin::{campaign_pack, tutorial_pack, CAMPAIGN_PACK_ID};
pub use catalog::LevelCatalog;
pub use level_pack::LevelPack;
