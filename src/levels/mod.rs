//! Level data source
//!
//! Levels are plain data keyed by id. Placement configs keep their type tag
//! as a raw string so that unknown tags reach the factory's error path
//! instead of failing the whole document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::sim::{Direction, KeyColor, PlacementType};

/// Built-in levels shipped with the crate
const BUILTIN_LEVELS: &str = include_str!("builtin.json");

/// Visual theme of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LevelTheme {
    Yellow,
    Blue,
    #[default]
    Green,
    Gray,
}

/// One entry of a level's placement list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementConfig {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub x: i32,
    pub y: i32,
    /// Lock/key pairing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<KeyColor>,
    /// Initial heading for enemies and conveyors, facing for the hero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

impl PlacementConfig {
    pub fn new(placement_type: PlacementType, x: i32, y: i32) -> Self {
        Self::from_tag(placement_type.tag(), x, y)
    }

    /// Config with an arbitrary (possibly unknown) type tag
    pub fn from_tag(tag: &str, x: i32, y: i32) -> Self {
        Self {
            type_tag: tag.to_string(),
            x,
            y,
            color: None,
            direction: None,
        }
    }

    pub fn with_color(mut self, color: KeyColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// Static description of a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    #[serde(default)]
    pub theme: LevelTheme,
    pub tiles_width: i32,
    pub tiles_height: i32,
    pub placements: Vec<PlacementConfig>,
}

/// Anything that can hand out level data by id
pub trait LevelSource {
    fn level(&self, id: &str) -> Option<LevelData>;
}

impl<T: LevelSource + ?Sized> LevelSource for std::rc::Rc<T> {
    fn level(&self, id: &str) -> Option<LevelData> {
        (**self).level(id)
    }
}

/// In-memory level catalog
#[derive(Debug, Clone, Default)]
pub struct LevelCatalog {
    levels: BTreeMap<String, LevelData>,
}

impl LevelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object mapping level ids to level data
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let levels: BTreeMap<String, LevelData> = serde_json::from_str(json)?;
        for (id, level) in &levels {
            if level.tiles_width < 1 || level.tiles_height < 1 {
                return Err(CatalogError::Dimensions {
                    level: id.clone(),
                    width: level.tiles_width,
                    height: level.tiles_height,
                });
            }
        }
        Ok(Self { levels })
    }

    /// Levels embedded in the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_LEVELS)
    }

    pub fn insert(&mut self, id: impl Into<String>, level: LevelData) {
        self.levels.insert(id.into(), level);
    }

    pub fn with_level(mut self, id: impl Into<String>, level: LevelData) -> Self {
        self.insert(id, level);
        self
    }

    /// Add every level from `other`, replacing levels with the same id
    pub fn merge(&mut self, other: LevelCatalog) {
        self.levels.extend(other.levels);
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.levels.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl LevelSource for LevelCatalog {
    fn level(&self, id: &str) -> Option<LevelData> {
        self.levels.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_parse() {
        let catalog = LevelCatalog::builtin().unwrap();
        assert!(catalog.len() >= 3);
        for id in catalog.ids() {
            let level = catalog.level(id).unwrap();
            let heroes = level
                .placements
                .iter()
                .filter(|p| p.type_tag == PlacementType::Hero.tag())
                .count();
            assert_eq!(heroes, 1, "level {id} must have one hero");
            for config in &level.placements {
                assert!(
                    PlacementType::from_tag(&config.type_tag).is_some(),
                    "level {id} uses unknown tag {}",
                    config.type_tag
                );
            }
        }
    }

    #[test]
    fn test_unknown_tags_survive_parsing() {
        let json = r#"{
            "odd": {
                "theme": "GRAY",
                "tilesWidth": 3,
                "tilesHeight": 3,
                "placements": [
                    { "type": "HERO", "x": 1, "y": 1 },
                    { "type": "SPIKES", "x": 2, "y": 2 }
                ]
            }
        }"#;
        let catalog = LevelCatalog::from_json(json).unwrap();
        let level = catalog.level("odd").unwrap();
        assert_eq!(level.theme, LevelTheme::Gray);
        assert_eq!(level.placements[1].type_tag, "SPIKES");
    }

    #[test]
    fn test_optional_fields() {
        let json = r#"{ "type": "LOCK", "x": 4, "y": 2, "color": "GREEN" }"#;
        let config: PlacementConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config,
            PlacementConfig::new(PlacementType::Lock, 4, 2).with_color(KeyColor::Green)
        );
        let back = serde_json::to_value(&config).unwrap();
        assert!(back.get("direction").is_none());
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        let json = r#"{ "flat": { "tilesWidth": 0, "tilesHeight": 4, "placements": [] } }"#;
        let err = LevelCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::Dimensions { width: 0, .. }));
    }

    #[test]
    fn test_merge_replaces_same_id() {
        let small = LevelData {
            theme: LevelTheme::Blue,
            tiles_width: 2,
            tiles_height: 2,
            placements: vec![PlacementConfig::new(PlacementType::Hero, 1, 1)],
        };
        let mut catalog = LevelCatalog::builtin().unwrap();
        let before = catalog.len();
        catalog.merge(LevelCatalog::new().with_level("demo", small.clone()));
        assert_eq!(catalog.len(), before);
        assert_eq!(catalog.level("demo"), Some(small));
    }
}
