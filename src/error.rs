//! Error taxonomy for level loading and placement construction

use thiserror::Error;

use crate::sim::PlacementId;

/// Fatal errors raised while (re)starting a level
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("unknown level id: {0}")]
    UnknownLevel(String),
    #[error("level {0} has no hero placement")]
    MissingHero(String),
    #[error("level {level} has {count} hero placements, expected exactly one")]
    DuplicateHero { level: String, count: usize },
    #[error("level {0} was destroyed")]
    Destroyed(String),
}

/// Non-fatal errors raised by the placement factory and live mutations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no placement type found for tag {0:?}")]
    UnknownType(String),
    #[error("level already has a hero")]
    HeroAlreadyPresent,
    #[error("placement {0} is the hero and cannot be deleted")]
    HeroNotDeletable(PlacementId),
    #[error("no placement with id {0}")]
    NotFound(PlacementId),
    #[error("level {0} is not started or was destroyed")]
    Inactive(String),
}

/// Errors raised while parsing level data
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid level data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level {level} has invalid dimensions {width}x{height}")]
    Dimensions { level: String, width: i32, height: i32 },
}
