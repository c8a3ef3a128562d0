//! Level catalog
//!
//! An ordered, read-only list of levels. The built-in campaign is embedded
//! at compile time; custom campaigns load from JSON in the same shape.

use std::collections::HashSet;
use std::path::Path;

use crate::error::CatalogError;
use crate::sim::state::Level;

const BUILTIN_LEVELS: &str = include_str!("../assets/levels.json");

/// Validated, non-empty level list
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<Level>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, level) in levels.iter().enumerate() {
            validate_level(index, level)?;
        }
        Ok(Self { levels })
    }

    /// The bundled campaign: four tutorials, then ten phases of three levels
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_LEVELS)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let levels: Vec<Level> = serde_json::from_str(json)?;
        let catalog = Self::new(levels)?;
        log::debug!("Loaded {} levels", catalog.len());
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        log::info!("Loaded level catalog from {}", path.display());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false for a constructed catalog
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn first(&self) -> &Level {
        &self.levels[0]
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }
}

fn validate_level(index: usize, level: &Level) -> Result<(), CatalogError> {
    let non_finite = |field: &'static str| CatalogError::NonFinite {
        level: index,
        name: level.name.clone(),
        field,
    };

    if !level.start.is_finite() {
        return Err(non_finite("start"));
    }
    if !level.target.is_finite() {
        return Err(non_finite("target"));
    }

    for (i, obstacle) in level.obstacles.iter().enumerate() {
        if !obstacle.center().is_finite() || !obstacle.radius.is_finite() {
            return Err(non_finite("obstacles"));
        }
        if obstacle.radius <= 0.0 {
            return Err(CatalogError::BadObstacleRadius {
                level: index,
                name: level.name.clone(),
                obstacle: i,
                radius: obstacle.radius,
            });
        }
    }

    if level.available_vectors.is_empty() {
        return Err(CatalogError::NoVectors {
            level: index,
            name: level.name.clone(),
        });
    }
    let mut ids = HashSet::new();
    for vector in &level.available_vectors {
        if !vector.is_finite() {
            return Err(non_finite("availableVectors"));
        }
        if !ids.insert(vector.id.as_str()) {
            return Err(CatalogError::DuplicateVectorId {
                level: index,
                name: level.name.clone(),
                id: vector.id.clone(),
            });
        }
    }

    for (step, page) in level.tutorial.iter().enumerate() {
        if let Some(id) = page.highlight_ids.iter().find(|id| !ids.contains(id.as_str())) {
            return Err(CatalogError::UnknownHighlight {
                level: index,
                name: level.name.clone(),
                step,
                id: id.clone(),
            });
        }
    }
    Ok(())
}
