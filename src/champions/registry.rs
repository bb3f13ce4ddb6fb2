use crate::error::AppError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name substituted for champion ids the registry cannot resolve.
/// Pools drop it before enumeration.
pub const UNKNOWN_CHAMPION: &str = "Unknown";

pub const CHAMPION_MAPPING_FILE: &str = "champion_mapping.json";
pub const LOCALIZED_MAPPING_FILE: &str = "chinese_mapping.json";
pub const ICON_DIR: &str = "champion_images";

#[derive(Debug, Clone, PartialEq)]
pub struct Champion {
    pub name: String,
    pub display_name: Option<String>,
    pub key: Option<u32>,
    pub icon: Option<PathBuf>,
}

/// Data Dragon stores keys as strings, hand-written mappings sometimes use numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KeyRepr {
    Text(String),
    Number(u32),
}

#[derive(Debug, Deserialize)]
pub struct MappingEntry {
    key: KeyRepr,
}

impl MappingEntry {
    pub fn key(&self) -> Option<u32> {
        match &self.key {
            KeyRepr::Text(s) => s.trim().parse().ok(),
            KeyRepr::Number(n) => Some(*n),
        }
    }
}

/// Translates between canonical champion names and what the user sees.
pub trait Localizer: Send + Sync {
    /// Display name for `name`, or `name` itself when no localization exists.
    fn localize(&self, name: &str) -> String;

    /// Canonical name for a display name, or the input unchanged.
    fn canonicalize(&self, display: &str) -> String;
}

/// Localizer for setups without a localized mapping file.
pub struct IdentityLocalizer;

impl Localizer for IdentityLocalizer {
    fn localize(&self, name: &str) -> String {
        name.to_string()
    }

    fn canonicalize(&self, display: &str) -> String {
        display.to_string()
    }
}

/// Read-only champion reference data, built once at startup and shared by reference.
#[derive(Debug, Default)]
pub struct ChampionRegistry {
    champions: BTreeMap<String, Champion>,
    by_key: HashMap<u32, String>,
    by_display: HashMap<String, String>,
}

impl ChampionRegistry {
    pub fn load(data_dir: &Path) -> Result<Self, AppError> {
        let mapping_path = data_dir.join(CHAMPION_MAPPING_FILE);
        let content = fs::read_to_string(&mapping_path).map_err(|e| {
            AppError::ConfigError(format!(
                "Failed to read {}: {}",
                mapping_path.display(),
                e
            ))
        })?;
        let mapping: HashMap<String, MappingEntry> = serde_json::from_str(&content)
            .map_err(|e| AppError::JsonError(format!("Failed to parse champion mapping: {}", e)))?;

        let localized_path = data_dir.join(LOCALIZED_MAPPING_FILE);
        let localized: HashMap<String, String> = match fs::read_to_string(&localized_path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                AppError::JsonError(format!("Failed to parse localized mapping: {}", e))
            })?,
            Err(_) => {
                debug!(path = %localized_path.display(), "no localized mapping, using canonical names");
                HashMap::new()
            }
        };

        let icon_dir = data_dir.join(ICON_DIR);
        let registry = Self::from_parts(mapping, localized, Some(&icon_dir));
        debug!(champions = registry.len(), "champion registry loaded");
        Ok(registry)
    }

    pub fn from_parts(
        mapping: HashMap<String, MappingEntry>,
        localized: HashMap<String, String>,
        icon_dir: Option<&Path>,
    ) -> Self {
        let mut registry = ChampionRegistry::default();

        for (name, entry) in mapping {
            let key = entry.key();
            if key.is_none() {
                warn!(champion = %name, "champion mapping entry has no numeric key");
            }

            let display_name = localized.get(&name).filter(|d| !d.is_empty()).cloned();
            let icon = icon_dir
                .map(|dir| dir.join(format!("{}.png", name)))
                .filter(|path| path.is_file());

            if let Some(k) = key {
                registry.by_key.insert(k, name.clone());
            }
            if let Some(ref display) = display_name {
                registry.by_display.insert(display.clone(), name.clone());
            }

            registry.champions.insert(
                name.clone(),
                Champion {
                    name,
                    display_name,
                    key,
                    icon,
                },
            );
        }

        registry
    }

    /// Resolves a platform champion id, falling back to [`UNKNOWN_CHAMPION`].
    pub fn name_for_id(&self, id: i64) -> &str {
        u32::try_from(id)
            .ok()
            .and_then(|k| self.by_key.get(&k))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CHAMPION)
    }

    pub fn get(&self, name: &str) -> Option<&Champion> {
        self.champions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.champions.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Champion> {
        self.champions.values()
    }

    pub fn len(&self) -> usize {
        self.champions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }
}

impl Localizer for ChampionRegistry {
    fn localize(&self, name: &str) -> String {
        self.champions
            .get(name)
            .and_then(|c| c.display_name.clone())
            .unwrap_or_else(|| name.to_string())
    }

    fn canonicalize(&self, display: &str) -> String {
        self.by_display
            .get(display)
            .cloned()
            .unwrap_or_else(|| display.to_string())
    }
}
