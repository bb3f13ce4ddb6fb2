use super::registry::ChampionRegistry;
use crate::error::AppError;
use std::collections::BTreeMap;

/// Nicknames and spellings players actually type, keyed by standardized form.
const ALIASES: &[(&str, &str)] = &[
    ("mf", "MissFortune"),
    ("wukong", "MonkeyKing"),
    ("chogath", "Chogath"),
    ("kogmaw", "KogMaw"),
    ("drmundo", "DrMundo"),
    ("mundo", "DrMundo"),
    ("ambessamedarda", "Ambessa"),
    ("nunuwillump", "Nunu"),
    ("renataglasc", "Renata"),
];

/// Lowercase, then drop the separators people disagree on.
fn standardize(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '\'' | ' ' | '-' | '.' | '&'))
        .collect()
}

/// Maps every known spelling of a champion (canonical name, localized name,
/// numeric key, common nickname) to its canonical name.
#[derive(Debug, Clone)]
pub struct ChampionNormalizer {
    name_map: BTreeMap<String, String>,
}

impl ChampionNormalizer {
    pub fn new(registry: &ChampionRegistry) -> Self {
        let mut name_map = BTreeMap::new();

        for champion in registry.iter() {
            name_map.insert(standardize(&champion.name), champion.name.clone());
            if let Some(display) = &champion.display_name {
                name_map.insert(standardize(display), champion.name.clone());
            }
            if let Some(key) = champion.key {
                name_map.insert(key.to_string(), champion.name.clone());
            }
        }

        for (alias, canonical) in ALIASES {
            if registry.contains(canonical) {
                name_map.insert(alias.to_string(), canonical.to_string());
            }
        }

        ChampionNormalizer { name_map }
    }

    /// Exact lookup. Unrecognized names are an error, never a guess.
    pub fn normalize(&self, name: &str) -> Result<String, AppError> {
        self.name_map
            .get(&standardize(name))
            .cloned()
            .ok_or_else(|| AppError::UnknownChampion(name.to_string()))
    }

    /// Lookup for typed input: exact first, then the first champion sharing
    /// the leading three characters.
    pub fn resolve_fuzzy(&self, name: &str) -> Result<String, AppError> {
        if let Ok(found) = self.normalize(name) {
            return Ok(found);
        }

        let cleaned = standardize(name);
        if cleaned.is_empty() {
            return Err(AppError::UnknownChampion(name.to_string()));
        }
        let prefix: String = cleaned.chars().take(3).collect();

        self.name_map
            .iter()
            .find(|(k, _)| k.starts_with(&prefix))
            .map(|(_, v)| v.clone())
            .ok_or_else(|| AppError::UnknownChampion(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.name_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::champions::registry::fixtures::sample_registry;

    fn normalizer() -> ChampionNormalizer {
        ChampionNormalizer::new(&sample_registry())
    }

    #[test]
    fn normalizes_case_and_separators() {
        let n = normalizer();
        assert_eq!(n.normalize("ahri").unwrap(), "Ahri");
        assert_eq!(n.normalize("  Miss Fortune ").unwrap(), "MissFortune");
        assert_eq!(n.normalize("Cho'Gath").unwrap(), "Chogath");
        assert_eq!(n.normalize("Dr. Mundo").unwrap(), "DrMundo");
    }

    #[test]
    fn resolves_aliases_keys_and_localized_names() {
        let n = normalizer();
        assert_eq!(n.normalize("mf").unwrap(), "MissFortune");
        assert_eq!(n.normalize("Wukong").unwrap(), "MonkeyKing");
        assert_eq!(n.normalize("86").unwrap(), "Garen");
        assert_eq!(n.normalize("拉克絲").unwrap(), "Lux");
    }

    #[test]
    fn aliases_for_missing_champions_are_skipped() {
        let n = normalizer();
        assert!(n.normalize("kogmaw").is_err());
    }

    #[test]
    fn unknown_name_is_an_error_in_strict_mode() {
        let n = normalizer();
        match n.normalize("Yas") {
            Err(AppError::UnknownChampion(name)) => assert_eq!(name, "Yas"),
            other => panic!("expected UnknownChampion, got {:?}", other),
        }
    }

    #[test]
    fn fuzzy_lookup_matches_on_prefix() {
        let n = normalizer();
        assert_eq!(n.resolve_fuzzy("Yas").unwrap(), "Yasuo");
        assert_eq!(n.resolve_fuzzy("ezr").unwrap(), "Ezreal");
    }

    #[test]
    fn fuzzy_lookup_rejects_empty_and_unmatched() {
        let n = normalizer();
        assert!(n.resolve_fuzzy("   ").is_err());
        assert!(n.resolve_fuzzy("Zzz").is_err());
    }
}
