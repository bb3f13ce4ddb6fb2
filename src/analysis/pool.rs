use crate::champions::{Localizer, UNKNOWN_CHAMPION};
use std::collections::BTreeSet;

/// Champions eligible for one ranking pass.
///
/// Set semantics: a repeated name is one entrant. Names are kept sorted so
/// every enumeration over the pool yields canonical compositions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePool {
    names: BTreeSet<String>,
}

impl CandidatePool {
    /// Builds a pool, dropping blanks and the unresolved-champion sentinel.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty() && n != UNKNOWN_CHAMPION)
            .collect();
        CandidatePool { names }
    }

    /// Maps every member back to its canonical name.
    pub fn canonicalized(&self, localizer: &dyn Localizer) -> Self {
        Self::from_names(self.names.iter().map(|n| localizer.canonicalize(n)))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.names.iter()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::champions::IdentityLocalizer;
    use crate::champions::registry::fixtures::sample_registry;

    #[test]
    fn duplicates_and_sentinels_are_removed() {
        let pool = CandidatePool::from_names(["Lux", "Ahri", "Lux", UNKNOWN_CHAMPION, " ", "Garen"]);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.to_vec(), vec!["Ahri", "Garen", "Lux"]);
    }

    #[test]
    fn canonicalized_maps_display_names() {
        let registry = sample_registry();
        let pool = CandidatePool::from_names(["阿璃", "悟空", "Yasuo"]);
        let canonical = pool.canonicalized(&registry);
        assert_eq!(canonical.to_vec(), vec!["Ahri", "MonkeyKing", "Yasuo"]);

        let unchanged = pool.canonicalized(&IdentityLocalizer);
        assert_eq!(unchanged, pool);
    }
}
