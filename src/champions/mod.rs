//! Champion reference data: identities, localization and name normalization.

pub mod normalizer;
pub mod registry;

pub use normalizer::ChampionNormalizer;
pub use registry::{Champion, ChampionRegistry, IdentityLocalizer, Localizer, UNKNOWN_CHAMPION};
