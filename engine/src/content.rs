/// First-generation species and their moves, bundled so the game runs offline.
pub const BUILTIN_CATALOG: &str = include_str!("../content/catalog.json");
