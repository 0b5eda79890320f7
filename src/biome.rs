use serde::{Deserialize, Serialize};

/// Terrain categories the generator can assign to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiomeId {
    Plains,
    Forest,
    Mountain,
    Swamp,
    Tundra,
}

impl BiomeId {
    pub fn all() -> [BiomeId; 5] {
        [
            BiomeId::Plains,
            BiomeId::Forest,
            BiomeId::Mountain,
            BiomeId::Swamp,
            BiomeId::Tundra,
        ]
    }
}

/// A gatherable resource a biome can spawn. The yield range bounds the count
/// rolled for each spawned instance (inclusive on both ends).
#[derive(Debug, Clone)]
pub struct ResourceTemplate {
    pub name: &'static str,
    pub yield_min: u32,
    pub yield_max: u32,
}

/// A hostile creature a biome can spawn. Instances copy these stats, so two
/// mobs from the same template never share health.
#[derive(Debug, Clone)]
pub struct MobTemplate {
    pub name: &'static str,
    pub base_hp: i32,
    pub base_atk: i32,
}

#[derive(Debug, Clone)]
pub struct BiomeDefinition {
    pub id: BiomeId,
    pub name: &'static str,
    pub glyph: char,
    /// Upper bound of this biome's slice of [0, 1). Definitions are ordered;
    /// the first slice whose bound exceeds the hash value wins.
    pub band_upper: f64,
    pub resources: Vec<ResourceTemplate>,
    pub mobs: Vec<MobTemplate>,
}

/// The immutable biome table. Built once at session start.
pub struct BiomeCatalog {
    defs: Vec<BiomeDefinition>,
}

impl BiomeCatalog {
    /// The standard five-biome table. Bands partition [0, 1).
    pub fn standard() -> Self {
        let defs = vec![
            BiomeDefinition {
                id: BiomeId::Plains,
                name: "Open Plains",
                glyph: 'P',
                band_upper: 0.30,
                resources: vec![
                    ResourceTemplate { name: "Wildgrass", yield_min: 1, yield_max: 3 },
                    ResourceTemplate { name: "Seeds", yield_min: 1, yield_max: 2 },
                ],
                mobs: vec![
                    MobTemplate { name: "Bison", base_hp: 20, base_atk: 5 },
                    MobTemplate { name: "Slime", base_hp: 15, base_atk: 3 },
                ],
            },
            BiomeDefinition {
                id: BiomeId::Forest,
                name: "Dark Forest",
                glyph: 'F',
                band_upper: 0.55,
                resources: vec![
                    ResourceTemplate { name: "Oak Log", yield_min: 1, yield_max: 4 },
                    ResourceTemplate { name: "Branch", yield_min: 1, yield_max: 3 },
                ],
                mobs: vec![
                    MobTemplate { name: "Forest Wolf", base_hp: 30, base_atk: 8 },
                    MobTemplate { name: "Zombie", base_hp: 25, base_atk: 6 },
                ],
            },
            BiomeDefinition {
                id: BiomeId::Mountain,
                name: "High Mountain",
                glyph: 'M',
                band_upper: 0.75,
                resources: vec![
                    ResourceTemplate { name: "Stone", yield_min: 1, yield_max: 4 },
                    ResourceTemplate { name: "Iron Ore", yield_min: 1, yield_max: 2 },
                ],
                mobs: vec![
                    MobTemplate { name: "Mountain Skeleton", base_hp: 40, base_atk: 10 },
                ],
            },
            BiomeDefinition {
                id: BiomeId::Swamp,
                name: "Murky Swamp",
                glyph: 'S',
                band_upper: 0.90,
                resources: vec![
                    ResourceTemplate { name: "Reed", yield_min: 1, yield_max: 3 },
                    ResourceTemplate { name: "Clay", yield_min: 1, yield_max: 2 },
                ],
                mobs: vec![
                    MobTemplate { name: "Bog Lurker", base_hp: 28, base_atk: 7 },
                ],
            },
            BiomeDefinition {
                id: BiomeId::Tundra,
                name: "Frozen Tundra",
                glyph: 'T',
                band_upper: 1.0,
                resources: vec![
                    ResourceTemplate { name: "Ice Shard", yield_min: 1, yield_max: 2 },
                    ResourceTemplate { name: "Frozen Berry", yield_min: 1, yield_max: 3 },
                ],
                mobs: vec![
                    MobTemplate { name: "Frost Wolf", base_hp: 35, base_atk: 9 },
                ],
            },
        ];
        Self { defs }
    }

    pub fn get(&self, id: BiomeId) -> &BiomeDefinition {
        self.defs
            .iter()
            .find(|def| def.id == id)
            .expect("catalog covers every BiomeId")
    }

    /// Map a hash value in [0, 1) to a biome. First band whose upper bound
    /// exceeds the value wins; the final band absorbs any rounding residue.
    pub fn classify(&self, value: f64) -> BiomeId {
        for def in &self.defs {
            if value < def.band_upper {
                return def.id;
            }
        }
        self.defs.last().expect("catalog is non-empty").id
    }

    pub fn definitions(&self) -> &[BiomeDefinition] {
        &self.defs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_partition_unit_interval() {
        let catalog = BiomeCatalog::standard();
        let mut prev = 0.0;
        for def in catalog.definitions() {
            assert!(def.band_upper > prev, "bands must be strictly increasing");
            prev = def.band_upper;
        }
        assert_eq!(prev, 1.0, "final band must close the interval");
    }

    #[test]
    fn every_biome_has_spawn_tables() {
        let catalog = BiomeCatalog::standard();
        for id in BiomeId::all() {
            let def = catalog.get(id);
            assert!(!def.resources.is_empty(), "{:?} needs resources", id);
            assert!(!def.mobs.is_empty(), "{:?} needs mobs", id);
        }
    }

    #[test]
    fn classify_is_total() {
        let catalog = BiomeCatalog::standard();
        for i in 0..100 {
            let value = i as f64 / 100.0;
            // Must not panic; band membership checked by construction.
            let _ = catalog.classify(value);
        }
        assert_eq!(catalog.classify(0.0), BiomeId::Plains);
        assert_eq!(catalog.classify(0.999), BiomeId::Tundra);
    }
}
