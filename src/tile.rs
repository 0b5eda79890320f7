use std::collections::HashMap;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::biome::{BiomeDefinition, BiomeId};
use crate::worldgen::WorldGenerator;

/// Structured tile key. Coordinates are kept as a pair, never formatted into
/// a string, so negative values cannot collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl Coord {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i64, dy: i64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    pub fn orthogonal_neighbors(self) -> [Coord; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }
}

/// Something occupying a tile: either a gatherable resource stack or a mob.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TileEntity {
    Resource { name: String, remaining: u32 },
    Mob { name: String, max_hp: i32, hp: i32, attack: i32 },
}

impl TileEntity {
    pub fn name(&self) -> &str {
        match self {
            TileEntity::Resource { name, .. } => name,
            TileEntity::Mob { name, .. } => name,
        }
    }

    pub fn is_mob(&self) -> bool {
        matches!(self, TileEntity::Mob { .. })
    }
}

/// Per-coordinate world state. The biome is assigned once at creation and
/// never rewritten; `explored` only ever flips to true; `contents` preserves
/// the relative order of surviving entries when one is removed.
#[derive(Debug, Clone)]
pub struct Tile {
    pub biome: BiomeId,
    pub explored: bool,
    pub contents: Vec<TileEntity>,
}

/// Spawn knobs consumed when a tile's contents are materialized.
#[derive(Debug, Clone, Copy)]
pub struct SpawnProfile {
    pub count_min: u32,
    pub count_max: u32,
    pub mob_chance: f64,
}

/// Lazily materialized tile map.
pub struct TileStore {
    generator: WorldGenerator,
    tiles: HashMap<Coord, Tile>,
}

impl TileStore {
    pub fn new(generator: WorldGenerator) -> Self {
        Self {
            generator,
            tiles: HashMap::new(),
        }
    }

    /// Pure biome query; does not materialize the tile.
    pub fn biome_of(&self, coord: Coord) -> BiomeId {
        self.generator.biome_of(coord.x, coord.y)
    }

    pub fn generator(&self) -> &WorldGenerator {
        &self.generator
    }

    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    pub fn get_or_create(&mut self, coord: Coord) -> &mut Tile {
        let biome = self.generator.biome_of(coord.x, coord.y);
        self.tiles.entry(coord).or_insert_with(|| Tile {
            biome,
            explored: false,
            contents: Vec::new(),
        })
    }

    /// Materialize contents for a tile. Idempotent: a tile that already holds
    /// entities is left untouched. Returns the number of entities spawned.
    pub fn populate(
        &mut self,
        coord: Coord,
        profile: &SpawnProfile,
        rng: &mut ChaCha8Rng,
    ) -> usize {
        if !self.get_or_create(coord).contents.is_empty() {
            return 0;
        }
        self.respawn(coord, profile, rng)
    }

    /// Clear and regenerate a tile's contents unconditionally. This is the
    /// only sanctioned way to regenerate; it backs the "search" action.
    pub fn force_repopulate(
        &mut self,
        coord: Coord,
        profile: &SpawnProfile,
        rng: &mut ChaCha8Rng,
    ) -> usize {
        self.get_or_create(coord).contents.clear();
        self.respawn(coord, profile, rng)
    }

    fn respawn(&mut self, coord: Coord, profile: &SpawnProfile, rng: &mut ChaCha8Rng) -> usize {
        let biome = self.get_or_create(coord).biome;
        let def = self.generator.catalog().get(biome);
        let count = rng.gen_range(profile.count_min..=profile.count_max) as usize;
        let mut spawned = Vec::with_capacity(count);
        for _ in 0..count {
            spawned.push(roll_entity(def, profile.mob_chance, rng));
        }
        let tile = self.tiles.get_mut(&coord).expect("tile created above");
        tile.contents = spawned;
        tile.contents.len()
    }

    /// Remove an entity by position. Surviving entries keep their order.
    /// A stale index is the caller's problem and yields `None`, not a panic.
    pub fn remove_entity(&mut self, coord: Coord, index: usize) -> Option<TileEntity> {
        let tile = self.tiles.get_mut(&coord)?;
        if index >= tile.contents.len() {
            return None;
        }
        Some(tile.contents.remove(index))
    }

    pub fn entity(&self, coord: Coord, index: usize) -> Option<&TileEntity> {
        self.tiles.get(&coord)?.contents.get(index)
    }

    pub fn entity_mut(&mut self, coord: Coord, index: usize) -> Option<&mut TileEntity> {
        self.tiles.get_mut(&coord)?.contents.get_mut(index)
    }

    pub fn mark_explored(&mut self, coord: Coord) {
        self.get_or_create(coord).explored = true;
    }
}

fn roll_entity(def: &BiomeDefinition, mob_chance: f64, rng: &mut ChaCha8Rng) -> TileEntity {
    if rng.gen_bool(mob_chance) {
        let template = &def.mobs[rng.gen_range(0..def.mobs.len())];
        TileEntity::Mob {
            name: template.name.to_string(),
            max_hp: template.base_hp,
            hp: template.base_hp,
            attack: template.base_atk,
        }
    } else {
        let template = &def.resources[rng.gen_range(0..def.resources.len())];
        TileEntity::Resource {
            name: template.name.to_string(),
            remaining: rng.gen_range(template.yield_min..=template.yield_max),
        }
    }
}
