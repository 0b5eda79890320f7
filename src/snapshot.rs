use std::collections::BTreeMap;

use serde::Serialize;

use crate::session::GameSession;
use crate::tile::{Coord, TileEntity};

/// Renderable view of a session, assembled on demand. The presentation layer
/// only ever reads these; it never touches the session's internal maps.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub scenario: String,
    pub hour: u32,
    pub daytime: bool,
    pub game_over: bool,
    pub zoomed: bool,
    pub view_radius: i64,
    pub player: PlayerView,
    pub tile: TileView,
    pub map: Vec<MapCell>,
    pub combat: Option<CombatPanel>,
    /// Rendered log messages, newest first.
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub x: i64,
    pub y: i64,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub hunger: u32,
    pub water: u32,
    pub scrip: u32,
    pub inventory: BTreeMap<String, u32>,
}

/// The player's current tile: biome plus its contents in stored order, so
/// content indices in commands match what was rendered.
#[derive(Debug, Clone, Serialize)]
pub struct TileView {
    pub biome: String,
    pub contents: Vec<TileEntity>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapCell {
    pub x: i64,
    pub y: i64,
    pub explored: bool,
    pub glyph: Option<char>,
    pub biome: Option<String>,
    pub is_player: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CombatPanel {
    pub mob: String,
    pub hp: i32,
    pub max_hp: i32,
}

impl SessionSnapshot {
    pub fn capture(session: &GameSession) -> Self {
        let player = session.player();
        let position = player.position;

        let tile = TileView {
            biome: session.biome_name(position),
            contents: session
                .store()
                .get(position)
                .map(|t| t.contents.clone())
                .unwrap_or_default(),
        };

        let radius = session.view_radius();
        let mut map = Vec::with_capacity(((radius * 2 + 1) * (radius * 2 + 1)) as usize);
        for y in (position.y - radius)..=(position.y + radius) {
            for x in (position.x - radius)..=(position.x + radius) {
                let coord = Coord::new(x, y);
                let explored = session.ledger().is_explored(coord);
                let (glyph, biome) = if explored {
                    let id = session.store().biome_of(coord);
                    let def = session.store().generator().catalog().get(id);
                    (Some(def.glyph), Some(def.name.to_string()))
                } else {
                    (None, None)
                };
                map.push(MapCell {
                    x,
                    y,
                    explored,
                    glyph,
                    biome,
                    is_player: coord == position,
                });
            }
        }

        let combat = session.encounter().map(|enc| {
            let hp = match session.store().entity(enc.coord, enc.index) {
                Some(TileEntity::Mob { hp, .. }) => (*hp).max(0),
                _ => 0,
            };
            CombatPanel {
                mob: enc.mob_name.clone(),
                hp,
                max_hp: enc.max_hp,
            }
        });

        Self {
            scenario: session.scenario_name().to_string(),
            hour: session.hour(),
            daytime: session.is_daytime(),
            game_over: session.is_over(),
            zoomed: session.zoomed(),
            view_radius: radius,
            player: PlayerView {
                x: position.x,
                y: position.y,
                hp: player.hp.max(0),
                max_hp: player.max_hp,
                attack: player.attack,
                hunger: player.hunger,
                water: player.water,
                scrip: player.scrip,
                inventory: player.inventory.clone(),
            },
            tile,
            map,
            combat,
            log: session.log().map(|event| event.message()).collect(),
        }
    }
}
