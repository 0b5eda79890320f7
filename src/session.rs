use std::collections::VecDeque;

use crate::biome::BiomeCatalog;
use crate::combat::{CombatAction, CombatOutcome, CombatResolver, Encounter};
use crate::event::LogEvent;
use crate::explore::ExplorationLedger;
use crate::player::PlayerState;
use crate::rng::{RngManager, COMBAT_STREAM, SPAWN_STREAM};
use crate::scenario::{Scenario, Tuning};
use crate::snapshot::SessionSnapshot;
use crate::tile::{Coord, TileEntity, TileStore};
use crate::worldgen::WorldGenerator;

pub const HOURS_PER_DAY: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionPhase {
    Active,
    Ended,
}

/// One player-driven game session. Owns the world model, the exploration
/// ledger, the combat resolver and the player record, and sequences every
/// externally triggered action against them. All actions run to completion
/// synchronously; callers serialize access through one owner.
pub struct GameSession {
    scenario_name: String,
    tuning: Tuning,
    store: TileStore,
    ledger: ExplorationLedger,
    combat: CombatResolver,
    player: PlayerState,
    rng: RngManager,
    hour: u32,
    zoomed: bool,
    phase: SessionPhase,
    log: VecDeque<LogEvent>,
}

impl GameSession {
    pub fn new(scenario: &Scenario) -> Self {
        let generator = WorldGenerator::new(BiomeCatalog::standard());
        let spawn = Coord::new(scenario.player.spawn_x, scenario.player.spawn_y);
        let mut session = Self {
            scenario_name: scenario.name.clone(),
            tuning: scenario.tuning.clone(),
            store: TileStore::new(generator),
            ledger: ExplorationLedger::new(),
            combat: CombatResolver::new(),
            player: PlayerState::new(spawn, scenario.player.max_hp, scenario.player.attack),
            rng: RngManager::new(scenario.seed),
            hour: 6,
            zoomed: false,
            phase: SessionPhase::Active,
            log: VecDeque::new(),
        };
        session.reveal_around(spawn);
        let profile = session.tuning.spawn_profile();
        session.store.populate(spawn, &profile, session.rng.stream(SPAWN_STREAM));
        let biome = session.biome_name(spawn);
        session.record(vec![LogEvent::Awakened { biome }]);
        session
    }

    /// Step the player one tile. Costs 1 hunger and 1 water; a vital already
    /// at zero inflicts passive hp decay on each move until replenished.
    pub fn move_by(&mut self, dx: i64, dy: i64) -> Vec<LogEvent> {
        if let Some(rejected) = self.guard_field_action() {
            return rejected;
        }

        let starving = self.player.hunger == 0;
        let parched = self.player.water == 0;
        self.player.drain_hunger(1);
        self.player.drain_water(1);

        let dest = self.player.position.offset(dx, dy);
        self.player.position = dest;
        self.advance_clock();
        self.reveal_around(dest);
        let profile = self.tuning.spawn_profile();
        self.store.populate(dest, &profile, self.rng.stream(SPAWN_STREAM));

        let mut events = vec![LogEvent::Moved {
            biome: self.biome_name(dest),
            x: dest.x,
            y: dest.y,
        }];

        let mut decay = 0;
        if starving {
            decay += self.tuning.starvation_decay;
        }
        if parched {
            decay += self.tuning.dehydration_decay;
        }
        if decay > 0 {
            self.player.take_damage(decay);
            events.push(LogEvent::Exposure { hp: self.player.hp });
            if self.player.is_dead() {
                events.push(LogEvent::PlayerDied);
                self.phase = SessionPhase::Ended;
            }
        }
        self.record(events)
    }

    /// Harvest the resource at `index` on the current tile. The whole stack
    /// transfers to the inventory and the entry is removed.
    pub fn gather(&mut self, index: usize) -> Vec<LogEvent> {
        if let Some(rejected) = self.guard_field_action() {
            return rejected;
        }

        let coord = self.player.position;
        let grabbed = match self.store.entity(coord, index) {
            Some(TileEntity::Resource { name, remaining }) => Some((name.clone(), *remaining)),
            _ => None,
        };
        let events = match grabbed {
            Some((name, count)) => {
                self.store.remove_entity(coord, index);
                self.player.add_item(&name, count);
                self.player.drain_hunger(self.tuning.gather_hunger_cost);
                self.advance_clock();
                vec![LogEvent::Gathered { name, count }]
            }
            None => vec![LogEvent::notice("There is nothing to gather there.")],
        };
        self.record(events)
    }

    /// Actively search the current tile, discarding its contents and rolling
    /// fresh ones. The only path that regenerates a populated tile.
    pub fn search(&mut self) -> Vec<LogEvent> {
        if let Some(rejected) = self.guard_field_action() {
            return rejected;
        }

        let coord = self.player.position;
        let profile = self.tuning.spawn_profile();
        let found = self
            .store
            .force_repopulate(coord, &profile, self.rng.stream(SPAWN_STREAM));
        self.player.drain_hunger(self.tuning.search_hunger_cost);
        self.advance_clock();
        self.record(vec![LogEvent::Searched { found }])
    }

    /// Start combat with the mob at `index` on the current tile.
    pub fn engage(&mut self, index: usize) -> Vec<LogEvent> {
        if self.phase == SessionPhase::Ended {
            return self.record(vec![LogEvent::notice("The journey is over.")]);
        }
        if self.combat.in_combat() {
            return self.record(vec![LogEvent::notice("You are already locked in combat!")]);
        }

        let coord = self.player.position;
        match self.combat.engage(&self.store, coord, index) {
            Some(events) => self.record(events),
            None => self.record(vec![LogEvent::notice("There is nothing to fight there.")]),
        }
    }

    /// Resolve one combat round. A no-op outside combat.
    pub fn combat_action(&mut self, action: CombatAction) -> Vec<LogEvent> {
        if self.phase == SessionPhase::Ended {
            return self.record(vec![LogEvent::notice("The journey is over.")]);
        }
        if !self.combat.in_combat() {
            return Vec::new();
        }

        let profile = self.tuning.combat_profile();
        let report = self.combat.resolve_round(
            action,
            &mut self.store,
            &mut self.player,
            &profile,
            self.rng.stream(COMBAT_STREAM),
        );
        if report.outcome == Some(CombatOutcome::Loss) {
            self.phase = SessionPhase::Ended;
        }
        self.record(report.events)
    }

    /// Flip the map window between the base and enlarged radii.
    pub fn toggle_map_zoom(&mut self) -> Vec<LogEvent> {
        if self.phase == SessionPhase::Ended {
            return self.record(vec![LogEvent::notice("The journey is over.")]);
        }
        self.zoomed = !self.zoomed;
        let span = self.view_radius() * 2 + 1;
        self.record(vec![LogEvent::notice(format!("The map now spans {span}x{span} tiles."))])
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(self)
    }

    pub fn scenario_name(&self) -> &str {
        &self.scenario_name
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    pub fn store(&self) -> &TileStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TileStore {
        &mut self.store
    }

    pub fn ledger(&self) -> &ExplorationLedger {
        &self.ledger
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.combat.encounter()
    }

    pub fn in_combat(&self) -> bool {
        self.combat.in_combat()
    }

    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::Ended
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn is_daytime(&self) -> bool {
        self.hour < HOURS_PER_DAY / 2
    }

    pub fn zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn view_radius(&self) -> i64 {
        if self.zoomed {
            self.tuning.zoom_radius
        } else {
            self.tuning.view_radius
        }
    }

    /// Log feed, newest first.
    pub fn log(&self) -> impl Iterator<Item = &LogEvent> {
        self.log.iter()
    }

    pub fn biome_name(&self, coord: Coord) -> String {
        let id = self.store.biome_of(coord);
        self.store.generator().catalog().get(id).name.to_string()
    }

    /// Reject field actions once the session has ended or while a fight is
    /// active. Returns the recorded notice when rejecting.
    fn guard_field_action(&mut self) -> Option<Vec<LogEvent>> {
        if self.phase == SessionPhase::Ended {
            return Some(self.record(vec![LogEvent::notice("The journey is over.")]));
        }
        if self.combat.in_combat() {
            return Some(self.record(vec![LogEvent::notice("You cannot do that mid-fight!")]));
        }
        None
    }

    fn advance_clock(&mut self) {
        self.hour = (self.hour + 1) % HOURS_PER_DAY;
    }

    fn reveal_around(&mut self, center: Coord) {
        for coord in self.ledger.reveal(center) {
            self.store.mark_explored(coord);
        }
    }

    /// Prepend events onto the feed (newest first) and hand them back to the
    /// caller. The feed is capped so long sessions stay bounded.
    fn record(&mut self, events: Vec<LogEvent>) -> Vec<LogEvent> {
        for event in &events {
            self.log.push_front(event.clone());
        }
        self.log.truncate(self.tuning.log_cap);
        events
    }
}
