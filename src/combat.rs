use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::event::LogEvent;
use crate::player::PlayerState;
use crate::tile::{Coord, TileEntity, TileStore};

/// Player choice for one combat round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatAction {
    Attack,
    Defend,
    Flee,
}

/// Terminal result of an encounter. Absent while the fight continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    Win,
    Loss,
    Fled,
}

/// Live reference to the engaged mob: its tile coordinate and content index,
/// so damage lands on the stored instance and a win can excise it. Valid as
/// long as no population runs on that tile, which the session guarantees by
/// rejecting move/gather/search while an encounter is active.
#[derive(Debug, Clone)]
pub struct Encounter {
    pub coord: Coord,
    pub index: usize,
    pub mob_name: String,
    pub max_hp: i32,
}

/// Combat knobs sourced from the scenario.
#[derive(Debug, Clone, Copy)]
pub struct CombatProfile {
    pub attack_bonus_max: i32,
    pub counter_bonus_max: i32,
    pub flee_chance: f64,
    pub victory_scrip_max: u32,
}

pub struct RoundReport {
    pub events: Vec<LogEvent>,
    pub outcome: Option<CombatOutcome>,
}

/// Turn-based encounter state machine. At most one encounter exists at a
/// time; rounds resolve in two explicit synchronous phases (player, then
/// enemy) with no deferred callbacks.
#[derive(Default)]
pub struct CombatResolver {
    encounter: Option<Encounter>,
}

impl CombatResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_combat(&self) -> bool {
        self.encounter.is_some()
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    /// Begin an encounter with the mob at `index` on `coord`. Returns the
    /// opening events, or `None` if the index is stale or not a mob.
    pub fn engage(&mut self, store: &TileStore, coord: Coord, index: usize) -> Option<Vec<LogEvent>> {
        match store.entity(coord, index)? {
            TileEntity::Mob { name, max_hp, .. } => {
                let mob_name = name.clone();
                self.encounter = Some(Encounter {
                    coord,
                    index,
                    mob_name: mob_name.clone(),
                    max_hp: *max_hp,
                });
                Some(vec![LogEvent::EncounterStarted { mob: mob_name }])
            }
            TileEntity::Resource { .. } => None,
        }
    }

    /// Resolve one round. No-op when idle.
    pub fn resolve_round(
        &mut self,
        action: CombatAction,
        store: &mut TileStore,
        player: &mut PlayerState,
        profile: &CombatProfile,
        rng: &mut ChaCha8Rng,
    ) -> RoundReport {
        let Some(enc) = self.encounter.clone() else {
            return RoundReport { events: Vec::new(), outcome: None };
        };

        let mut events = Vec::new();

        // Player phase.
        match action {
            CombatAction::Attack => {
                let damage = player.attack + rng.gen_range(0..=profile.attack_bonus_max);
                let mob_hp = match self.strike_mob(store, &enc, damage) {
                    Some(hp) => hp,
                    None => return self.dissolve(events),
                };
                events.push(LogEvent::PlayerStruck {
                    mob: enc.mob_name.clone(),
                    damage,
                    mob_hp,
                });
                if mob_hp <= 0 {
                    events.push(self.claim_victory(store, player, &enc, profile, rng));
                    return RoundReport { events, outcome: Some(CombatOutcome::Win) };
                }
            }
            CombatAction::Defend => {}
            CombatAction::Flee => {
                if rng.gen_bool(profile.flee_chance) {
                    events.push(LogEvent::Fled { mob: enc.mob_name.clone() });
                    self.encounter = None;
                    return RoundReport { events, outcome: Some(CombatOutcome::Fled) };
                }
                events.push(LogEvent::FleeFailed { mob: enc.mob_name.clone() });
            }
        }

        // Enemy phase. Defend halves the incoming hit for this round only;
        // a failed flee grants the free strike unmitigated.
        let defending = action == CombatAction::Defend;
        let Some(mob_attack) = self.mob_attack(store, &enc) else {
            return self.dissolve(events);
        };
        let mut damage = mob_attack + rng.gen_range(0..=profile.counter_bonus_max);
        if defending {
            damage /= 2;
        }
        player.take_damage(damage);
        let struck = if defending {
            LogEvent::Braced { mob: enc.mob_name.clone(), damage, player_hp: player.hp }
        } else {
            LogEvent::MobStruck { mob: enc.mob_name.clone(), damage, player_hp: player.hp }
        };
        events.push(struck);

        if player.is_dead() {
            events.push(LogEvent::PlayerDied);
            self.encounter = None;
            return RoundReport { events, outcome: Some(CombatOutcome::Loss) };
        }

        RoundReport { events, outcome: None }
    }

    /// Deal damage to the engaged mob's stored instance. Returns its
    /// remaining hp (floored at zero), or `None` if the entity vanished.
    fn strike_mob(&self, store: &mut TileStore, enc: &Encounter, damage: i32) -> Option<i32> {
        match store.entity_mut(enc.coord, enc.index) {
            Some(TileEntity::Mob { hp, .. }) => {
                *hp = (*hp - damage).max(0);
                Some(*hp)
            }
            _ => None,
        }
    }

    fn mob_attack(&self, store: &TileStore, enc: &Encounter) -> Option<i32> {
        match store.entity(enc.coord, enc.index) {
            Some(TileEntity::Mob { attack, .. }) => Some(*attack),
            _ => None,
        }
    }

    fn claim_victory(
        &mut self,
        store: &mut TileStore,
        player: &mut PlayerState,
        enc: &Encounter,
        profile: &CombatProfile,
        rng: &mut ChaCha8Rng,
    ) -> LogEvent {
        store.remove_entity(enc.coord, enc.index);
        player.add_item("Meat", 1);
        let scrip = if profile.victory_scrip_max == 0 {
            0
        } else {
            rng.gen_range(1..=profile.victory_scrip_max)
        };
        player.scrip += scrip;
        self.encounter = None;
        LogEvent::MobDefeated { mob: enc.mob_name.clone(), scrip }
    }

    /// The engaged entity no longer exists at its recorded slot. Stand down
    /// rather than panic; the session surfaces a notice.
    fn dissolve(&mut self, mut events: Vec<LogEvent>) -> RoundReport {
        self.encounter = None;
        events.push(LogEvent::notice("Your quarry is nowhere to be found."));
        RoundReport { events, outcome: None }
    }
}
