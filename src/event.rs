use serde::Serialize;

/// Structured log events emitted by session actions and consumed by the
/// presentation layer. The session keeps these newest-first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEvent {
    Awakened { biome: String },
    Moved { biome: String, x: i64, y: i64 },
    Gathered { name: String, count: u32 },
    Searched { found: usize },
    Exposure { hp: i32 },
    EncounterStarted { mob: String },
    PlayerStruck { mob: String, damage: i32, mob_hp: i32 },
    MobStruck { mob: String, damage: i32, player_hp: i32 },
    Braced { mob: String, damage: i32, player_hp: i32 },
    FleeFailed { mob: String },
    Fled { mob: String },
    MobDefeated { mob: String, scrip: u32 },
    PlayerDied,
    Notice { message: String },
}

impl LogEvent {
    pub fn notice(message: impl Into<String>) -> Self {
        LogEvent::Notice { message: message.into() }
    }

    /// Human-readable rendering for the log feed.
    pub fn message(&self) -> String {
        match self {
            LogEvent::Awakened { biome } => {
                format!("You wake up in the {biome}.")
            }
            LogEvent::Moved { biome, x, y } => {
                format!("You travel to ({x}, {y}): {biome}.")
            }
            LogEvent::Gathered { name, count } => {
                format!("Gathered {name} x{count}.")
            }
            LogEvent::Searched { found } => {
                format!("You scour the area and turn up {found} things of note.")
            }
            LogEvent::Exposure { hp } => {
                format!("Hunger and thirst gnaw at you ({hp} hp left).")
            }
            LogEvent::EncounterStarted { mob } => {
                format!("A {mob} blocks your path. Fight!")
            }
            LogEvent::PlayerStruck { mob, damage, mob_hp } => {
                format!("You hit the {mob} for {damage} ({mob_hp} hp left).")
            }
            LogEvent::MobStruck { mob, damage, player_hp } => {
                format!("The {mob} strikes back for {damage} ({player_hp} hp left).")
            }
            LogEvent::Braced { mob, damage, player_hp } => {
                format!("You brace; the {mob} lands {damage} ({player_hp} hp left).")
            }
            LogEvent::FleeFailed { mob } => {
                format!("You fail to escape! The {mob} gets a free strike.")
            }
            LogEvent::Fled { mob } => {
                format!("You slip away from the {mob}.")
            }
            LogEvent::MobDefeated { mob, scrip } => {
                format!("The {mob} falls. You claim meat and {scrip} scrip.")
            }
            LogEvent::PlayerDied => "Your vision fades. The journey ends here.".to_string(),
            LogEvent::Notice { message } => message.clone(),
        }
    }
}
