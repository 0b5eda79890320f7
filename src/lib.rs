pub mod biome;
pub mod combat;
pub mod event;
pub mod explore;
pub mod player;
pub mod rng;
pub mod scenario;
pub mod session;
pub mod snapshot;
pub mod tile;
pub mod web;
pub mod worldgen;

pub use combat::CombatAction;
pub use scenario::{Scenario, ScenarioLoader};
pub use session::GameSession;
pub use snapshot::SessionSnapshot;
