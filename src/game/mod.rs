// Deterministic simulation core: corridor, NPC, encounter cycle.
// Engine-agnostic; every side effect goes through `EngineContext`.

pub mod clock;
pub mod config;
pub mod context;
pub mod corridor;
pub mod encounter;
pub mod headless;
pub mod npc;
pub mod simulation;

pub use clock::Clock;
pub use config::{ConfigError, GameConfig};
pub use context::{Cue, EngineContext, Material, RenderHandle, RenderableDesc, Shape};
pub use corridor::{CorridorRecycler, CorridorSegment, WallTexture};
pub use encounter::{EncounterManager, EncounterState};
pub use headless::HeadlessEngine;
pub use npc::{NpcController, NpcPhase, NpcState, NpcUpdate};
pub use simulation::{Simulation, TickReport};
