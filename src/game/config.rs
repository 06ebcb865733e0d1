// Tunables for the corridor, the NPC and the encounter cycle.
// Defaults mirror the constants below; a JSON file can override any subset.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// CONSTANTS
// ============================================================================

pub const SEGMENT_COUNT: usize = 5;
/// Distance between consecutive segment centres; also each segment's length.
pub const SEGMENT_SPACING: f32 = 20.0;
/// How far behind the player a segment may fall before it is recycled.
pub const RECYCLE_THRESHOLD: f32 = 30.0;
/// Distance a recycled segment jumps forward.
pub const LOOP_LENGTH: f32 = 100.0;
/// Per-segment, per-tick chance of a wall texture swap.
pub const WALL_FLICKER_CHANCE: f64 = 0.02;

pub const NPC_SPAWN_CHANCE: f64 = 0.01;
pub const NPC_SPEED: f32 = 1.0;
pub const NPC_LATERAL_SLOTS: [f32; 2] = [-2.0, 2.0];
pub const NPC_SPAWN_MIN_AHEAD: i32 = 10;
pub const NPC_SPAWN_MAX_AHEAD: i32 = 30;
pub const NPC_FLICKER_MIN: f32 = 0.2;
pub const NPC_FLICKER_MAX: f32 = 1.0;
pub const NPC_DESPAWN_MIN: f32 = 5.0;
pub const NPC_DESPAWN_MAX: f32 = 10.0;
pub const NPC_CATCH_RADIUS: f32 = 1.5;

/// Seconds between the jumpscare and the reset.
pub const RESET_DELAY: f64 = 2.0;
pub const RESPAWN_POINT: Vec3 = Vec3::new(0.0, 1.0, 0.0);

pub const PLAYER_MOVE_SPEED: f32 = 10.0;
pub const PLAYER_GRAVITY: f32 = 0.5;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "HOLLOW_CORRIDOR_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "hollow_corridor.json";

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ============================================================================
// SECTIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorridorConfig {
    pub segment_count: usize,
    pub segment_spacing: f32,
    pub recycle_threshold: f32,
    pub loop_length: f32,
    pub flicker_chance: f64,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            segment_count: SEGMENT_COUNT,
            segment_spacing: SEGMENT_SPACING,
            recycle_threshold: RECYCLE_THRESHOLD,
            loop_length: LOOP_LENGTH,
            flicker_chance: WALL_FLICKER_CHANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NpcConfig {
    pub spawn_chance: f64,
    pub speed: f32,
    pub lateral_slots: Vec<f32>,
    /// Whole units ahead of the player, inclusive on both ends.
    pub spawn_min_ahead: i32,
    pub spawn_max_ahead: i32,
    pub flicker_min: f32,
    pub flicker_max: f32,
    pub despawn_min: f32,
    pub despawn_max: f32,
    pub catch_radius: f32,
}

impl NpcConfig {
    pub fn spawn_ahead(&self) -> RangeInclusive<i32> {
        self.spawn_min_ahead..=self.spawn_max_ahead
    }
}

impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            spawn_chance: NPC_SPAWN_CHANCE,
            speed: NPC_SPEED,
            lateral_slots: NPC_LATERAL_SLOTS.to_vec(),
            spawn_min_ahead: NPC_SPAWN_MIN_AHEAD,
            spawn_max_ahead: NPC_SPAWN_MAX_AHEAD,
            flicker_min: NPC_FLICKER_MIN,
            flicker_max: NPC_FLICKER_MAX,
            despawn_min: NPC_DESPAWN_MIN,
            despawn_max: NPC_DESPAWN_MAX,
            catch_radius: NPC_CATCH_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncounterConfig {
    pub reset_delay: f64,
    pub respawn_point: Vec3,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            reset_delay: RESET_DELAY,
            respawn_point: RESPAWN_POINT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub move_speed: f32,
    pub gravity: f32,
    /// Radians of rotation per pixel of mouse travel.
    pub mouse_sensitivity: f32,
    pub eye_height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: PLAYER_MOVE_SPEED,
            gravity: PLAYER_GRAVITY,
            mouse_sensitivity: 0.0025,
            eye_height: 1.0,
        }
    }
}

// ============================================================================
// GAME CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub corridor: CorridorConfig,
    pub npc: NpcConfig,
    pub encounter: EncounterConfig,
    pub player: PlayerConfig,
    /// Seed for the simulation RNG. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub assets_dir: PathBuf,
    pub audio_enabled: bool,
    /// Upper bound on the per-frame delta fed to the simulation.
    pub max_frame_dt: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            corridor: CorridorConfig::default(),
            npc: NpcConfig::default(),
            encounter: EncounterConfig::default(),
            player: PlayerConfig::default(),
            seed: None,
            assets_dir: PathBuf::from("assets"),
            audio_enabled: true,
            max_frame_dt: 0.1,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text, path)
    }

    /// Resolve the config source: `$HOLLOW_CORRIDOR_CONFIG`, then
    /// `hollow_corridor.json` in the working directory, then defaults.
    /// Returns the path that was used, if any.
    pub fn load() -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(explicit);
            return Ok((Self::from_file(&path)?, Some(path)));
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Ok((Self::from_file(&local)?, Some(local)));
        }
        Ok((Self::default(), None))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.corridor;
        if c.segment_count == 0 {
            return Err(invalid("corridor.segment_count", "must be at least 1"));
        }
        positive("corridor.segment_spacing", c.segment_spacing)?;
        positive("corridor.recycle_threshold", c.recycle_threshold)?;
        positive("corridor.loop_length", c.loop_length)?;
        probability("corridor.flicker_chance", c.flicker_chance)?;

        let n = &self.npc;
        probability("npc.spawn_chance", n.spawn_chance)?;
        positive("npc.speed", n.speed)?;
        positive("npc.catch_radius", n.catch_radius)?;
        if n.lateral_slots.is_empty() {
            return Err(invalid("npc.lateral_slots", "must not be empty"));
        }
        if n.spawn_min_ahead > n.spawn_max_ahead {
            return Err(invalid("npc.spawn_min_ahead", "exceeds spawn_max_ahead"));
        }
        ordered("npc.flicker_min", n.flicker_min, n.flicker_max)?;
        ordered("npc.despawn_min", n.despawn_min, n.despawn_max)?;

        if !(self.encounter.reset_delay.is_finite() && self.encounter.reset_delay >= 0.0) {
            return Err(invalid("encounter.reset_delay", "must be a non-negative number"));
        }
        positive("player.move_speed", self.player.move_speed)?;
        positive("max_frame_dt", self.max_frame_dt)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("must be within [0, 1], got {value}")))
    }
}

// Uniform draws use a half-open range, so min must be strictly below max.
fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min >= 0.0 && min < max {
        Ok(())
    } else {
        Err(invalid(field, format!("expected 0 <= min < max, got {min}..{max}")))
    }
}
