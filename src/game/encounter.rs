// Jumpscare and reset. The reset is a deadline polled every tick, not a
// timer thread.

use glam::Vec3;

use super::config::EncounterConfig;
use super::context::{Cue, EngineContext};
use super::npc::NpcController;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EncounterState {
    pub jumpscare_active: bool,
    /// Simulated time at which the reset fires.
    pub reset_deadline: Option<f64>,
}

pub struct EncounterManager {
    state: EncounterState,
    reset_delay: f64,
    respawn_point: Vec3,
    resets: u32,
}

impl EncounterManager {
    pub fn new(config: &EncounterConfig) -> Self {
        Self {
            state: EncounterState::default(),
            reset_delay: config.reset_delay,
            respawn_point: config.respawn_point,
            resets: 0,
        }
    }

    pub fn state(&self) -> &EncounterState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.jumpscare_active
    }

    /// Number of completed resets since startup.
    pub fn resets(&self) -> u32 {
        self.resets
    }

    /// Start the jumpscare. Returns false if one is already running.
    pub fn trigger(&mut self, now: f64, engine: &mut impl EngineContext) -> bool {
        if self.state.jumpscare_active {
            return false;
        }
        self.state.jumpscare_active = true;
        self.state.reset_deadline = Some(now + self.reset_delay);
        engine.play_cue(Cue::Jumpscare);
        engine.set_overlay_visible(true);
        log::info!("jumpscare triggered, reset at t={:.2}", now + self.reset_delay);
        true
    }

    /// Fire the pending reset once its deadline has been reached.
    pub fn tick(&mut self, now: f64, npc: &mut NpcController, engine: &mut impl EngineContext) -> bool {
        match self.state.reset_deadline {
            Some(deadline) if now >= deadline => {
                self.reset(npc, engine);
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self, npc: &mut NpcController, engine: &mut impl EngineContext) {
        log::info!("resetting game");
        self.state = EncounterState::default();
        self.resets += 1;
        engine.set_overlay_visible(false);
        engine.stop_cue(Cue::Jumpscare);
        engine.set_player_position(self.respawn_point);
        npc.hide(engine);
    }
}
