// Per-tick pipeline. The step order is fixed:
//   1. corridor recycle + wall flicker
//   2. spawn roll (dormant NPC, no jumpscare)
//   3. NPC update, escalating to a jumpscare on contact
//   4. encounter deadline
//   5. footstep cue

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::clock::Clock;
use super::config::GameConfig;
use super::context::{Cue, EngineContext};
use super::corridor::CorridorRecycler;
use super::encounter::EncounterManager;
use super::npc::NpcController;

/// Observable summary of one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub segments_recycled: usize,
    pub npc_spawned: bool,
    pub npc_despawned: bool,
    pub encounter_triggered: bool,
    pub reset_fired: bool,
    pub footstep_started: bool,
}

pub struct Simulation<R: Rng = StdRng> {
    clock: Clock,
    corridor: CorridorRecycler,
    npc: NpcController,
    encounter: EncounterManager,
    spawn_chance: f64,
    rng: R,
}

impl Simulation<StdRng> {
    /// Build from config, seeding from `config.seed` or OS entropy.
    pub fn from_config(config: &GameConfig, engine: &mut impl EngineContext) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng, engine)
    }
}

impl<R: Rng> Simulation<R> {
    /// Spawn the corridor ring and the NPC through the engine.
    pub fn with_rng(config: &GameConfig, mut rng: R, engine: &mut impl EngineContext) -> Self {
        let corridor = CorridorRecycler::new(&config.corridor, engine);
        let npc = NpcController::new(&config.npc, &mut rng, engine);
        Self {
            clock: Clock::new(),
            corridor,
            npc,
            encounter: EncounterManager::new(&config.encounter),
            spawn_chance: config.npc.spawn_chance,
            rng,
        }
    }

    pub fn tick(&mut self, dt: f32, engine: &mut impl EngineContext) -> TickReport {
        let dt = self.clock.advance(dt);
        let now = self.clock.now();
        let mut report = TickReport::default();

        report.segments_recycled = self.corridor.advance(engine.player_position().z, engine);
        self.corridor.flicker(&mut self.rng, engine);

        if self.npc.is_dormant() && !self.encounter.is_active() && self.rng.gen_bool(self.spawn_chance) {
            self.npc.spawn(engine.player_position().z, &mut self.rng, engine);
            report.npc_spawned = true;
        }

        if !self.encounter.is_active() {
            let player_pos = engine.player_position();
            let outcome = self.npc.update(dt, player_pos, &mut self.rng, engine);
            report.npc_despawned = outcome.despawned;
            if outcome.encounter_triggered {
                report.encounter_triggered = self.encounter.trigger(now, engine);
            }
        }

        report.reset_fired = self.encounter.tick(now, &mut self.npc, engine);

        if engine.movement_held() && !engine.is_cue_playing(Cue::Footstep) {
            engine.play_cue(Cue::Footstep);
            report.footstep_started = true;
        }

        report
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn corridor(&self) -> &CorridorRecycler {
        &self.corridor
    }

    pub fn npc(&self) -> &NpcController {
        &self.npc
    }

    pub fn encounter(&self) -> &EncounterManager {
        &self.encounter
    }

    #[cfg(test)]
    pub(crate) fn corridor_mut(&mut self) -> &mut CorridorRecycler {
        &mut self.corridor
    }

    #[cfg(test)]
    pub(crate) fn encounter_mut(&mut self) -> &mut EncounterManager {
        &mut self.encounter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::headless::HeadlessEngine;
    use glam::Vec3;
    use rand::rngs::mock::StepRng;

    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.corridor.flicker_chance = 0.0;
        config.npc.spawn_chance = 0.0;
        config
    }

    #[test]
    fn corridor_step_reads_player_z() {
        let mut engine = HeadlessEngine::new();
        let mut sim = Simulation::with_rng(&quiet_config(), StdRng::seed_from_u64(3), &mut engine);

        sim.corridor_mut().set_offset(0, -29.0);
        engine.set_player_position(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(sim.tick(0.016, &mut engine).segments_recycled, 0);
        assert_eq!(sim.corridor().segments()[0].longitudinal_offset, -29.0);

        sim.corridor_mut().set_offset(0, -30.0);
        engine.set_player_position(Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(sim.tick(0.016, &mut engine).segments_recycled, 1);
        assert_eq!(sim.corridor().segments()[0].longitudinal_offset, 70.0);
    }

    #[test]
    fn reset_keeps_the_corridor_where_the_player_left_it() {
        let mut engine = HeadlessEngine::new();
        let mut sim = Simulation::with_rng(&quiet_config(), StdRng::seed_from_u64(8), &mut engine);

        engine.set_player_position(Vec3::new(0.0, 1.0, 200.0));
        for _ in 0..5 {
            sim.tick(0.125, &mut engine);
        }
        let walked = sim.corridor().offsets();
        assert!(walked.iter().all(|&z| z > 160.0));

        let now = sim.clock().now();
        sim.encounter_mut().trigger(now, &mut engine);
        for _ in 0..17 {
            sim.tick(0.125, &mut engine);
        }
        assert_eq!(sim.encounter().resets(), 1);
        assert_eq!(engine.player_position(), Vec3::new(0.0, 1.0, 0.0));
        // Offsets only grow, so the respawn point is left without floor.
        assert_eq!(sim.corridor().offsets(), walked);
    }

    #[test]
    fn no_spawn_with_zero_chance() {
        let mut engine = HeadlessEngine::new();
        let mut sim = Simulation::with_rng(&quiet_config(), StdRng::seed_from_u64(5), &mut engine);
        for _ in 0..1_000 {
            assert!(!sim.tick(0.016, &mut engine).npc_spawned);
        }
        assert!(sim.npc().is_dormant());
    }

    #[test]
    fn footstep_is_edge_triggered() {
        let mut engine = HeadlessEngine::new();
        let mut sim = Simulation::with_rng(&quiet_config(), StdRng::seed_from_u64(5), &mut engine);

        assert!(!sim.tick(0.016, &mut engine).footstep_started);

        engine.set_movement_held(true);
        assert!(sim.tick(0.016, &mut engine).footstep_started);
        assert!(!sim.tick(0.016, &mut engine).footstep_started);
        assert_eq!(engine.cues_played(Cue::Footstep), 1);

        engine.finish_cue(Cue::Footstep);
        assert!(sim.tick(0.016, &mut engine).footstep_started);
        assert_eq!(engine.cues_played(Cue::Footstep), 2);
    }

    #[test]
    fn contact_triggers_jumpscare_in_same_tick() {
        let mut engine = HeadlessEngine::new();
        // Zero stream: spawn fires on the first tick at (-2, 0, z + 10).
        let mut sim = Simulation::with_rng(&GameConfig::default(), StepRng::new(0, 0), &mut engine);
        engine.set_player_position(Vec3::new(-2.0, 0.0, -9.0));

        let report = sim.tick(0.125, &mut engine);
        assert!(report.npc_spawned);
        assert!(!report.encounter_triggered);

        // Walk the player right up to the NPC.
        let npc_pos = sim.npc().state().position;
        engine.set_player_position(npc_pos - Vec3::new(0.0, 0.0, 1.0));
        let report = sim.tick(0.125, &mut engine);
        assert!(report.encounter_triggered);
        assert!(sim.encounter().is_active());
        assert!(engine.overlay_visible());
    }

    #[test]
    fn jumpscare_freezes_npc() {
        let mut engine = HeadlessEngine::new();
        let mut sim = Simulation::with_rng(&GameConfig::default(), StepRng::new(0, 0), &mut engine);
        engine.set_player_position(Vec3::new(-2.0, 0.0, 11.0));
        // Spawn at z = 21, then close in.
        sim.tick(0.125, &mut engine);
        engine.set_player_position(sim.npc().state().position);
        assert!(sim.tick(0.125, &mut engine).encounter_triggered);

        let frozen = sim.npc().state().clone();
        for _ in 0..10 {
            let report = sim.tick(0.125, &mut engine);
            assert!(!report.npc_spawned);
            assert!(!report.reset_fired);
            assert_eq!(sim.npc().state(), &frozen);
        }
    }
}
