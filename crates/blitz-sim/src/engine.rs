//! Simulation engine: the explicit context for one combat sandbox.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs the systems in a fixed order, and produces `GameStateSnapshot`s.
//! Completely headless, so whole scenarios run deterministically in tests.

use std::collections::VecDeque;
use std::f64::consts::FRAC_PI_2;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use blitz_core::commands::PlayerCommand;
use blitz_core::components::{Player, Transform};
use blitz_core::enums::GamePhase;
use blitz_core::events::{AudioEvent, CombatEvent};
use blitz_core::state::GameStateSnapshot;
use blitz_core::types::SimTime;

use crate::clock::{Clock, FixedStepClock};
use crate::config::SimConfig;
use crate::scheduler::Scheduler;
use crate::spatial::{ColliderQuery, SpatialQuery};
use crate::systems;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    scheduler: Scheduler,
    clock: Box<dyn Clock + Send>,
    spatial: Box<dyn SpatialQuery + Send>,
    player: Option<Entity>,
    fire_held: bool,
    command_queue: VecDeque<PlayerCommand>,
    audio_events: Vec<AudioEvent>,
    combat_events: Vec<CombatEvent>,
}

impl SimulationEngine {
    /// Create an engine with a fixed-step clock and the built-in collider
    /// ray queries. The world stays empty until `StartScenario`.
    pub fn new(config: SimConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            scheduler: Scheduler::new(),
            clock: Box::new(FixedStepClock::default()),
            spatial: Box::new(ColliderQuery),
            player: None,
            fire_held: false,
            command_queue: VecDeque::new(),
            audio_events: Vec::new(),
            combat_events: Vec::new(),
        }
    }

    /// Replace the elapsed-time source.
    pub fn with_clock(mut self, clock: impl Clock + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the ray query service.
    pub fn with_spatial_query(mut self, spatial: impl SpatialQuery + Send + 'static) -> Self {
        self.spatial = Box::new(spatial);
        self
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            let dt = self.clock.elapsed_since_last_tick().max(0.0);
            self.time.advance(dt);
            self.run_systems(dt);
        }

        systems::snapshot::build_snapshot(
            &self.world,
            self.time,
            self.phase,
            self.player,
            std::mem::take(&mut self.audio_events),
            std::mem::take(&mut self.combat_events),
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The player entity, once the scenario has started.
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Whether primary fire is currently held.
    pub fn fire_held(&self) -> bool {
        self.fire_held
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartScenario => {
                if self.phase == GamePhase::Setup {
                    let player =
                        world_setup::setup_scenario(&mut self.world, &mut self.rng, &self.config);
                    self.player = Some(player);
                    self.enter_active();
                    tracing::info!(
                        seed = self.config.seed,
                        enemies = self.config.spawn.count,
                        "scenario started"
                    );
                }
            }
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::Resume => self.resume(),
            PlayerCommand::TogglePause => match self.phase {
                GamePhase::Active => self.pause(),
                GamePhase::Paused => self.resume(),
                GamePhase::Setup => {}
            },
            PlayerCommand::SetFireHeld { held } => {
                self.fire_held = held;
            }
            PlayerCommand::SetPlayerPose {
                position,
                yaw,
                pitch,
            } => {
                let Some(player) = self.player else {
                    return;
                };
                if let Ok((transform, rig)) =
                    self.world.query_one_mut::<(&mut Transform, &mut Player)>(player)
                {
                    transform.position = position;
                    transform.yaw = yaw;
                    rig.pitch = pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
                }
            }
        }
    }

    fn pause(&mut self) {
        if self.phase == GamePhase::Active {
            self.phase = GamePhase::Paused;
            tracing::info!(tick = self.time.tick, "simulation paused");
        }
    }

    fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.enter_active();
            tracing::info!(tick = self.time.tick, "simulation resumed");
        }
    }

    fn enter_active(&mut self) {
        self.phase = GamePhase::Active;
        self.clock.restart();
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let now = self.time.elapsed_secs;

        // 1. Deferred actions that came due
        systems::scheduled::run(
            &mut self.world,
            &mut self.scheduler,
            now,
            &mut self.combat_events,
        );

        let Some(player) = self.player else {
            return;
        };

        // 2. Enemy AI, one enemy at a time
        systems::enemy_ai::run(&mut self.world, self.spatial.as_ref(), player, dt);

        // 3. Weapon
        systems::weapon::run(
            &mut self.world,
            self.spatial.as_ref(),
            &mut self.scheduler,
            &mut self.rng,
            &self.config.weapon,
            player,
            self.fire_held,
            now,
            &mut self.audio_events,
            &mut self.combat_events,
        );
    }
}
