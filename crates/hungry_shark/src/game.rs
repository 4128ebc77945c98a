//! Gameplay controller
//!
//! Owns the fish pool and everything that touches it during a level, and
//! walks the game through its modes:
//!
//! ```text
//! None ─on_level_start─► GameStart ◄─resume── GamePause / GameHold
//!                           │   │
//!            target reached │   │ health 0, bomb, time limit
//!                           ▼   ▼
//!               LevelComplete   GameOver ─(delay)─► game-over screen
//!                    │
//!                 (delay) ─► next level or MissionMode
//! ```
//!
//! Every "wait, then do" step is a task on the controller's scheduler, so
//! nothing runs outside [`GameplayController::update`].

use rand::rngs::StdRng;
use shoal_engine::events::{EventHandler, EventSystem};
use shoal_engine::foundation::math::Vec3;
use shoal_engine::pool::{ClearReport, PoolError};
use shoal_engine::schedule::{TaskId, TaskScheduler};

use crate::catalog::SmallFishType;
use crate::level::{LevelConfigProvider, LevelError, PrototypeTable};
use crate::scene::{EntityId, SceneError, SceneWorld};
use crate::settings::GameSettings;
use crate::spawner::{FishPool, Spawner};

/// Game mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Nothing running
    #[default]
    None,
    /// Level select
    MissionMode,
    /// Level in play
    GameStart,
    /// Paused by the player
    GamePause,
    /// Held by the game, e.g. while a prompt is shown
    GameHold,
    /// Target reached, waiting for the next level
    LevelComplete,
    /// Shark died
    GameOver,
}

impl GameMode {
    /// Whether a level is running or suspended
    pub fn in_level(self) -> bool {
        matches!(self, Self::GameStart | Self::GamePause | Self::GameHold)
    }
}

/// Events raised by the controller
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Mode transition
    ModeChanged {
        /// Previous mode
        from: GameMode,
        /// New mode
        to: GameMode,
    },
    /// A level began
    LevelStarted {
        /// Level number
        level: u32,
        /// Fish to eat
        target: u32,
    },
    /// A fish was placed
    FishSpawned {
        /// Scene entity
        handle: EntityId,
        /// Species
        category: SmallFishType,
    },
    /// A fish was eaten
    FishEaten {
        /// Species
        category: SmallFishType,
        /// Eaten this level
        eaten: u32,
        /// Level target
        target: u32,
    },
    /// Health moved
    HealthChanged {
        /// Current health
        health: u32,
    },
    /// Target reached
    LevelCompleted {
        /// Level number
        level: u32,
        /// Coins awarded
        coins: u32,
    },
    /// The fish pool was torn down
    PoolCleared(ClearReport),
    /// Game-over screen is due
    GameOverShown {
        /// Level the game ended on
        level: u32,
    },
    /// The last level was completed
    AllLevelsComplete,
}

/// Gameplay errors
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Level data could not be resolved
    #[error(transparent)]
    Level(#[from] LevelError),

    /// The fish pool could not be built
    #[error("Failed to build fish pool: {0}")]
    Pool(#[from] PoolError<SceneError>),

    /// A level is already running
    #[error("Level {0} is still in progress")]
    LevelInProgress(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Job {
    SpawnTick,
    HealthDrain,
    LevelTimeout,
    ReleaseFish(EntityId),
    NextLevel,
    ShowGameOver,
}

/// Drives levels, spawning, eating and game over
pub struct GameplayController<P> {
    provider: P,
    settings: GameSettings,
    scene: SceneWorld,
    prototypes: PrototypeTable,
    pool: FishPool,
    spawner: Spawner,
    scheduler: TaskScheduler<Job>,
    events: EventSystem<GameEvent>,
    mode: GameMode,
    level: u32,
    eaten: u32,
    target: u32,
    health: u32,
    coins: u32,
    shark: Vec3,
    drain_task: Option<TaskId>,
}

impl<P: LevelConfigProvider> GameplayController<P> {
    /// Create a controller with a fresh scene holding one prototype per fish type
    pub fn new(provider: P, settings: GameSettings, rng: StdRng) -> Self {
        let mut scene = SceneWorld::new();
        let prototypes = SmallFishType::ALL
            .iter()
            .map(|fish| (*fish, scene.register_prototype(settings.prototype_name(*fish))))
            .collect();
        Self::from_parts(provider, settings, scene, prototypes, rng)
    }

    /// Create a controller around an existing scene and prototype bindings
    pub fn from_parts(
        provider: P,
        settings: GameSettings,
        scene: SceneWorld,
        prototypes: PrototypeTable,
        rng: StdRng,
    ) -> Self {
        let spawner = Spawner::new(&settings.spawn, rng);
        let health = settings.health.max_health;
        Self {
            provider,
            settings,
            scene,
            prototypes,
            pool: FishPool::new(),
            spawner,
            scheduler: TaskScheduler::new(),
            events: EventSystem::new(),
            mode: GameMode::None,
            level: 1,
            eaten: 0,
            target: 0,
            health,
            coins: 0,
            shark: Vec3::zeros(),
            drain_task: None,
        }
    }

    fn set_mode(&mut self, mode: GameMode) {
        if self.mode == mode {
            return;
        }
        log::info!("Game mode {:?} -> {:?}", self.mode, mode);
        self.events.send(GameEvent::ModeChanged { from: self.mode, to: mode });
        self.mode = mode;
    }

    /// Build the fish pool for `level` and start spawning
    ///
    /// Any failure leaves the mode unchanged and the pool empty.
    pub fn on_level_start(&mut self, level: u32) -> Result<(), GameError> {
        if self.mode.in_level() {
            return Err(GameError::LevelInProgress(self.level));
        }

        let target = self.provider.target_amount(level)?;
        let time_limit = self.provider.time_limit(level)?;
        let bombs = self.provider.bombs(level)?;
        let entries = self.provider.pool_entries(level, &self.prototypes)?;

        if self.pool.categories().next().is_some() {
            self.teardown();
        }
        if let Err(err) = self.pool.configure(&mut self.scene, entries) {
            log::error!("Level {level} could not start: {err}");
            return Err(err.into());
        }

        for (bomb, count) in bombs {
            log::info!("Level {level}: placing {count} x {bomb}");
        }

        self.scheduler.cancel_all();
        self.level = level;
        self.eaten = 0;
        self.target = target;
        self.health = self.settings.health.max_health;
        self.scheduler.schedule_repeating(self.settings.spawn.interval, Job::SpawnTick);
        self.drain_task = Some(
            self.scheduler
                .schedule_repeating(self.settings.health.drain_interval, Job::HealthDrain),
        );
        if let Some(limit) = time_limit {
            self.scheduler.schedule_once(limit, Job::LevelTimeout);
        }

        log::info!("Level {level} started, target {target}");
        self.events.send(GameEvent::LevelStarted { level, target });
        self.set_mode(GameMode::GameStart);
        Ok(())
    }

    /// Advance the game by `delta_time` seconds with the shark at `shark`
    ///
    /// Timers are frozen while paused or held. Events raised during the
    /// step are dispatched at the end of it.
    pub fn update(&mut self, delta_time: f32, shark: Vec3) -> Result<(), GameError> {
        self.shark = shark;
        if !matches!(self.mode, GameMode::GamePause | GameMode::GameHold) {
            for job in self.scheduler.advance(delta_time) {
                self.run(job)?;
            }
        }
        self.events.dispatch();
        Ok(())
    }

    fn run(&mut self, job: Job) -> Result<(), GameError> {
        match job {
            Job::SpawnTick if self.mode == GameMode::GameStart => {
                let spawned = self.spawner.spawn_tick(&mut self.pool, &mut self.scene, self.shark);
                for (handle, category) in spawned {
                    self.events.send(GameEvent::FishSpawned { handle, category });
                }
            }
            Job::HealthDrain if self.mode == GameMode::GameStart => {
                self.damage(self.settings.health.drain_amount);
            }
            Job::LevelTimeout if self.mode == GameMode::GameStart => {
                log::info!("Level {} ran out of time", self.level);
                self.set_game_over();
            }
            Job::ReleaseFish(handle) => {
                self.spawner.on_entity_consumed(&mut self.pool, &mut self.scene, handle);
            }
            Job::NextLevel => self.advance_level()?,
            Job::ShowGameOver => {
                self.teardown();
                log::info!("Game over on level {}", self.level);
                self.events.send(GameEvent::GameOverShown { level: self.level });
            }
            Job::SpawnTick | Job::HealthDrain | Job::LevelTimeout => {}
        }
        Ok(())
    }

    fn damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        self.events.send(GameEvent::HealthChanged { health: self.health });
        if self.health == 0 {
            self.set_game_over();
        }
    }

    fn restore_health(&mut self) {
        self.health = self.settings.health.max_health;
        self.events.send(GameEvent::HealthChanged { health: self.health });
        if let Some(task) = self.drain_task.take() {
            self.scheduler.cancel(task);
        }
        self.drain_task = Some(
            self.scheduler
                .schedule_repeating(self.settings.health.drain_interval, Job::HealthDrain),
        );
    }

    /// The shark ate `handle`
    ///
    /// Counts the fish, refills health and releases the fish to the pool
    /// after the release delay. Returns false when nothing was eaten: no
    /// level in play, or the fish is not in play.
    pub fn on_fish_eaten(&mut self, handle: EntityId) -> bool {
        if self.mode != GameMode::GameStart {
            return false;
        }
        let Some(category) = self.spawner.begin_consume(handle) else {
            log::debug!("{handle:?} is not an uneaten fish");
            return false;
        };

        self.eaten += 1;
        log::debug!("Ate {category} ({}/{})", self.eaten, self.target);
        self.events.send(GameEvent::FishEaten {
            category,
            eaten: self.eaten,
            target: self.target,
        });
        self.restore_health();
        self.scheduler
            .schedule_once(self.settings.timing.release_delay, Job::ReleaseFish(handle));

        if self.target > 0 && self.eaten >= self.target {
            self.complete_level();
        }
        true
    }

    fn complete_level(&mut self) {
        let coins = self.provider.reward_coins(self.level);
        self.coins += coins;
        log::info!("Level {} complete, {coins} coins", self.level);
        self.set_mode(GameMode::LevelComplete);
        self.events.send(GameEvent::LevelCompleted { level: self.level, coins });
        self.on_level_end();
        self.scheduler
            .schedule_once(self.settings.timing.next_level_delay, Job::NextLevel);
    }

    fn advance_level(&mut self) -> Result<(), GameError> {
        let next = self.level + 1;
        if next > self.provider.last_level() {
            log::info!("All levels complete");
            self.events.send(GameEvent::AllLevelsComplete);
            self.set_mode(GameMode::MissionMode);
            return Ok(());
        }
        self.on_level_start(next)
    }

    /// The shark touched a bomb
    pub fn on_bomb_hit(&mut self) {
        if self.mode == GameMode::GameStart {
            log::info!("Bomb hit on level {}", self.level);
            self.set_game_over();
        }
    }

    /// End the game; the pool is torn down when the game-over screen is due
    pub fn set_game_over(&mut self) {
        if !self.mode.in_level() {
            return;
        }
        self.scheduler.cancel_all();
        self.drain_task = None;
        self.set_mode(GameMode::GameOver);
        self.scheduler
            .schedule_once(self.settings.timing.game_over_delay, Job::ShowGameOver);
    }

    /// Stop spawning, release every fish in play and clear the pool
    pub fn on_level_end(&mut self) -> ClearReport {
        self.scheduler.cancel_all();
        self.drain_task = None;
        self.teardown()
    }

    fn teardown(&mut self) -> ClearReport {
        self.spawner.clear_active(&mut self.pool, &mut self.scene);
        let report = self.pool.clear();
        self.scene.despawn_inactive();
        self.events.send(GameEvent::PoolCleared(report));
        report
    }

    /// Pause a running level
    pub fn pause(&mut self) {
        if self.mode == GameMode::GameStart {
            self.set_mode(GameMode::GamePause);
        }
    }

    /// Hold a running level
    pub fn hold(&mut self) {
        if self.mode == GameMode::GameStart {
            self.set_mode(GameMode::GameHold);
        }
    }

    /// Continue a paused or held level
    pub fn resume(&mut self) {
        if matches!(self.mode, GameMode::GamePause | GameMode::GameHold) {
            self.set_mode(GameMode::GameStart);
        }
    }

    /// Tear everything down and go back to level 1
    pub fn reset_game(&mut self) {
        self.on_level_end();
        self.level = 1;
        self.eaten = 0;
        self.target = 0;
        self.health = self.settings.health.max_health;
        self.set_mode(GameMode::None);
    }

    /// Register a handler for game events
    pub fn register_handler(&mut self, handler: Box<dyn EventHandler<GameEvent>>) {
        self.events.register_handler(handler);
    }

    /// Keep dispatched events for [`Self::drain_events`]
    ///
    /// Off by default, so a game that only registers handlers holds no
    /// events between frames. Turning it off drops anything held.
    pub fn capture_events(&mut self, capture: bool) {
        self.events.set_capture(capture);
    }

    /// Take every event dispatched since the last call while capture is on
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain_delivered()
    }

    /// Current mode
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Current level number
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Fish eaten this level
    pub fn eaten(&self) -> u32 {
        self.eaten
    }

    /// Fish to eat this level
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Current health
    pub fn health(&self) -> u32 {
        self.health
    }

    /// Coins earned so far
    pub fn coins(&self) -> u32 {
        self.coins
    }

    /// Fish pool
    pub fn pool(&self) -> &FishPool {
        &self.pool
    }

    /// Scene world
    pub fn scene(&self) -> &SceneWorld {
        &self.scene
    }

    /// Spawner
    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// Gameplay settings
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }
}
