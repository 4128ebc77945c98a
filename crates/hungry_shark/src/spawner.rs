//! Fish spawner
//!
//! Places pooled fish at waypoints and hands them back when they are eaten.
//! The spawner is the only code that acquires from or releases into the fish
//! pool during a level, so its tracked list is the authoritative set of fish
//! in play.
//!
//! ```text
//! spawn tick ─► free waypoint? ─► random category ─► pool.acquire ─► tracked
//!                                                                     │
//!           pool.release ◄── on_entity_consumed ◄── begin_consume ◄───┘
//! ```

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use shoal_engine::foundation::math::{Pose, Vec3};
use shoal_engine::pool::{ReleaseOutcome, TypedObjectPool};

use crate::catalog::SmallFishType;
use crate::scene::{EntityId, SceneWorld};
use crate::settings::SpawnSettings;

/// Pool of fish entities keyed by species
pub type FishPool = TypedObjectPool<SmallFishType, EntityId>;

#[derive(Debug, Clone, Copy)]
struct TrackedFish {
    handle: EntityId,
    category: SmallFishType,
    /// Eaten and waiting for its delayed release
    consumed: bool,
}

/// Spawner statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnerStats {
    /// Fish placed in the scene
    pub spawned: u64,
    /// Spawns skipped because the pool had nothing to give
    pub exhausted: u64,
    /// Fish handed back to the pool
    pub released: u64,
}

/// Waypoint spawner for pooled fish
#[derive(Debug)]
pub struct Spawner {
    waypoints: Vec<Vec3>,
    min_spawn_spacing: f32,
    min_distance_from_shark: f32,
    spawn_yaw: f32,
    tracked: Vec<TrackedFish>,
    rng: StdRng,
    stats: SpawnerStats,
}

impl Spawner {
    /// Create a spawner from spawn settings
    pub fn new(settings: &SpawnSettings, rng: StdRng) -> Self {
        Self {
            waypoints: settings.points(),
            min_spawn_spacing: settings.min_spawn_spacing,
            min_distance_from_shark: settings.min_distance_from_shark,
            spawn_yaw: settings.spawn_yaw,
            tracked: Vec::new(),
            rng,
            stats: SpawnerStats::default(),
        }
    }

    /// Acquire one fish of `category` at `pose` and start tracking it
    pub fn on_spawn_requested(
        &mut self,
        pool: &mut FishPool,
        scene: &mut SceneWorld,
        category: SmallFishType,
        pose: Pose,
    ) -> Option<EntityId> {
        let Some(handle) = pool.acquire(scene, category, pose) else {
            log::debug!("No {category} left in pool, skipping spawn");
            self.stats.exhausted += 1;
            return None;
        };
        self.tracked.push(TrackedFish { handle, category, consumed: false });
        self.stats.spawned += 1;
        Some(handle)
    }

    /// Run one spawn pass over every waypoint
    ///
    /// A waypoint is used when it is farther than the shark distance from
    /// `shark` and no tracked fish sits within the spacing distance of it.
    pub fn spawn_tick(
        &mut self,
        pool: &mut FishPool,
        scene: &mut SceneWorld,
        shark: Vec3,
    ) -> Vec<(EntityId, SmallFishType)> {
        let mut categories: Vec<SmallFishType> = pool.categories().copied().collect();
        if categories.is_empty() {
            return Vec::new();
        }
        categories.sort_unstable();

        let mut spawned = Vec::new();
        for index in 0..self.waypoints.len() {
            let point = self.waypoints[index];
            if (point - shark).magnitude() <= self.min_distance_from_shark || self.is_occupied(scene, point) {
                continue;
            }
            let Some(&category) = categories.choose(&mut self.rng) else {
                break;
            };
            let pose = Pose::from_position_yaw(point, self.spawn_yaw);
            if let Some(handle) = self.on_spawn_requested(pool, scene, category, pose) {
                spawned.push((handle, category));
            }
        }
        spawned
    }

    fn is_occupied(&self, scene: &SceneWorld, point: Vec3) -> bool {
        self.tracked.iter().any(|fish| {
            scene
                .pose(fish.handle)
                .is_some_and(|pose| (pose.position - point).magnitude() < self.min_spawn_spacing)
        })
    }

    /// Mark a tracked fish as eaten; returns its category
    ///
    /// A fish can be eaten once. Untracked handles and fish already eaten
    /// give `None`.
    pub fn begin_consume(&mut self, handle: EntityId) -> Option<SmallFishType> {
        let fish = self.tracked.iter_mut().find(|fish| fish.handle == handle && !fish.consumed)?;
        fish.consumed = true;
        Some(fish.category)
    }

    /// Stop tracking a fish and release it to the pool
    ///
    /// Returns `None` when the handle is not tracked, e.g. because the level
    /// ended before a delayed release came due.
    pub fn on_entity_consumed(
        &mut self,
        pool: &mut FishPool,
        scene: &mut SceneWorld,
        handle: EntityId,
    ) -> Option<ReleaseOutcome> {
        let index = self.tracked.iter().position(|fish| fish.handle == handle)?;
        let fish = self.tracked.swap_remove(index);
        let outcome = pool.release(scene, fish.handle, fish.category);
        if outcome == ReleaseOutcome::Returned {
            self.stats.released += 1;
        }
        Some(outcome)
    }

    /// Release every tracked fish, eaten or not; returns how many were returned
    pub fn clear_active(&mut self, pool: &mut FishPool, scene: &mut SceneWorld) -> usize {
        let mut returned = 0;
        for fish in self.tracked.drain(..) {
            if pool.release(scene, fish.handle, fish.category) == ReleaseOutcome::Returned {
                returned += 1;
            }
        }
        self.stats.released += returned as u64;
        log::debug!("Released {returned} active fish");
        returned
    }

    /// Fish in play that have not been eaten
    pub fn active_fish(&self) -> impl Iterator<Item = (EntityId, SmallFishType)> + '_ {
        self.tracked
            .iter()
            .filter(|fish| !fish.consumed)
            .map(|fish| (fish.handle, fish.category))
    }

    /// Number of tracked fish, including eaten ones awaiting release
    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    /// Closest uneaten fish to `from` and its distance
    pub fn nearest_fish(&self, scene: &SceneWorld, from: Vec3) -> Option<(EntityId, f32)> {
        self.active_fish()
            .filter_map(|(handle, _)| {
                scene
                    .pose(handle)
                    .map(|pose| (handle, (pose.position - from).magnitude()))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Spawn points
    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    /// Get spawner statistics
    pub fn stats(&self) -> &SpawnerStats {
        &self.stats
    }
}
