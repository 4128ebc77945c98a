//! Category-keyed object pool
//!
//! Each category owns a FIFO queue of inactive entity handles. `acquire`
//! pops from the front, activates and places the entity; `release`
//! deactivates it and pushes it to the back. Capacity is fixed when the
//! category is configured; an empty queue yields `None` instead of
//! allocating on demand.
//!
//! Per-entity lifecycle:
//!
//! ```text
//! Uninitialized ─configure─► Pooled ─acquire─► InUse ─release─► Pooled ...
//!                               │                 │
//!                               └──── clear ──────┴──► Discarded
//! ```

use super::capacity::PoolEntry;
use super::error::PoolError;
use super::factory::EntityFactory;
use crate::foundation::math::Pose;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

/// Result of returning a handle to the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Handle deactivated and queued for reuse
    Returned,
    /// Handle was not checked out (double release or never acquired); ignored
    NotCheckedOut,
    /// Category is not tracked by the pool; ignored
    UnknownCategory,
}

/// What `clear` dropped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Categories that were tracked
    pub categories: usize,
    /// Inactive handles dropped from the queues
    pub discarded: usize,
    /// Handles still checked out; ownership stays with the caller
    pub outstanding: usize,
}

/// Statistics for pool usage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Entities instantiated by `configure`
    pub total_created: u64,
    /// Successful acquires
    pub total_acquired: u64,
    /// Successful releases
    pub total_released: u64,
    /// Acquires that returned `None` (exhausted or unknown category)
    pub rejected_acquires: u64,
    /// Releases ignored because the handle was not checked out
    pub ignored_releases: u64,
    /// Maximum number of handles checked out simultaneously
    pub peak_in_use: usize,
}

/// Fixed-capacity, category-keyed pool of entity handles
///
/// The pool owns the category→queue mapping exclusively; callers only ever
/// hold handles. All operations are synchronous and never block.
#[derive(Debug)]
pub struct TypedObjectPool<K, H> {
    /// Inactive handles per category, reused front to back
    queues: HashMap<K, VecDeque<H>>,
    /// Configured capacity per category
    capacities: HashMap<K, usize>,
    /// Checked-out counts per category, as reported by callers
    in_use: HashMap<K, usize>,
    /// Every handle currently checked out
    checked_out: HashSet<H>,
    stats: PoolStats,
}

impl<K, H> Default for TypedObjectPool<K, H>
where
    K: Eq + Hash + Clone + Debug,
    H: Copy + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, H> TypedObjectPool<K, H>
where
    K: Eq + Hash + Clone + Debug,
    H: Copy + Eq + Hash + Debug,
{
    /// Create an empty pool
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
            capacities: HashMap::new(),
            in_use: HashMap::new(),
            checked_out: HashSet::new(),
            stats: PoolStats::default(),
        }
    }

    /// Pre-allocate entities for every entry whose category is not yet tracked
    ///
    /// Entries for tracked categories are skipped, so repeated calls
    /// accumulate rather than replace; call [`clear`](Self::clear) first for
    /// a fresh pool. If the factory fails, the error is returned and no
    /// category from this call is tracked; entities it already created are
    /// handed back through [`EntityFactory::discard`].
    pub fn configure<F, I>(&mut self, factory: &mut F, entries: I) -> Result<(), PoolError<F::Error>>
    where
        F: EntityFactory<Handle = H>,
        I: IntoIterator<Item = PoolEntry<K, F::Prototype>>,
    {
        let mut staged: Vec<(K, VecDeque<H>)> = Vec::new();

        for entry in entries {
            let already_tracked = self.queues.contains_key(&entry.category)
                || staged.iter().any(|(category, _)| *category == entry.category);
            if already_tracked {
                log::debug!("Pool already tracks {:?}, skipping entry", entry.category);
                continue;
            }

            let mut queue = VecDeque::with_capacity(entry.capacity);
            for _ in 0..entry.capacity {
                match factory.create(&entry.prototype) {
                    Ok(handle) => {
                        factory.set_active(handle, false);
                        queue.push_back(handle);
                    }
                    Err(err) => {
                        let created = staged.iter().flat_map(|(_, q)| q.iter()).chain(queue.iter());
                        for handle in created {
                            factory.discard(*handle);
                        }
                        log::error!("Failed to instantiate prototype for {:?}: {}", entry.category, err);
                        return Err(PoolError::unresolved(&entry.category, err));
                    }
                }
            }

            staged.push((entry.category, queue));
        }

        for (category, queue) in staged {
            log::info!("Pooled {} entities for {:?}", queue.len(), category);
            self.stats.total_created += queue.len() as u64;
            self.capacities.insert(category.clone(), queue.len());
            self.in_use.insert(category.clone(), 0);
            self.queues.insert(category, queue);
        }

        Ok(())
    }

    /// Check out one entity of `category`, activated and placed at `pose`
    ///
    /// Returns `None` when the category is unknown or its queue is empty;
    /// both are expected under load and the caller should skip the spawn.
    pub fn acquire<F>(&mut self, factory: &mut F, category: K, pose: Pose) -> Option<H>
    where
        F: EntityFactory<Handle = H>,
    {
        let Some(handle) = self.queues.get_mut(&category).and_then(VecDeque::pop_front) else {
            self.stats.rejected_acquires += 1;
            log::trace!("No pooled entity available for {:?}", category);
            return None;
        };

        factory.set_active(handle, true);
        factory.set_pose(handle, pose);

        self.checked_out.insert(handle);
        *self.in_use.entry(category.clone()).or_insert(0) += 1;
        self.stats.total_acquired += 1;
        self.stats.peak_in_use = self.stats.peak_in_use.max(self.checked_out.len());

        log::debug!("Acquired {:?} from {:?}", handle, category);
        Some(handle)
    }

    /// Deactivate `handle` and queue it under `category` for reuse
    ///
    /// The category is trusted, not checked against where the handle came
    /// from. Releasing a handle that is not checked out is ignored so the
    /// queue never holds duplicates.
    pub fn release<F>(&mut self, factory: &mut F, handle: H, category: K) -> ReleaseOutcome
    where
        F: EntityFactory<Handle = H>,
    {
        let Some(queue) = self.queues.get_mut(&category) else {
            log::warn!("Release of {:?} into untracked category {:?} ignored", handle, category);
            return ReleaseOutcome::UnknownCategory;
        };

        if !self.checked_out.remove(&handle) {
            log::warn!("Release of {:?} ignored: not checked out", handle);
            self.stats.ignored_releases += 1;
            return ReleaseOutcome::NotCheckedOut;
        }

        factory.set_active(handle, false);
        queue.push_back(handle);

        if let Some(count) = self.in_use.get_mut(&category) {
            *count = count.saturating_sub(1);
        }
        self.stats.total_released += 1;

        log::debug!("Released {:?} back to {:?}", handle, category);
        ReleaseOutcome::Returned
    }

    /// Drop every queue and forget all checked-out handles
    ///
    /// Entities are not destroyed and their activation state is left as is.
    /// Handles still checked out are reported; releasing them afterwards is
    /// ignored, so callers should release before clearing.
    pub fn clear(&mut self) -> ClearReport {
        let report = ClearReport {
            categories: self.queues.len(),
            discarded: self.queues.values().map(VecDeque::len).sum(),
            outstanding: self.checked_out.len(),
        };

        if report.outstanding > 0 {
            log::warn!(
                "Clearing pool with {} entities still checked out; caller keeps ownership",
                report.outstanding
            );
        }

        self.queues.clear();
        self.capacities.clear();
        self.in_use.clear();
        self.checked_out.clear();

        log::info!("Cleared pool: {} categories, {} pooled entities", report.categories, report.discarded);
        report
    }

    /// Whether `category` has been configured since the last clear
    pub fn is_tracked(&self, category: &K) -> bool {
        self.queues.contains_key(category)
    }

    /// Number of inactive entities ready to hand out
    pub fn available(&self, category: &K) -> usize {
        self.queues.get(category).map_or(0, VecDeque::len)
    }

    /// Configured capacity of a category
    pub fn capacity(&self, category: &K) -> usize {
        self.capacities.get(category).copied().unwrap_or(0)
    }

    /// Number of entities checked out under a category
    pub fn in_use(&self, category: &K) -> usize {
        self.in_use.get(category).copied().unwrap_or(0)
    }

    /// Total handles checked out across all categories
    pub fn outstanding(&self) -> usize {
        self.checked_out.len()
    }

    /// Whether a handle is currently checked out
    pub fn is_checked_out(&self, handle: H) -> bool {
        self.checked_out.contains(&handle)
    }

    /// Tracked categories, in no particular order
    pub fn categories(&self) -> impl Iterator<Item = &K> {
        self.queues.keys()
    }

    /// Get pool statistics
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }
}
