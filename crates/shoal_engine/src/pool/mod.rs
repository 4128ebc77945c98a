//! Typed object pooling
//!
//! Category-keyed recycling of pre-allocated entities. A level declares how
//! many entities of each category it needs; the pool instantiates them all
//! up front through an [`EntityFactory`], hands them out on [`acquire`] and
//! takes them back on [`release`]. Nothing is allocated during play.
//!
//! ```text
//! LevelConfigProvider ──► PoolEntry rows ──► TypedObjectPool::configure
//!                                                    │
//!          Spawner ◄──── acquire / release ──────────┤
//!                                                    │
//!                                   EntityFactory (create/activate/pose)
//! ```
//!
//! [`acquire`]: TypedObjectPool::acquire
//! [`release`]: TypedObjectPool::release

pub mod capacity;
pub mod error;
pub mod factory;
pub mod typed_pool;

pub use capacity::{plan_entries, CapacityPlan, PoolEntry};
pub use error::PoolError;
pub use factory::EntityFactory;
pub use typed_pool::{ClearReport, PoolStats, ReleaseOutcome, TypedObjectPool};
