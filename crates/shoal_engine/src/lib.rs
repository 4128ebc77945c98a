//! # Shoal Engine
//!
//! Engine-side building blocks for arcade games that spawn many short-lived
//! entities of a handful of kinds.
//!
//! ## Features
//!
//! - **Typed Object Pool**: Category-keyed recycling of pre-allocated entities
//! - **Capacity Planning**: Per-level quantity plus buffer slack
//! - **Task Scheduling**: Explicit timed tasks advanced by the frame loop
//! - **Game Events**: Queued delivery through a handler chain
//! - **Configuration**: TOML, RON and JSON config files through serde
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shoal_engine::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind { Minnow }
//!
//! struct Spawns;
//!
//! impl EntityFactory for Spawns {
//!     type Prototype = u32;
//!     type Handle = u32;
//!     type Error = std::convert::Infallible;
//!
//!     fn create(&mut self, prototype: &u32) -> Result<u32, Self::Error> { Ok(*prototype) }
//!     fn set_active(&mut self, _handle: u32, _active: bool) {}
//!     fn set_pose(&mut self, _handle: u32, _pose: Pose) {}
//! }
//!
//! let mut pool = TypedObjectPool::new();
//! let mut factory = Spawns;
//! pool.configure(&mut factory, [PoolEntry::new(Kind::Minnow, 4, 7)]).unwrap();
//! let handle = pool.acquire(&mut factory, Kind::Minnow, Pose::identity());
//! assert!(handle.is_some());
//! ```

pub mod foundation;
pub mod config;
pub mod pool;
pub mod schedule;
pub mod events;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        events::{EventHandler, EventSystem},
        foundation::{
            math::{Pose, Quat, Vec3},
            time::FrameClock,
        },
        pool::{
            CapacityPlan, ClearReport, EntityFactory, PoolEntry, PoolError, PoolStats,
            ReleaseOutcome, TypedObjectPool,
        },
        schedule::{TaskId, TaskScheduler},
    };
}
