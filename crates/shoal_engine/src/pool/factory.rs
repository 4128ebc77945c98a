//! Entity factory seam between the pool and the host scene

use crate::foundation::math::Pose;
use std::fmt::Debug;
use std::hash::Hash;

/// Creates and mutates the concrete entities a pool recycles
///
/// The pool never inspects prototypes or entities; it only stores handles
/// and routes activation and placement through this trait.
pub trait EntityFactory {
    /// Template entities are instantiated from
    type Prototype;

    /// Opaque reference to one entity instance
    type Handle: Copy + Eq + Hash + Debug;

    /// Failure to instantiate a prototype
    type Error: std::error::Error + 'static;

    /// Instantiate a new, inactive entity from `prototype`
    fn create(&mut self, prototype: &Self::Prototype) -> Result<Self::Handle, Self::Error>;

    /// Toggle whether the entity takes part in the scene
    fn set_active(&mut self, handle: Self::Handle, active: bool);

    /// Place the entity in the world
    fn set_pose(&mut self, handle: Self::Handle, pose: Pose);

    /// Destroy an entity the pool created but will never hand out
    ///
    /// Only called when a `configure` call fails part way through.
    fn discard(&mut self, _handle: Self::Handle) {}
}
