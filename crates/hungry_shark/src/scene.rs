//! In-memory scene world
//!
//! Stands in for the engine's scene graph: prototypes are registered by name,
//! entities are instantiated from them and carry an active flag and a pose.
//! The world is the pool's [`EntityFactory`].

use shoal_engine::foundation::collections::{new_key_type, HandleMap};
use shoal_engine::foundation::math::Pose;
use shoal_engine::pool::EntityFactory;

new_key_type! {
    /// Handle to an entity in the scene
    pub struct EntityId;

    /// Handle to a registered prototype
    pub struct PrototypeId;
}

/// Scene errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Instantiation from a prototype that is not registered
    #[error("Unknown prototype {0:?}")]
    UnknownPrototype(PrototypeId),
}

/// Registered prototype
#[derive(Debug, Clone)]
pub struct Prototype {
    /// Asset name
    pub name: String,
}

/// Instantiated entity
#[derive(Debug, Clone)]
pub struct SceneEntity {
    /// Prototype the entity was created from
    pub prototype: PrototypeId,
    /// Whether the entity takes part in the simulation
    pub active: bool,
    /// World pose
    pub pose: Pose,
}

/// Entities and the prototypes they are instantiated from
#[derive(Debug, Default)]
pub struct SceneWorld {
    prototypes: HandleMap<PrototypeId, Prototype>,
    entities: HandleMap<EntityId, SceneEntity>,
}

impl SceneWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prototype under an asset name
    pub fn register_prototype(&mut self, name: impl Into<String>) -> PrototypeId {
        let name = name.into();
        log::debug!("Registered prototype {name}");
        self.prototypes.insert(Prototype { name })
    }

    /// Unregister a prototype; existing instances are kept
    pub fn remove_prototype(&mut self, id: PrototypeId) -> Option<Prototype> {
        self.prototypes.remove(id)
    }

    /// Prototype by id
    pub fn prototype(&self, id: PrototypeId) -> Option<&Prototype> {
        self.prototypes.get(id)
    }

    /// Entity by id
    pub fn get(&self, id: EntityId) -> Option<&SceneEntity> {
        self.entities.get(id)
    }

    /// Whether an entity exists and is active
    pub fn is_active(&self, id: EntityId) -> bool {
        self.entities.get(id).is_some_and(|entity| entity.active)
    }

    /// Pose of an entity
    pub fn pose(&self, id: EntityId) -> Option<Pose> {
        self.entities.get(id).map(|entity| entity.pose)
    }

    /// Number of active entities
    pub fn active_count(&self) -> usize {
        self.entities.values().filter(|entity| entity.active).count()
    }

    /// Number of entities, active or not
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// No entities at all
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Active entities with their ids
    pub fn active_entities(&self) -> impl Iterator<Item = (EntityId, &SceneEntity)> {
        self.entities.iter().filter(|(_, entity)| entity.active)
    }

    /// Destroy every inactive entity, returning how many went
    pub fn despawn_inactive(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|_, entity| entity.active);
        before - self.entities.len()
    }

    /// Destroy every entity
    pub fn despawn_all(&mut self) -> usize {
        let count = self.entities.len();
        self.entities.clear();
        count
    }
}

impl EntityFactory for SceneWorld {
    type Prototype = PrototypeId;
    type Handle = EntityId;
    type Error = SceneError;

    fn create(&mut self, prototype: &PrototypeId) -> Result<EntityId, SceneError> {
        if !self.prototypes.contains_key(*prototype) {
            return Err(SceneError::UnknownPrototype(*prototype));
        }
        Ok(self.entities.insert(SceneEntity {
            prototype: *prototype,
            active: false,
            pose: Pose::identity(),
        }))
    }

    fn set_active(&mut self, handle: EntityId, active: bool) {
        if let Some(entity) = self.entities.get_mut(handle) {
            entity.active = active;
        }
    }

    fn set_pose(&mut self, handle: EntityId, pose: Pose) {
        if let Some(entity) = self.entities.get_mut(handle) {
            entity.pose = pose;
        }
    }

    fn discard(&mut self, handle: EntityId) {
        self.entities.remove(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoal_engine::foundation::math::Vec3;

    #[test]
    fn test_create_starts_inactive() {
        let mut scene = SceneWorld::new();
        let prefab = scene.register_prototype("GoldenSmallFish");
        let id = scene.create(&prefab).unwrap();

        assert!(!scene.is_active(id));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.active_count(), 0);
        assert_eq!(scene.get(id).map(|entity| entity.prototype), Some(prefab));
        assert_eq!(scene.prototype(prefab).map(|p| p.name.as_str()), Some("GoldenSmallFish"));
    }

    #[test]
    fn test_unknown_prototype() {
        let mut scene = SceneWorld::new();
        let prefab = scene.register_prototype("CoralBeauty");
        scene.remove_prototype(prefab);

        assert_eq!(scene.create(&prefab), Err(SceneError::UnknownPrototype(prefab)));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_activate_and_pose() {
        let mut scene = SceneWorld::new();
        let prefab = scene.register_prototype("CoralBeauty");
        let id = scene.create(&prefab).unwrap();
        let pose = Pose::from_position(Vec3::new(1.0, 2.0, 3.0));

        scene.set_active(id, true);
        scene.set_pose(id, pose);

        assert!(scene.is_active(id));
        assert_eq!(scene.pose(id), Some(pose));
        assert_eq!(scene.active_entities().count(), 1);
    }

    #[test]
    fn test_despawn_inactive_keeps_active() {
        let mut scene = SceneWorld::new();
        let prefab = scene.register_prototype("CoralBeauty");
        let kept = scene.create(&prefab).unwrap();
        scene.create(&prefab).unwrap();
        scene.create(&prefab).unwrap();
        scene.set_active(kept, true);

        assert_eq!(scene.despawn_inactive(), 2);
        assert_eq!(scene.len(), 1);
        assert!(scene.is_active(kept));
        assert_eq!(scene.despawn_all(), 1);
        assert!(scene.get(kept).is_none());
    }

    #[test]
    fn test_discard_removes_entity() {
        let mut scene = SceneWorld::new();
        let prefab = scene.register_prototype("CoralBeauty");
        let id = scene.create(&prefab).unwrap();
        scene.discard(id);

        assert!(scene.get(id).is_none());
        scene.set_active(id, true);
        assert_eq!(scene.active_count(), 0);
    }
}
