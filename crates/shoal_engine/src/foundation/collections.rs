//! Specialized collection types

pub use slotmap::{new_key_type, DefaultKey, Key, SlotMap};

/// Handle-based map using slot map for stable, generation-checked references
pub type HandleMap<K, T> = SlotMap<K, T>;

new_key_type! {
    /// Generic entity handle for users that do not declare their own key type
    pub struct EntityKey;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_handle_is_rejected() {
        let mut map: HandleMap<EntityKey, &str> = HandleMap::with_key();
        let first = map.insert("minnow");
        map.remove(first);
        let second = map.insert("guppy");

        assert!(map.get(first).is_none());
        assert_eq!(map.get(second), Some(&"guppy"));
        assert_ne!(first, second);
    }
}
