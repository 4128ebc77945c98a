//! Pool configuration rows and capacity planning
//!
//! A category's capacity is the level's base quantity plus a buffer of
//! slack, both supplied by level data. The result is fixed for the level.

use std::hash::Hash;

/// One row of pool configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEntry<K, P> {
    /// Category the entities belong to
    pub category: K,
    /// Number of entities to pre-allocate
    pub capacity: usize,
    /// Template the factory instantiates from; not itself pooled
    pub prototype: P,
}

impl<K, P> PoolEntry<K, P> {
    /// Create a new pool entry
    pub fn new(category: K, capacity: usize, prototype: P) -> Self {
        Self { category, capacity, prototype }
    }
}

/// Base quantity plus buffer slack for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapacityPlan {
    /// Quantity the level asks for
    pub quantity: usize,
    /// Extra entities so respawns never wait on a release
    pub buffer: usize,
}

impl CapacityPlan {
    /// Create a new capacity plan
    pub fn new(quantity: usize, buffer: usize) -> Self {
        Self { quantity, buffer }
    }

    /// Total entities to pre-allocate
    pub fn total(&self) -> usize {
        self.quantity.saturating_add(self.buffer)
    }
}

/// Turn a level's `(category, quantity)` rows into pool entries
///
/// Rows naming the same category are merged by summing their quantities;
/// the buffer is added once per category. Output keeps first-seen order.
pub fn plan_entries<K, P, I, F>(rows: I, buffer: usize, mut resolve: F) -> Vec<PoolEntry<K, P>>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, usize)>,
    F: FnMut(&K) -> P,
{
    let mut order: Vec<K> = Vec::new();
    let mut plans: std::collections::HashMap<K, CapacityPlan> = std::collections::HashMap::new();

    for (category, quantity) in rows {
        let plan = plans.entry(category.clone()).or_insert_with(|| {
            order.push(category.clone());
            CapacityPlan::new(0, buffer)
        });
        plan.quantity = plan.quantity.saturating_add(quantity);
    }

    order
        .into_iter()
        .map(|category| {
            let total = plans.get(&category).map_or(0, CapacityPlan::total);
            let prototype = resolve(&category);
            PoolEntry::new(category, total, prototype)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_adds_buffer() {
        assert_eq!(CapacityPlan::new(12, 3).total(), 15);
        assert_eq!(CapacityPlan::new(0, 0).total(), 0);
    }

    #[test]
    fn test_total_saturates() {
        assert_eq!(CapacityPlan::new(usize::MAX, 1).total(), usize::MAX);
    }

    #[test]
    fn test_plan_entries_merges_duplicates() {
        let rows = vec![("golden", 4), ("coral", 2), ("golden", 1)];
        let entries = plan_entries(rows, 2, |name| format!("{name}_prefab"));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], PoolEntry::new("golden", 7, "golden_prefab".to_string()));
        assert_eq!(entries[1], PoolEntry::new("coral", 4, "coral_prefab".to_string()));
    }

    #[test]
    fn test_plan_entries_empty_level() {
        let entries: Vec<PoolEntry<&str, ()>> = plan_entries(Vec::new(), 5, |_| ());
        assert!(entries.is_empty());
    }
}
