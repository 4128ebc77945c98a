//! Pool errors

use std::fmt::Debug;

/// Errors raised while provisioning a pool
///
/// Running out of entities is not an error; `acquire` reports it with `None`.
#[derive(thiserror::Error, Debug)]
pub enum PoolError<E>
where
    E: std::error::Error + 'static,
{
    /// The entity factory could not instantiate a category's prototype
    #[error("Unresolved prototype for category {category}: {source}")]
    UnresolvedPrototype {
        /// Debug rendering of the category being provisioned
        category: String,
        /// The factory error, unchanged
        #[source]
        source: E,
    },
}

impl<E> PoolError<E>
where
    E: std::error::Error + 'static,
{
    pub(crate) fn unresolved(category: &impl Debug, source: E) -> Self {
        Self::UnresolvedPrototype {
            category: format!("{category:?}"),
            source,
        }
    }

    /// Get the factory error that caused this failure
    pub fn into_source(self) -> E {
        match self {
            Self::UnresolvedPrototype { source, .. } => source,
        }
    }
}
