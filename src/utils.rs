//! Utility extensions for [`RobinHoodMap`].

use crate::RobinHoodMap;
use crate::hash::HashStrategy;

/// Convenience queries derivable from the core map operations.
pub trait MapExtensions<K, V> {
    /// Returns the keys of the map as a `Vec`, in unspecified order.
    fn keys(&self) -> Vec<K>;

    /// Returns the values of the map as a `Vec`, in unspecified order.
    fn values(&self) -> Vec<V>;

    /// Returns `true` if the map contains the given key.
    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized;
}

impl<K, V, H> MapExtensions<K, V> for RobinHoodMap<K, V, H>
where
    K: AsRef<[u8]> + Clone,
    V: Clone,
    H: HashStrategy,
{
    fn keys(&self) -> Vec<K> {
        self.iter().map(|(key, _)| key.clone()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, value)| value.clone()).collect()
    }

    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.get(key).is_some()
    }
}
