//! Open-addressing hash map with linear probing and Robin Hood displacement.

use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::mem;

use crate::capacity;
use crate::hash::{Djb2, HashStrategy};

/// An occupied slot: a key/value pair plus the number of slots it sits past
/// its hash-derived ideal index.
#[derive(Debug, Clone)]
struct Bucket<K, V> {
    /// The key in the key-value pair.
    key: K,
    /// The value associated with the key.
    value: V,
    /// Slots travelled past the ideal index `hash(key) % capacity`.
    probe_distance: usize,
}

/// Error returned when constructing a map from rows that are not
/// exactly-two-element key/value pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidArgument;

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("rows must be exactly-two-element key/value pairs")
    }
}

impl std::error::Error for InvalidArgument {}

/// A hash map over byte-sequence keys using open addressing with linear
/// probing and Robin Hood displacement.
///
/// On an insertion collision, the entry that has travelled farther from its
/// ideal index keeps its slot and the other one is displaced forward, which
/// keeps the variance of probe distances low and allows lookups to stop
/// early. Deletion re-inserts the remainder of the probe run, so the table
/// never holds tombstones.
///
/// Keys compare by their byte representation (`AsRef<[u8]>`). The bucket
/// array length is always one of a fixed ascending list of primes and only
/// ever grows; growth is capped at the largest tabulated prime. The array is
/// allocated lazily: a freshly created map owns no buckets until the first
/// `put` or an explicit [`prepare`](Self::prepare) call.
///
/// The hash strategy is a type parameter, [`Djb2`] by default; see
/// [`HashStrategy`] for the alternatives.
///
/// Note: this implementation is not thread-safe. Concurrent use requires
/// external mutual exclusion over the whole map.
#[derive(Debug, Clone)]
pub struct RobinHoodMap<K, V, H = Djb2> {
    /// The buckets storing the key-value pairs; `None` marks an empty slot.
    buckets: Vec<Option<Bucket<K, V>>>,
    /// Current number of occupied buckets.
    size: usize,
    /// One-shot initialization flag; set by the first capacity estimate.
    prepared: bool,
    /// Marker tying the map to its hash strategy.
    strategy: PhantomData<H>,
}

impl<K, V, H> Default for RobinHoodMap<K, V, H>
where
    K: AsRef<[u8]>,
    H: HashStrategy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> Extend<(K, V)> for RobinHoodMap<K, V, H>
where
    K: AsRef<[u8]>,
    H: HashStrategy,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V, H> FromIterator<(K, V)> for RobinHoodMap<K, V, H>
where
    K: AsRef<[u8]>,
    H: HashStrategy,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

impl<K, V, H> RobinHoodMap<K, V, H>
where
    K: AsRef<[u8]>,
    H: HashStrategy,
{
    /// Creates an empty, unprepared map. No buckets are allocated until the
    /// first insertion or an explicit [`prepare`](Self::prepare).
    #[must_use]
    pub fn new() -> Self {
        Self { buckets: Vec::new(), size: 0, prepared: false, strategy: PhantomData }
    }

    /// Builds a map from key/value pairs, sizing the bucket array for the
    /// distinct keys up front. Later duplicates overwrite earlier ones, the
    /// same as repeated [`put`](Self::put) calls.
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs: Vec<(K, V)> = pairs.into_iter().collect();
        let mut map = Self::new();
        {
            let keys: Vec<&K> = pairs.iter().map(|(key, _)| key).collect();
            map.prepare(&keys);
        }
        for (key, value) in pairs {
            map.put(key, value);
        }
        map
    }

    /// Sizes and allocates the bucket array for an expected set of keys.
    ///
    /// The capacity becomes the smallest tabulated prime at or above
    /// `ceil(distinct_keys / 0.75)`, clamped to the table maximum. A no-op
    /// once the map is prepared, so only the first call ever takes effect.
    pub fn prepare<Q>(&mut self, keys: &[Q])
    where
        Q: AsRef<[u8]>,
    {
        if self.prepared {
            return;
        }
        let distinct: HashSet<&[u8]> = keys.iter().map(|key| key.as_ref()).collect();
        let bucket_count =
            capacity::prime_capacity_for(capacity::ideal_capacity(distinct.len()));
        self.buckets.resize_with(bucket_count, || None);
        self.prepared = true;
    }

    /// Inserts or overwrites the value for `key`.
    ///
    /// An unprepared map sizes itself for a single key first. When the 0.75
    /// load factor would be reached, the table grows before the entry is
    /// placed, so the probe loop always has an empty bucket to terminate on.
    pub fn put(&mut self, key: K, value: V) {
        if !self.prepared {
            self.prepare(std::slice::from_ref(&key));
        }
        if capacity::reaches_load_limit(self.size, self.buckets.len()) {
            self.resize();
        }

        let bucket_count = self.buckets.len();
        let mut index = ideal_index::<H>(key.as_ref(), bucket_count);
        let mut incoming = Bucket { key, value, probe_distance: 0 };

        loop {
            // index < bucket_count, so the slot is always there.
            let Some(slot) = self.buckets.get_mut(index) else {
                return;
            };
            match slot {
                None => {
                    *slot = Some(incoming);
                    self.size = self.size.saturating_add(1);
                    return;
                }
                Some(resident) if resident.key.as_ref() == incoming.key.as_ref() => {
                    resident.value = incoming.value;
                    return;
                }
                Some(resident) if resident.probe_distance < incoming.probe_distance => {
                    // Robin Hood step: the richer entry surrenders its slot
                    // and continues probing as the traveling entry.
                    mem::swap(resident, &mut incoming);
                }
                Some(_) => {}
            }
            index = wrap_forward(index, bucket_count);
            incoming.probe_distance = incoming.probe_distance.saturating_add(1);
        }
    }

    /// Returns a reference to the value for `key`, if present.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let index = self.find_index(key.as_ref())?;
        match self.buckets.get(index) {
            Some(Some(bucket)) => Some(&bucket.value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value for `key`, if present.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let index = self.find_index(key.as_ref())?;
        match self.buckets.get_mut(index) {
            Some(Some(bucket)) => Some(&mut bucket.value),
            _ => None,
        }
    }

    /// Removes `key`, returning the stored value. A no-op returning `None`
    /// when the key is absent or the map is unprepared.
    ///
    /// After the bucket is vacated, every entry in the rest of the contiguous
    /// run is re-inserted, which restores each one to its minimal probe
    /// distance (the backward-shift invariant).
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let index = self.find_index(key.as_ref())?;
        let removed = self.buckets.get_mut(index)?.take()?;
        self.size = self.size.saturating_sub(1);
        self.reinsert_run(wrap_forward(index, self.buckets.len()));
        Some(removed.value)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the bucket-array length; zero while the map is unprepared.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the ratio of occupied buckets to capacity.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        if self.buckets.is_empty() {
            return 0.0;
        }
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns an iterator over the entries in bucket order. The order is
    /// unspecified and changes across resizes.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { buckets: &self.buckets, index: 0 }
    }

    /// Walks the probe sequence for `key` and returns the physical index of
    /// its bucket. Stops at the first empty slot, or as soon as a resident's
    /// probe distance drops below the steps taken so far: the Robin Hood
    /// ordering guarantees no match can exist past that point.
    fn find_index(&self, key: &[u8]) -> Option<usize> {
        if !self.prepared {
            return None;
        }
        let bucket_count = self.buckets.len();
        let mut index = ideal_index::<H>(key, bucket_count);
        let mut probe_distance = 0_usize;
        loop {
            let bucket = self.buckets.get(index)?.as_ref()?;
            if bucket.key.as_ref() == key {
                return Some(index);
            }
            if bucket.probe_distance < probe_distance {
                return None;
            }
            index = wrap_forward(index, bucket_count);
            probe_distance = probe_distance.saturating_add(1);
        }
    }

    /// Vacates and re-inserts every occupied bucket in the contiguous run
    /// starting at `index`, terminating at the first empty slot.
    fn reinsert_run(&mut self, mut index: usize) {
        let bucket_count = self.buckets.len();
        while let Some(slot) = self.buckets.get_mut(index) {
            let Some(bucket) = slot.take() else {
                return;
            };
            self.size = self.size.saturating_sub(1);
            self.put(bucket.key, bucket.value);
            index = wrap_forward(index, bucket_count);
        }
    }

    /// Grows the bucket array to the next tabulated prime at or above twice
    /// the current capacity (clamped to the maximum) and re-inserts every
    /// entry, recomputing all probe distances from scratch.
    fn resize(&mut self) {
        let next_capacity =
            capacity::prime_capacity_for(self.buckets.len().saturating_mul(2));
        let mut occupied = Vec::with_capacity(self.size);
        for slot in &mut self.buckets {
            if let Some(bucket) = slot.take() {
                occupied.push((bucket.key, bucket.value));
            }
        }
        self.buckets.clear();
        self.buckets.resize_with(next_capacity, || None);
        self.size = 0;
        for (key, value) in occupied {
            self.put(key, value);
        }
    }
}

impl<T, H> RobinHoodMap<T, T, H>
where
    T: AsRef<[u8]> + Clone,
    H: HashStrategy,
{
    /// Builds a map from dynamically-shaped rows, validating that each row is
    /// an exactly-two-element `[key, value]` pair.
    ///
    /// This is the checked counterpart of [`from_pairs`](Self::from_pairs)
    /// for input whose shape is not enforced by the type system, which is the
    /// only place the arity of a pair can be wrong.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`] if any row does not hold exactly two
    /// elements.
    pub fn try_from_rows<S>(rows: &[S]) -> Result<Self, InvalidArgument>
    where
        S: AsRef<[T]>,
    {
        let mut pairs = Vec::with_capacity(rows.len());
        for row in rows {
            match row.as_ref() {
                [key, value] => pairs.push((key.clone(), value.clone())),
                _ => return Err(InvalidArgument),
            }
        }
        Ok(Self::from_pairs(pairs))
    }
}

/// Ideal bucket index for `key` in a table of `bucket_count` slots.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
fn ideal_index<H: HashStrategy>(key: &[u8], bucket_count: usize) -> usize {
    if bucket_count == 0 {
        return 0;
    }
    (H::hash(key) as usize) % bucket_count
}

/// Advances a probe index by one slot, wrapping at the end of the table.
#[allow(clippy::arithmetic_side_effects)]
fn wrap_forward(index: usize, bucket_count: usize) -> usize {
    if bucket_count == 0 {
        return 0;
    }
    index.saturating_add(1) % bucket_count
}

/// Iterator over the entries of a [`RobinHoodMap`] in bucket order.
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// The bucket array being walked.
    buckets: &'a [Option<Bucket<K, V>>],
    /// Current position in the walk.
    index: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.buckets.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Some(bucket) = slot {
                return Some((&bucket.key, &bucket.value));
            }
        }
        None
    }
}
