//! # Robin Hood Hash Map
//!
//! A hash map over byte-sequence keys built on open addressing, linear
//! probing and Robin Hood displacement: on a collision, the entry that has
//! travelled farther from its hash-derived ideal slot keeps its position and
//! the other is displaced forward. Keeping probe-distance variance low lets
//! lookups stop as soon as the distance ordering rules out a match, and
//! deletion re-inserts the rest of the probe run instead of leaving
//! tombstones.
//!
//! Capacities are drawn from a fixed ascending table of primes (53 up to a
//! hard ceiling of 131071) and the table grows before the 0.75 load factor
//! is reached. The hash function is a pluggable strategy: [`Djb2`] (the
//! classic multiplicative string hash, the default) or [`Murmur3`] (32-bit
//! `MurmurHash3`), both producing non-negative 31-bit values.
//!
//! ## Basic Usage
//!
//! ```rust
//! use robinhood::RobinHoodMap;
//!
//! let mut map: RobinHoodMap<String, i32> = RobinHoodMap::new();
//!
//! // Insert values
//! map.put("apple".to_string(), 1);
//! map.put("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple".to_string(), 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! map.delete("apple");
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Building from pairs
//!
//! ```rust
//! use robinhood::RobinHoodMap;
//!
//! let map: RobinHoodMap<&str, i32> = RobinHoodMap::from_pairs([
//!     ("apple", 10),
//!     ("banana", 20),
//!     ("orange", 30),
//! ]);
//!
//! assert_eq!(map.get("banana"), Some(&20));
//! assert_eq!(map.len(), 3);
//! ```
//!
//! ## Choosing a hash strategy
//!
//! ```rust
//! use robinhood::{Murmur3, RobinHoodMap};
//!
//! let mut map: RobinHoodMap<&str, u32, Murmur3> = RobinHoodMap::new();
//! map.put("melon", 50);
//! assert_eq!(map.get("melon"), Some(&50));
//! ```

/// Module holding the capacity prime table and load-factor arithmetic.
mod capacity;
/// Module implementing the pluggable hash strategies.
mod hash;
/// Module implementing the Robin Hood table itself.
mod robinhood_map;
/// Utility extensions layered on top of the map.
mod utils;

pub use hash::{Djb2, HashStrategy, Murmur3};
pub use robinhood_map::{InvalidArgument, Iter, RobinHoodMap};
pub use utils::MapExtensions;
