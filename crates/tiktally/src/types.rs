//! # Common Types and Traits
use core::{
    fmt::{Debug, Display},
    hash::Hash,
};

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};

use crate::errors::{TallyError, TallyResult};

/// A type that can be used as a token rank.
///
/// These are constrained to be unsigned primitive integers;
/// such that the max token in a vocabulary is less than `T::max()`.
pub trait TokenType:
    'static
    + PrimInt
    + FromPrimitive
    + ToPrimitive
    + Unsigned
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
{
}

impl<T> TokenType for T where
    T: 'static
        + PrimInt
        + FromPrimitive
        + ToPrimitive
        + Unsigned
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
{
}

/// Narrow a `u64` rank into `T`.
///
/// ## Returns
/// The rank, or [`TallyError::TokenOutOfRange`].
pub fn token_from_u64<T: TokenType>(value: u64) -> TallyResult<T> {
    T::from_u64(value).ok_or(TallyError::TokenOutOfRange)
}

/// Widen a `T` rank into a `u64`.
pub fn token_to_u64<T: TokenType>(token: T) -> TallyResult<u64> {
    token.to_u64().ok_or(TallyError::TokenOutOfRange)
}

/// Compile-time check that a value is [`Send`].
pub fn check_is_send<S: Send>(_: &S) {}

/// Compile-time check that a value is [`Sync`].
pub fn check_is_sync<S: Sync>(_: &S) {}

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type TTHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> TTHashMap<K, V> {
            TTHashMap::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> TTHashMap<K, V> {
            TTHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type TTHashSet<V> = ahash::AHashSet<V>;

    } else if #[cfg(feature = "foldhash")] {
        /// Type Alias for hash maps in this crate.
        pub type TTHashMap<K, V> = foldhash::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> TTHashMap<K, V> {
            foldhash::HashMapExt::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> TTHashMap<K, V> {
            foldhash::HashMapExt::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type TTHashSet<V> = foldhash::HashSet<V>;

    } else {
        /// Type Alias for hash maps in this crate.
        pub type TTHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> TTHashMap<K, V> {
            TTHashMap::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> TTHashMap<K, V> {
            TTHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type TTHashSet<V> = std::collections::HashSet<V>;
    }
}
