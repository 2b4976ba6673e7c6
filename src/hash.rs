#[cfg(all(
    feature = "rustc-hash",
    not(any(feature = "ahash", feature = "std-hash"))
))]
mod backend {
    pub type FastMap<K, V> = rustc_hash::FxHashMap<K, V>;
    pub type FastSet<K> = rustc_hash::FxHashSet<K>;
}

#[cfg(all(
    feature = "ahash",
    not(any(feature = "rustc-hash", feature = "std-hash"))
))]
mod backend {
    pub type FastMap<K, V> = ahash::AHashMap<K, V>;
    pub type FastSet<K> = ahash::AHashSet<K>;
}

#[cfg(any(
    all(
        not(feature = "rustc-hash"),
        not(feature = "ahash"),
        not(feature = "std-hash")
    ),
    feature = "std-hash",
    all(feature = "rustc-hash", feature = "ahash"),
))]
mod backend {
    pub type FastMap<K, V> = std::collections::HashMap<K, V>;
    pub type FastSet<K> = std::collections::HashSet<K>;
}

/// Hash map used for bitmap words, tick lookups and pool de-duplication.
pub use backend::FastMap;
/// Hash set counterpart of [`FastMap`].
pub use backend::FastSet;
