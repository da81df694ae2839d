//! Faster hasher builders for [`Set`](crate::set::Set).
//!
//! The default [`RandomState`](std::collections::hash_map::RandomState) is
//! resistant to collision attacks but comparatively slow. When keys are not
//! attacker-controlled, one of these aliases can be used instead:
//!
//! - `fxhash` feature: `FxSet` hashes with `rustc-hash`
//! - `ahash` feature: `ASet` hashes with `ahash`
//!
//! `FxBuildHasher` has no per-process seed, so `FxSet` iteration order is
//! reproducible between runs (it is still not sorted). `ahash` keeps a
//! random seed.
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(feature = "fxhash")]
//! # {
//! use guarded_set::hash::FxSet;
//!
//! let set: FxSet<u64> = FxSet::default();
//! set.batch_add([1, 2, 3]);
//! assert!(set.contains(&2));
//! # }
//! ```

#[cfg(any(feature = "fxhash", feature = "ahash"))]
use crate::{lock::Synchronized, set::Set};

/// A [`Set`] hashing with [`rustc_hash::FxBuildHasher`].
#[cfg(feature = "fxhash")]
pub type FxSet<T, P = Synchronized> = Set<T, P, rustc_hash::FxBuildHasher>;

/// A [`Set`] hashing with [`ahash::RandomState`].
#[cfg(feature = "ahash")]
pub type ASet<T, P = Synchronized> = Set<T, P, ahash::RandomState>;
