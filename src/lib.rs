//! # guarded-set
//!
//! A hash set with a per-instance lock policy and alias-aware set algebra.
//!
//! ## Overview
//!
//! - **Lock policies**: [`lock::Synchronized`] (reader/writer locking) and
//!   [`lock::Unsynchronized`] (no synchronization, single thread), chosen at
//!   construction and fixed for the life of the set
//! - **Mutation and queries**: `add`, `batch_add`, `remove`, `clear`,
//!   `contains`, `size`, `slice`
//! - **Bulk access**: `iterator`, `lock_func`, `rlock_func` keep one lock for
//!   a whole caller closure
//! - **Set algebra**: `union`, `diff`, `inter`, `complement`, `equal`,
//!   `is_subset`, safe to call with the same set on both sides
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`set::Set`]
//! - `rayon`: parallel traversal and batch insertion
//! - `fxhash`: `hash::FxSet` alias using `rustc-hash`
//! - `ahash`: `hash::ASet` alias using `ahash`
//! - `full`: Enable all features
//!
//! ## Logging
//!
//! Operations report through the [`log`] facade at `trace` level (algebra,
//! bulk inserts, clears) and `debug` level (policy conversions). Install any
//! `log` backend to see them.
//!
//! ## Example
//!
//! ```rust
//! use guarded_set::prelude::*;
//!
//! let left: SyncSet<i32> = [1, 2, 3].into_iter().collect();
//! let right: SyncSet<i32> = [2, 3, 4].into_iter().collect();
//!
//! let mut union = left.union(&right).slice();
//! union.sort_unstable();
//! assert_eq!(union, vec![1, 2, 3, 4]);
//! assert_eq!(left.diff(&right).slice(), vec![1]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use guarded_set::prelude::*;
/// ```
pub mod prelude {
    pub use crate::lock::{LockPolicy, Synchronized, Unsynchronized};
    pub use crate::set::{IntSet, LocalSet, Set, StrSet, SyncSet};

    #[cfg(feature = "ahash")]
    pub use crate::hash::ASet;
    #[cfg(feature = "fxhash")]
    pub use crate::hash::FxSet;
}

pub mod hash;
pub mod lock;
pub mod set;
