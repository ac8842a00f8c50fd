//! Generation-based deferred reclamation for single-writer, multi-reader data structures.
//!
//! A writer that unlinks an object which lock-free readers may still be
//! dereferencing hands it to a [`GenerationHolder`] instead of dropping it.
//! On its own cadence the writer stamps recently held objects with the current
//! generation and reclaims those whose generation is older than the oldest
//! generation any reader still uses. Both numbers come from an epoch tracker,
//! seen through the [`GenerationSource`] trait.
//!
//! 面向单写多读数据结构的基于代号的延迟回收。
//! 写入者把可能仍被无锁读者访问的对象交给 [`GenerationHolder`]，而不是立即 drop。
//!
//! ```
//! use swmr_generation::{Generation, GenerationHolder, GenerationSource};
//!
//! struct Tracker {
//!     current: Generation,
//!     oldest_used: Generation,
//! }
//!
//! impl GenerationSource for Tracker {
//!     fn current_generation(&self) -> Generation {
//!         self.current
//!     }
//!     fn oldest_used_generation(&self) -> Generation {
//!         self.oldest_used
//!     }
//! }
//!
//! let mut holder = GenerationHolder::new();
//! holder.hold(Box::new(vec![0u8; 128]));
//!
//! // A reader is still operating under generation 1.
//! let mut tracker = Tracker { current: 1, oldest_used: 1 };
//! holder.maintain(&tracker);
//! assert_eq!(holder.aging_len(), 1);
//!
//! // Every reader moved on.
//! tracker.current = 2;
//! tracker.oldest_used = 2;
//! let stats = holder.maintain(&tracker);
//! assert_eq!(stats.freed_objects, 1);
//! assert_eq!(holder.held_bytes(), 0);
//! ```

mod builder;
mod error;
mod generation;
mod held;
mod holder;
mod monitor;
pub(crate) mod sync;

pub use builder::GenerationHolderBuilder;
pub use error::GenerationError;
pub use generation::{Generation, GenerationSource, SignedGeneration, UNSTAMPED, is_older};
pub use held::Reclaimable;
pub use holder::{GenerationHolder, ReclaimStats};
pub use monitor::HeldBytesMonitor;

#[cfg(all(test, not(feature = "loom")))]
mod tests;
