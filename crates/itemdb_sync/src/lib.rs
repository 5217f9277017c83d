//! Appearance-to-item synchronization for itemdb.
//!
//! Derives server item state from client appearance records
//! ([`ThingType`]) and detects drift between the two stores. Projection
//! is deterministic and pure: [`flags_match`] recomputes exactly what
//! [`sync_from_thing`] would write, so the two can never disagree.
//!
//! Sprite identity is content-addressed: the engine hashes the canonical
//! pixels of an appearance's idle frame with MD5, resolving sprite ids
//! through a caller-supplied [`PixelProvider`]. [`CachingPixelProvider`]
//! wraps any provider with an [`LruCache`] for repeated lookups.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod engine;
mod hash;
mod lru;
mod thing;

pub use cache::CachingPixelProvider;
pub use engine::{create_from_thing, flags_match, sync_from_thing, PixelProvider, SyncOptions};
pub use hash::md5_bytes;
pub use lru::LruCache;
pub use thing::{FrameGroup, ThingCategory, ThingType};
