//! Two-tier cache bridge for silt.
//!
//! A [`Bridge`] composes a slow, authoritative `src` store with a fast `dst`
//! store. Reads prefer `dst` and lazily backfill it from `src` on miss;
//! writes go to `src` first (the durability-determining write) and only then
//! populate `dst`. The fast tier holds each cached value behind a
//! [`silt_store::Link`] keyed by the caller's key, so arbitrary keys map
//! cleanly into the content-addressed fast store.
//!
//! There is no eager warming, no TTL, and no eviction here — the fast tier
//! is bounded by its own keeper's policy or assumed large enough.

pub mod bridge;

pub use bridge::Bridge;
