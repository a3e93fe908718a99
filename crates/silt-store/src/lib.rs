//! Content-addressed storage for silt.
//!
//! Every payload is stored under the hex digest of its physical bytes, so
//! identical content deduplicates and entries are immutable once written.
//!
//! # Layers
//!
//! - [`Keeper`] — the four-operation backend contract
//!   (`exists`/`save`/`load`/`delete` by opaque string key)
//! - [`MemoryKeeper`], [`DriveKeeper`] — reference backends
//! - [`Store`] — content-addressed push/pull/pop over a keeper, plus tapped
//!   views that layer transforms without touching the underlying store
//! - [`Link`] — marker indirection: address content by caller-chosen values
//!   instead of its digest
//!
//! # Design Rules
//!
//! 1. Entries are immutable once written; `push` is idempotent.
//! 2. A content key is a function of the physically stored bytes, so the
//!    same logical value pushed through different transform pipelines gets
//!    different keys.
//! 3. No locking here beyond what each keeper provides: racing pushes of
//!    identical content are harmless duplicate writes of identical bytes.
//! 4. Errors propagate; nothing is swallowed at this layer.

pub mod drive;
pub mod error;
pub mod keeper;
pub mod link;
pub mod memory;
pub mod store;

pub use drive::DriveKeeper;
pub use error::{StoreError, StoreResult};
pub use keeper::Keeper;
pub use link::Link;
pub use memory::MemoryKeeper;
pub use store::Store;
