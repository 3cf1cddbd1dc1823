//! Service layer for the gift resource.
//! - `GiftStore` keeps the authoritative in-memory map.
//! - Snapshot persistence and caller identity are injected collaborators.

pub mod errors;
pub mod file;
pub mod gifts;
pub mod identity;
pub mod pagination;
pub mod runtime;
pub mod storage;
