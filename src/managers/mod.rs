// State managers
// Managers own persisted page state: folder expansion and the cached snapshot.

pub mod expansion_manager;
pub mod snapshot_cache;
