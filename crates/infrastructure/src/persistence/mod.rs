//! File-backed persistence adapters.

mod profile_cache;

pub use profile_cache::{CACHE_FILE_NAME, FileProfileCache};
