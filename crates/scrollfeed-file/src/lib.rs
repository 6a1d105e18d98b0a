//! scrollfeed-file - Filesystem-backed feed store.

mod store;

pub use store::FileStore;
