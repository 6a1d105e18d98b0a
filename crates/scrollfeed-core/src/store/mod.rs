//! Store implementations shipped with the core.

mod memory;

pub use memory::MemoryStore;
