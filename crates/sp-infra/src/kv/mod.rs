mod file;
mod memory;

pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;
